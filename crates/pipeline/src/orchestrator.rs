//! Pipeline orchestration: cache, retry, rate limiting, and rendering.
//!
//! One logical thread of execution drives the stages strictly in order:
//! locate -> parse -> synthesize -> render. The cache and rate limiter
//! are owned here and passed nowhere else; there are no ambient globals.
//! Each run carries a generation token so a run that finished after a
//! newer navigation started discards its result instead of rendering a
//! stale panel.

use chrono::Datelike;

use lotlens_core::{AppConfig, Error, RateLimiter, ResultCache};
use lotlens_scrape::{ListingPage, VehicleRecord, build_research_links, estimate_market};

use crate::nav::{self, NavigationWatcher};
use crate::panel::{self, Notification};

/// A snapshot of the page the host wants analyzed.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

/// Observable pipeline stage, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Extracting,
    RateCheck,
    Synthesizing,
    Rendering,
    Failed,
}

/// Token identifying one pipeline run; stale tokens discard their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub enum RunResult {
    /// Panel rendered (freshly or from cache).
    Rendered(RunOutcome),
    /// URL is not a listing view; nothing to do.
    NotListing,
    /// A newer navigation superseded this run; result discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub panel_html: String,
    /// Present for fresh runs; cache hits return only the rendered HTML.
    pub record: Option<VehicleRecord>,
    pub from_cache: bool,
}

/// The orchestrator: owns all shared mutable state of the pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: AppConfig,
    cache: ResultCache,
    limiter: RateLimiter,
    generation: u64,
    state: RunState,
}

impl Pipeline {
    /// Build a pipeline with cache and rate limiter sized from config.
    pub fn new(config: AppConfig) -> Self {
        let cache = ResultCache::new(config.cache_capacity, config.cache_ttl());
        let limiter = RateLimiter::new(config.min_interval());
        Self { config, cache, limiter, generation: 0, state: RunState::Idle }
    }

    /// Current observable stage.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Build a navigation watcher using the configured debounce window.
    ///
    /// Hosts feed raw location values to the watcher and hand anything it
    /// reports to [`Pipeline::process`].
    pub fn watcher(&self) -> NavigationWatcher {
        NavigationWatcher::new(self.config.debounce())
    }

    /// Start a new run, invalidating any run still in flight.
    pub fn begin_run(&mut self) -> RunToken {
        self.generation += 1;
        RunToken(self.generation)
    }

    fn is_current(&self, token: RunToken) -> bool {
        token.0 == self.generation
    }

    /// Convenience: begin a run and drive it to completion.
    pub async fn process(&mut self, snapshot: &PageSnapshot) -> Result<RunResult, Error> {
        let token = self.begin_run();
        self.run(token, snapshot).await
    }

    /// Drive one pipeline run for a navigation event.
    ///
    /// Stage order follows the state machine: cache check, extraction
    /// with bounded retry, rate check, link synthesis, render. Any error
    /// leaves the pipeline in `Failed` and maps to a notification via
    /// [`Pipeline::notification_for`].
    pub async fn run(&mut self, token: RunToken, snapshot: &PageSnapshot) -> Result<RunResult, Error> {
        let result = self.run_stages(token, snapshot).await;
        self.state = match &result {
            Ok(_) => RunState::Idle,
            Err(_) => RunState::Failed,
        };
        result
    }

    /// Map a pipeline error to the transient toast the host should show.
    pub fn notification_for(&self, error: &Error) -> Notification {
        panel::render_notification(error.category())
    }

    /// Reset from `Failed` back to `Idle` once the notification is shown.
    pub fn acknowledge_failure(&mut self) {
        if self.state == RunState::Failed {
            self.state = RunState::Idle;
        }
    }

    async fn run_stages(&mut self, token: RunToken, snapshot: &PageSnapshot) -> Result<RunResult, Error> {
        let url = nav::canonicalize(&snapshot.url)?;
        if !nav::is_listing_url(&url) {
            tracing::debug!("not a listing view, ignoring: {}", url);
            return Ok(RunResult::NotListing);
        }
        if snapshot.html.is_empty() {
            return Err(Error::InvalidInput("page snapshot has no HTML".into()));
        }

        let key = url.to_string();

        self.state = RunState::Extracting;
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("cache hit for {}", key);
            self.state = RunState::Rendering;
            if !self.is_current(token) {
                return Ok(RunResult::Stale);
            }
            return Ok(RunResult::Rendered(RunOutcome { panel_html: cached, record: None, from_cache: true }));
        }

        let record = self.extract_with_retry(&snapshot.html).await?;
        tracing::info!("extracted listing: {}", record.summary());

        self.state = RunState::RateCheck;
        self.limiter.check()?;

        self.state = RunState::Synthesizing;
        let links = build_research_links(&record, &self.config.fallback_zip);
        let estimate = estimate_market(&record, chrono::Utc::now().year());

        self.state = RunState::Rendering;
        if !self.is_current(token) {
            tracing::debug!("run superseded before render, discarding: {}", key);
            return Ok(RunResult::Stale);
        }

        let panel_html = panel::render_panel(&record, &estimate, &links);
        self.cache.insert(key, panel_html.clone());
        self.limiter.mark();

        Ok(RunResult::Rendered(RunOutcome { panel_html, record: Some(record), from_cache: false }))
    }

    /// Bounded extraction retry with a fixed inter-attempt delay.
    async fn extract_with_retry(&mut self, html: &str) -> Result<VehicleRecord, Error> {
        let attempts = self.config.retry_attempts;
        for attempt in 1..=attempts {
            if let Some(record) = ListingPage::parse(html).record() {
                return Ok(record);
            }
            tracing::debug!("extraction attempt {}/{} found no listing", attempt, attempts);
            if attempt < attempts {
                tokio::time::sleep(self.config.retry_delay()).await;
            }
        }
        Err(Error::NoListing(format!("no vehicle title matched after {attempts} attempts")))
    }
}
