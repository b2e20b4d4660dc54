//! Pipeline orchestration for lotlens.
//!
//! This crate wires the extraction heuristics to the policy layer:
//! navigation watching and debouncing, the cache/retry/rate-limit state
//! machine, and panel/notification rendering. The host feeds it page
//! snapshots and mounts whatever HTML comes back.

pub mod nav;
pub mod orchestrator;
pub mod panel;

pub use nav::{NavigationWatcher, canonicalize, is_listing_url};
pub use orchestrator::{PageSnapshot, Pipeline, RunOutcome, RunResult, RunState, RunToken};
pub use panel::{Notification, render_notification, render_panel};
