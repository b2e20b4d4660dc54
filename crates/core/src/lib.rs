//! Core types and shared state for lotlens.
//!
//! This crate provides:
//! - In-memory result cache with TTL and capacity eviction
//! - Minimum-interval rate limiter
//! - Unified error types
//! - Configuration loading and validation
//! - Preferences store

pub mod cache;
pub mod config;
pub mod error;
pub mod prefs;
pub mod rate;

pub use cache::ResultCache;
pub use config::AppConfig;
pub use error::{Error, ErrorCategory};
pub use prefs::PrefsStore;
pub use rate::RateLimiter;
