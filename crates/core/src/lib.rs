//! # Codebrew Core
//!
//! Platform-independent building blocks of the Codebrew bot: the error type,
//! the domain models, and the small pure computations that command handlers
//! render into chat messages.

/// Calendar rendering for the `calendar` command
pub mod calendar;
/// Wall-clock formatting in named time zones
pub mod clock;
/// Reminder duration tokens
pub mod duration;
/// Error types shared across crates
pub mod errors;
/// Domain models
pub mod models;
/// Game statistic formulas
pub mod stats;
/// Key-value store abstraction for per-user state
pub mod store;
