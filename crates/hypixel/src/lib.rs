//! # Codebrew Hypixel
//!
//! Thin client for the two upstream services the stat commands depend on:
//!
//! - the Mojang profile API, which resolves a player name to a UUID
//! - the Hypixel public API, which serves player and guild statistics
//!
//! Every call is a single attempt with the transport's default timeout.

pub mod client;
pub mod error;
pub mod models;

pub use client::{HypixelClient, HypixelEndpoints};
pub use error::{HypixelError, HypixelResult};
