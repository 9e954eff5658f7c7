//! Core types and analyses for the pickstat lottery statistics engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it holds the draw ledger, the analyzers,
//! and the [`Dashboard`](dashboard::Dashboard) facade that ties them together.

pub mod config;
pub mod dashboard;
pub mod detail;
pub mod draw;
pub mod error;
pub mod gap;
pub mod ledger;
pub mod repeat;
pub mod roi;
pub mod store;
pub mod streak;
pub mod watch;

pub use error::{Error, Result};
