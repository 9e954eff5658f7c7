//! The `DrawStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `pickstat-store-sqlite`).
//! The ledger stays in memory; a store only has to keep what was recorded and
//! hand it back on startup so the ledger can be rebuilt with
//! [`Ledger::restore`](crate::ledger::Ledger::restore).

use std::future::Future;

use crate::draw::{Draw, GameVariant};

/// Abstraction over a durable draw history.
///
/// Writes are append-only. A store must reject a second draw for a
/// `(variant, date, session)` slot it already holds.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DrawStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist an already validated and stamped draw, returning it unchanged.
  fn insert_draw(
    &self,
    draw: Draw,
  ) -> impl Future<Output = Result<Draw, Self::Error>> + Send + '_;

  /// Every stored draw, oldest first, optionally restricted to one variant.
  fn list_draws(
    &self,
    variant: Option<GameVariant>,
  ) -> impl Future<Output = Result<Vec<Draw>, Self::Error>> + Send + '_;

  /// Number of stored draws, optionally restricted to one variant.
  fn count_draws(
    &self,
    variant: Option<GameVariant>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
