//! Shared handler state and the draw recording path.

use std::sync::Arc;

use pickstat_core::{
  dashboard::Dashboard,
  draw::{Draw, NewDraw},
  store::DrawStore,
};
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub dashboard: Arc<Dashboard>,
  pub store:     Arc<S>,
  /// Serialises recorders so the store and the ledger never diverge.
  write_lock:    Arc<Mutex<()>>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      dashboard:  Arc::clone(&self.dashboard),
      store:      Arc::clone(&self.store),
      write_lock: Arc::clone(&self.write_lock),
    }
  }
}

impl<S: DrawStore> AppState<S> {
  pub fn new(dashboard: Arc<Dashboard>, store: Arc<S>) -> Self {
    Self { dashboard, store, write_lock: Arc::new(Mutex::new(())) }
  }

  /// Record a draw: check it against the current ledger, persist it, then
  /// publish it so queries see it.
  ///
  /// A duplicate slot is reported as [`ApiError::Conflict`] before anything is
  /// written. A store that rejects a draw the ledger accepted has diverged
  /// from it; that surfaces as [`ApiError::Store`].
  pub async fn record_draw(&self, input: NewDraw) -> Result<Draw, ApiError> {
    let _guard = self.write_lock.lock().await;
    let ledger = self.dashboard.ledger();

    let staged = ledger.stage(input).inspect_err(|e| {
      tracing::debug!(error = %e, "draw rejected");
    })?;

    let stored = self.store.insert_draw(staged).await.map_err(|e| {
      tracing::error!(error = %e, "failed to persist draw");
      ApiError::store(e)
    })?;

    let draw = ledger.publish(stored)?;
    tracing::info!(
      variant = %draw.variant,
      date = %draw.draw_date,
      session = %draw.session,
      number = %draw.winning_number,
      "draw recorded"
    );
    Ok(draw)
  }
}
