//! The pickstat server: configuration, ledger hydration, and the HTTP app.

pub mod config;
pub mod import;

use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use pickstat_api::AppState;
use pickstat_core::{config::AnalysisConfig, dashboard::Dashboard, store::DrawStore};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

/// Build the dashboard and replay every stored draw into its ledger.
pub async fn hydrate<S>(store: S, analysis: AnalysisConfig) -> anyhow::Result<AppState<S>>
where
  S: DrawStore,
{
  let dashboard = Dashboard::new(analysis).context("invalid analysis configuration")?;

  let draws = store
    .list_draws(None)
    .await
    .context("failed to read stored draws")?;
  let restored = dashboard
    .ledger()
    .restore(draws)
    .context("stored draws are inconsistent")?;
  tracing::info!(draws = restored, "ledger hydrated");

  Ok(AppState::new(Arc::new(dashboard), Arc::new(store)))
}

/// The full application: the API under `/api`, with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: DrawStore + 'static,
{
  Router::new()
    .nest("/api", pickstat_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
