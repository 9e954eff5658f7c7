//! JSON REST API for pickstat.
//!
//! Exposes an axum [`Router`] over a [`Dashboard`](pickstat_core::dashboard::Dashboard)
//! and any [`pickstat_core::store::DrawStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pickstat_api::api_router(state.clone()))
//! ```

pub mod analysis;
pub mod draws;
pub mod error;
pub mod roi;
pub mod search;
pub mod state;

use axum::{
  Router,
  routing::{get, post},
};
use pickstat_core::store::DrawStore;

pub use error::ApiError;
pub use state::AppState;

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Unmatched paths answer 404 with the usual
/// `{"message"}` body.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: DrawStore + 'static,
{
  Router::new()
    // Analyses
    .route("/gaps/{variant}", get(analysis::gaps::<S>))
    .route("/streaks/{variant}", get(analysis::streaks::<S>))
    .route("/repeats/{variant}", get(analysis::repeats::<S>))
    .route("/watch/{variant}", get(analysis::watch::<S>))
    .route("/stats/{variant}", get(analysis::stats::<S>))
    .route("/numbers/{variant}/{number}", get(analysis::details::<S>))
    // Search
    .route("/search/{variant}", get(search::handler::<S>))
    // ROI
    .route("/calculate-roi", post(roi::handler::<S>))
    // Draws
    .route("/draws", post(draws::create::<S>))
    .route("/draws/{variant}", get(draws::list::<S>))
    .fallback(not_found)
    .with_state(state)
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
  ApiError::NotFound(format!("no route for {}", uri.path()))
}
