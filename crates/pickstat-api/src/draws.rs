//! Handlers for `/draws` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/draws` | Body: [`NewDraw`]; returns 201 + stored draw, 409 if the slot is taken |
//! | `GET`  | `/draws/{variant}` | `?limit` (default 100); most recent first |

use axum::{
  Json,
  extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use pickstat_core::{
  dashboard::DEFAULT_DRAW_LIMIT,
  draw::{Draw, NewDraw},
  store::DrawStore,
};
use serde::Deserialize;

use crate::{AppState, analysis::parse_variant, error::ApiError};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /draws` — returns 201 + the recorded [`Draw`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewDraw>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DrawStore + 'static,
{
  let Json(input) = body?;
  let draw = state.record_draw(input).await?;
  Ok((StatusCode::CREATED, Json(draw)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default = "default_limit")]
  pub limit: usize,
}

fn default_limit() -> usize { DEFAULT_DRAW_LIMIT }

/// `GET /draws/{variant}[?limit=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Draw>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  Ok(Json(
    state
      .dashboard
      .recent_draws(parse_variant(&variant)?, params.limit),
  ))
}
