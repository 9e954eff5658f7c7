//! Handler for `POST /calculate-roi`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use pickstat_core::{
  roi::{RoiCalculation, RoiParams},
  store::DrawStore,
};

use crate::{AppState, error::ApiError};

/// `POST /calculate-roi` — body: [`RoiParams`].
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<RoiParams>, JsonRejection>,
) -> Result<Json<RoiCalculation>, ApiError>
where
  S: DrawStore + 'static,
{
  let Json(params) = body?;
  Ok(Json(state.dashboard.calculate_roi(&params)?))
}
