//! Handler for `GET /search/{variant}?q=...`.
//!
//! Matches the query as a substring of each record's number.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::NaiveDate;
use pickstat_core::{detail::SearchResults, store::DrawStore};
use serde::Deserialize;

use crate::{
  AppState,
  analysis::{parse_variant, resolve_as_of},
  error::ApiError,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  /// Substring to look for, e.g. `48`. Required and non-blank.
  #[serde(default)]
  pub q:     String,
  pub as_of: Option<NaiveDate>,
}

/// `GET /search/{variant}?q=...[&as_of=...]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  let results = state.dashboard.search(
    parse_variant(&variant)?,
    &params.q,
    resolve_as_of(params.as_of),
  )?;
  Ok(Json(results))
}
