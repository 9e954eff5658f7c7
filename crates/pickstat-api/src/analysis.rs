//! Handlers for the per-variant analysis endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/gaps/{variant}` | `?as_of`, `?limit`; longest drought first |
//! | `GET`  | `/streaks/{variant}` | `?as_of`; most hits first |
//! | `GET`  | `/repeats/{variant}` | `?as_of`; most recent event first |
//! | `GET`  | `/watch/{variant}` | `?as_of`; one record per pattern |
//! | `GET`  | `/stats/{variant}` | `?as_of`; headline figures |
//! | `GET`  | `/numbers/{variant}/{number}` | `?as_of`; every record for one number |
//!
//! `as_of` is a `YYYY-MM-DD` date and defaults to today (UTC).

use axum::{
  Json,
  extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::{NaiveDate, Utc};
use pickstat_core::{
  detail::{GameStats, NumberDetail},
  draw::GameVariant,
  gap::GapRecord,
  repeat::RepeatRecord,
  store::DrawStore,
  streak::StreakRecord,
  watch::WatchRecord,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
  /// Ignore draws after this date. Defaults to today (UTC).
  pub as_of: Option<NaiveDate>,
  /// Truncate the result list. Only honoured by `/gaps`.
  pub limit: Option<usize>,
}

impl AnalysisParams {
  pub fn as_of(&self) -> NaiveDate { resolve_as_of(self.as_of) }
}

pub(crate) fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
  as_of.unwrap_or_else(|| Utc::now().date_naive())
}

pub(crate) fn parse_variant(raw: &str) -> Result<GameVariant, ApiError> {
  Ok(GameVariant::parse(raw)?)
}

/// `GET /gaps/{variant}[?as_of=...][&limit=...]`
pub async fn gaps<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<Vec<GapRecord>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  let mut gaps = state.dashboard.gaps(parse_variant(&variant)?, params.as_of());
  if let Some(limit) = params.limit {
    gaps.truncate(limit);
  }
  Ok(Json(gaps))
}

/// `GET /streaks/{variant}[?as_of=...]`
pub async fn streaks<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<Vec<StreakRecord>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  Ok(Json(state.dashboard.streaks(parse_variant(&variant)?, params.as_of())))
}

/// `GET /repeats/{variant}[?as_of=...]`
pub async fn repeats<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<Vec<RepeatRecord>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  Ok(Json(state.dashboard.repeats(parse_variant(&variant)?, params.as_of())))
}

/// `GET /watch/{variant}[?as_of=...]`
pub async fn watch<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<Vec<WatchRecord>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  Ok(Json(state.dashboard.watch(parse_variant(&variant)?, params.as_of())))
}

/// `GET /stats/{variant}[?as_of=...]`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
  Path(variant): Path<String>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<GameStats>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  Ok(Json(state.dashboard.stats(parse_variant(&variant)?, params.as_of())))
}

/// `GET /numbers/{variant}/{number}[?as_of=...]`
pub async fn details<S>(
  State(state): State<AppState<S>>,
  Path((variant, number)): Path<(String, String)>,
  params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<Vec<NumberDetail>>, ApiError>
where
  S: DrawStore + 'static,
{
  let Query(params) = params?;
  let variant = parse_variant(&variant)?;
  Ok(Json(state.dashboard.details(variant, &number, params.as_of())?))
}
