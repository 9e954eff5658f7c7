//! CSV history import.
//!
//! Expects a headered file with the columns
//! `variant,draw_date,session,winning_number,supplemental_digit`; the last
//! column may be empty. Rows go through the same path as `POST /api/draws`,
//! so the store and the ledger stay in step.

use std::io::Read;

use anyhow::{Context as _, bail};
use pickstat_api::{ApiError, AppState};
use pickstat_core::{draw::NewDraw, store::DrawStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  pub recorded: usize,
  /// Rows whose slot was already recorded.
  pub skipped:  usize,
}

/// Record every row of `reader`. Stops at the first malformed row; rows
/// before it stay recorded.
pub async fn import_csv<S, R>(state: &AppState<S>, reader: R) -> anyhow::Result<ImportSummary>
where
  S: DrawStore,
  R: Read,
{
  let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
  let mut summary = ImportSummary::default();

  for (idx, row) in rdr.deserialize::<NewDraw>().enumerate() {
    // Line 1 is the header.
    let line = idx + 2;
    let input = row.with_context(|| format!("line {line}: malformed row"))?;

    match state.record_draw(input).await {
      Ok(_) => summary.recorded += 1,
      Err(ApiError::Conflict(msg)) => {
        tracing::debug!(line, "{msg}; skipping");
        summary.skipped += 1;
      }
      Err(e) => bail!("line {line}: {e}"),
    }
  }

  Ok(summary)
}
