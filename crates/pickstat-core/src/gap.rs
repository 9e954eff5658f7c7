//! Gap analysis — how long each number has gone without being drawn.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  config::SeverityThresholds,
  draw::{Draw, DrawSlot, GameVariant, WinningNumber},
  ledger::Snapshot,
};

/// Drought severity, ascending.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Low,
  Medium,
  High,
  Critical,
}

impl SeverityThresholds {
  /// Map a gap to its tier. A number that has never hit is unbounded and
  /// therefore `Critical`.
  pub fn classify(&self, days_since_last_hit: Option<i64>) -> Severity {
    match days_since_last_hit {
      None => Severity::Critical,
      Some(d) if d > self.critical_after_days => Severity::Critical,
      Some(d) if d > self.high_after_days => Severity::High,
      Some(d) if d > self.medium_after_days => Severity::Medium,
      Some(_) => Severity::Low,
    }
  }
}

/// The drought state of one number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRecord {
  pub number:              WinningNumber,
  /// `None` when the number has never been drawn.
  pub days_since_last_hit: Option<i64>,
  pub last_hit_timestamp:  Option<DrawSlot>,
  pub severity_tier:       Severity,
}

impl GapRecord {
  /// Sort key: longest drought first, never-hit ahead of everything.
  fn drought_key(&self) -> Reverse<i64> {
    Reverse(self.days_since_last_hit.unwrap_or(i64::MAX))
  }
}

/// The most recent slot at which each number of `variant` was drawn, indexed
/// by [`WinningNumber::value`]. One pass over `draws`, which must be ascending.
pub(crate) fn last_hits(draws: &[Draw], variant: GameVariant) -> Vec<Option<DrawSlot>> {
  let mut last = vec![None; variant.space_size()];
  for draw in draws {
    last[usize::from(draw.winning_number.value())] = Some(draw.slot());
  }
  last
}

pub(crate) fn days_between(as_of: NaiveDate, slot: DrawSlot) -> i64 {
  (as_of - slot.date).num_days()
}

/// Computes a [`GapRecord`] for every number of a variant's space.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapAnalyzer {
  thresholds: SeverityThresholds,
}

impl GapAnalyzer {
  pub fn new(thresholds: SeverityThresholds) -> Self { Self { thresholds } }

  /// Every number's drought as of `as_of`, longest first; ties by ascending
  /// number.
  pub fn analyze(&self, snapshot: &Snapshot, as_of: NaiveDate) -> Vec<GapRecord> {
    let variant = snapshot.variant();
    let last = last_hits(snapshot.up_to(as_of), variant);

    let mut records: Vec<GapRecord> = variant
      .numbers()
      .zip(last)
      .map(|(number, last_hit)| {
        let days = last_hit.map(|slot| days_between(as_of, slot));
        GapRecord {
          number,
          days_since_last_hit: days,
          last_hit_timestamp: last_hit,
          severity_tier: self.thresholds.classify(days),
        }
      })
      .collect();

    // `numbers()` is already ascending, so a stable sort keeps number order
    // within equal gaps.
    records.sort_by_key(GapRecord::drought_key);
    records
  }
}
