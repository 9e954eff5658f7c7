//! Watch list — the all-same-digit numbers (`0000`, `1111`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  draw::{DrawSlot, WinningNumber},
  gap::{days_between, last_hits},
  ledger::Snapshot,
};

/// Hit status of one watch pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRecord {
  pub pattern:             WinningNumber,
  pub has_ever_hit:        bool,
  pub last_hit_timestamp:  Option<DrawSlot>,
  pub days_since_last_hit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WatchAnalyzer;

impl WatchAnalyzer {
  /// One record per pattern, in ascending pattern order.
  pub fn analyze(&self, snapshot: &Snapshot, as_of: NaiveDate) -> Vec<WatchRecord> {
    let variant = snapshot.variant();
    let last = last_hits(snapshot.up_to(as_of), variant);

    variant
      .watch_patterns()
      .into_iter()
      .map(|pattern| {
        let last_hit = last[usize::from(pattern.value())];
        WatchRecord {
          pattern,
          has_ever_hit: last_hit.is_some(),
          last_hit_timestamp: last_hit,
          days_since_last_hit: last_hit.map(|slot| days_between(as_of, slot)),
        }
      })
      .collect()
  }
}
