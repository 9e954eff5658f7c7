//! Streak analysis — numbers drawn frequently inside a trailing window.

use std::{cmp::Reverse, collections::HashMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  config::StreakConfig,
  draw::{DrawSlot, WinningNumber},
  ledger::Snapshot,
};

/// How hot a streak is; a step function of the hit count.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Heat {
  Cooling,
  Warm,
  Hot,
}

impl StreakConfig {
  pub fn classify(&self, hit_count: u32) -> Heat {
    if hit_count >= self.hot_min_hits {
      Heat::Hot
    } else if hit_count >= self.warm_min_hits {
      Heat::Warm
    } else {
      Heat::Cooling
    }
  }
}

/// One number's activity within the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
  pub number:             WinningNumber,
  pub hit_count:          u32,
  pub window_days:        u32,
  /// Human-readable rate, e.g. `"3 hits in 30 days"`.
  pub frequency:          String,
  pub classification:     Heat,
  pub last_hit_timestamp: DrawSlot,
  pub is_active:          bool,
}

fn frequency_text(hits: u32, window_days: u32) -> String {
  let noun = if hits == 1 { "hit" } else { "hits" };
  format!("{hits} {noun} in {window_days} days")
}

/// Counts hits per number over `[as_of - window_days, as_of]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakAnalyzer {
  config: StreakConfig,
}

impl StreakAnalyzer {
  pub fn new(config: StreakConfig) -> Self { Self { config } }

  /// Numbers with at least one hit in the window, busiest first; ties by
  /// most recent hit, then ascending number.
  pub fn analyze(&self, snapshot: &Snapshot, as_of: NaiveDate) -> Vec<StreakRecord> {
    let window_days = self.config.window_days;
    let start = as_of
      .checked_sub_days(Days::new(u64::from(window_days)))
      .unwrap_or(NaiveDate::MIN);

    let draws = snapshot.up_to(as_of);
    let first = draws.partition_point(|d| d.draw_date < start);

    let mut tally: HashMap<&WinningNumber, (u32, DrawSlot)> = HashMap::new();
    for draw in &draws[first..] {
      let entry = tally.entry(&draw.winning_number).or_insert((0, draw.slot()));
      entry.0 += 1;
      entry.1 = draw.slot();
    }

    let mut records: Vec<StreakRecord> = tally
      .into_iter()
      .map(|(number, (hit_count, last_hit))| StreakRecord {
        number: number.clone(),
        hit_count,
        window_days,
        frequency: frequency_text(hit_count, window_days),
        classification: self.config.classify(hit_count),
        last_hit_timestamp: last_hit,
        is_active: hit_count > 0,
      })
      .collect();

    records.sort_by(|a, b| {
      (Reverse(a.hit_count), Reverse(a.last_hit_timestamp), &a.number).cmp(&(
        Reverse(b.hit_count),
        Reverse(b.last_hit_timestamp),
        &b.number,
      ))
    });
    records
  }
}
