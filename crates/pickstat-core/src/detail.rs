//! Aggregate read models returned by the [`Dashboard`](crate::dashboard::Dashboard).

use serde::{Deserialize, Serialize};

use crate::{
  draw::WinningNumber,
  gap::GapRecord,
  repeat::RepeatRecord,
  streak::StreakRecord,
  watch::WatchRecord,
};

/// Any single analysis record, discriminated by an explicit `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumberDetail {
  Gap(GapRecord),
  Streak(StreakRecord),
  Repeat(RepeatRecord),
  Watch(WatchRecord),
}

/// The longest current drought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drought {
  pub number: WinningNumber,
  /// `None` when the number has never been drawn.
  pub days:   Option<i64>,
}

/// The busiest number in the streak window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotStreak {
  pub number:    WinningNumber,
  pub hit_count: u32,
  pub frequency: String,
}

/// Headline figures for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
  pub total_numbers:   usize,
  /// Numbers whose gap severity is `Medium` or worse.
  pub total_gaps:      usize,
  pub active_streaks:  usize,
  /// Repeat events inside the repeat lookback window.
  pub recent_repeats:  usize,
  pub longest_drought: Option<Drought>,
  pub hottest_streak:  Option<HotStreak>,
}

/// Analysis records whose number contains a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
  pub gaps:    Vec<GapRecord>,
  pub streaks: Vec<StreakRecord>,
  pub repeats: Vec<RepeatRecord>,
}
