//! Tunable thresholds for the analyzers.
//!
//! The defaults reproduce the dashboard's historical cut points. None of them
//! is a validated business rule, so every value can be overridden from the
//! server configuration file.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Gap severity cut points, in days since the last hit. Comparisons are
/// strictly greater-than.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
  pub medium_after_days:   i64,
  pub high_after_days:     i64,
  pub critical_after_days: i64,
}

impl Default for SeverityThresholds {
  fn default() -> Self {
    Self { medium_after_days: 200, high_after_days: 400, critical_after_days: 600 }
  }
}

/// Trailing-window parameters for streak detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
  pub window_days:   u32,
  pub hot_min_hits:  u32,
  pub warm_min_hits: u32,
}

impl Default for StreakConfig {
  fn default() -> Self { Self { window_days: 30, hot_min_hits: 8, warm_min_hits: 5 } }
}

/// Lookback parameters for repeat detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
  /// Only draws within this many days of the analysis date are examined.
  pub lookback_days:  u32,
  /// Width of the rolling calendar window for `WithinWeek` repeats.
  pub week_span_days: u32,
}

impl Default for RepeatConfig {
  fn default() -> Self { Self { lookback_days: 30, week_span_days: 7 } }
}

/// Every analyzer threshold in one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
  pub severity: SeverityThresholds,
  pub streak:   StreakConfig,
  pub repeat:   RepeatConfig,
}

impl AnalysisConfig {
  /// Reject configurations whose step functions would not be monotonic.
  pub fn validate(&self) -> Result<()> {
    let s = &self.severity;
    if !(0 <= s.medium_after_days
      && s.medium_after_days < s.high_after_days
      && s.high_after_days < s.critical_after_days)
    {
      return Err(Error::InvalidConfig(format!(
        "severity thresholds must ascend: {} < {} < {}",
        s.medium_after_days, s.high_after_days, s.critical_after_days
      )));
    }
    if self.streak.window_days == 0 {
      return Err(Error::InvalidConfig("streak window must be at least one day".into()));
    }
    if !(0 < self.streak.warm_min_hits && self.streak.warm_min_hits < self.streak.hot_min_hits) {
      return Err(Error::InvalidConfig(format!(
        "streak thresholds must ascend: 0 < warm ({}) < hot ({})",
        self.streak.warm_min_hits, self.streak.hot_min_hits
      )));
    }
    if self.repeat.lookback_days == 0 || self.repeat.week_span_days == 0 {
      return Err(Error::InvalidConfig("repeat windows must be at least one day".into()));
    }
    Ok(())
  }
}
