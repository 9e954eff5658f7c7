//! [`Dashboard`] — the query facade over the ledger and the analyzers.
//!
//! Nothing derived is cached: every query takes the current ledger snapshot
//! and recomputes from it, so recording a draw needs no follow-up refresh.

use chrono::NaiveDate;

use crate::{
  Result,
  config::AnalysisConfig,
  detail::{Drought, GameStats, HotStreak, NumberDetail, SearchResults},
  draw::{Draw, GameVariant, NewDraw, WinningNumber},
  gap::{GapAnalyzer, GapRecord, Severity},
  ledger::Ledger,
  repeat::{RepeatAnalyzer, RepeatRecord},
  roi::{self, RoiCalculation, RoiParams},
  streak::{StreakAnalyzer, StreakRecord},
  watch::{WatchAnalyzer, WatchRecord},
};

/// Default page size for [`Dashboard::recent_draws`].
pub const DEFAULT_DRAW_LIMIT: usize = 100;

#[derive(Debug)]
pub struct Dashboard {
  ledger:  Ledger,
  gaps:    GapAnalyzer,
  streaks: StreakAnalyzer,
  repeats: RepeatAnalyzer,
  watch:   WatchAnalyzer,
}

impl Dashboard {
  /// An empty dashboard. Fails if `config` is not internally consistent.
  pub fn new(config: AnalysisConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      ledger: Ledger::new(),
      gaps: GapAnalyzer::new(config.severity),
      streaks: StreakAnalyzer::new(config.streak),
      repeats: RepeatAnalyzer::new(config.repeat),
      watch: WatchAnalyzer,
    })
  }

  pub fn ledger(&self) -> &Ledger { &self.ledger }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Append a draw to the ledger. Subsequent queries see it immediately.
  pub fn record_draw(&self, input: NewDraw) -> Result<Draw> {
    self.ledger.append(input)
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Up to `limit` draws, most recent first.
  pub fn recent_draws(&self, variant: GameVariant, limit: usize) -> Vec<Draw> {
    self
      .ledger
      .all_draws(variant)
      .most_recent_first()
      .take(limit)
      .cloned()
      .collect()
  }

  pub fn gaps(&self, variant: GameVariant, as_of: NaiveDate) -> Vec<GapRecord> {
    self.gaps.analyze(&self.ledger.all_draws(variant), as_of)
  }

  pub fn streaks(&self, variant: GameVariant, as_of: NaiveDate) -> Vec<StreakRecord> {
    self.streaks.analyze(&self.ledger.all_draws(variant), as_of)
  }

  pub fn repeats(&self, variant: GameVariant, as_of: NaiveDate) -> Vec<RepeatRecord> {
    self.repeats.analyze(&self.ledger.all_draws(variant), as_of)
  }

  pub fn watch(&self, variant: GameVariant, as_of: NaiveDate) -> Vec<WatchRecord> {
    self.watch.analyze(&self.ledger.all_draws(variant), as_of)
  }

  /// Headline figures, all computed from one snapshot.
  pub fn stats(&self, variant: GameVariant, as_of: NaiveDate) -> GameStats {
    let snapshot = self.ledger.all_draws(variant);
    let gaps = self.gaps.analyze(&snapshot, as_of);
    let streaks = self.streaks.analyze(&snapshot, as_of);
    let repeats = self.repeats.analyze(&snapshot, as_of);

    GameStats {
      total_numbers:   variant.space_size(),
      total_gaps:      gaps.iter().filter(|g| g.severity_tier >= Severity::Medium).count(),
      active_streaks:  streaks.iter().filter(|s| s.is_active).count(),
      recent_repeats:  repeats.len(),
      longest_drought: gaps.first().map(|g| Drought {
        number: g.number.clone(),
        days:   g.days_since_last_hit,
      }),
      hottest_streak:  streaks.first().map(|s| HotStreak {
        number:    s.number.clone(),
        hit_count: s.hit_count,
        frequency: s.frequency.clone(),
      }),
    }
  }

  /// Gap, streak, and repeat records whose number contains `query`.
  pub fn search(
    &self,
    variant: GameVariant,
    query: &str,
    as_of: NaiveDate,
  ) -> Result<SearchResults> {
    let needle = query.trim();
    if needle.is_empty() {
      return Err(crate::Error::EmptyQuery);
    }
    let matches = |n: &WinningNumber| n.as_str().contains(needle);

    let snapshot = self.ledger.all_draws(variant);
    let mut gaps = self.gaps.analyze(&snapshot, as_of);
    let mut streaks = self.streaks.analyze(&snapshot, as_of);
    let mut repeats = self.repeats.analyze(&snapshot, as_of);
    gaps.retain(|g| matches(&g.number));
    streaks.retain(|s| matches(&s.number));
    repeats.retain(|r| matches(&r.number));

    Ok(SearchResults { gaps, streaks, repeats })
  }

  /// Every analysis record concerning one number.
  pub fn details(
    &self,
    variant: GameVariant,
    number: &str,
    as_of: NaiveDate,
  ) -> Result<Vec<NumberDetail>> {
    let number = WinningNumber::for_variant(variant, number)?;
    let snapshot = self.ledger.all_draws(variant);

    let mut details: Vec<NumberDetail> = self
      .gaps
      .analyze(&snapshot, as_of)
      .into_iter()
      .filter(|g| g.number == number)
      .map(NumberDetail::Gap)
      .collect();
    details.extend(
      self
        .streaks
        .analyze(&snapshot, as_of)
        .into_iter()
        .filter(|s| s.number == number)
        .map(NumberDetail::Streak),
    );
    details.extend(
      self
        .repeats
        .analyze(&snapshot, as_of)
        .into_iter()
        .filter(|r| r.number == number)
        .map(NumberDetail::Repeat),
    );
    details.extend(
      self
        .watch
        .analyze(&snapshot, as_of)
        .into_iter()
        .filter(|w| w.pattern == number)
        .map(NumberDetail::Watch),
    );
    Ok(details)
  }

  pub fn calculate_roi(&self, params: &RoiParams) -> Result<RoiCalculation> {
    roi::calculate(params)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    Error,
    draw::Session,
    ledger::tests::{day, new_draw},
  };

  fn dashboard() -> Dashboard { Dashboard::new(AnalysisConfig::default()).unwrap() }

  fn seed(d: &Dashboard) {
    let v = GameVariant::FourDigit;
    for (date, session, number) in [
      (day(2024, 6, 1), Session::Midday, "4821"),
      (day(2024, 6, 1), Session::Evening, "4821"),
      (day(2024, 6, 3), Session::Midday, "1111"),
      (day(2024, 6, 5), Session::Evening, "4821"),
      (day(2024, 6, 6), Session::Midday, "0482"),
    ] {
      d.record_draw(new_draw(v, date, session, number)).unwrap();
    }
  }

  #[test]
  fn invalid_config_is_rejected() {
    let mut cfg = AnalysisConfig::default();
    cfg.streak.window_days = 0;
    assert!(matches!(Dashboard::new(cfg), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn configured_thresholds_reach_the_analyzers() {
    let mut cfg = AnalysisConfig::default();
    cfg.severity.medium_after_days = 1;
    cfg.severity.high_after_days = 10;
    cfg.severity.critical_after_days = 20;
    let d = Dashboard::new(cfg).unwrap();
    seed(&d);

    let gaps = d.gaps(GameVariant::FourDigit, day(2024, 6, 10));
    let g = gaps.iter().find(|g| g.number.as_str() == "4821").unwrap();
    assert_eq!(g.severity_tier, Severity::Medium);
  }

  #[test]
  fn recorded_draws_are_visible_to_the_next_query() {
    let d = dashboard();
    let v = GameVariant::FourDigit;
    assert!(d.streaks(v, day(2024, 6, 10)).is_empty());
    d.record_draw(new_draw(v, day(2024, 6, 9), Session::Midday, "2024")).unwrap();
    assert_eq!(d.streaks(v, day(2024, 6, 10)).len(), 1);
  }

  #[test]
  fn gaps_are_idempotent() {
    let d = dashboard();
    seed(&d);
    let v = GameVariant::FourDigit;
    assert_eq!(d.gaps(v, day(2024, 6, 10)), d.gaps(v, day(2024, 6, 10)));
  }

  #[test]
  fn stats_summarise_one_snapshot() {
    let d = dashboard();
    seed(&d);
    let stats = d.stats(GameVariant::FourDigit, day(2024, 6, 10));

    assert_eq!(stats.total_numbers, 10_000);
    // Only the three hit numbers are Low; every never-hit number is Critical.
    assert_eq!(stats.total_gaps, 10_000 - 3);
    assert_eq!(stats.active_streaks, 3);
    assert_eq!(stats.recent_repeats, 2);

    let drought = stats.longest_drought.unwrap();
    assert_eq!(drought.number.as_str(), "0000");
    assert_eq!(drought.days, None);

    let hot = stats.hottest_streak.unwrap();
    assert_eq!(hot.number.as_str(), "4821");
    assert_eq!(hot.hit_count, 3);
    assert_eq!(hot.frequency, "3 hits in 30 days");
  }

  #[test]
  fn empty_ledger_stats() {
    let stats = dashboard().stats(GameVariant::ThreeDigit, day(2024, 6, 10));
    assert_eq!(stats.total_numbers, 1_000);
    assert_eq!(stats.active_streaks, 0);
    assert_eq!(stats.recent_repeats, 0);
    assert!(stats.hottest_streak.is_none());
  }

  #[test]
  fn search_filters_by_substring() {
    let d = dashboard();
    seed(&d);
    let found = d.search(GameVariant::FourDigit, " 482 ", day(2024, 6, 10)).unwrap();

    let streaks: Vec<_> = found.streaks.iter().map(|s| s.number.as_str()).collect();
    assert_eq!(streaks, ["4821", "0482"]);
    assert!(found.gaps.iter().all(|g| g.number.as_str().contains("482")));
    assert_eq!(found.gaps.len(), 20);
    assert!(found.repeats.iter().all(|r| r.number.as_str() == "4821"));
  }

  #[test]
  fn search_requires_a_query() {
    let d = dashboard();
    assert!(matches!(
      d.search(GameVariant::FourDigit, "   ", day(2024, 6, 10)),
      Err(Error::EmptyQuery)
    ));
  }

  #[test]
  fn details_collect_every_record_for_a_number() {
    let d = dashboard();
    seed(&d);
    let v = GameVariant::FourDigit;

    let details = d.details(v, "1111", day(2024, 6, 10)).unwrap();
    let kinds: Vec<_> = details
      .iter()
      .map(|d| match d {
        NumberDetail::Gap(_) => "gap",
        NumberDetail::Streak(_) => "streak",
        NumberDetail::Repeat(_) => "repeat",
        NumberDetail::Watch(_) => "watch",
      })
      .collect();
    assert_eq!(kinds, ["gap", "streak", "watch"]);

    let json = serde_json::to_value(&details[0]).unwrap();
    assert_eq!(json["kind"], "gap");
    assert_eq!(json["number"], "1111");

    assert!(matches!(d.details(v, "111", day(2024, 6, 10)), Err(Error::WidthMismatch { .. })));
  }

  #[test]
  fn recent_draws_are_most_recent_first() {
    let d = dashboard();
    seed(&d);
    let recent = d.recent_draws(GameVariant::FourDigit, 2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].winning_number.as_str(), "0482");
    assert_eq!(recent[1].winning_number.as_str(), "4821");
  }
}
