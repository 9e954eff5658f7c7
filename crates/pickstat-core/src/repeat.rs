//! Repeat analysis — the same number drawn again shortly after itself.
//!
//! Each number's occurrences inside the lookback window are walked in
//! chronological order and every adjacent pair is classified by the first
//! rule that matches:
//!
//! 1. [`RepeatPattern::SameDay`]: both draws on the same calendar date.
//! 2. [`RepeatPattern::Consecutive`]: no other draw of the variant sits
//!    between them.
//! 3. [`RepeatPattern::WithinWeek`]: both draws inside the rolling week span.
//!
//! Runs of adjacent pairs with the same pattern merge into one event, so every
//! pair is attributed to exactly one event and never counted twice. A
//! `WithinWeek` event never spans more than the configured week.

use std::{cmp::Reverse, collections::HashMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  config::RepeatConfig,
  draw::{DrawSlot, WinningNumber},
  ledger::Snapshot,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPattern {
  SameDay,
  Consecutive,
  WithinWeek,
}

/// First and last draw of a repeat event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub first: DrawSlot,
  pub last:  DrawSlot,
}

/// One detected repeat event. A number may produce several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRecord {
  pub number:           WinningNumber,
  pub pattern_kind:     RepeatPattern,
  /// Draws taking part in the event; always at least two.
  pub occurrence_count: u32,
  pub date_range:       DateRange,
  pub description:      String,
}

/// One draw of a number: its position in the variant's history and its slot.
#[derive(Debug, Clone, Copy)]
struct Occurrence {
  ordinal: usize,
  slot:    DrawSlot,
}

/// A run of occurrences `[start, end]` (indices into one number's list).
#[derive(Debug, Clone, Copy)]
struct Run {
  pattern: RepeatPattern,
  start:   usize,
  end:     usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatAnalyzer {
  config: RepeatConfig,
}

impl RepeatAnalyzer {
  pub fn new(config: RepeatConfig) -> Self { Self { config } }

  fn span_days(&self) -> i64 { i64::from(self.config.week_span_days) }

  fn classify(&self, a: Occurrence, b: Occurrence) -> Option<RepeatPattern> {
    if a.slot.date == b.slot.date {
      Some(RepeatPattern::SameDay)
    } else if b.ordinal == a.ordinal + 1 {
      Some(RepeatPattern::Consecutive)
    } else if (b.slot.date - a.slot.date).num_days() < self.span_days() {
      Some(RepeatPattern::WithinWeek)
    } else {
      None
    }
  }

  fn describe(&self, pattern: RepeatPattern) -> String {
    match pattern {
      RepeatPattern::SameDay => "Repeated on same day (Midday & Evening)".to_owned(),
      RepeatPattern::Consecutive => "Back-to-back draws".to_owned(),
      RepeatPattern::WithinWeek => format!("Within {} days", self.config.week_span_days),
    }
  }

  /// Split one number's occurrences into repeat runs.
  fn runs(&self, occ: &[Occurrence]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for (i, pair) in occ.windows(2).enumerate() {
      let kind = self.classify(pair[0], pair[1]);
      match (current.as_mut(), kind) {
        (Some(run), Some(k))
          if run.pattern == k
            && (k != RepeatPattern::WithinWeek
              || (pair[1].slot.date - occ[run.start].slot.date).num_days()
                < self.span_days()) =>
        {
          run.end = i + 1;
        }
        _ => {
          runs.extend(current.take());
          current = kind.map(|pattern| Run { pattern, start: i, end: i + 1 });
        }
      }
    }
    runs.extend(current);
    runs
  }

  /// Every repeat event whose draws fall inside
  /// `[as_of - lookback_days, as_of]`, most recent first.
  pub fn analyze(&self, snapshot: &Snapshot, as_of: NaiveDate) -> Vec<RepeatRecord> {
    let start = as_of
      .checked_sub_days(Days::new(u64::from(self.config.lookback_days)))
      .unwrap_or(NaiveDate::MIN);

    // Ordinals are positions in the full history so that adjacency is not
    // affected by where the lookback window begins.
    let draws = snapshot.up_to(as_of);
    let first = draws.partition_point(|d| d.draw_date < start);

    let mut by_number: HashMap<&WinningNumber, Vec<Occurrence>> = HashMap::new();
    for (ordinal, draw) in draws.iter().enumerate().skip(first) {
      by_number
        .entry(&draw.winning_number)
        .or_default()
        .push(Occurrence { ordinal, slot: draw.slot() });
    }

    let mut records: Vec<RepeatRecord> = by_number
      .into_iter()
      .filter(|(_, occ)| occ.len() >= 2)
      .flat_map(|(number, occ)| {
        self
          .runs(&occ)
          .into_iter()
          .map(|run| RepeatRecord {
            number:           number.clone(),
            pattern_kind:     run.pattern,
            occurrence_count: (run.end - run.start + 1) as u32,
            date_range:       DateRange {
              first: occ[run.start].slot,
              last:  occ[run.end].slot,
            },
            description:      self.describe(run.pattern),
          })
          .collect::<Vec<_>>()
      })
      .collect();

    records.sort_by(|a, b| {
      (Reverse(a.date_range.last), &a.number, a.pattern_kind).cmp(&(
        Reverse(b.date_range.last),
        &b.number,
        b.pattern_kind,
      ))
    });
    records
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    draw::{GameVariant, Session},
    ledger::{
      Ledger,
      tests::{day, new_draw},
    },
  };

  /// A four-digit ledger with one draw per listed slot; every slot not listed
  /// between the first and last date is filled with a distinct filler number.
  fn ledger_with(hits: &[(NaiveDate, Session, &str)]) -> Ledger {
    let ledger = Ledger::new();
    let v = GameVariant::FourDigit;
    for (date, session, number) in hits {
      ledger.append(new_draw(v, *date, *session, number)).unwrap();
    }
    let first = hits.iter().map(|h| h.0).min().unwrap();
    let last = hits.iter().map(|h| h.0).max().unwrap();
    let mut filler = 9000u16;
    for date in first.iter_days().take_while(|d| *d <= last) {
      for session in [Session::Midday, Session::Evening] {
        let input = new_draw(v, date, session, &v.format_number(filler));
        if ledger.append(input).is_ok() {
          filler += 1;
        }
      }
    }
    ledger
  }

  fn analyze(ledger: &Ledger, as_of: NaiveDate) -> Vec<RepeatRecord> {
    RepeatAnalyzer::default().analyze(&ledger.all_draws(GameVariant::FourDigit), as_of)
  }

  #[test]
  fn same_day_pair_is_only_same_day() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Midday, "0007"),
      (day(2024, 6, 1), Session::Evening, "0007"),
    ]);
    let repeats = analyze(&ledger, day(2024, 6, 10));
    assert_eq!(repeats.len(), 1);
    let r = &repeats[0];
    assert_eq!(r.number.as_str(), "0007");
    assert_eq!(r.pattern_kind, RepeatPattern::SameDay);
    assert_eq!(r.occurrence_count, 2);
    assert_eq!(r.date_range.first, DrawSlot::new(day(2024, 6, 1), Session::Midday));
    assert_eq!(r.date_range.last, DrawSlot::new(day(2024, 6, 1), Session::Evening));
  }

  #[test]
  fn adjacent_slots_across_midnight_are_consecutive() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Evening, "1234"),
      (day(2024, 6, 2), Session::Midday, "1234"),
    ]);
    let repeats = analyze(&ledger, day(2024, 6, 10));
    assert_eq!(repeats.len(), 1);
    assert_eq!(repeats[0].pattern_kind, RepeatPattern::Consecutive);
    assert_eq!(repeats[0].description, "Back-to-back draws");
  }

  #[test]
  fn separated_draws_inside_a_week_are_within_week() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Midday, "5555"),
      (day(2024, 6, 4), Session::Evening, "5555"),
    ]);
    let repeats = analyze(&ledger, day(2024, 6, 10));
    assert_eq!(repeats.len(), 1);
    assert_eq!(repeats[0].pattern_kind, RepeatPattern::WithinWeek);
    assert_eq!(repeats[0].description, "Within 7 days");
  }

  #[test]
  fn draws_a_week_apart_are_not_repeats() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Midday, "5555"),
      (day(2024, 6, 8), Session::Midday, "5555"),
    ]);
    assert!(analyze(&ledger, day(2024, 6, 10)).is_empty());
  }

  #[test]
  fn week_runs_never_exceed_the_span() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Midday, "3141"),
      (day(2024, 6, 4), Session::Midday, "3141"),
      (day(2024, 6, 7), Session::Midday, "3141"),
      (day(2024, 6, 10), Session::Midday, "3141"),
    ]);
    let mut repeats = analyze(&ledger, day(2024, 6, 12));
    repeats.sort_by_key(|r| r.date_range.first);
    assert_eq!(repeats.len(), 2);
    assert_eq!(repeats[0].occurrence_count, 3);
    assert_eq!(repeats[0].date_range.last.date, day(2024, 6, 7));
    assert_eq!(repeats[1].occurrence_count, 2);
    assert_eq!(repeats[1].date_range.first.date, day(2024, 6, 7));
    assert!(repeats.iter().all(|r| r.pattern_kind == RepeatPattern::WithinWeek));
  }

  #[test]
  fn mixed_patterns_split_into_separate_events() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Evening, "2468"),
      (day(2024, 6, 2), Session::Midday, "2468"),
      (day(2024, 6, 2), Session::Evening, "2468"),
    ]);
    let repeats = analyze(&ledger, day(2024, 6, 10));
    let mut patterns: Vec<_> = repeats.iter().map(|r| r.pattern_kind).collect();
    patterns.sort();
    assert_eq!(patterns, [RepeatPattern::SameDay, RepeatPattern::Consecutive]);
  }

  #[test]
  fn lookback_window_limits_detection() {
    let ledger = ledger_with(&[
      (day(2024, 1, 1), Session::Midday, "0007"),
      (day(2024, 1, 1), Session::Evening, "0007"),
      (day(2024, 3, 1), Session::Midday, "0001"),
    ]);
    assert!(analyze(&ledger, day(2024, 3, 1)).is_empty());
    assert_eq!(analyze(&ledger, day(2024, 1, 20)).len(), 1);
  }

  #[test]
  fn most_recent_event_first() {
    let ledger = ledger_with(&[
      (day(2024, 6, 1), Session::Midday, "1111"),
      (day(2024, 6, 1), Session::Evening, "1111"),
      (day(2024, 6, 5), Session::Midday, "2222"),
      (day(2024, 6, 5), Session::Evening, "2222"),
    ]);
    let repeats = analyze(&ledger, day(2024, 6, 10));
    let numbers: Vec<_> = repeats.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, ["2222", "1111"]);
  }
}
