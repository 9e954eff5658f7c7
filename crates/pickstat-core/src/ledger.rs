//! The draw ledger — the single source of truth for every analysis.
//!
//! Each game variant owns an append-only, chronologically ordered sequence of
//! draws. Appends never mutate a published sequence: the writer builds a new
//! [`Snapshot`] and swaps the shared pointer, so readers holding the previous
//! snapshot keep a consistent view without blocking on the writer.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};

use crate::{
  Error, Result,
  draw::{Draw, DrawSlot, GameVariant, NewDraw},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// An immutable view of one variant's draws, sorted ascending by slot.
#[derive(Debug, Clone)]
pub struct Snapshot {
  variant: GameVariant,
  draws:   Vec<Draw>,
}

impl Snapshot {
  fn empty(variant: GameVariant) -> Self { Self { variant, draws: Vec::new() } }

  pub fn variant(&self) -> GameVariant { self.variant }

  pub fn len(&self) -> usize { self.draws.len() }

  pub fn is_empty(&self) -> bool { self.draws.is_empty() }

  /// Every draw, oldest first.
  pub fn ascending(&self) -> &[Draw] { &self.draws }

  /// Every draw, most recent first. Can be called any number of times.
  pub fn most_recent_first(&self) -> impl ExactSizeIterator<Item = &Draw> {
    self.draws.iter().rev()
  }

  /// The prefix of draws dated on or before `date`, oldest first.
  pub fn up_to(&self, date: NaiveDate) -> &[Draw] {
    let end = self.draws.partition_point(|d| d.draw_date <= date);
    &self.draws[..end]
  }

  pub fn contains_slot(&self, slot: DrawSlot) -> bool {
    self.position(slot).is_ok()
  }

  fn position(&self, slot: DrawSlot) -> std::result::Result<usize, usize> {
    self.draws.binary_search_by_key(&slot, Draw::slot)
  }

  fn duplicate(&self, slot: DrawSlot) -> Error {
    Error::DuplicateDraw {
      variant: self.variant,
      date:    slot.date,
      session: slot.session,
    }
  }

  /// Copy this snapshot with `draw` inserted at its chronological position.
  fn with_draw(&self, draw: Draw) -> Result<Self> {
    let idx = match self.position(draw.slot()) {
      Ok(_) => return Err(self.duplicate(draw.slot())),
      Err(idx) => idx,
    };
    let mut draws = Vec::with_capacity(self.draws.len() + 1);
    draws.extend_from_slice(&self.draws[..idx]);
    draws.push(draw);
    draws.extend_from_slice(&self.draws[idx..]);
    Ok(Self { variant: self.variant, draws })
  }

  /// Copy this snapshot with a batch of draws merged in.
  fn with_draws(&self, batch: Vec<Draw>) -> Result<Self> {
    let mut draws = self.draws.clone();
    draws.extend(batch);
    draws.sort_by_key(Draw::slot);
    if let Some(pair) = draws.windows(2).find(|w| w[0].slot() == w[1].slot()) {
      return Err(self.duplicate(pair[0].slot()));
    }
    Ok(Self { variant: self.variant, draws })
  }
}

// ─── Lane ────────────────────────────────────────────────────────────────────

/// The published snapshot of one variant plus its writer lock.
#[derive(Debug)]
struct Lane {
  current: RwLock<Arc<Snapshot>>,
  writer:  Mutex<()>,
}

impl Lane {
  fn new(variant: GameVariant) -> Self {
    Self {
      current: RwLock::new(Arc::new(Snapshot::empty(variant))),
      writer:  Mutex::new(()),
    }
  }

  fn load(&self) -> Arc<Snapshot> { self.current.read().clone() }

  fn update(&self, f: impl FnOnce(&Snapshot) -> Result<Snapshot>) -> Result<()> {
    let _writer = self.writer.lock();
    let next = f(&self.load())?;
    *self.current.write() = Arc::new(next);
    Ok(())
  }
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Append-only draw history for both game variants.
///
/// Writers of the same variant are serialised; readers only ever clone an
/// [`Arc`] and are never blocked by an append in progress.
#[derive(Debug)]
pub struct Ledger {
  three: Lane,
  four:  Lane,
}

impl Default for Ledger {
  fn default() -> Self { Self::new() }
}

impl Ledger {
  pub fn new() -> Self {
    Self {
      three: Lane::new(GameVariant::ThreeDigit),
      four:  Lane::new(GameVariant::FourDigit),
    }
  }

  fn lane(&self, variant: GameVariant) -> &Lane {
    match variant {
      GameVariant::ThreeDigit => &self.three,
      GameVariant::FourDigit => &self.four,
    }
  }

  /// The current snapshot of `variant`'s draws.
  pub fn all_draws(&self, variant: GameVariant) -> Arc<Snapshot> {
    self.lane(variant).load()
  }

  /// Validate `input` against the current snapshot and stamp it, without
  /// publishing. Used by callers that must persist a draw before it becomes
  /// visible; pair with [`Ledger::publish`].
  pub fn stage(&self, input: NewDraw) -> Result<Draw> {
    input.validate()?;
    let snapshot = self.all_draws(input.variant);
    if snapshot.contains_slot(input.slot()) {
      return Err(snapshot.duplicate(input.slot()));
    }
    Ok(input.into_draw())
  }

  /// Publish a staged or replayed draw. The duplicate check is repeated under
  /// the writer lock.
  pub fn publish(&self, draw: Draw) -> Result<Draw> {
    draw.validate()?;
    let published = draw.clone();
    self.lane(draw.variant).update(|snap| snap.with_draw(draw))?;
    Ok(published)
  }

  /// Validate, stamp, and publish a new draw.
  pub fn append(&self, input: NewDraw) -> Result<Draw> {
    let draw = self.stage(input)?;
    self.publish(draw)
  }

  /// Replay previously persisted draws in one pass per variant. Either every
  /// draw of a variant is published or none is.
  pub fn restore(&self, draws: impl IntoIterator<Item = Draw>) -> Result<usize> {
    let mut three = Vec::new();
    let mut four = Vec::new();
    for draw in draws {
      draw.validate()?;
      match draw.variant {
        GameVariant::ThreeDigit => three.push(draw),
        GameVariant::FourDigit => four.push(draw),
      }
    }
    let count = three.len() + four.len();
    if !three.is_empty() {
      self.three.update(|snap| snap.with_draws(three))?;
    }
    if !four.is_empty() {
      self.four.update(|snap| snap.with_draws(four))?;
    }
    Ok(count)
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::draw::{Session, WinningNumber};

  pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  pub fn new_draw(
    variant: GameVariant,
    date: NaiveDate,
    session: Session,
    number: &str,
  ) -> NewDraw {
    NewDraw::new(
      variant,
      date,
      session,
      WinningNumber::for_variant(variant, number).unwrap(),
    )
  }

  #[test]
  fn append_keeps_chronological_order() {
    let ledger = Ledger::new();
    let v = GameVariant::FourDigit;
    ledger.append(new_draw(v, day(2024, 3, 2), Session::Midday, "1111")).unwrap();
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Evening, "2222")).unwrap();
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Midday, "3333")).unwrap();

    let snap = ledger.all_draws(v);
    let numbers: Vec<_> =
      snap.ascending().iter().map(|d| d.winning_number.as_str()).collect();
    assert_eq!(numbers, ["3333", "2222", "1111"]);

    let recent: Vec<_> =
      snap.most_recent_first().map(|d| d.winning_number.as_str()).collect();
    assert_eq!(recent, ["1111", "2222", "3333"]);
  }

  #[test]
  fn duplicate_slot_is_rejected() {
    let ledger = Ledger::new();
    let v = GameVariant::ThreeDigit;
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Midday, "123")).unwrap();
    let err = ledger
      .append(new_draw(v, day(2024, 3, 1), Session::Midday, "456"))
      .unwrap_err();
    assert!(matches!(err, Error::DuplicateDraw { session: Session::Midday, .. }));
    assert_eq!(ledger.all_draws(v).len(), 1);
  }

  #[test]
  fn variants_are_independent() {
    let ledger = Ledger::new();
    let date = day(2024, 3, 1);
    ledger
      .append(new_draw(GameVariant::ThreeDigit, date, Session::Midday, "123"))
      .unwrap();
    ledger
      .append(new_draw(GameVariant::FourDigit, date, Session::Midday, "1234"))
      .unwrap();
    assert_eq!(ledger.all_draws(GameVariant::ThreeDigit).len(), 1);
    assert_eq!(ledger.all_draws(GameVariant::FourDigit).len(), 1);
  }

  #[test]
  fn width_mismatch_is_rejected() {
    let ledger = Ledger::new();
    let number = WinningNumber::try_from("123".to_owned()).unwrap();
    let input =
      NewDraw::new(GameVariant::FourDigit, day(2024, 3, 1), Session::Midday, number);
    assert!(matches!(ledger.append(input), Err(Error::WidthMismatch { .. })));
  }

  #[test]
  fn readers_keep_their_snapshot() {
    let ledger = Ledger::new();
    let v = GameVariant::FourDigit;
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Midday, "1111")).unwrap();
    let before = ledger.all_draws(v);
    ledger.append(new_draw(v, day(2024, 3, 2), Session::Midday, "2222")).unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(ledger.all_draws(v).len(), 2);
  }

  #[test]
  fn staged_draw_is_invisible_until_published() {
    let ledger = Ledger::new();
    let v = GameVariant::FourDigit;
    let staged = ledger
      .stage(new_draw(v, day(2024, 3, 1), Session::Midday, "1111"))
      .unwrap();
    assert!(ledger.all_draws(v).is_empty());
    ledger.publish(staged.clone()).unwrap();
    assert_eq!(ledger.all_draws(v).ascending()[0].draw_id, staged.draw_id);
    assert!(ledger.publish(staged).is_err());
  }

  #[test]
  fn restore_rejects_duplicates_atomically() {
    let ledger = Ledger::new();
    let v = GameVariant::ThreeDigit;
    let a = new_draw(v, day(2024, 3, 1), Session::Midday, "111").into_draw();
    let b = new_draw(v, day(2024, 3, 1), Session::Midday, "222").into_draw();
    assert!(matches!(ledger.restore([a.clone(), b]), Err(Error::DuplicateDraw { .. })));
    assert!(ledger.all_draws(v).is_empty());

    assert_eq!(ledger.restore([a]).unwrap(), 1);
    assert_eq!(ledger.all_draws(v).len(), 1);
  }

  #[test]
  fn up_to_excludes_later_draws() {
    let ledger = Ledger::new();
    let v = GameVariant::ThreeDigit;
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Midday, "111")).unwrap();
    ledger.append(new_draw(v, day(2024, 3, 1), Session::Evening, "222")).unwrap();
    ledger.append(new_draw(v, day(2024, 3, 2), Session::Midday, "333")).unwrap();
    let snap = ledger.all_draws(v);
    assert_eq!(snap.up_to(day(2024, 3, 1)).len(), 2);
    assert_eq!(snap.up_to(day(2024, 2, 28)).len(), 0);
  }
}
