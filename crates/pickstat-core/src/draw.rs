//! Draw types — the fundamental unit of the ledger.
//!
//! A draw is one published result for one game variant in one session of one
//! calendar day. Draws are immutable once recorded; every analysis is derived
//! from them at query time.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Game variant ────────────────────────────────────────────────────────────

/// The fixed-digit game a draw belongs to. The variant fixes the width of the
/// winning number and therefore the size of the number space.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum GameVariant {
  /// Numbers `000` through `999`.
  #[serde(rename = "pick3")]
  #[strum(serialize = "pick3")]
  ThreeDigit,
  /// Numbers `0000` through `9999`.
  #[serde(rename = "pick4")]
  #[strum(serialize = "pick4")]
  FourDigit,
}

impl GameVariant {
  /// Number of digits in a winning number.
  pub fn width(self) -> usize {
    match self {
      Self::ThreeDigit => 3,
      Self::FourDigit => 4,
    }
  }

  /// Count of distinct winning numbers (`10^width`).
  pub fn space_size(self) -> usize {
    match self {
      Self::ThreeDigit => 1_000,
      Self::FourDigit => 10_000,
    }
  }

  /// Zero-padded rendering of `value` at this variant's width.
  pub fn format_number(self, value: u16) -> String {
    format!("{value:0width$}", width = self.width())
  }

  /// Every number of the space in ascending order.
  pub fn numbers(self) -> impl Iterator<Item = WinningNumber> {
    (0..self.space_size() as u16).map(move |v| WinningNumber(self.format_number(v)))
  }

  /// The all-same-digit numbers tracked by the watch list (`000`, `111`, ...).
  pub fn watch_patterns(self) -> Vec<WinningNumber> {
    ('0'..='9')
      .map(|d| WinningNumber(std::iter::repeat_n(d, self.width()).collect()))
      .collect()
  }

  /// Parse a wire spelling (`pick3` / `pick4`) into a variant.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownVariant(s.to_owned()))
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// The draw slot within a calendar day. Midday precedes Evening.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Session {
  Midday,
  Evening,
}

// ─── Slot ────────────────────────────────────────────────────────────────────

/// The temporal identity of a draw: a calendar date plus a session.
///
/// Field order matters: the derived ordering is chronological.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DrawSlot {
  pub date:    NaiveDate,
  pub session: Session,
}

impl DrawSlot {
  pub fn new(date: NaiveDate, session: Session) -> Self { Self { date, session } }
}

impl fmt::Display for DrawSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.date, self.session)
  }
}

// ─── Winning number ──────────────────────────────────────────────────────────

/// A zero-padded decimal winning number.
///
/// Construction guarantees one to four ASCII digits; the width is checked
/// against a [`GameVariant`] separately by [`NewDraw::validate`].
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct WinningNumber(String);

impl WinningNumber {
  /// Parse `s` and require it to be exactly `variant.width()` digits.
  pub fn for_variant(variant: GameVariant, s: &str) -> Result<Self> {
    let number = Self::try_from(s.to_owned())?;
    number.check_width(variant)?;
    Ok(number)
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Numeric value; also the number's index within its variant's space.
  pub fn value(&self) -> u16 {
    self
      .0
      .bytes()
      .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
  }

  fn check_width(&self, variant: GameVariant) -> Result<()> {
    if self.0.len() != variant.width() {
      return Err(Error::WidthMismatch {
        number:   self.0.clone(),
        variant,
        expected: variant.width(),
      });
    }
    Ok(())
  }
}

impl TryFrom<String> for WinningNumber {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::InvalidNumber(s));
    }
    Ok(Self(s))
  }
}

impl From<WinningNumber> for String {
  fn from(n: WinningNumber) -> Self { n.0 }
}

impl fmt::Display for WinningNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Draw ────────────────────────────────────────────────────────────────────

/// A recorded draw. Once written, no field is ever updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
  pub draw_id:            Uuid,
  pub variant:            GameVariant,
  pub draw_date:          NaiveDate,
  pub session:            Session,
  pub winning_number:     WinningNumber,
  /// Optional bonus-multiplier digit published alongside the number.
  pub supplemental_digit: Option<u8>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at:        DateTime<Utc>,
}

impl Draw {
  pub fn slot(&self) -> DrawSlot { DrawSlot::new(self.draw_date, self.session) }

  /// Same checks as [`NewDraw::validate`]; applied to draws replayed from
  /// storage.
  pub fn validate(&self) -> Result<()> {
    validate_fields(self.variant, &self.winning_number, self.supplemental_digit)
  }
}

fn validate_fields(
  variant: GameVariant,
  number: &WinningNumber,
  supplemental_digit: Option<u8>,
) -> Result<()> {
  number.check_width(variant)?;
  if let Some(d) = supplemental_digit
    && d > 9
  {
    return Err(Error::InvalidSupplementalDigit(d));
  }
  Ok(())
}

// ─── NewDraw ─────────────────────────────────────────────────────────────────

/// Input to [`crate::ledger::Ledger::append`].
/// `draw_id` and `recorded_at` are always assigned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraw {
  pub variant:            GameVariant,
  pub draw_date:          NaiveDate,
  pub session:            Session,
  pub winning_number:     WinningNumber,
  #[serde(default)]
  pub supplemental_digit: Option<u8>,
}

impl NewDraw {
  pub fn new(
    variant: GameVariant,
    draw_date: NaiveDate,
    session: Session,
    winning_number: WinningNumber,
  ) -> Self {
    Self { variant, draw_date, session, winning_number, supplemental_digit: None }
  }

  pub fn with_supplemental_digit(mut self, digit: u8) -> Self {
    self.supplemental_digit = Some(digit);
    self
  }

  pub fn slot(&self) -> DrawSlot { DrawSlot::new(self.draw_date, self.session) }

  /// Check the winning number width and the supplemental digit range.
  pub fn validate(&self) -> Result<()> {
    validate_fields(self.variant, &self.winning_number, self.supplemental_digit)
  }

  /// Stamp the draw with a fresh id and the current time.
  pub fn into_draw(self) -> Draw {
    Draw {
      draw_id:            Uuid::new_v4(),
      variant:            self.variant,
      draw_date:          self.draw_date,
      session:            self.session,
      winning_number:     self.winning_number,
      supplemental_digit: self.supplemental_digit,
      recorded_at:        Utc::now(),
    }
  }
}
