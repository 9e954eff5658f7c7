//! Error types for `pickstat-core`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::draw::{GameVariant, Session};

#[derive(Debug, Error)]
pub enum Error {
  #[error("winning number {0:?} must be one to four decimal digits")]
  InvalidNumber(String),

  #[error("winning number {number:?} must be {expected} digits for {variant}")]
  WidthMismatch {
    number:   String,
    variant:  GameVariant,
    expected: usize,
  },

  #[error("supplemental digit must be between 0 and 9, got {0}")]
  InvalidSupplementalDigit(u8),

  #[error("unknown game variant: {0:?}")]
  UnknownVariant(String),

  #[error("a {variant} {session} draw on {date} is already recorded")]
  DuplicateDraw {
    variant: GameVariant,
    date:    NaiveDate,
    session: Session,
  },

  #[error("search query is required")]
  EmptyQuery,

  #[error("invalid ROI parameters: {0}")]
  InvalidRoi(String),

  #[error("invalid analysis configuration: {0}")]
  InvalidConfig(String),
}

impl Error {
  /// `true` for errors caused by malformed caller input.
  pub fn is_validation(&self) -> bool {
    !matches!(self, Self::DuplicateDraw { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
