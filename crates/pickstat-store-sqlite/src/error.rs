//! Error type for `pickstat-store-sqlite`.

use chrono::NaiveDate;
use pickstat_core::draw::{GameVariant, Session};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pickstat_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A column held a value no domain type accepts.
  #[error("cannot decode {column}: {value:?}")]
  Decode { column: &'static str, value: String },

  #[error("a {variant} {session} draw on {date} is already stored")]
  DuplicateDraw {
    variant: GameVariant,
    date:    NaiveDate,
    session: Session,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
