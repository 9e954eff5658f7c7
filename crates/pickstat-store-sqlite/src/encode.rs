//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates are `YYYY-MM-DD`, and
//! UUIDs are hyphenated lowercase strings. Variants and sessions use their
//! wire spellings.

use chrono::{DateTime, NaiveDate, Utc};
use pickstat_core::draw::{Draw, GameVariant, Session, WinningNumber};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Variant / session ───────────────────────────────────────────────────────

pub fn encode_variant(v: GameVariant) -> String { v.to_string() }

pub fn decode_variant(s: &str) -> Result<GameVariant> {
  s.parse().map_err(|_| Error::Decode { column: "variant", value: s.to_owned() })
}

pub fn encode_session(s: Session) -> String { s.to_string() }

pub fn decode_session(s: &str) -> Result<Session> {
  s.parse().map_err(|_| Error::Decode { column: "session", value: s.to_owned() })
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const DRAW_COLUMNS: &str = "draw_id, variant, draw_date, session, \
                                winning_number, supplemental_digit, recorded_at";

/// Raw values read directly from a `draws` row.
pub struct RawDraw {
  pub draw_id:            String,
  pub variant:            String,
  pub draw_date:          String,
  pub session:            String,
  pub winning_number:     String,
  pub supplemental_digit: Option<u8>,
  pub recorded_at:        String,
}

impl RawDraw {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      draw_id:            row.get(0)?,
      variant:            row.get(1)?,
      draw_date:          row.get(2)?,
      session:            row.get(3)?,
      winning_number:     row.get(4)?,
      supplemental_digit: row.get(5)?,
      recorded_at:        row.get(6)?,
    })
  }

  /// Decode and re-validate the row, so a hand-edited database cannot feed
  /// the ledger a malformed draw.
  pub fn into_draw(self) -> Result<Draw> {
    let variant = decode_variant(&self.variant)?;
    let draw = Draw {
      draw_id: decode_uuid(&self.draw_id)?,
      variant,
      draw_date: decode_date(&self.draw_date)?,
      session: decode_session(&self.session)?,
      winning_number: WinningNumber::for_variant(variant, &self.winning_number)?,
      supplemental_digit: self.supplemental_digit,
      recorded_at: decode_dt(&self.recorded_at)?,
    };
    draw.validate()?;
    Ok(draw)
  }
}
