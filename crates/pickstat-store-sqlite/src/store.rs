//! [`SqliteStore`] — the SQLite implementation of [`DrawStore`].

use std::path::Path;

use pickstat_core::{
  draw::{Draw, GameVariant},
  store::DrawStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    DRAW_COLUMNS, RawDraw, encode_date, encode_dt, encode_session, encode_uuid,
    encode_variant,
  },
  schema::SCHEMA,
};

/// Chronological order within a variant. Session names do not sort.
const SLOT_ORDER: &str =
  "draw_date, CASE session WHEN 'midday' THEN 0 ELSE 1 END";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A draw store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DrawStore impl ──────────────────────────────────────────────────────────

impl DrawStore for SqliteStore {
  type Error = Error;

  async fn insert_draw(&self, draw: Draw) -> Result<Draw> {
    draw.validate()?;

    let id_str      = encode_uuid(draw.draw_id);
    let variant_str = encode_variant(draw.variant);
    let date_str    = encode_date(draw.draw_date);
    let session_str = encode_session(draw.session);
    let number_str  = draw.winning_number.as_str().to_owned();
    let digit       = draw.supplemental_digit;
    let at_str      = encode_dt(draw.recorded_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken = tx
          .query_row(
            "SELECT 1 FROM draws WHERE variant = ?1 AND draw_date = ?2 AND session = ?3",
            rusqlite::params![variant_str, date_str, session_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO draws (
             draw_id, variant, draw_date, session,
             winning_number, supplemental_digit, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            variant_str,
            date_str,
            session_str,
            number_str,
            digit,
            at_str,
          ],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateDraw {
        variant: draw.variant,
        date:    draw.draw_date,
        session: draw.session,
      });
    }
    Ok(draw)
  }

  async fn list_draws(&self, variant: Option<GameVariant>) -> Result<Vec<Draw>> {
    let variant_str = variant.map(encode_variant);

    let raws: Vec<RawDraw> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(v) = variant_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {DRAW_COLUMNS} FROM draws WHERE variant = ?1 ORDER BY {SLOT_ORDER}"
          ))?;
          stmt
            .query_map(rusqlite::params![v], RawDraw::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {DRAW_COLUMNS} FROM draws ORDER BY variant, {SLOT_ORDER}"
          ))?;
          stmt
            .query_map([], RawDraw::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDraw::into_draw).collect()
  }

  async fn count_draws(&self, variant: Option<GameVariant>) -> Result<u64> {
    let variant_str = variant.map(encode_variant);

    let count: i64 = self
      .conn
      .call(move |conn| {
        let n = match variant_str {
          Some(v) => conn.query_row(
            "SELECT COUNT(*) FROM draws WHERE variant = ?1",
            rusqlite::params![v],
            |r| r.get(0),
          )?,
          None => conn.query_row("SELECT COUNT(*) FROM draws", [], |r| r.get(0))?,
        };
        Ok(n)
      })
      .await?;

    Ok(count.unsigned_abs())
  }
}
