//! SQL schema for the pickstat SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Draws are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS draws (
    draw_id            TEXT PRIMARY KEY,
    variant            TEXT NOT NULL,   -- 'pick3' | 'pick4'
    draw_date          TEXT NOT NULL,   -- YYYY-MM-DD
    session            TEXT NOT NULL,   -- 'midday' | 'evening'
    winning_number     TEXT NOT NULL,   -- zero-padded digits
    supplemental_digit INTEGER,         -- 0..=9 or NULL
    recorded_at        TEXT NOT NULL,   -- ISO 8601 UTC
    UNIQUE (variant, draw_date, session),
    CHECK  (supplemental_digit IS NULL OR supplemental_digit BETWEEN 0 AND 9)
);

CREATE INDEX IF NOT EXISTS draws_variant_date_idx ON draws(variant, draw_date);

PRAGMA user_version = 1;
";
