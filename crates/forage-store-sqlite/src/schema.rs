//! SQL schema for the forage SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` stamp.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Accumulating list columns (common, spots, id_notes, use_notes, plants,
-- notes) are single comma-separated text blobs, not child tables.
CREATE TABLE IF NOT EXISTS plants (
    plant_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    latin     TEXT NOT NULL,            -- canonical binomial name
    common    TEXT NOT NULL DEFAULT '',
    spots     TEXT NOT NULL DEFAULT '',
    id_notes  TEXT NOT NULL DEFAULT '',
    use_notes TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS spots (
    spot_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    w3w_name TEXT NOT NULL,  -- canonical word.word.word address
    lat      REAL NOT NULL,  -- resolved once at creation, never rewritten
    lng      REAL NOT NULL,
    plants   TEXT NOT NULL DEFAULT '',
    notes    TEXT NOT NULL DEFAULT ''
);

-- Notes are write-once.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS notes (
    note_id INTEGER PRIMARY KEY AUTOINCREMENT,
    time    TEXT NOT NULL,  -- ISO 8601 UTC; store-assigned
    text    TEXT NOT NULL
);

-- Natural keys are unique at the schema level, not only by application
-- convention.
CREATE UNIQUE INDEX IF NOT EXISTS plants_latin_idx ON plants(latin);
CREATE UNIQUE INDEX IF NOT EXISTS spots_w3w_idx    ON spots(w3w_name);

PRAGMA user_version = 1;
";
