//! SQL schema for the ouvi SQLite store.
//!
//! Executed once at connection startup via
//! [`SqliteStore::open`](crate::SqliteStore::open) — never from a request
//! handler. Future migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Submissions are written once at intake and never updated or deleted by
-- this service. Administrative tooling owns later status transitions.
CREATE TABLE IF NOT EXISTS submissions (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    protocol            TEXT NOT NULL UNIQUE,  -- OUV-<year>-<suffix>
    category            TEXT NOT NULL,
    subject             TEXT NOT NULL,
    body_text           TEXT NOT NULL,
    is_anonymous        INTEGER NOT NULL DEFAULT 0,
    citizen_name        TEXT,                  -- all four identity columns
    email               TEXT,                  -- are NULL when anonymous
    phone               TEXT,
    tax_id              TEXT,
    occurrence_location TEXT,
    occurrence_date     TEXT,                  -- ISO 8601 date
    media_path          TEXT,                  -- both media columns set
    media_type          TEXT,                  -- together or not at all
    status              TEXT NOT NULL DEFAULT 'RECEIVED',
    ai_analysis         TEXT,                  -- opaque JSON blob
    created_at          TEXT NOT NULL          -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS submissions_created_idx ON submissions(created_at);

PRAGMA user_version = 1;
";
