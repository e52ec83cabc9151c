//! SQL schema for the Rolo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// There are deliberately no secondary indexes: name, category, and owner
/// filters scan the whole table in `id` order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA synchronous = FULL;

CREATE TABLE IF NOT EXISTS contacts (
    id            TEXT PRIMARY KEY,   -- hyphenated lowercase UUID
    name          TEXT NOT NULL,
    phone_number  TEXT NOT NULL,
    email         TEXT NOT NULL,
    category      TEXT NOT NULL,
    address       TEXT NOT NULL,
    owner         TEXT NOT NULL,      -- opaque caller identity
    created_at    TEXT NOT NULL,      -- RFC 3339 UTC
    updated_at    TEXT                -- RFC 3339 UTC or NULL
);

PRAGMA user_version = 1;
";
