//! v001 -- Initial schema creation.
//!
//! Creates the `users` and `subscriptions` tables.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id         TEXT PRIMARY KEY NOT NULL,
    username   TEXT NOT NULL,
    saved_at   TEXT NOT NULL                  -- ISO-8601 / RFC-3339
);

-- ----------------------------------------------------------------
-- Subscriptions (rooms the local user has joined)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS subscriptions (
    rid        TEXT PRIMARY KEY NOT NULL,     -- server room id
    t          TEXT NOT NULL,                 -- room type tag
    name       TEXT NOT NULL,
    fname      TEXT,
    open       INTEGER NOT NULL DEFAULT 1,    -- boolean 0/1
    unread     INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_subscriptions_name ON subscriptions(name);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
