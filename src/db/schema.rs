//! Database schema and migrations for authgate.
//!
//! Migrations are applied in order when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script executed in order. The
/// schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
-- Credential records. Username comparison is binary (case-sensitive).
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: sessions table
    r#"
-- Server-side sessions. user_id is a back-reference without cascade.
CREATE TABLE sessions (
    id          TEXT PRIMARY KEY,        -- UUID v4
    user_id     INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
"#,
];
