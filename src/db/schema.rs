//! Database schema and migrations.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL COLLATE NOCASE,   -- stored lower-case
    password_digest TEXT NOT NULL,                  -- Argon2 PHC string
    remember_token  TEXT NOT NULL,
    admin           INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE UNIQUE INDEX idx_users_email ON users(email COLLATE NOCASE);
CREATE UNIQUE INDEX idx_users_remember_token ON users(remember_token);
"#,
    // v2: Microposts owned by users
    r#"
CREATE TABLE microposts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_microposts_user_id_created_at ON microposts(user_id, created_at);
"#,
    // v3: Follow relationships between users
    r#"
CREATE TABLE relationships (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    follower_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    followed_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    UNIQUE(follower_id, followed_id),
    CHECK(follower_id <> followed_id)
);

CREATE INDEX idx_relationships_follower_id ON relationships(follower_id);
CREATE INDEX idx_relationships_followed_id ON relationships(followed_id);
"#,
];
