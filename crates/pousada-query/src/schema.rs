// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use pousada_model::FEATURE_KEYS;
use rusqlite::Connection;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price REAL NOT NULL,
    capacity INTEGER NOT NULL,
    image_url TEXT
);
CREATE TABLE IF NOT EXISTS features (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS room_features (
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    feature_id INTEGER NOT NULL REFERENCES features(id) ON DELETE CASCADE,
    PRIMARY KEY (room_id, feature_id)
);
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS favorites (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, room_id)
);
";

/// Creates the tables if absent and seeds the fixed feature catalog. Safe to
/// run on every startup.
pub fn apply_schema(conn: &Connection) -> Result<(), QueryError> {
    conn.execute_batch(SCHEMA_SQL)?;
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO features (name) VALUES (?)")?;
    for key in FEATURE_KEYS {
        stmt.execute([key.label()])?;
    }
    Ok(())
}
