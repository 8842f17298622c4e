// SPDX-License-Identifier: Apache-2.0

//! User and favorite rows. Password hashes stay inside this module's
//! signatures; the [`User`] type itself never carries one.

use crate::QueryError;
use pousada_model::User;
use rusqlite::{Connection, OptionalExtension};

/// Looks a user up for login. Returns the identity together with the stored
/// password hash so the caller can verify out-of-band.
pub fn find_user_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<(User, String)>, QueryError> {
    let row = conn
        .query_row(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
            [email],
            |row| {
                Ok((
                    User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    },
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    Ok(row)
}

pub fn find_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>, QueryError> {
    let row = conn
        .query_row(
            "SELECT id, name, email FROM users WHERE id = ?",
            [id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

/// Inserts a new user. A duplicate email surfaces as
/// [`QueryError::DuplicateEmail`].
pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, QueryError> {
    conn.execute(
        "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)",
        [name, email, password_hash],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// The user's favorite room ids, ascending.
pub fn list_favorites(conn: &Connection, user_id: i64) -> Result<Vec<i64>, QueryError> {
    let mut stmt =
        conn.prepare("SELECT room_id FROM favorites WHERE user_id = ? ORDER BY room_id ASC")?;
    let ids = stmt
        .query_map([user_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

pub fn room_exists(conn: &Connection, room_id: i64) -> Result<bool, QueryError> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM rooms WHERE id = ?", [room_id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

/// Idempotent: adding an existing favorite is a no-op.
pub fn add_favorite(conn: &Connection, user_id: i64, room_id: i64) -> Result<(), QueryError> {
    conn.execute(
        "INSERT OR IGNORE INTO favorites (user_id, room_id) VALUES (?, ?)",
        [user_id, room_id],
    )?;
    Ok(())
}

pub fn remove_favorite(conn: &Connection, user_id: i64, room_id: i64) -> Result<(), QueryError> {
    conn.execute(
        "DELETE FROM favorites WHERE user_id = ? AND room_id = ?",
        [user_id, room_id],
    )?;
    Ok(())
}
