#![forbid(unsafe_code)]

//! Room search against SQLite.
//!
//! Every filter becomes a `(fragment, parameter)` pair accumulated into one
//! AND-combined WHERE clause; user input never reaches the SQL text itself.

use pousada_model::{OrderBy, OrderDirection, Room, RoomFilter, FEATURE_KEYS};
use rusqlite::{params_from_iter, types::Value, Connection};
use std::fmt::Write;

pub const CRATE_NAME: &str = "pousada-query";

mod schema;
mod users;

pub use schema::apply_schema;
pub use users::{
    add_favorite, create_user, find_user_by_email, find_user_by_id, list_favorites,
    remove_favorite, room_exists,
};

#[derive(Debug)]
pub enum QueryError {
    /// Unique constraint on `users.email` fired during registration.
    DuplicateEmail,
    Storage(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "email already registered"),
            Self::Storage(msg) => write!(f, "{msg}"),
        }
    }
}
impl std::error::Error for QueryError {}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("users.email")
            {
                return Self::DuplicateEmail;
            }
        }
        Self::Storage(err.to_string())
    }
}

/// Runs the filter against the database and returns every matching room with
/// its complete feature list, in the filter's ordering. Pagination happens at
/// the caller; `favorites_of` additionally restricts to one user's favorites.
pub fn search_rooms(
    conn: &Connection,
    filter: &RoomFilter,
    favorites_of: Option<i64>,
) -> Result<Vec<Room>, QueryError> {
    let (sql, params) = build_search_sql(filter, favorites_of);
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(Room {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            capacity: row.get::<_, i64>(4)? as u32,
            image_url: row.get(5)?,
            features: Vec::new(),
        })
    })?;
    let mut rooms: Vec<Room> = mapped.collect::<Result<Vec<_>, _>>()?;
    // The feature list on each room is the room's full set, not the subset
    // that was filtered on.
    for room in &mut rooms {
        room.features = room_feature_names(conn, room.id)?;
    }
    Ok(rooms)
}

fn build_search_sql(filter: &RoomFilter, favorites_of: Option<i64>) -> (String, Vec<Value>) {
    let mut sql = String::from(
        "SELECT DISTINCT r.id, r.name, r.description, r.price, r.capacity, r.image_url FROM rooms r",
    );
    if !filter.features.is_empty() {
        sql.push_str(
            " LEFT JOIN room_features rf ON rf.room_id = r.id LEFT JOIN features f ON f.id = rf.feature_id",
        );
    }

    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(name) = &filter.name {
        where_parts.push("r.name LIKE ? ESCAPE '!'".to_string());
        params.push(Value::Text(format!("%{}%", escape_like(name))));
    }
    if let Some(min) = filter.price_min {
        where_parts.push("r.price >= ?".to_string());
        params.push(Value::Real(min));
    }
    if let Some(max) = filter.price_max {
        where_parts.push("r.price <= ?".to_string());
        params.push(Value::Real(max));
    }
    if let Some(capacity) = filter.capacity {
        where_parts.push("r.capacity = ?".to_string());
        params.push(Value::Integer(i64::from(capacity)));
    }
    // One membership subquery per requested feature gives AND semantics; a
    // single IN over all names would give OR.
    for key in FEATURE_KEYS {
        if filter.features.contains(&key) {
            where_parts.push(
                "r.id IN (SELECT rf2.room_id FROM room_features rf2 JOIN features f2 ON f2.id = rf2.feature_id WHERE f2.name = ?)"
                    .to_string(),
            );
            params.push(Value::Text(key.label().to_string()));
        }
    }
    if let Some(user_id) = favorites_of {
        where_parts.push("r.id IN (SELECT room_id FROM favorites WHERE user_id = ?)".to_string());
        params.push(Value::Integer(user_id));
    }

    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }

    match order_column(filter.order_by) {
        Some(column) => {
            let dir = match filter.direction {
                OrderDirection::Asc => "ASC",
                OrderDirection::Desc => "DESC",
            };
            let _ = write!(sql, " ORDER BY {column} {dir}, r.id ASC");
        }
        None => sql.push_str(" ORDER BY r.id ASC"),
    }

    (sql, params)
}

fn order_column(order_by: OrderBy) -> Option<&'static str> {
    match order_by {
        OrderBy::None => None,
        OrderBy::Name => Some("r.name"),
        OrderBy::Price => Some("r.price"),
        OrderBy::Capacity => Some("r.capacity"),
    }
}

fn room_feature_names(conn: &Connection, room_id: i64) -> Result<Vec<String>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT f.name FROM features f JOIN room_features rf ON rf.feature_id = f.id WHERE rf.room_id = ? ORDER BY f.id",
    )?;
    let names = stmt
        .query_map([room_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
