// SPDX-License-Identifier: Apache-2.0

use pousada_query::QueryError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handle to the SQLite file. Each call opens a fresh connection on the
/// blocking pool so rusqlite work never stalls the async runtime.
#[derive(Clone)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Runs `f` against an open connection on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T, QueryError>
    where
        F: FnOnce(&Connection) -> Result<T, QueryError> + Send + 'static,
        T: Send + 'static,
    {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            let conn = open(&path)?;
            f(&conn)
        })
        .await
        .map_err(|e| QueryError::Storage(format!("blocking task failed: {e}")))?
    }

    /// Creates the schema if needed. Run once at startup.
    pub async fn init(&self) -> Result<(), QueryError> {
        self.run(|conn| pousada_query::apply_schema(conn)).await
    }
}

fn open(path: &Path) -> Result<Connection, QueryError> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    Ok(conn)
}
