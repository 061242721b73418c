// src/db.rs

use crate::error::{Result, TeaLogError};
use crate::models::TeaLogEntry;
use rusqlite::{params, params_from_iter, Connection};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Returns the standard database path (~/.config/tealog/tea_log.db)
pub fn default_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(TeaLogError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/tealog/tea_log.db"))
}

/// Owns the single SQLite handle for one database file.
///
/// The handle is released exactly once, either through [`DbHandle::close`] or
/// on drop. Every operation after `close` fails with
/// [`TeaLogError::ConnectionClosed`].
pub struct DbHandle {
    conn: Option<Connection>,
}

impl DbHandle {
    /// Opens the database at `path`, creating the file and any missing parent
    /// directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(TeaLogError::Connection)?;
        Ok(DbHandle { conn: Some(conn) })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(TeaLogError::Connection)?;
        Ok(DbHandle { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(TeaLogError::ConnectionClosed)
    }

    /// Releases the handle. Safe to call on an already-closed handle.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!("Error while closing database: {}", e);
            }
        }
    }
}

impl Drop for DbHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Creates the record table if it does not exist. Never drops or truncates
/// existing rows, so calling this on every startup is fine.
///
/// The timestamp columns default to the insertion time, so the database (not
/// the caller) stamps every new row.
pub fn ensure_schema(handle: &DbHandle) -> Result<()> {
    handle
        .conn()?
        .execute(
            "CREATE TABLE IF NOT EXISTS tea_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tea_name TEXT NOT NULL,
                local_time TEXT DEFAULT (datetime('now', 'localtime')),
                utc_time TEXT DEFAULT (datetime('now'))
            )",
            [],
        )
        .map_err(TeaLogError::Schema)?;
    Ok(())
}

/// CRUD and substring search over logged teas, backed by a single database
/// file. The UI layer hands raw strings in and renders the entry lists that
/// come back; the handle itself never leaves this struct.
pub struct TeaStore {
    handle: DbHandle,
}

impl TeaStore {
    /// Opens (or creates) the store at `path` and ensures the schema exists.
    /// Both failures are fatal; the handle is still released on the error
    /// path.
    pub fn open(path: &Path) -> Result<Self> {
        let handle = DbHandle::open(path)?;
        let store = TeaStore { handle };
        ensure_schema(&store.handle)?;
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let handle = DbHandle::open_in_memory()?;
        let store = TeaStore { handle };
        ensure_schema(&store.handle)?;
        Ok(store)
    }

    /// Releases the underlying handle. Idempotent.
    pub fn close(&mut self) {
        self.handle.close();
    }

    /// Records one tea. The database assigns the id and both timestamps.
    /// Returns `false` for an empty name or a failed insert, without
    /// touching storage.
    pub fn log(&self, name: &str) -> bool {
        if name.is_empty() {
            warn!("Refusing to log a tea with an empty name");
            return false;
        }
        match self.insert(name) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to log tea '{}': {}", name, e);
                false
            }
        }
    }

    fn insert(&self, name: &str) -> Result<()> {
        self.handle
            .conn()?
            .execute("INSERT INTO tea_log (tea_name) VALUES (?1)", params![name])?;
        Ok(())
    }

    /// Deletes every entry whose name matches `name` exactly. Returns `true`
    /// when the statement ran, even if nothing matched.
    pub fn delete(&self, name: &str) -> bool {
        match self.remove(name) {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to delete tea '{}': {}", name, e);
                false
            }
        }
    }

    fn remove(&self, name: &str) -> Result<usize> {
        let count = self
            .handle
            .conn()?
            .execute("DELETE FROM tea_log WHERE tea_name = ?1", params![name])?;
        Ok(count)
    }

    /// Renames the entry with the given id. Timestamps and id stay untouched,
    /// and an unknown id is not reported as an error.
    pub fn rename(&self, id: i64, new_name: &str) -> Result<()> {
        if new_name.is_empty() {
            return Err(TeaLogError::InvalidInput(
                "tea name cannot be empty".to_string(),
            ));
        }
        self.handle.conn()?.execute(
            "UPDATE tea_log SET tea_name = ?1 WHERE id = ?2",
            params![new_name, id],
        )?;
        Ok(())
    }

    /// Entries whose name contains `term` (case-insensitive), ordered by name
    /// ascending with id as tiebreak. An empty term returns everything. Query
    /// failures are logged and yield an empty list.
    pub fn search(&self, term: &str) -> Vec<TeaLogEntry> {
        match self.fetch_entries(term) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Search for '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }

    fn fetch_entries(&self, term: &str) -> Result<Vec<TeaLogEntry>> {
        let conn = self.handle.conn()?;

        let mut query = String::from("SELECT id, tea_name, local_time, utc_time FROM tea_log");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if !term.is_empty() {
            query.push_str(" WHERE tea_name LIKE ?");
            params.push(Box::new(format!("%{}%", term)));
        }
        query.push_str(" ORDER BY tea_name ASC, id ASC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            params_from_iter(params.iter().map(|b| b.as_ref())),
            TeaLogEntry::from_row,
        )?;

        // A row that fails to convert is skipped, not fatal to the whole set.
        let mut entries = Vec::new();
        for row in rows {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping unreadable row: {}", e),
            }
        }
        Ok(entries)
    }
}
