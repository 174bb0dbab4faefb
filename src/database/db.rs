//! Checkpoint storage for the drill session
//!
//! The saved state is a single JSON record kept in a key-value `app_state`
//! table. Saving is best effort: callers log failures and carry on with the
//! in-memory state.

use crate::models::SavedState;
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// `app_state` key the session record is stored under.
pub const STATE_KEY: &str = "math_facts_state";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is read-only")]
    ReadOnly,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Where the session checkpoints its selection and review stats.
pub trait StateStore {
    /// Returns `None` when nothing usable has been saved.
    fn load(&self) -> Result<Option<SavedState>>;
    fn save(&self, state: &SavedState) -> Result<()>;
}

/// Opens the SQLite database at `path` and creates the tables if needed.
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    info!("Database ready at {:?}", path);
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads a raw value from `app_state`.
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Inserts or replaces a raw value in `app_state`.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: init_database(path)?,
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<SavedState>> {
        Ok(get_value(&self.conn, STATE_KEY)?.and_then(|json| SavedState::from_json_str(&json)))
    }

    fn save(&self, state: &SavedState) -> Result<()> {
        let json = state.to_json_string()?;
        set_value(&self.conn, STATE_KEY, &json)?;
        debug!("Checkpointed {} review entries", state.review_stats.len());
        Ok(())
    }
}

/// In-process store. Clones share the same slot, so a test can keep a handle
/// and inspect what the session saved.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail, as when local storage is full.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn with_raw(json: &str) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(json.to_string());
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SavedState>> {
        Ok(self
            .slot
            .borrow()
            .as_deref()
            .and_then(SavedState::from_json_str))
    }

    fn save(&self, state: &SavedState) -> Result<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        *self.slot.borrow_mut() = Some(state.to_json_string()?);
        Ok(())
    }
}
