pub mod db;

pub use db::{MemoryStore, SqliteStore, StateStore, StoreError};
