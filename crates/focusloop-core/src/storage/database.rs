//! SQLite-backed snapshot persistence.
//!
//! A single kv table holds the engine's persisted pieces under
//! separate keys:
//! - `engine_state` - the countdown snapshot (remaining, running,
//!   phase, cycle count, anchor),
//! - `total_sessions` - the lifetime counter,
//! - `engine_config` - the engine's working settings.
//!
//! Splitting the lifetime counter and settings from the countdown
//! snapshot keeps a corrupt or stale snapshot from taking the other
//! two down with it.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::timer::{EngineConfig, EngineState};

use super::{data_dir, PersistenceGateway, StoredEngine};

const KEY_ENGINE_STATE: &str = "engine_state";
const KEY_TOTAL_SESSIONS: &str = "total_sessions";
const KEY_ENGINE_CONFIG: &str = "engine_config";

/// Countdown snapshot as stored, without the separately-keyed
/// lifetime counter.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    remaining_secs: u64,
    running: bool,
    phase: crate::timer::Phase,
    cycle_count: u32,
    #[serde(default)]
    anchor_epoch_ms: Option<u64>,
}

impl SnapshotRecord {
    fn from_state(state: &EngineState) -> Self {
        Self {
            remaining_secs: state.remaining_secs,
            running: state.running,
            phase: state.phase,
            cycle_count: state.cycle_count,
            anchor_epoch_ms: state.anchor_epoch_ms,
        }
    }

    fn into_state(self, total_sessions: u64) -> EngineState {
        EngineState {
            remaining_secs: self.remaining_secs,
            running: self.running,
            phase: self.phase,
            anchor_epoch_ms: self.anchor_epoch_ms,
            cycle_count: self.cycle_count,
            total_sessions,
        }
    }
}

/// SQLite database holding the persisted engine snapshot.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focusloop/focusloop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("focusloop.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read and parse one JSON-valued key; corrupt rows read as absent.
    fn kv_get_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let raw = self.kv_get(key).ok()??;
        serde_json::from_str(&raw).ok()
    }
}

impl PersistenceGateway for Database {
    fn load(&self) -> Option<StoredEngine> {
        let config: EngineConfig = self
            .kv_get_json::<EngineConfig>(KEY_ENGINE_CONFIG)
            .map(EngineConfig::clamped)
            .unwrap_or_default();

        let snapshot = self.kv_get_json::<SnapshotRecord>(KEY_ENGINE_STATE);
        let total_sessions = self
            .kv_get(KEY_TOTAL_SESSIONS)
            .ok()
            .flatten()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let state = match snapshot {
            Some(record) => {
                let state = record.into_state(total_sessions);
                if state.is_well_formed() {
                    state
                } else {
                    EngineState {
                        total_sessions,
                        ..EngineState::initial(&config)
                    }
                }
            }
            // Nothing ever stored: report empty so the caller builds
            // its own defaults. Corrupt rows degrade per part above.
            None => {
                if self.kv_get(KEY_ENGINE_CONFIG).ok().flatten().is_none() {
                    return None;
                }
                EngineState {
                    total_sessions,
                    ..EngineState::initial(&config)
                }
            }
        };

        Some(StoredEngine { state, config })
    }

    fn save_state(&self, state: &EngineState) -> Result<(), StorageError> {
        let record = SnapshotRecord::from_state(state);
        let json = serde_json::to_string(&record)
            .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;
        self.kv_set(KEY_ENGINE_STATE, &json)?;
        self.kv_set(KEY_TOTAL_SESSIONS, &state.total_sessions.to_string())?;
        Ok(())
    }

    fn save_config(&self, config: &EngineConfig) -> Result<(), StorageError> {
        let json = serde_json::to_string(config)
            .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;
        self.kv_set(KEY_ENGINE_CONFIG, &json)?;
        Ok(())
    }
}
