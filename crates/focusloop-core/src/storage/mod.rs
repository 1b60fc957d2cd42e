pub mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::error::StorageError;
use crate::timer::{EngineConfig, EngineState};

/// Everything the engine needs back from storage at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEngine {
    pub state: EngineState,
    pub config: EngineConfig,
}

/// Load/save contract the engine facade talks to.
///
/// Called at startup and after every mutating operation. The facade
/// never propagates failures from these calls - they are logged and
/// the engine keeps counting in memory.
pub trait PersistenceGateway {
    /// Load the stored snapshot, or `None` when nothing (usable) is
    /// stored. Partially corrupt data degrades to defaults per part.
    fn load(&self) -> Option<StoredEngine>;

    /// Persist the authoritative snapshot.
    fn save_state(&self, state: &EngineState) -> Result<(), StorageError>;

    /// Persist the engine's working settings.
    fn save_config(&self, config: &EngineConfig) -> Result<(), StorageError>;
}

/// Returns `~/.config/focusloop[-dev]/` based on FOCUSLOOP_ENV.
///
/// Set FOCUSLOOP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusloop-dev")
    } else {
        base_dir.join("focusloop")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
