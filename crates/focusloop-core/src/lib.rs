//! # Focusloop Core Library
//!
//! This library provides the core logic for the Focusloop focus-session
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI surface being a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-anchored state machine; remaining
//!   time is recomputed from an anchor timestamp on every read, so
//!   throttled or suspended hosts never corrupt the countdown
//! - **Sync Bus**: broadcast channel keeping concurrent engine
//!   instances converged on one authoritative snapshot
//! - **Storage**: SQLite-based snapshot persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`FocusEngine`]: engine facade - control operations and display query
//! - [`SyncBus`]: snapshot publish/subscribe between instances
//! - [`Database`]: persisted snapshot storage
//! - [`Config`]: application configuration management
//! - [`NotificationSink`]: port for completion tones and notifications

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod sync;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{LogSink, NotificationSink, NullSink};
pub use storage::{Config, Database, PersistenceGateway, StoredEngine};
pub use sync::{InstanceId, SyncBus, SyncMessage};
pub use timer::{ConfigPatch, DisplayState, EngineConfig, EngineState, FocusEngine, Phase};
