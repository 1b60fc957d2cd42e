//! The authoritative engine snapshot.
//!
//! `EngineState` is the single value every engine instance agrees on.
//! It is persisted after every mutation and exchanged between instances
//! on the sync bus; remaining time for display is always recomputed
//! from it plus the current wall clock (see `timer::clock`).

use serde::{Deserialize, Serialize};

use super::phases::Phase;
use super::settings::EngineConfig;

/// Authoritative, persisted timer snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Time left in the current phase, in seconds.
    pub remaining_secs: u64,
    pub running: bool,
    pub phase: Phase,
    /// Wall-clock moment (ms since epoch) the clock was last (re)started.
    /// `Some` exactly while `running`.
    #[serde(default)]
    pub anchor_epoch_ms: Option<u64>,
    /// Completed Work phases since the last LongBreak.
    #[serde(default)]
    pub cycle_count: u32,
    /// Lifetime count of completed Work phases. Never decreases.
    #[serde(default)]
    pub total_sessions: u64,
}

impl EngineState {
    /// Fresh state: a full Work phase, not running.
    pub fn initial(config: &EngineConfig) -> Self {
        Self {
            remaining_secs: config.phase_duration_secs(Phase::Work),
            running: false,
            phase: Phase::Work,
            anchor_epoch_ms: None,
            cycle_count: 0,
            total_sessions: 0,
        }
    }

    /// Shape check applied before adopting a foreign snapshot.
    ///
    /// A running snapshot must carry its anchor, otherwise remaining
    /// time cannot be recomputed and the snapshot is meaningless.
    pub fn is_well_formed(&self) -> bool {
        !self.running || self.anchor_epoch_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_work() {
        let state = EngineState::initial(&EngineConfig::default());
        assert_eq!(state.phase, Phase::Work);
        assert!(!state.running);
        assert_eq!(state.remaining_secs, 25 * 60);
        assert_eq!(state.cycle_count, 0);
        assert_eq!(state.total_sessions, 0);
        assert!(state.is_well_formed());
    }

    #[test]
    fn running_without_anchor_is_malformed() {
        let mut state = EngineState::initial(&EngineConfig::default());
        state.running = true;
        assert!(!state.is_well_formed());
        state.anchor_epoch_ms = Some(1_000);
        assert!(state.is_well_formed());
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut state = EngineState::initial(&EngineConfig::default());
        state.running = true;
        state.anchor_epoch_ms = Some(1_700_000_000_000);
        state.cycle_count = 2;
        state.total_sessions = 9;
        let json = serde_json::to_string(&state).unwrap();
        let parsed: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
