//! Wall-clock-anchored session clock.
//!
//! Remaining time is a pure function of `(state, now)` - there is no
//! decrementing counter anywhere. A host that throttles or suspends
//! periodic wake-ups costs nothing: the first read after resumption
//! recomputes the exact remaining value in one step instead of
//! replaying missed ticks.
//!
//! All functions take `now_ms` explicitly so they stay deterministic
//! under test; callers use [`now_ms`] for the real clock.

use super::state::EngineState;

/// Current wall clock in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Remaining seconds in the current phase as of `now_ms`.
///
/// While running this subtracts wall-clock elapsed time from the frozen
/// `remaining_secs`; while stopped it returns the frozen value as-is.
pub fn remaining_secs(state: &EngineState, now_ms: u64) -> u64 {
    if !state.running {
        return state.remaining_secs;
    }
    let anchor = match state.anchor_epoch_ms {
        Some(a) => a,
        None => return state.remaining_secs,
    };
    let elapsed_secs = now_ms.saturating_sub(anchor) / 1000;
    state.remaining_secs.saturating_sub(elapsed_secs)
}

/// Anchor the clock at `now_ms` and mark it running. The frozen
/// `remaining_secs` stays in place as the value elapsed time will be
/// subtracted from.
pub fn start(state: &mut EngineState, now_ms: u64) {
    state.anchor_epoch_ms = Some(now_ms);
    state.running = true;
}

/// Fold elapsed time into `remaining_secs` and stop the clock.
pub fn pause(state: &mut EngineState, now_ms: u64) {
    state.remaining_secs = remaining_secs(state, now_ms);
    state.running = false;
    state.anchor_epoch_ms = None;
}

/// Replace the frozen remaining value and stop the clock. Used by
/// reset, skip, and phase transitions.
pub fn reinitialize(state: &mut EngineState, new_remaining_secs: u64) {
    state.remaining_secs = new_remaining_secs;
    state.running = false;
    state.anchor_epoch_ms = None;
}
