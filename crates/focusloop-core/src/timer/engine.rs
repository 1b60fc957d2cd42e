//! Engine facade.
//!
//! `FocusEngine` is the single entry point consumers use: control
//! operations (start/pause/reset/skip/update_settings), the read-only
//! display query, and reconciliation against sibling instances. It
//! composes the session clock and the phase machine, and talks to the
//! persistence and notification ports.
//!
//! The engine is wall-clock based and caller-driven - no internal
//! threads. The caller invokes `tick()` at roughly 1 Hz to commit due
//! transitions and refresh displays; ticks may be skipped, coalesced,
//! or delayed arbitrarily without corrupting state, because remaining
//! time is recomputed from the anchor on every read.
//!
//! ## Usage
//!
//! ```ignore
//! let bus = SyncBus::default();
//! let mut engine = FocusEngine::restore(Box::new(db), Config::load_or_default().engine_config());
//! engine.attach_bus(&bus);
//! engine.start();
//! // In a loop:
//! engine.reconcile();
//! engine.tick(); // Returns Some(Event) when a phase completes
//! let view = engine.display_state();
//! ```

use chrono::Utc;
use serde::Serialize;

use crate::events::Event;
use crate::notify::{completion_message, NotificationSink, NullSink};
use crate::storage::{PersistenceGateway, StoredEngine};
use crate::sync::{InstanceId, SyncBus, SyncMessage, SyncPublisher, SyncSubscriber};

use super::clock;
use super::phases::{self, Phase};
use super::settings::{ConfigPatch, EngineConfig};
use super::state::EngineState;

/// Read-only view for UI surfaces, recomputed from the snapshot and
/// the wall clock on every call.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayState {
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub phase: Phase,
    pub running: bool,
    pub cycle_count: u32,
    pub total_sessions: u64,
    pub progress_pct: f64,
}

/// Core engine facade.
///
/// Mutation is strictly sequential (`&mut self`); concurrent callers
/// serialize externally. Every mutating operation persists the new
/// snapshot and broadcasts it to sibling instances.
pub struct FocusEngine {
    state: EngineState,
    config: EngineConfig,
    origin: InstanceId,
    /// Epoch-ms deadline of a pending auto-start, if one is armed.
    auto_start_deadline_ms: Option<u64>,
    gateway: Option<Box<dyn PersistenceGateway>>,
    sink: Box<dyn NotificationSink>,
    publisher: Option<SyncPublisher>,
    subscriber: Option<SyncSubscriber>,
}

impl FocusEngine {
    /// Create a fresh engine with no persistence attached.
    pub fn new(config: EngineConfig) -> Self {
        let config = config.clamped();
        Self {
            state: EngineState::initial(&config),
            config,
            origin: InstanceId::new(),
            auto_start_deadline_ms: None,
            gateway: None,
            sink: Box::new(NullSink),
            publisher: None,
            subscriber: None,
        }
    }

    /// Restore from the gateway, falling back to `fallback_config`
    /// when nothing usable is stored. The gateway stays attached and
    /// receives every subsequent mutation.
    pub fn restore(gateway: Box<dyn PersistenceGateway>, fallback_config: EngineConfig) -> Self {
        let mut engine = match gateway.load() {
            Some(StoredEngine { state, config }) => {
                let config = config.clamped();
                let state = if state.is_well_formed() {
                    state
                } else {
                    EngineState::initial(&config)
                };
                let mut engine = Self::new(config);
                engine.state = state;
                engine
            }
            None => Self::new(fallback_config),
        };
        engine.gateway = Some(gateway);
        engine
    }

    /// Join a sync bus: publish every mutation, adopt foreign
    /// snapshots on `reconcile()`.
    pub fn attach_bus(&mut self, bus: &SyncBus) {
        self.publisher = Some(bus.publisher());
        self.subscriber = Some(bus.subscribe());
    }

    pub fn set_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = sink;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn origin(&self) -> &InstanceId {
        &self.origin
    }

    /// Pure read of the current display values.
    pub fn display_state(&self) -> DisplayState {
        self.display_state_at(clock::now_ms())
    }

    fn display_state_at(&self, now_ms: u64) -> DisplayState {
        let remaining = clock::remaining_secs(&self.state, now_ms);
        let total = self.config.phase_duration_secs(self.state.phase);
        let progress = if total == 0 {
            0.0
        } else {
            100.0 * (1.0 - remaining as f64 / total as f64)
        };
        DisplayState {
            remaining_secs: remaining,
            total_secs: total,
            phase: self.state.phase,
            running: self.state.running,
            cycle_count: self.state.cycle_count,
            total_sessions: self.state.total_sessions,
            progress_pct: progress.clamp(0.0, 100.0),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let view = self.display_state();
        Event::StateSnapshot {
            phase: view.phase,
            running: view.running,
            remaining_secs: view.remaining_secs,
            total_secs: view.total_secs,
            cycle_count: view.cycle_count,
            total_sessions: view.total_sessions,
            progress_pct: view.progress_pct,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(clock::now_ms())
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(clock::now_ms())
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.reset_at(clock::now_ms())
    }

    pub fn skip(&mut self) -> Option<Event> {
        self.skip_at(clock::now_ms())
    }

    /// Call periodically (~1 Hz). Commits a due phase transition or a
    /// due auto-start; otherwise does nothing. Safe to skip or delay -
    /// the first call after any gap computes the correct remaining
    /// value in one step.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(clock::now_ms())
    }

    /// Merge a partial settings update, clamping invalid values.
    ///
    /// While stopped, a change to the current phase's duration resizes
    /// the frozen remaining time to the new duration. While running,
    /// the in-flight countdown keeps the duration it was started with;
    /// new durations apply from the next (re)initialization.
    pub fn update_settings(&mut self, patch: &ConfigPatch) {
        let old_duration = self.config.phase_duration_secs(self.state.phase);
        self.config = self.config.merged(patch);
        let new_duration = self.config.phase_duration_secs(self.state.phase);

        if let Some(gw) = &self.gateway {
            if let Err(e) = gw.save_config(&self.config) {
                tracing::warn!(error = %e, "config save failed");
            }
        }

        if !self.state.running && new_duration != old_duration {
            clock::reinitialize(&mut self.state, new_duration);
            self.commit();
        }
    }

    fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        self.auto_start_deadline_ms = None;
        if self.state.running {
            return None;
        }
        clock::start(&mut self.state, now_ms);
        if self.config.notifications_enabled {
            self.sink.request_permission();
        }
        self.commit();
        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        self.auto_start_deadline_ms = None;
        if !self.state.running {
            return None;
        }
        clock::pause(&mut self.state, now_ms);
        self.commit();
        Some(Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    fn reset_at(&mut self, _now_ms: u64) -> Option<Event> {
        self.auto_start_deadline_ms = None;
        let duration = self.config.phase_duration_secs(self.state.phase);
        clock::reinitialize(&mut self.state, duration);
        self.commit();
        Some(Event::TimerReset {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    fn skip_at(&mut self, _now_ms: u64) -> Option<Event> {
        self.auto_start_deadline_ms = None;
        let from = self.state.phase;
        let to = phases::skip_target(from, self.state.cycle_count, self.config.long_break_interval);
        self.state.phase = to;
        clock::reinitialize(&mut self.state, self.config.phase_duration_secs(to));
        self.commit();
        Some(Event::TimerSkipped {
            from,
            to,
            at: Utc::now(),
        })
    }

    fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state.running {
            if clock::remaining_secs(&self.state, now_ms) == 0 {
                return Some(self.complete_phase_at(now_ms));
            }
            return None;
        }
        if let Some(due) = self.auto_start_deadline_ms {
            if now_ms >= due {
                return self.start_at(now_ms);
            }
        }
        None
    }

    /// Natural completion: notify, apply the transition table, arm the
    /// auto-start debounce, then commit - so sibling instances receive
    /// the new phase together with the notification trigger.
    fn complete_phase_at(&mut self, now_ms: u64) -> Event {
        let finished = self.state.phase;
        let outcome = phases::on_completion(
            finished,
            self.state.cycle_count,
            self.config.long_break_interval,
        );

        if self.config.notifications_enabled {
            let (title, body) = completion_message(finished, outcome.next);
            self.sink.play_completion_tone(finished);
            self.sink.show_system_notification(&title, &body);
        }

        self.state.phase = outcome.next;
        self.state.cycle_count = outcome.cycle_count;
        if outcome.counts_session {
            self.state.total_sessions += 1;
        }
        clock::reinitialize(
            &mut self.state,
            self.config.phase_duration_secs(outcome.next),
        );

        let auto_continue = if finished.is_break() {
            self.config.auto_start_work
        } else {
            self.config.auto_start_breaks
        };
        self.auto_start_deadline_ms =
            auto_continue.then(|| now_ms + self.config.auto_start_delay_ms);

        self.commit();
        Event::PhaseCompleted {
            finished,
            next: outcome.next,
            cycle_count: self.state.cycle_count,
            total_sessions: self.state.total_sessions,
            at: Utc::now(),
        }
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Adopt one foreign snapshot as authoritative. Returns whether
    /// anything changed: the instance's own echoes, malformed
    /// snapshots, and snapshots identical to the current state are all
    /// no-ops.
    pub fn apply_snapshot(&mut self, msg: SyncMessage) -> bool {
        if msg.origin == self.origin {
            return false;
        }
        if !msg.state.is_well_formed() {
            return false;
        }
        if msg.state == self.state {
            return false;
        }
        self.state = msg.state;
        // The adopted snapshot supersedes whatever this instance was
        // about to auto-start.
        self.auto_start_deadline_ms = None;
        true
    }

    /// Drain pending bus messages and adopt them, last snapshot wins.
    /// Adoption neither re-persists nor re-broadcasts - the
    /// originating instance already did both.
    pub fn reconcile(&mut self) -> bool {
        let messages = match &mut self.subscriber {
            Some(sub) => sub.drain(),
            None => return false,
        };
        let mut adopted = false;
        for msg in messages {
            adopted |= self.apply_snapshot(msg);
        }
        adopted
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Persist and broadcast the snapshot after a mutation. Port
    /// failures are logged and swallowed; the in-memory state is
    /// already correct and the next commit repairs the stores.
    fn commit(&mut self) {
        if let Some(gw) = &self.gateway {
            if let Err(e) = gw.save_state(&self.state) {
                tracing::warn!(error = %e, "state save failed");
            }
        }
        if let Some(publisher) = &self.publisher {
            publisher.publish(SyncMessage {
                state: self.state.clone(),
                origin: self.origin.clone(),
            });
        }
    }
}
