//! Phase state machine for the focus cycle.
//!
//! Encodes the Work -> Break -> Work cycle, cycle counting, and the
//! long-break threshold. The cycle is infinite - there is no terminal
//! phase. Transitions come in two flavors:
//!
//! - **Natural completion**: the countdown reached zero while running.
//!   Counters advance per the transition table below.
//! - **Forced (skip)**: the user jumps to the next phase immediately.
//!   Same target phase, zero counter effect.
//!
//! ```text
//! Work --(cycle+1 < interval)--> ShortBreak   cycle += 1, sessions += 1
//! Work --(cycle+1 >= interval)-> LongBreak    cycle = 0,  sessions += 1
//! ShortBreak ------------------> Work
//! LongBreak -------------------> Work
//! ```

use serde::{Deserialize, Serialize};

/// One segment of the focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Human-readable label used in notifications and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Outcome of a natural phase completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Phase to enter next.
    pub next: Phase,
    /// New completed-work count since the last long break.
    pub cycle_count: u32,
    /// Whether this completion counts as a finished work session.
    pub counts_session: bool,
}

/// Resolve a natural completion of `phase`.
///
/// `cycle_count` is the number of Work phases completed since the last
/// LongBreak; `long_break_interval` is how many Work phases earn one.
pub fn on_completion(phase: Phase, cycle_count: u32, long_break_interval: u32) -> Completion {
    match phase {
        Phase::Work => {
            if cycle_count + 1 >= long_break_interval {
                Completion {
                    next: Phase::LongBreak,
                    cycle_count: 0,
                    counts_session: true,
                }
            } else {
                Completion {
                    next: Phase::ShortBreak,
                    cycle_count: cycle_count + 1,
                    counts_session: true,
                }
            }
        }
        Phase::ShortBreak | Phase::LongBreak => Completion {
            next: Phase::Work,
            cycle_count,
            counts_session: false,
        },
    }
}

/// Target phase of a forced skip. Same "to" column as a natural
/// completion, but the caller applies no counter effects.
pub fn skip_target(phase: Phase, cycle_count: u32, long_break_interval: u32) -> Phase {
    on_completion(phase, cycle_count, long_break_interval).next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_completion_goes_to_short_break_below_threshold() {
        let c = on_completion(Phase::Work, 0, 4);
        assert_eq!(c.next, Phase::ShortBreak);
        assert_eq!(c.cycle_count, 1);
        assert!(c.counts_session);
    }

    #[test]
    fn work_completion_goes_to_long_break_at_threshold() {
        let c = on_completion(Phase::Work, 3, 4);
        assert_eq!(c.next, Phase::LongBreak);
        assert_eq!(c.cycle_count, 0);
        assert!(c.counts_session);
    }

    #[test]
    fn work_completion_goes_to_long_break_past_threshold() {
        // cycle_count can sit at interval-1 indefinitely if long breaks
        // are skipped; completion must still route to LongBreak.
        let c = on_completion(Phase::Work, 7, 4);
        assert_eq!(c.next, Phase::LongBreak);
        assert_eq!(c.cycle_count, 0);
    }

    #[test]
    fn breaks_complete_into_work_without_counter_effects() {
        for phase in [Phase::ShortBreak, Phase::LongBreak] {
            let c = on_completion(phase, 2, 4);
            assert_eq!(c.next, Phase::Work);
            assert_eq!(c.cycle_count, 2);
            assert!(!c.counts_session);
        }
    }

    #[test]
    fn interval_of_one_always_long_breaks() {
        let c = on_completion(Phase::Work, 0, 1);
        assert_eq!(c.next, Phase::LongBreak);
        assert_eq!(c.cycle_count, 0);
    }

    #[test]
    fn skip_target_matches_completion_target() {
        for (phase, cycle) in [(Phase::Work, 0), (Phase::Work, 3), (Phase::ShortBreak, 1), (Phase::LongBreak, 0)] {
            assert_eq!(
                skip_target(phase, cycle, 4),
                on_completion(phase, cycle, 4).next
            );
        }
    }

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Work.label(), "Work");
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
    }
}
