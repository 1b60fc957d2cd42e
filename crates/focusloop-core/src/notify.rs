//! Notification port.
//!
//! Completion tones and system notifications are best-effort side
//! effects behind this trait - never part of the correctness path. The
//! engine invokes the sink before committing a phase transition so
//! observers receive the new phase together with the notification
//! trigger, and swallows anything the sink does wrong.

use crate::timer::Phase;

/// Sink for completion side effects. Implementations must not block
/// and must not panic; the engine treats every call as fire-and-forget.
pub trait NotificationSink {
    fn play_completion_tone(&self, phase: Phase);
    fn show_system_notification(&self, title: &str, body: &str);

    /// Best-effort permission request, issued when the timer starts.
    fn request_permission(&self) {}
}

/// Discards everything. Default sink for embedding and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn play_completion_tone(&self, _phase: Phase) {}
    fn show_system_notification(&self, _title: &str, _body: &str) {}
}

/// Routes notifications to the tracing subscriber. Used by the CLI,
/// where a real toast/audio backend is out of scope.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn play_completion_tone(&self, phase: Phase) {
        tracing::info!(phase = phase.label(), "completion tone");
    }

    fn show_system_notification(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// Phase-specific notification copy for a natural completion.
pub fn completion_message(finished: Phase, next: Phase) -> (String, String) {
    let title = format!("{} finished", finished.label());
    let body = match next {
        Phase::Work => "Back to work.".to_string(),
        Phase::ShortBreak => "Take a short break.".to_string(),
        Phase::LongBreak => "Take a long break - you earned it.".to_string(),
    };
    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_message_names_the_finished_phase() {
        let (title, body) = completion_message(Phase::Work, Phase::ShortBreak);
        assert_eq!(title, "Work finished");
        assert!(body.contains("short break"));
    }

    #[test]
    fn long_break_gets_its_own_copy() {
        let (_, body) = completion_message(Phase::Work, Phase::LongBreak);
        assert!(body.contains("long break"));
        let (title, body) = completion_message(Phase::LongBreak, Phase::Work);
        assert_eq!(title, "Long Break finished");
        assert!(body.contains("work"));
    }
}
