use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a status message stays up.
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Transient status line.
///
/// Every [`set`](Self::set) schedules its own clear. Clears are never
/// cancelled, so an earlier message's deadline can wipe a newer message
/// before that newer message's own lifetime is up.
#[derive(Debug, Clone)]
pub struct Feedback {
    text: Option<String>,
    pending: VecDeque<Instant>,
    duration: Duration,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(FEEDBACK_DURATION)
    }
}

impl Feedback {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            text: None,
            pending: VecDeque::new(),
            duration,
        }
    }

    pub fn set(&mut self, message: impl Into<String>, now: Instant) {
        self.text = Some(message.into());
        self.pending.push_back(now + self.duration);
    }

    /// Fire every clear whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        while self.pending.front().is_some_and(|&at| at <= now) {
            self.pending.pop_front();
            self.text = None;
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
