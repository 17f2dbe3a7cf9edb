//! Host-driven auto-play.
//!
//! The player owns no thread and no timer. The host calls
//! [`AutoPlayer::poll`] with the current time (from a UI frame callback, a
//! sleep loop, a test clock) and the player applies every step whose
//! deadline has passed. Each step is a single synchronous
//! [`Steppable::step_forward`], so stopping between polls can never leave a
//! partially applied step behind.

use std::time::{Duration, Instant};

use crate::traits::Steppable;

/// Default delay between automatic steps.
pub const DEFAULT_SPEED_MS: u64 = 500;

/// Lower bound applied to the step interval.
pub const MIN_SPEED_MS: u64 = 1;

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_MS)
    }
}

impl AutoPlayer {
    pub fn new(speed_ms: u64) -> Self {
        Self {
            interval: interval_from_ms(speed_ms),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. A running player keeps its next deadline.
    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        self.interval = interval_from_ms(speed_ms);
    }

    pub fn is_playing(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start playing; the first step falls due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        #[cfg(feature = "tracing")]
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "autoplay started");
    }

    /// Stop scheduling further steps.
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("autoplay stopped");
        }
    }

    /// Time left until the next step, if playing.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Apply every step due by `now`. Stops itself once `target` is
    /// finished or refuses a step. Returns the number of steps applied.
    pub fn poll<S: Steppable + ?Sized>(&mut self, now: Instant, target: &mut S) -> usize {
        let mut applied = 0;
        while let Some(due) = self.next_due {
            if target.is_finished() {
                self.stop();
                break;
            }
            if now < due {
                break;
            }
            if target.step_forward().is_err() {
                self.stop();
                break;
            }
            applied += 1;
            self.next_due = Some(due + self.interval);
        }
        if self.next_due.is_some() && target.is_finished() {
            self.stop();
        }
        applied
    }
}

fn interval_from_ms(ms: u64) -> Duration {
    Duration::from_millis(ms.max(MIN_SPEED_MS))
}
