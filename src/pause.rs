//! Pause controller
//!
//! Manual pause toggling plus timed pauses that resume on their own. The
//! controller never schedules anything: expiry is a pure function of `now`, and
//! the detection loop (plus a low-frequency background tick) calls
//! [`PauseController::tick`] to clear an expired deadline.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseController {
    /// Manual pause flag
    #[serde(default)]
    pub is_paused: bool,
    /// Auto-resume deadline of a timed pause
    #[serde(default)]
    pub pause_until: Option<Millis>,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the manual pause flag. Any timed deadline is dropped, so a manual
    /// pause never resumes on its own.
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.pause_until = None;
        self.is_paused
    }

    /// Pause now and resume automatically after `duration_ms`
    pub fn pause_for(&mut self, duration_ms: Millis, now: Millis) {
        self.is_paused = true;
        self.pause_until = Some(now.saturating_add(duration_ms));
    }

    /// Clear any pause immediately
    pub fn resume(&mut self) {
        self.is_paused = false;
        self.pause_until = None;
    }

    /// Whether detection is paused at `now`
    pub fn is_paused(&self, now: Millis) -> bool {
        self.is_paused && !self.is_expired(now)
    }

    /// Time left on a timed pause; `None` when not paused or paused manually
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        if !self.is_paused(now) {
            return None;
        }
        self.pause_until.map(|until| until.saturating_sub(now))
    }

    /// Clear an expired timed pause. Returns true when this call resumed detection.
    pub fn tick(&mut self, now: Millis) -> bool {
        if self.is_paused && self.is_expired(now) {
            self.resume();
            return true;
        }
        false
    }

    fn is_expired(&self, now: Millis) -> bool {
        self.pause_until.is_some_and(|until| now >= until)
    }
}
