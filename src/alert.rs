//! Detection-to-alert state machine
//!
//! Turns the noisy per-frame "in contact" signal into rate-limited alerts:
//!
//! - **Debounce**: contact must be held for `debounce_delay_ms` before the first
//!   alert of an episode; releasing contact restarts the timer from zero.
//! - **Rate limit**: any two alerts are at least `alert_interval_ms` apart. Held
//!   contact keeps re-firing at that interval.
//! - **Pause gate**: while paused the signal reads as "no contact".
//!
//! [`DetectionState`] is a plain value. Each frame produces a new state through
//! [`DetectionState::step`], which callers swap in wholesale.

use crate::config::DetectionConfig;
use crate::pause::PauseController;
use crate::types::Millis;
use serde::{Deserialize, Serialize};

/// Where the current contact episode stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPhase {
    /// No ongoing contact
    Idle,
    /// Contact held, no alert this frame
    Contact,
    /// An alert fired this frame
    Alerted,
}

/// Alert emitted by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Frame time the alert fired at
    pub fired_at: Millis,
    /// When the contact episode began
    pub contact_started_at: Millis,
    /// Running alert count including this one
    pub alert_number: u64,
}

/// Memory of the state machine between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionState {
    /// Start of the current contact episode
    pub contact_started_at: Option<Millis>,
    /// Time of the last alert; `None` means never
    pub last_alert_at: Option<Millis>,
    /// Pause flags gating the machine
    #[serde(flatten)]
    pub pause: PauseController,
}

/// Outcome of one step of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State to swap in
    pub state: DetectionState,
    /// Zone status to report (false while paused)
    pub in_zone: bool,
    pub phase: ContactPhase,
    /// Whether the frame was gated by a pause
    pub paused: bool,
    /// Whether an alert fires this frame
    pub fire: bool,
    /// Whether a timed pause expired on this step
    pub resumed: bool,
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the machine by one frame. Never fails.
    ///
    /// A timed pause whose deadline has passed is cleared before the frame is
    /// interpreted.
    pub fn step(&self, raw_detected: bool, now: Millis, config: &DetectionConfig) -> Transition {
        let mut next = *self;
        let resumed = next.pause.tick(now);

        if next.pause.is_paused(now) {
            next.contact_started_at = None;
            return Transition {
                state: next,
                in_zone: false,
                phase: ContactPhase::Idle,
                paused: true,
                fire: false,
                resumed,
            };
        }

        if !raw_detected {
            next.contact_started_at = None;
            return Transition {
                state: next,
                in_zone: false,
                phase: ContactPhase::Idle,
                paused: false,
                fire: false,
                resumed,
            };
        }

        let contact_started_at = *next.contact_started_at.get_or_insert(now);
        let held_for = now.saturating_sub(contact_started_at);
        let since_last_alert = next.last_alert_at.map(|t| now.saturating_sub(t));

        let fire = held_for >= config.debounce_delay_ms
            && config.is_alert_enabled
            && since_last_alert.map_or(true, |gap| gap >= config.alert_interval_ms);

        if fire {
            next.last_alert_at = Some(now);
        }

        Transition {
            state: next,
            in_zone: true,
            phase: if fire {
                ContactPhase::Alerted
            } else {
                ContactPhase::Contact
            },
            paused: false,
            fire,
            resumed,
        }
    }

    /// Whether a contact episode is in progress
    pub fn in_contact(&self) -> bool {
        self.contact_started_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(debounce: Millis, interval: Millis) -> DetectionConfig {
        DetectionConfig {
            debounce_delay_ms: debounce,
            alert_interval_ms: interval,
            ..Default::default()
        }
    }

    /// Feed a constant signal every `step_ms` over `[from, to]`, returning alert times
    fn drive(
        state: &mut DetectionState,
        raw: bool,
        from: Millis,
        to: Millis,
        step_ms: Millis,
        cfg: &DetectionConfig,
    ) -> Vec<Millis> {
        let mut fired = Vec::new();
        let mut now = from;
        while now <= to {
            let t = state.step(raw, now, cfg);
            if t.fire {
                fired.push(now);
            }
            *state = t.state;
            now += step_ms;
        }
        fired
    }

    #[test]
    fn test_debounce_gate() {
        let cfg = config(1_000, 1_000);
        let mut state = DetectionState::new();

        assert!(drive(&mut state, true, 0, 999, 1, &cfg).is_empty());
        let t = state.step(true, 1_000, &cfg);
        assert!(t.fire);
        assert_eq!(t.phase, ContactPhase::Alerted);
        assert_eq!(t.state.contact_started_at, Some(0));
    }

    #[test]
    fn test_rate_limit_spacing() {
        let cfg = config(1_000, 3_000);
        let mut state = DetectionState::new();
        let fired = drive(&mut state, true, 0, 10_000, 100, &cfg);
        assert_eq!(fired, vec![1_000, 4_000, 7_000, 10_000]);
    }

    #[test]
    fn test_short_interval_refires_every_interval() {
        let cfg = config(2_000, 500);
        let mut state = DetectionState::new();
        let fired = drive(&mut state, true, 0, 3_000, 250, &cfg);
        assert_eq!(fired, vec![2_000, 2_500, 3_000]);
    }

    #[test]
    fn test_release_resets_debounce() {
        let cfg = config(1_000, 1_000);
        let mut state = DetectionState::new();

        assert!(drive(&mut state, true, 0, 600, 50, &cfg).is_empty());
        assert!(drive(&mut state, false, 650, 2_000, 50, &cfg).is_empty());
        assert_eq!(state.contact_started_at, None);

        // Re-entry at 2050 restarts the debounce from zero
        let fired = drive(&mut state, true, 2_050, 3_100, 50, &cfg);
        assert_eq!(fired, vec![3_050]);
    }

    #[test]
    fn test_rate_limit_spans_episodes() {
        let cfg = config(100, 5_000);
        let mut state = DetectionState::new();

        assert_eq!(drive(&mut state, true, 0, 200, 100, &cfg), vec![100]);
        drive(&mut state, false, 300, 300, 100, &cfg);
        // Second episode passes debounce at 500 but the interval holds until 5100
        let fired = drive(&mut state, true, 400, 5_200, 100, &cfg);
        assert_eq!(fired, vec![5_100]);
    }

    #[test]
    fn test_disabled_alerts_still_track_contact() {
        let mut cfg = config(0, 0);
        cfg.is_alert_enabled = false;
        let t = DetectionState::new().step(true, 10, &cfg);
        assert!(!t.fire);
        assert!(t.in_zone);
        assert_eq!(t.phase, ContactPhase::Contact);
        assert_eq!(t.state.contact_started_at, Some(10));
    }

    #[test]
    fn test_pause_suppresses_and_clears_contact() {
        let cfg = config(0, 0);
        let mut state = DetectionState::new();
        state = state.step(true, 0, &cfg).state;
        state.pause.toggle_pause();

        for now in [10, 5_000, 100_000] {
            let t = state.step(true, now, &cfg);
            assert!(t.paused);
            assert!(!t.fire);
            assert!(!t.in_zone);
            assert_eq!(t.state.contact_started_at, None);
            state = t.state;
        }
    }

    #[test]
    fn test_timed_pause_resumes_inside_step() {
        let cfg = config(1_000, 1_000);
        let mut state = DetectionState::new();
        state.pause.pause_for(5_000, 0);

        assert!(drive(&mut state, true, 0, 4_900, 100, &cfg).is_empty());
        let t = state.step(true, 5_000, &cfg);
        assert!(t.resumed);
        assert!(!t.paused);
        assert!(t.in_zone);
        assert_eq!(t.state.pause, PauseController::default());

        // Debounce starts at resume, not before the pause
        state = t.state;
        assert_eq!(drive(&mut state, true, 5_100, 6_000, 100, &cfg), vec![6_000]);
    }

    #[test]
    fn test_clock_going_backwards_is_total() {
        let cfg = config(1_000, 1_000);
        let mut state = DetectionState::new();
        state = state.step(true, 5_000, &cfg).state;
        let t = state.step(true, 4_000, &cfg);
        assert!(!t.fire);
        assert!(t.in_zone);
    }

    #[test]
    fn test_state_serializes_flat() {
        let mut state = DetectionState::new();
        state.contact_started_at = Some(12);
        state.pause.pause_for(100, 0);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["contact_started_at"], 12);
        assert_eq!(json["is_paused"], true);
        assert_eq!(json["pause_until"], 100);
        assert!(json["last_alert_at"].is_null());

        let back: DetectionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
