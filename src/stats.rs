//! Session counters
//!
//! Bookkeeping for one detection session: how many alerts fired, when the
//! session started, and whether a hand is in the target zone right now.

use crate::types::Millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Unique session identifier
    pub session_id: String,
    /// Alerts fired since the session started; never decreases
    pub alerts_triggered: u64,
    /// Session start on the monotonic frame clock
    pub session_started_at: Millis,
    /// Session start in wall-clock time
    pub started_at_utc: DateTime<Utc>,
    /// Raw detection result of the latest frame (false while paused)
    pub is_in_zone: bool,
    /// Frames received
    #[serde(default)]
    pub frames_processed: u64,
    /// Frames where contact was detected
    #[serde(default)]
    pub frames_in_zone: u64,
    /// Frames received while paused
    #[serde(default)]
    pub frames_paused: u64,
}

impl SessionStats {
    /// Start a new session at `now`
    pub fn new(now: Millis) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            alerts_triggered: 0,
            session_started_at: now,
            started_at_utc: Utc::now(),
            is_in_zone: false,
            frames_processed: 0,
            frames_in_zone: 0,
            frames_paused: 0,
        }
    }

    pub fn record_alert(&mut self) {
        self.alerts_triggered += 1;
    }

    /// Count a frame and mirror its zone status
    pub fn record_frame(&mut self, in_zone: bool, paused: bool) {
        self.frames_processed += 1;
        self.is_in_zone = in_zone;
        if in_zone {
            self.frames_in_zone += 1;
        }
        if paused {
            self.frames_paused += 1;
        }
    }

    /// Time since the session started
    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.session_started_at)
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn elapsed_display(&self, now: Millis) -> String {
        format_elapsed(self.elapsed(now))
    }
}

/// Format a duration as `HH:MM:SS`; hours keep growing past 99
pub fn format_elapsed(ms: Millis) -> String {
    let total_secs = ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(999), "00:00:00");
        assert_eq!(format_elapsed(61_000), "00:01:01");
        assert_eq!(format_elapsed(3_725_000), "01:02:05");
        assert_eq!(format_elapsed(100 * 3_600_000), "100:00:00");
    }

    #[test]
    fn test_counters() {
        let mut stats = SessionStats::new(500);
        stats.record_frame(true, false);
        stats.record_frame(false, true);
        stats.record_alert();

        assert_eq!(stats.frames_processed, 2);
        assert_eq!(stats.frames_in_zone, 1);
        assert_eq!(stats.frames_paused, 1);
        assert_eq!(stats.alerts_triggered, 1);
        assert!(!stats.is_in_zone);
        assert_eq!(stats.elapsed(1_500), 1_000);
        assert_eq!(stats.elapsed(100), 0);
        assert_eq!(stats.elapsed_display(62_500), "00:01:02");
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(SessionStats::new(0).session_id, SessionStats::new(0).session_id);
    }
}
