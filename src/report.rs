//! Session report encoding
//!
//! This module turns the state of a detection session into the end-of-run
//! report the CLI and FFI hand back to hosts.

use crate::error::EngineError;
use crate::session::DetectionSession;
use crate::stats::format_elapsed;
use crate::types::{HabitMode, Millis};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report format version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Session identity and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSession {
    pub session_id: String,
    pub habit_mode: HabitMode,
    pub mode_label: String,
    pub started_at_utc: String,
    pub generated_at_utc: String,
    pub elapsed_ms: Millis,
    /// `HH:MM:SS`
    pub elapsed: String,
}

/// Session counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCounters {
    pub alerts_triggered: u64,
    pub frames_processed: u64,
    pub frames_in_zone: u64,
    pub frames_paused: u64,
    /// Share of active (unpaused) frames with contact
    pub in_zone_ratio: Option<f64>,
}

/// Settings and pause status at report time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatus {
    pub sensitivity: f64,
    pub is_alert_enabled: bool,
    pub alert_interval_ms: Millis,
    pub debounce_delay_ms: Millis,
    pub is_paused: bool,
    pub pause_remaining_ms: Option<Millis>,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub session: ReportSession,
    pub counters: ReportCounters,
    pub status: ReportStatus,
}

/// Encoder for session reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Build a report for `session` as of frame time `now`
    pub fn encode(&self, session: &DetectionSession, now: Millis) -> SessionReport {
        self.encode_at(session, now, Utc::now())
    }

    /// Encode to a pretty JSON string
    pub fn encode_to_json(
        &self,
        session: &DetectionSession,
        now: Millis,
    ) -> Result<String, EngineError> {
        let report = self.encode(session, now);
        serde_json::to_string_pretty(&report).map_err(EngineError::JsonError)
    }

    fn encode_at(
        &self,
        session: &DetectionSession,
        now: Millis,
        generated_at: DateTime<Utc>,
    ) -> SessionReport {
        let config = session.config();
        let stats = session.stats();
        let elapsed_ms = stats.elapsed(now);

        let active_frames = stats.frames_processed.saturating_sub(stats.frames_paused);
        let in_zone_ratio = if active_frames > 0 {
            Some(stats.frames_in_zone as f64 / active_frames as f64)
        } else {
            None
        };

        SessionReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            session: ReportSession {
                session_id: stats.session_id.clone(),
                habit_mode: config.habit_mode,
                mode_label: config.habit_mode.label(),
                started_at_utc: stats.started_at_utc.to_rfc3339(),
                generated_at_utc: generated_at.to_rfc3339(),
                elapsed_ms,
                elapsed: format_elapsed(elapsed_ms),
            },
            counters: ReportCounters {
                alerts_triggered: stats.alerts_triggered,
                frames_processed: stats.frames_processed,
                frames_in_zone: stats.frames_in_zone,
                frames_paused: stats.frames_paused,
                in_zone_ratio,
            },
            status: ReportStatus {
                sensitivity: config.sensitivity,
                is_alert_enabled: config.is_alert_enabled,
                alert_interval_ms: config.alert_interval_ms,
                debounce_delay_ms: config.debounce_delay_ms,
                is_paused: session.is_paused(now),
                pause_remaining_ms: session.pause_remaining(now),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::types::{FramePacket, Landmark, FACE_MESH_SIZE};
    use pretty_assertions::assert_eq;

    fn touching(now: Millis) -> FramePacket {
        FramePacket {
            hands: vec![vec![Landmark::new(0.3, 0.3); 21]],
            face: vec![vec![Landmark::new(0.3, 0.3); FACE_MESH_SIZE]],
            mask: None,
            now,
        }
    }

    #[test]
    fn test_encode_report() {
        let mut session =
            DetectionSession::new(DetectionConfig::for_mode(HabitMode::NailBiting), 1_000).unwrap();
        for now in (1_000..=2_000).step_by(250) {
            session.process_frame(&touching(now));
        }
        session.process_frame(&FramePacket::empty(2_250));
        session.pause_for(60_000, 2_300);
        session.process_frame(&touching(2_400));

        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(&session, 3_661_000 + 1_000);

        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.session.habit_mode, HabitMode::NailBiting);
        assert_eq!(report.session.elapsed, "01:01:01");
        assert_eq!(
            report.counters,
            ReportCounters {
                alerts_triggered: 1,
                frames_processed: 7,
                frames_in_zone: 5,
                frames_paused: 1,
                in_zone_ratio: Some(5.0 / 6.0),
            }
        );
        // The 60 s pause ran out long before report time
        assert!(!report.status.is_paused);
    }

    #[test]
    fn test_empty_session_has_no_ratio() {
        let session = DetectionSession::new(DetectionConfig::default(), 0).unwrap();
        let report = ReportEncoder::new().encode(&session, 0);
        assert_eq!(report.counters.in_zone_ratio, None);
        assert_eq!(report.session.elapsed, "00:00:00");
        assert_eq!(report.session.habit_mode, HabitMode::Trichotillomania);
    }

    #[test]
    fn test_encode_to_json() {
        let session = DetectionSession::new(DetectionConfig::default(), 0).unwrap();
        let json = ReportEncoder::new().encode_to_json(&session, 5_000).unwrap();
        assert!(json.contains("\"report_version\""));
        assert!(json.contains("\"elapsed\": \"00:00:05\""));
    }
}
