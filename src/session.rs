//! Detection session orchestration
//!
//! This module provides the stateful API hosts drive once per video frame. It
//! wires the mode registry, the alert state machine, the pause controller and
//! the session counters together:
//!
//! frame packet → registry/matcher → raw contact → state machine (pause gated)
//! → alert sink + counters → published snapshot

use crate::alert::{AlertEvent, ContactPhase, DetectionState, Transition};
use crate::config::{ConfigUpdate, DetectionConfig};
use crate::error::EngineError;
use crate::modes::{Contact, ModeRegistry};
use crate::schema::{ControlAction, FrameRecord, FrameRecordAdapter, Payload};
use crate::stats::SessionStats;
use crate::types::{FramePacket, HabitMode, Millis};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Receiver of alert events (sound playback lives on the other side)
pub trait AlertSink {
    fn on_alert(&mut self, event: &AlertEvent);
}

impl<F> AlertSink for F
where
    F: FnMut(&AlertEvent),
{
    fn on_alert(&mut self, event: &AlertEvent) {
        self(event)
    }
}

/// Raw detection result for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEvaluation {
    pub detected: bool,
    /// Which fingertip touched what, for highlighting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// What happened on one processed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub timestamp_ms: Millis,
    pub habit_mode: HabitMode,
    /// Raw matcher result (false when inference was skipped while paused)
    pub detected: bool,
    /// Zone status as shown to the user
    pub in_zone: bool,
    pub phase: ContactPhase,
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertEvent>,
    pub alerts_triggered: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// Consistent read-only view of a session after a completed transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: DetectionConfig,
    pub detection: DetectionState,
    pub stats: SessionStats,
    pub phase: ContactPhase,
    pub is_paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_remaining_ms: Option<Millis>,
    /// Frame clock time of the transition that produced this snapshot
    pub updated_at: Millis,
}

/// Shared handle UI readers use to observe a session.
///
/// Each transition publishes a whole new snapshot with a single pointer swap,
/// so readers never see a half-applied frame.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<SessionSnapshot>>>,
}

impl SnapshotHandle {
    fn new(snapshot: SessionSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// Latest published snapshot
    pub fn load(&self) -> Arc<SessionSnapshot> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn publish(&self, snapshot: SessionSnapshot) {
        let next = Arc::new(snapshot);
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }
}

/// Persisted form of a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedSession {
    config: DetectionConfig,
    detection: DetectionState,
    stats: SessionStats,
    /// Frame clock time of the last transition before saving
    #[serde(default)]
    saved_at: Option<Millis>,
}

/// Move a timestamp from the saving process's frame clock onto the loading one
fn rebase(t: Millis, saved_at: Millis, now: Millis) -> Millis {
    if now >= saved_at {
        t.saturating_add(now - saved_at)
    } else {
        t.saturating_sub(saved_at - now)
    }
}

/// Stateful detection session.
///
/// Owns the state machine memory, the counters and the pause flags of one
/// session. Driven by a single loop; share it behind a mutex if a background
/// ticker also needs it.
pub struct DetectionSession {
    config: DetectionConfig,
    state: DetectionState,
    stats: SessionStats,
    phase: ContactPhase,
    sink: Option<Box<dyn AlertSink + Send>>,
    snapshot: SnapshotHandle,
}

impl DetectionSession {
    /// Start a session at `now` with the given configuration
    pub fn new(config: DetectionConfig, now: Millis) -> Result<Self, EngineError> {
        config.validate()?;
        let state = DetectionState::new();
        let stats = SessionStats::new(now);
        let snapshot = SnapshotHandle::new(SessionSnapshot {
            config: config.clone(),
            detection: state,
            stats: stats.clone(),
            phase: ContactPhase::Idle,
            is_paused: false,
            pause_remaining_ms: None,
            updated_at: now,
        });

        info!(
            session_id = %stats.session_id,
            mode = %config.habit_mode,
            sensitivity = config.sensitivity,
            "detection session started"
        );

        Ok(Self {
            config,
            state,
            stats,
            phase: ContactPhase::Idle,
            sink: None,
            snapshot,
        })
    }

    /// Attach the receiver invoked synchronously on every alert
    pub fn with_alert_sink(mut self, sink: impl AlertSink + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_alert_sink(&mut self, sink: impl AlertSink + Send + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Run the active mode's matcher on a frame without touching session state
    pub fn evaluate_frame(&self, packet: &FramePacket) -> FrameEvaluation {
        let contact = ModeRegistry::find_contact(
            self.config.habit_mode,
            &packet.hands,
            &packet.face,
            packet.mask.as_ref(),
            self.config.sensitivity,
        );
        FrameEvaluation {
            detected: contact.is_some(),
            contact,
        }
    }

    /// Process one frame: evaluate, advance the state machine, fire alerts
    pub fn process_frame(&mut self, packet: &FramePacket) -> FrameOutcome {
        let now = packet.now;

        // Inference is skipped while paused; the state machine still runs so an
        // expired timed pause is observed on this very frame.
        let evaluation = if self.state.pause.is_paused(now) {
            FrameEvaluation::default()
        } else {
            self.evaluate_frame(packet)
        };

        let transition = self.state.step(evaluation.detected, now, &self.config);
        let alert = self.apply(transition, now);

        FrameOutcome {
            timestamp_ms: now,
            habit_mode: self.config.habit_mode,
            detected: evaluation.detected,
            in_zone: transition.in_zone,
            phase: transition.phase,
            paused: transition.paused,
            alert,
            alerts_triggered: self.stats.alerts_triggered,
            contact: evaluation.contact,
        }
    }

    /// Re-check the pause deadline without a frame. Returns true if detection resumed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let resumed = self.state.pause.tick(now);
        if resumed {
            info!(at = now, "timed pause expired, detection resumed");
        }
        self.publish(now);
        resumed
    }

    /// Flip the manual pause. Returns the new paused flag.
    pub fn toggle_pause(&mut self, now: Millis) -> bool {
        let paused = self.state.pause.toggle_pause();
        if paused {
            self.state.contact_started_at = None;
            self.phase = ContactPhase::Idle;
            self.stats.is_in_zone = false;
        }
        info!(paused, "pause toggled");
        self.publish(now);
        paused
    }

    /// Pause for `duration_ms`, resuming automatically afterwards
    pub fn pause_for(&mut self, duration_ms: Millis, now: Millis) {
        self.state.pause.pause_for(duration_ms, now);
        self.state.contact_started_at = None;
        self.phase = ContactPhase::Idle;
        self.stats.is_in_zone = false;
        info!(duration_ms, "timed pause started");
        self.publish(now);
    }

    /// Clear any pause now
    pub fn resume(&mut self, now: Millis) {
        self.state.pause.resume();
        info!("detection resumed");
        self.publish(now);
    }

    /// Apply a settings change; takes effect on the next frame
    pub fn update_config(&mut self, update: &ConfigUpdate, now: Millis) -> Result<(), EngineError> {
        self.config.apply(update)?;
        debug!(
            mode = %self.config.habit_mode,
            sensitivity = self.config.sensitivity,
            alerts = self.config.is_alert_enabled,
            "configuration updated"
        );
        self.publish(now);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: HabitMode, now: Millis) {
        self.config.habit_mode = mode;
        debug!(mode = %mode, "habit mode changed");
        self.publish(now);
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64, now: Millis) -> Result<(), EngineError> {
        self.update_config(
            &ConfigUpdate {
                sensitivity: Some(sensitivity),
                ..Default::default()
            },
            now,
        )
    }

    /// Flip alert sound on/off. Returns the new setting.
    pub fn toggle_alerts(&mut self, now: Millis) -> bool {
        self.config.is_alert_enabled = !self.config.is_alert_enabled;
        debug!(enabled = self.config.is_alert_enabled, "alerts toggled");
        self.publish(now);
        self.config.is_alert_enabled
    }

    /// Apply one stream record. Frame records yield an outcome; ticks and
    /// controls only change state.
    pub fn apply_record(&mut self, record: &FrameRecord) -> Result<Option<FrameOutcome>, EngineError> {
        let now = record.timestamp_ms;
        match &record.payload {
            Some(Payload::Frame { .. }) => Ok(record.to_packet().map(|p| self.process_frame(&p))),
            Some(Payload::Control { control }) => {
                self.apply_control(control, now)?;
                Ok(None)
            }
            None => {
                self.tick(now);
                Ok(None)
            }
        }
    }

    fn apply_control(&mut self, control: &ControlAction, now: Millis) -> Result<(), EngineError> {
        match control {
            ControlAction::TogglePause => {
                self.toggle_pause(now);
            }
            ControlAction::PauseFor { duration_ms } => self.pause_for(*duration_ms, now),
            ControlAction::Resume => self.resume(now),
            ControlAction::ToggleSound => {
                self.toggle_alerts(now);
            }
            ControlAction::SetMode { mode } => self.set_mode(*mode, now),
            ControlAction::SetSensitivity { sensitivity } => {
                self.set_sensitivity(*sensitivity, now)?
            }
        }
        Ok(())
    }

    /// Parse and apply one habit.frame.v1 JSON record, returning the outcome as JSON
    pub fn process_json(&mut self, record_json: &str) -> Result<Option<String>, EngineError> {
        let record = FrameRecordAdapter::parse_line(record_json)?;
        record
            .validate()
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        match self.apply_record(&record)? {
            Some(outcome) => Ok(Some(serde_json::to_string(&outcome)?)),
            None => Ok(None),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn detection_state(&self) -> &DetectionState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn is_paused(&self, now: Millis) -> bool {
        self.state.pause.is_paused(now)
    }

    /// Time left on a timed pause
    pub fn pause_remaining(&self, now: Millis) -> Option<Millis> {
        self.state.pause.remaining(now)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshot.load()
    }

    /// Handle for readers on other threads
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    /// Save the live session (state machine, pause, counters, config) to JSON
    pub fn save_state(&self) -> Result<String, EngineError> {
        let saved = SavedSession {
            config: self.config.clone(),
            detection: self.state,
            stats: self.stats.clone(),
            saved_at: Some(self.snapshot.load().updated_at),
        };
        serde_json::to_string(&saved).map_err(|e| EngineError::StateError(e.to_string()))
    }

    /// Restore a session saved with [`DetectionSession::save_state`].
    ///
    /// Stored timestamps are moved onto the current frame clock so that the
    /// debounce, rate limit and pause deadline keep the same distance from
    /// `now` that they had from the moment of saving.
    pub fn load_state(&mut self, json: &str, now: Millis) -> Result<(), EngineError> {
        let saved: SavedSession =
            serde_json::from_str(json).map_err(|e| EngineError::StateError(e.to_string()))?;
        saved.config.validate()?;

        let saved_at = saved.saved_at.unwrap_or(now);
        let mut detection = saved.detection;
        let mut stats = saved.stats;
        detection.contact_started_at = detection.contact_started_at.map(|t| rebase(t, saved_at, now));
        detection.last_alert_at = detection.last_alert_at.map(|t| rebase(t, saved_at, now));
        detection.pause.pause_until = detection.pause.pause_until.map(|t| rebase(t, saved_at, now));
        stats.session_started_at = rebase(stats.session_started_at, saved_at, now);
        debug!(saved_at, now, "session state restored");

        self.config = saved.config;
        self.state = detection;
        self.stats = stats;
        self.phase = if self.state.in_contact() {
            ContactPhase::Contact
        } else {
            ContactPhase::Idle
        };
        self.publish(now);
        Ok(())
    }

    fn apply(&mut self, transition: Transition, now: Millis) -> Option<AlertEvent> {
        let was_in_contact = self.state.in_contact();

        if transition.resumed {
            info!(at = now, "timed pause expired, detection resumed");
        }
        match (was_in_contact, transition.state.in_contact()) {
            (false, true) => debug!(at = now, "contact started"),
            (true, false) => debug!(at = now, "contact released"),
            _ => {}
        }

        self.state = transition.state;
        self.phase = transition.phase;
        self.stats.record_frame(transition.in_zone, transition.paused);

        let alert = if transition.fire {
            self.stats.record_alert();
            let event = AlertEvent {
                fired_at: now,
                contact_started_at: transition.state.contact_started_at.unwrap_or(now),
                alert_number: self.stats.alerts_triggered,
            };
            info!(
                alert = event.alert_number,
                mode = %self.config.habit_mode,
                held_ms = now.saturating_sub(event.contact_started_at),
                "habit alert"
            );
            if let Some(sink) = self.sink.as_mut() {
                sink.on_alert(&event);
            }
            Some(event)
        } else {
            None
        };

        self.publish(now);
        alert
    }

    fn publish(&self, now: Millis) {
        self.snapshot.publish(SessionSnapshot {
            config: self.config.clone(),
            detection: self.state,
            stats: self.stats.clone(),
            phase: self.phase,
            is_paused: self.state.pause.is_paused(now),
            pause_remaining_ms: self.state.pause.remaining(now),
            updated_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Landmark, SegmentationMask, FACE_MESH_SIZE};
    use std::sync::Mutex;

    fn nose_session() -> DetectionSession {
        DetectionSession::new(DetectionConfig::for_mode(HabitMode::NosePicking), 0).unwrap()
    }

    fn touching(now: Millis) -> FramePacket {
        FramePacket {
            hands: vec![vec![Landmark::new(0.5, 0.5); 21]],
            face: vec![vec![Landmark::new(0.5, 0.5); FACE_MESH_SIZE]],
            mask: None,
            now,
        }
    }

    fn apart(now: Millis) -> FramePacket {
        FramePacket {
            hands: vec![vec![Landmark::new(0.9, 0.9); 21]],
            face: vec![vec![Landmark::new(0.1, 0.1); FACE_MESH_SIZE]],
            mask: None,
            now,
        }
    }

    #[test]
    fn test_alert_fires_after_debounce_and_calls_sink() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink_log = Arc::clone(&fired);
        let mut session = nose_session().with_alert_sink(move |e: &AlertEvent| {
            sink_log.lock().unwrap().push(e.fired_at);
        });

        for now in (0..=1_000).step_by(100) {
            let outcome = session.process_frame(&touching(now));
            assert!(outcome.detected);
            assert!(outcome.in_zone);
            assert_eq!(outcome.alert.is_some(), now == 1_000);
        }

        assert_eq!(*fired.lock().unwrap(), vec![1_000]);
        assert_eq!(session.stats().alerts_triggered, 1);
        assert_eq!(session.phase(), ContactPhase::Alerted);
    }

    #[test]
    fn test_is_in_zone_mirrors_raw_signal() {
        let mut session = nose_session();
        session.process_frame(&touching(0));
        assert!(session.stats().is_in_zone);
        session.process_frame(&apart(10));
        assert!(!session.stats().is_in_zone);
        assert_eq!(session.detection_state().contact_started_at, None);
    }

    #[test]
    fn test_paused_frames_skip_inference() {
        let mut session = nose_session();
        session.toggle_pause(0);

        for now in (0..=5_000).step_by(500) {
            let outcome = session.process_frame(&touching(now));
            assert!(outcome.paused);
            assert!(!outcome.detected);
            assert!(!outcome.in_zone);
            assert!(outcome.alert.is_none());
        }
        assert_eq!(session.stats().alerts_triggered, 0);
        assert_eq!(session.stats().frames_paused, 11);
    }

    #[test]
    fn test_tick_resumes_without_frames() {
        let mut session = nose_session();
        session.pause_for(5_000, 0);
        assert!(session.snapshot().is_paused);
        assert_eq!(session.pause_remaining(2_000), Some(3_000));

        assert!(!session.tick(4_000));
        assert!(session.tick(5_000));
        assert!(!session.is_paused(5_000));
        assert!(!session.snapshot().is_paused);
        assert_eq!(session.detection_state().pause.pause_until, None);
    }

    #[test]
    fn test_mode_change_applies_next_frame() {
        let mut session = nose_session();
        assert!(session.process_frame(&touching(0)).detected);

        session.set_mode(HabitMode::Trichotillomania, 10);
        // No mask on the frame: hair mode cannot detect
        let outcome = session.process_frame(&touching(20));
        assert_eq!(outcome.habit_mode, HabitMode::Trichotillomania);
        assert!(!outcome.detected);

        let mut with_mask = touching(30);
        with_mask.mask = Some(SegmentationMask {
            width: 4,
            height: 4,
            data: vec![1; 16],
        });
        assert!(session.process_frame(&with_mask).detected);
    }

    #[test]
    fn test_toggle_alerts_blocks_firing() {
        let mut session = nose_session();
        assert!(!session.toggle_alerts(0));
        for now in (0..=5_000).step_by(250) {
            assert!(session.process_frame(&touching(now)).alert.is_none());
        }
        assert!(session.toggle_alerts(5_000));
        assert!(session.process_frame(&touching(5_250)).alert.is_some());
    }

    #[test]
    fn test_snapshot_handle_sees_completed_transitions() {
        let mut session = nose_session();
        let handle = session.snapshot_handle();

        session.process_frame(&touching(0));
        session.process_frame(&touching(1_000));

        let snap = handle.load();
        assert_eq!(snap.stats.alerts_triggered, 1);
        assert_eq!(snap.detection.last_alert_at, Some(1_000));
        assert_eq!(snap.phase, ContactPhase::Alerted);
        assert_eq!(snap.updated_at, 1_000);
    }

    #[test]
    fn test_records_drive_session() {
        let mut session = nose_session();
        let control = FrameRecord::control(0, ControlAction::PauseFor { duration_ms: 1_000 });
        assert_eq!(session.apply_record(&control).unwrap(), None);
        assert!(session.is_paused(500));

        assert_eq!(session.apply_record(&FrameRecord::tick(1_000)).unwrap(), None);
        assert!(!session.is_paused(1_000));

        let bad = FrameRecord::control(1_100, ControlAction::SetSensitivity { sensitivity: 3.0 });
        assert!(session.apply_record(&bad).is_err());
        assert_eq!(session.config().sensitivity, 0.5);
    }

    #[test]
    fn test_process_json_round_trip() {
        let mut session = nose_session();
        let out = session
            .process_json(r#"{"schema_version":"habit.frame.v1","timestamp_ms":5,"record_type":"frame","payload":{"frame":{"hands":[],"face":[]}}}"#)
            .unwrap()
            .unwrap();
        let outcome: FrameOutcome = serde_json::from_str(&out).unwrap();
        assert_eq!(outcome.timestamp_ms, 5);
        assert!(!outcome.detected);

        assert!(session.process_json("garbage").is_err());
    }

    #[test]
    fn test_save_and_load_state() {
        let mut session = nose_session();
        session.process_frame(&touching(0));
        session.process_frame(&touching(1_000));
        session.pause_for(10_000, 1_000);
        let saved = session.save_state().unwrap();

        let mut restored = DetectionSession::new(DetectionConfig::default(), 2_000).unwrap();
        restored.load_state(&saved, 2_000).unwrap();

        assert_eq!(restored.config().habit_mode, HabitMode::NosePicking);
        assert_eq!(restored.stats().alerts_triggered, 1);
        assert_eq!(restored.stats().session_id, session.stats().session_id);
        // Saved at 1_000 with 10s left; the remainder carries over
        assert!(restored.is_paused(2_000));
        assert_eq!(restored.pause_remaining(2_000), Some(10_000));
        assert_eq!(restored.stats().session_started_at, 1_000);

        assert!(restored.load_state("{}", 0).is_err());
    }

    #[test]
    fn test_load_state_onto_restarted_clock() {
        let mut session =
            DetectionSession::new(DetectionConfig::for_mode(HabitMode::NosePicking), 7_199_000)
                .unwrap();
        for now in (7_199_000..=7_200_000).step_by(100) {
            session.process_frame(&touching(now));
        }
        assert_eq!(session.detection_state().last_alert_at, Some(7_200_000));
        let saved = session.save_state().unwrap();

        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink_log = Arc::clone(&fired);
        let mut restored = DetectionSession::new(DetectionConfig::default(), 0)
            .unwrap()
            .with_alert_sink(move |e: &AlertEvent| sink_log.lock().unwrap().push(e.fired_at));
        restored.load_state(&saved, 0).unwrap();
        assert_eq!(restored.detection_state().last_alert_at, Some(0));
        assert_eq!(restored.phase(), ContactPhase::Contact);

        for now in (0..=60_000).step_by(100) {
            restored.process_frame(&touching(now));
        }
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 20);
        assert_eq!(fired[0], 3_000);
        assert_eq!(restored.stats().alerts_triggered, 21);
    }

    #[test]
    fn test_load_state_keeps_pause_remainder() {
        let mut session = nose_session();
        session.pause_for(60_000, 9_000_000);
        let saved = session.save_state().unwrap();

        let mut restored = DetectionSession::new(DetectionConfig::default(), 0).unwrap();
        restored.load_state(&saved, 500).unwrap();
        assert_eq!(restored.pause_remaining(500), Some(60_000));
        assert!(restored.tick(60_500));
        assert!(restored.process_frame(&touching(60_600)).in_zone);
    }

    #[test]
    fn test_load_state_without_saved_at() {
        let mut session = nose_session();
        session.pause_for(5_000, 1_000);
        let mut value: serde_json::Value =
            serde_json::from_str(&session.save_state().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("saved_at");

        let mut restored = nose_session();
        restored.load_state(&value.to_string(), 2_000).unwrap();
        assert_eq!(restored.pause_remaining(2_000), Some(4_000));
    }

    #[test]
    fn test_process_json_rejects_far_off_landmarks() {
        let mut session = DetectionSession::new(
            DetectionConfig::for_mode(HabitMode::Trichotillomania),
            0,
        )
        .unwrap();
        let hand: Vec<_> = (0..21).map(|_| r#"{"x":1e300,"y":0.5}"#).collect();
        let record = format!(
            r#"{{"schema_version":"habit.frame.v1","timestamp_ms":0,"record_type":"frame","payload":{{"frame":{{"hands":[[{}]],"mask":{{"width":4,"height":4,"data":[1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1]}}}}}}}}"#,
            hand.join(",")
        );

        let err = session.process_json(&record).unwrap_err();
        assert!(err.to_string().contains("landmark"));
        assert_eq!(session.stats().frames_processed, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DetectionConfig {
            sensitivity: f64::NAN,
            ..Default::default()
        };
        assert!(DetectionSession::new(config, 0).is_err());
    }
}
