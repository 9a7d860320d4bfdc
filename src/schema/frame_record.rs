//! habit.frame.v1 schema definition
//!
//! The line-oriented input format for the engine. One record per line, three
//! record types:
//! - Frame records carrying one frame of model output
//! - Tick records that only advance the clock (auto-resume while the camera is idle)
//! - Control records carrying a user action (pause, mode change, ...)

use crate::types::{Face, FramePacket, HabitMode, Hand, Landmark, Millis, SegmentationMask};
use serde::{Deserialize, Serialize};

/// Current schema version
pub const SCHEMA_VERSION: &str = "habit.frame.v1";

/// Largest accepted magnitude of a normalized landmark coordinate.
///
/// Trackers report points slightly outside the frame; anything this far out
/// is garbage.
pub const MAX_LANDMARK_COORD: f64 = 1.0e3;

/// Type of record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// One frame of landmarks and mask
    Frame,
    /// Clock advance without a frame
    Tick,
    /// User action
    Control,
}

/// Model output for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramePayload {
    /// Detected hands, each a list of hand landmarks
    #[serde(default)]
    pub hands: Vec<Hand>,
    /// Detected faces; only the first is used
    #[serde(default)]
    pub face: Vec<Face>,
    /// Hair segmentation mask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<SegmentationMask>,
}

impl FramePayload {
    /// Check landmark coordinates and mask dimensions
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (hand_idx, hand) in self.hands.iter().enumerate() {
            check_landmarks("hand", hand_idx, hand)?;
        }
        for (face_idx, face) in self.face.iter().enumerate() {
            check_landmarks("face", face_idx, face)?;
        }
        if let Some(mask) = &self.mask {
            mask.check_dimensions()
                .map_err(|e| ValidationError::InvalidMask(e.to_string()))?;
        }
        Ok(())
    }
}

fn check_landmarks(kind: &str, set: usize, points: &[Landmark]) -> Result<(), ValidationError> {
    for (idx, point) in points.iter().enumerate() {
        let in_range = [point.x, point.y, point.z]
            .iter()
            .all(|v| v.is_finite() && v.abs() <= MAX_LANDMARK_COORD);
        if !in_range {
            return Err(ValidationError::InvalidLandmark(format!(
                "{} {} point {} at ({}, {}, {})",
                kind, set, idx, point.x, point.y, point.z
            )));
        }
    }
    Ok(())
}

/// User actions accepted on the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ControlAction {
    /// Flip manual pause
    TogglePause,
    /// Pause with automatic resume
    PauseFor { duration_ms: Millis },
    /// Clear any pause
    Resume,
    /// Flip alert sound on/off
    ToggleSound,
    /// Switch the watched habit
    SetMode { mode: HabitMode },
    /// Change contact sensitivity
    SetSensitivity { sensitivity: f64 },
}

/// Record payload - matches the record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Frame { frame: FramePayload },
    Control { control: ControlAction },
}

/// The habit.frame.v1 record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Schema version identifier
    pub schema_version: String,
    /// Unique record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: Millis,
    /// Type of record
    pub record_type: RecordType,
    /// Record payload (absent for ticks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl FrameRecord {
    /// Create a new frame record
    pub fn frame(timestamp_ms: Millis, frame: FramePayload) -> Self {
        FrameRecord {
            schema_version: SCHEMA_VERSION.to_string(),
            record_id: Some(uuid::Uuid::new_v4().to_string()),
            timestamp_ms,
            record_type: RecordType::Frame,
            payload: Some(Payload::Frame { frame }),
        }
    }

    /// Create a new tick record
    pub fn tick(timestamp_ms: Millis) -> Self {
        FrameRecord {
            schema_version: SCHEMA_VERSION.to_string(),
            record_id: Some(uuid::Uuid::new_v4().to_string()),
            timestamp_ms,
            record_type: RecordType::Tick,
            payload: None,
        }
    }

    /// Create a new control record
    pub fn control(timestamp_ms: Millis, control: ControlAction) -> Self {
        FrameRecord {
            schema_version: SCHEMA_VERSION.to_string(),
            record_id: Some(uuid::Uuid::new_v4().to_string()),
            timestamp_ms,
            record_type: RecordType::Control,
            payload: Some(Payload::Control { control }),
        }
    }

    /// Frame packet for the engine, if this is a frame record
    pub fn to_packet(&self) -> Option<FramePacket> {
        match &self.payload {
            Some(Payload::Frame { frame }) => Some(FramePacket {
                hands: frame.hands.clone(),
                face: frame.face.clone(),
                mask: frame.mask.clone(),
                now: self.timestamp_ms,
            }),
            _ => None,
        }
    }

    /// Validate the record schema
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Check schema version
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }

        // Validate payload matches record type
        match (&self.record_type, &self.payload) {
            (RecordType::Frame, Some(Payload::Frame { frame })) => frame.validate(),
            (RecordType::Control, Some(Payload::Control { control })) => match control {
                ControlAction::SetSensitivity { sensitivity }
                    if !sensitivity.is_finite() || !(0.0..=1.0).contains(sensitivity) =>
                {
                    Err(ValidationError::InvalidControl(format!(
                        "sensitivity {} outside [0, 1]",
                        sensitivity
                    )))
                }
                _ => Ok(()),
            },
            (RecordType::Tick, None) => Ok(()),
            _ => Err(ValidationError::PayloadTypeMismatch {
                record_type: format!("{:?}", self.record_type),
                payload_type: self.payload_type_name(),
            }),
        }
    }

    fn payload_type_name(&self) -> String {
        match &self.payload {
            Some(Payload::Frame { .. }) => "frame".to_string(),
            Some(Payload::Control { .. }) => "control".to_string(),
            None => "none".to_string(),
        }
    }
}

/// Validation errors for frame records
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("Payload type mismatch: record_type is {record_type} but payload is {payload_type}")]
    PayloadTypeMismatch { record_type: String, payload_type: String },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid landmark: {0}")]
    InvalidLandmark(String),

    #[error("Invalid control: {0}")]
    InvalidControl(String),
}
