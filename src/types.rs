//! Core data types for habitwatch
//!
//! This module defines the per-frame inputs produced by the external model runner
//! (hand landmarks, face mesh, segmentation mask) and the habit modes the engine
//! can watch for.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monotonic timestamp in milliseconds
pub type Millis = u64;

/// Fingertip landmark indices read by every matcher (thumb, index, middle)
pub const FINGER_TIPS: [usize; 3] = [4, 8, 12];

/// Canonical face mesh size
pub const FACE_MESH_SIZE: usize = 468;

/// A normalized landmark in camera-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth, unused by the detection core
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// One detected hand: landmarks in anatomical order (21 for a full hand)
pub type Hand = Vec<Landmark>;

/// One detected face: face mesh landmarks in canonical order
pub type Face = Vec<Landmark>;

/// Binary segmentation mask, one byte per pixel in row-major order.
///
/// A value greater than zero means the target material (e.g. hair) is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentationMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl SegmentationMask {
    /// Create a mask, checking that the buffer covers exactly `width * height` pixels
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, EngineError> {
        let mask = Self { width, height, data };
        mask.check_dimensions()?;
        Ok(mask)
    }

    /// Create an all-background mask
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Verify the buffer length matches the declared dimensions
    pub fn check_dimensions(&self) -> Result<(), EngineError> {
        let expected = self.width.checked_mul(self.height).ok_or_else(|| {
            EngineError::InvalidMask(format!("{}x{} overflows", self.width, self.height))
        })?;
        if self.data.len() != expected {
            return Err(EngineError::InvalidMask(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Mark a single pixel as positive (no-op when out of bounds)
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            if let Some(px) = self.data.get_mut(y * self.width + x) {
                *px = value;
            }
        }
    }

    /// Whether the pixel at `(x, y)` holds target material.
    ///
    /// Out-of-bounds coordinates and short buffers read as background.
    pub fn is_positive(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data.get(y * self.width + x).is_some_and(|&v| v > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Habits the engine can watch for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitMode {
    /// Hair pulling, matched against the hair segmentation mask
    #[default]
    Trichotillomania,
    SkinPicking,
    NailBiting,
    NosePicking,
    BeardPulling,
    EyeScratching,
}

impl HabitMode {
    /// Every supported mode, in display order
    pub const ALL: [HabitMode; 6] = [
        HabitMode::Trichotillomania,
        HabitMode::SkinPicking,
        HabitMode::NailBiting,
        HabitMode::NosePicking,
        HabitMode::BeardPulling,
        HabitMode::EyeScratching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitMode::Trichotillomania => "trichotillomania",
            HabitMode::SkinPicking => "skin_picking",
            HabitMode::NailBiting => "nail_biting",
            HabitMode::NosePicking => "nose_picking",
            HabitMode::BeardPulling => "beard_pulling",
            HabitMode::EyeScratching => "eye_scratching",
        }
    }

    /// Human-readable label, e.g. "NAIL BITING"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for HabitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        HabitMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| EngineError::UnknownMode(s.to_string()))
    }
}

/// One frame of model output, as delivered by the external inference runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramePacket {
    /// Detected hands (0-2)
    #[serde(default)]
    pub hands: Vec<Hand>,
    /// Detected faces; only the first is considered
    #[serde(default)]
    pub face: Vec<Face>,
    /// Segmentation mask, present when the active mode needs one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<SegmentationMask>,
    /// Frame timestamp (monotonic milliseconds)
    pub now: Millis,
}

impl FramePacket {
    /// A frame with nothing detected
    pub fn empty(now: Millis) -> Self {
        Self {
            now,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_round_trip() {
        for mode in HabitMode::ALL {
            assert_eq!(mode.as_str().parse::<HabitMode>().unwrap(), mode);
        }
        assert_eq!("Nail-Biting".parse::<HabitMode>().unwrap(), HabitMode::NailBiting);
        assert!("thumb_sucking".parse::<HabitMode>().is_err());
    }

    #[test]
    fn test_mode_serde_snake_case() {
        let json = serde_json::to_string(&HabitMode::EyeScratching).unwrap();
        assert_eq!(json, "\"eye_scratching\"");
        assert_eq!(HabitMode::BeardPulling.label(), "BEARD PULLING");
    }

    #[test]
    fn test_mask_dimension_check() {
        assert!(SegmentationMask::new(4, 4, vec![0; 16]).is_ok());
        assert!(matches!(
            SegmentationMask::new(4, 4, vec![0; 15]),
            Err(EngineError::InvalidMask(_))
        ));
    }

    #[test]
    fn test_mask_reads_are_bounds_checked() {
        let mut mask = SegmentationMask::empty(3, 2);
        mask.set(2, 1, 255);
        assert!(mask.is_positive(2, 1));
        assert!(!mask.is_positive(3, 1));
        assert!(!mask.is_positive(0, 2));

        let short = SegmentationMask {
            width: 10,
            height: 10,
            data: vec![1; 5],
        };
        assert!(!short.is_positive(9, 9));
    }

    #[test]
    fn test_landmark_z_defaults() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.25, "y": 0.75}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.25, 0.75));
    }
}
