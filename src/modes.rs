//! Habit mode registry
//!
//! Maps every [`HabitMode`] to the matcher it uses and, for face-region habits,
//! the face mesh indices that count as the target area. The table is immutable;
//! evaluation is a pure function of the frame and the sensitivity.

use crate::matcher::{MaskContact, MaskNeighborhoodSearch, ProximityContact, ProximityMatcher};
use crate::types::{Face, HabitMode, Hand, Landmark, SegmentationMask, FACE_MESH_SIZE};
use serde::{Deserialize, Serialize};

/// Nose bridge, tip and nostrils
pub const NOSE_LANDMARKS: [usize; 9] = [1, 2, 4, 5, 6, 19, 94, 197, 168];

/// Upper and lower lips
pub const MOUTH_LANDMARKS: [usize; 24] = [
    0, 11, 12, 13, 14, 15, 16, 17, 37, 38, 39, 40, 41, 42, 61, 62, 78, 80, 81, 82, 87, 88, 91, 95,
];

/// Mustache area (both sides), chin and jawline
pub const BEARD_LANDMARKS: [usize; 28] = [
    164, 167, 165, 186, 92, 203, 206, 216, // mustache left
    436, 426, 423, 410, 322, 407, 391, // mustache right
    152, 148, 149, 150, 175, 377, 378, 379, 396, 400, 201, 208, 171, // chin and jaw
];

/// Eye contours, under-eye orbit and brow bone
pub const EYE_LANDMARKS: [usize; 54] = [
    // left eye contour
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
    // right eye contour
    263, 249, 390, 373, 374, 380, 381, 382, 362, 398, 384, 385, 386, 387, 388, 466,
    // under-eye / orbit
    111, 117, 118, 119, 120, 121, 340, 346, 347, 348, 349, 350,
    // brow bone
    70, 63, 105, 66, 107, 300, 293, 334, 296, 336,
];

/// Stride of the distributed skin sample across the face mesh
const SKIN_SAMPLE_STRIDE: usize = 15;

const SKIN_SAMPLE_LEN: usize = FACE_MESH_SIZE.div_ceil(SKIN_SAMPLE_STRIDE);

/// Every 15th face mesh point: forehead, cheeks and chin
pub const SKIN_LANDMARKS: [usize; SKIN_SAMPLE_LEN] = skin_sample();

const fn skin_sample() -> [usize; SKIN_SAMPLE_LEN] {
    let mut out = [0; SKIN_SAMPLE_LEN];
    let mut i = 0;
    while i < SKIN_SAMPLE_LEN {
        out[i] = i * SKIN_SAMPLE_STRIDE;
        i += 1;
    }
    out
}

/// Which matching algorithm a mode uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    /// Fingertips against face mesh targets
    Proximity,
    /// Fingertips against a segmentation mask
    Mask,
}

/// Registry entry for one habit mode
#[derive(Debug, Clone, Copy)]
pub struct ModeSpec {
    pub mode: HabitMode,
    pub matcher: MatcherKind,
    /// Face mesh target indices (empty for mask modes)
    pub targets: &'static [usize],
    pub description: &'static str,
}

const MODE_TABLE: [ModeSpec; 6] = [
    ModeSpec {
        mode: HabitMode::Trichotillomania,
        matcher: MatcherKind::Mask,
        targets: &[],
        description: "Fingertips near the hair segmentation mask",
    },
    ModeSpec {
        mode: HabitMode::SkinPicking,
        matcher: MatcherKind::Proximity,
        targets: &SKIN_LANDMARKS,
        description: "Fingertips near forehead, cheeks or chin",
    },
    ModeSpec {
        mode: HabitMode::NailBiting,
        matcher: MatcherKind::Proximity,
        targets: &MOUTH_LANDMARKS,
        description: "Fingertips near the lips",
    },
    ModeSpec {
        mode: HabitMode::NosePicking,
        matcher: MatcherKind::Proximity,
        targets: &NOSE_LANDMARKS,
        description: "Fingertips near the nose bridge, tip or nostrils",
    },
    ModeSpec {
        mode: HabitMode::BeardPulling,
        matcher: MatcherKind::Proximity,
        targets: &BEARD_LANDMARKS,
        description: "Fingertips near the mustache, chin or jawline",
    },
    ModeSpec {
        mode: HabitMode::EyeScratching,
        matcher: MatcherKind::Proximity,
        targets: &EYE_LANDMARKS,
        description: "Fingertips near the eyelids, under-eye or brow bone",
    },
];

/// Where contact was found this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contact {
    Proximity(ProximityContact),
    Mask(MaskContact),
}

/// Lookup table from habit mode to matcher and target area
pub struct ModeRegistry;

impl ModeRegistry {
    /// All registry entries in display order
    pub fn all() -> &'static [ModeSpec] {
        &MODE_TABLE
    }

    /// Registry entry for a mode
    pub fn spec(mode: HabitMode) -> &'static ModeSpec {
        // The table covers every variant in declaration order
        &MODE_TABLE[mode as usize]
    }

    pub fn matcher_kind(mode: HabitMode) -> MatcherKind {
        Self::spec(mode).matcher
    }

    /// Face mesh target indices for a mode (empty for mask modes)
    pub fn target_indices(mode: HabitMode) -> &'static [usize] {
        Self::spec(mode).targets
    }

    /// Decide whether the habit is being performed in this frame.
    ///
    /// Mask modes never read `faces`; proximity modes never read `mask`. A mask
    /// mode without a mask reports no detection.
    pub fn evaluate(
        mode: HabitMode,
        hands: &[Hand],
        faces: &[Face],
        mask: Option<&SegmentationMask>,
        sensitivity: f64,
    ) -> bool {
        Self::find_contact(mode, hands, faces, mask, sensitivity).is_some()
    }

    /// Evaluate a mode given by name; an unknown name has no targets and never matches
    pub fn evaluate_named(
        mode: &str,
        hands: &[Hand],
        faces: &[Face],
        mask: Option<&SegmentationMask>,
        sensitivity: f64,
    ) -> bool {
        match mode.parse::<HabitMode>() {
            Ok(mode) => Self::evaluate(mode, hands, faces, mask, sensitivity),
            Err(_) => false,
        }
    }

    /// Like [`ModeRegistry::evaluate`], but reports which contact triggered
    pub fn find_contact(
        mode: HabitMode,
        hands: &[Hand],
        faces: &[Face],
        mask: Option<&SegmentationMask>,
        sensitivity: f64,
    ) -> Option<Contact> {
        let spec = Self::spec(mode);
        match spec.matcher {
            MatcherKind::Mask => {
                let mask = mask?;
                MaskNeighborhoodSearch::find_contact(hands, mask, sensitivity).map(Contact::Mask)
            }
            MatcherKind::Proximity => {
                ProximityMatcher::find_contact(hands, faces, spec.targets, sensitivity)
                    .map(Contact::Proximity)
            }
        }
    }

    /// Target landmarks of the first face, for highlighting by a renderer
    pub fn target_points(mode: HabitMode, faces: &[Face]) -> Vec<(usize, Landmark)> {
        let Some(face) = faces.first() else {
            return Vec::new();
        };
        Self::target_indices(mode)
            .iter()
            .filter_map(|&idx| face.get(idx).map(|lm| (idx, *lm)))
            .collect()
    }
}
