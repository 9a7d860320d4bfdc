//! Fingertip-to-face-landmark proximity matching

use crate::geometry::distance;
use crate::matcher::clamp_sensitivity;
use crate::types::{Face, Hand, FINGER_TIPS};
use serde::{Deserialize, Serialize};

/// Threshold at sensitivity 0 (strict)
const BASE_THRESHOLD: f64 = 0.02;

/// Threshold added across the full sensitivity range (0.12 at sensitivity 1)
const THRESHOLD_SPAN: f64 = 0.10;

/// The fingertip/target pair that triggered a proximity match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityContact {
    /// Index of the hand within the frame
    pub hand: usize,
    /// Hand landmark index of the fingertip
    pub fingertip: usize,
    /// Face mesh index of the touched target
    pub target: usize,
    /// Normalized distance between the two
    pub distance: f64,
}

/// Matcher for face-region habits (nose, mouth, skin, beard, eyes)
pub struct ProximityMatcher;

impl ProximityMatcher {
    /// Normalized contact threshold for a sensitivity
    ///
    /// Formula: `0.02 + 0.10 * sensitivity`
    pub fn threshold(sensitivity: f64) -> f64 {
        BASE_THRESHOLD + THRESHOLD_SPAN * clamp_sensitivity(sensitivity)
    }

    /// Whether any fingertip is within the threshold of any target landmark
    pub fn matches(hands: &[Hand], faces: &[Face], targets: &[usize], sensitivity: f64) -> bool {
        Self::find_contact(hands, faces, targets, sensitivity).is_some()
    }

    /// Find the first fingertip/target pair closer than the threshold.
    ///
    /// Only the first face is considered. Fingertips or targets missing from a
    /// short landmark list are skipped.
    pub fn find_contact(
        hands: &[Hand],
        faces: &[Face],
        targets: &[usize],
        sensitivity: f64,
    ) -> Option<ProximityContact> {
        let face = faces.first()?;
        if hands.is_empty() || face.is_empty() {
            return None;
        }

        let threshold = Self::threshold(sensitivity);

        for (hand_idx, hand) in hands.iter().enumerate() {
            for &tip_idx in FINGER_TIPS.iter() {
                let Some(tip) = hand.get(tip_idx) else {
                    continue;
                };

                for &target_idx in targets {
                    let Some(target) = face.get(target_idx) else {
                        continue;
                    };

                    let d = distance(tip, target);
                    if d < threshold {
                        return Some(ProximityContact {
                            hand: hand_idx,
                            fingertip: tip_idx,
                            target: target_idx,
                            distance: d,
                        });
                    }
                }
            }
        }

        None
    }
}
