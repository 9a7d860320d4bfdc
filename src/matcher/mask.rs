//! Fingertip-to-segmentation-mask neighborhood search

use crate::geometry::to_mask_pixel;
use crate::matcher::clamp_sensitivity;
use crate::types::{Hand, SegmentationMask, FINGER_TIPS};
use serde::{Deserialize, Serialize};

/// Search radius at sensitivity 0, in pixels
const BASE_RADIUS_PX: f64 = 2.0;

/// Radius added across the full sensitivity range (25px at sensitivity 1)
const RADIUS_SPAN_PX: f64 = 23.0;

/// Sampling stride of the neighborhood scan
const SAMPLE_STEP: usize = 2;

/// The fingertip and mask pixel that triggered a mask match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskContact {
    /// Index of the hand within the frame
    pub hand: usize,
    /// Hand landmark index of the fingertip
    pub fingertip: usize,
    /// Positive mask pixel column
    pub x: usize,
    /// Positive mask pixel row
    pub y: usize,
}

/// Matcher for mask-based habits (hair pulling)
pub struct MaskNeighborhoodSearch;

impl MaskNeighborhoodSearch {
    /// Search radius in pixels for a sensitivity
    ///
    /// Formula: `floor(2 + 23 * sensitivity)`
    pub fn radius(sensitivity: f64) -> i64 {
        (BASE_RADIUS_PX + RADIUS_SPAN_PX * clamp_sensitivity(sensitivity)).floor() as i64
    }

    /// Whether any fingertip lies within the search radius of a positive mask pixel
    pub fn matches(hands: &[Hand], mask: &SegmentationMask, sensitivity: f64) -> bool {
        Self::find_contact(hands, mask, sensitivity).is_some()
    }

    /// Find the first positive mask pixel sampled around any fingertip.
    ///
    /// The square `[-radius, radius]²` around each fingertip pixel is sampled every
    /// second pixel on a grid anchored at the fingertip itself, and only offsets
    /// inside the circle `dx² + dy² <= radius²` are read.
    pub fn find_contact(
        hands: &[Hand],
        mask: &SegmentationMask,
        sensitivity: f64,
    ) -> Option<MaskContact> {
        if hands.is_empty() || mask.is_empty() {
            return None;
        }

        let radius = Self::radius(sensitivity);
        // Largest even offset not exceeding the radius keeps the grid centered on 0
        let reach = radius - radius % SAMPLE_STEP as i64;
        let width = mask.width as i64;
        let height = mask.height as i64;

        for (hand_idx, hand) in hands.iter().enumerate() {
            for &tip_idx in FINGER_TIPS.iter() {
                let Some(tip) = hand.get(tip_idx) else {
                    continue;
                };
                let center = to_mask_pixel(tip, mask.width, mask.height);

                for dx in (-reach..=reach).step_by(SAMPLE_STEP) {
                    for dy in (-reach..=reach).step_by(SAMPLE_STEP) {
                        if dx * dx + dy * dy > radius * radius {
                            continue;
                        }

                        let (Some(nx), Some(ny)) =
                            (center.px.checked_add(dx), center.py.checked_add(dy))
                        else {
                            continue;
                        };
                        if nx < 0 || nx >= width || ny < 0 || ny >= height {
                            continue;
                        }

                        if mask.is_positive(nx as usize, ny as usize) {
                            return Some(MaskContact {
                                hand: hand_idx,
                                fingertip: tip_idx,
                                x: nx as usize,
                                y: ny as usize,
                            });
                        }
                    }
                }
            }
        }

        None
    }
}
