//! Contact matchers
//!
//! Two closed matching algorithms decide whether a fingertip is touching a body
//! region this frame:
//!
//! - **Proximity**: fingertip within a normalized distance of face mesh targets
//! - **Mask**: fingertip within a pixel radius of a positive segmentation pixel
//!
//! Both map sensitivity monotonically onto their threshold: a higher sensitivity
//! always makes contact easier to trigger.

pub mod mask;
pub mod proximity;

pub use mask::{MaskContact, MaskNeighborhoodSearch};
pub use proximity::{ProximityContact, ProximityMatcher};

/// Clamp a sensitivity into `[0, 1]`; NaN reads as the strictest setting
pub fn clamp_sensitivity(sensitivity: f64) -> f64 {
    if sensitivity.is_nan() {
        0.0
    } else {
        sensitivity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_sensitivity() {
        assert_eq!(clamp_sensitivity(-0.5), 0.0);
        assert_eq!(clamp_sensitivity(0.42), 0.42);
        assert_eq!(clamp_sensitivity(7.0), 1.0);
        assert_eq!(clamp_sensitivity(f64::NAN), 0.0);
    }
}
