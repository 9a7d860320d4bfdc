//! Geometry primitives shared by the matchers

use crate::types::Landmark;

/// A pixel coordinate on a segmentation mask.
///
/// Signed so that neighborhood offsets can step past the mask edge before
/// being bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskPixel {
    pub px: i64,
    pub py: i64,
}

/// Euclidean distance between two landmarks in the (x, y) plane; z is ignored
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Map a normalized landmark onto mask pixel coordinates (floor rounding)
pub fn to_mask_pixel(point: &Landmark, width: usize, height: usize) -> MaskPixel {
    MaskPixel {
        px: (point.x * width as f64).floor() as i64,
        py: (point.y * height as f64).floor() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_z() {
        let a = Landmark { x: 0.0, y: 0.0, z: 5.0 };
        let b = Landmark { x: 0.3, y: 0.4, z: -2.0 };
        assert!((distance(&a, &b) - 0.5).abs() < 1e-12);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_mask_pixel_floors() {
        let p = to_mask_pixel(&Landmark::new(0.5, 0.999), 200, 100);
        assert_eq!(p, MaskPixel { px: 100, py: 99 });

        let corner = to_mask_pixel(&Landmark::new(0.0, 1.0), 64, 48);
        assert_eq!(corner, MaskPixel { px: 0, py: 48 });
    }
}
