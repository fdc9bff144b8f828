//! Output surface dimensions for normalized geometry.

use super::Point;

/// Computes the surface size `(width, height)` that contains `points`.
///
/// Each side is the rounded maximum coordinate on that axis plus `padding`.
/// An empty point set yields a surface of `padding` on both sides.
pub fn size_for(points: &[Point], padding: f64) -> (u32, u32) {
    let max_x = points.iter().map(|p| p.x).fold(0.0_f64, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(0.0_f64, f64::max);
    (side(max_x, padding), side(max_y, padding))
}

fn side(max: f64, padding: f64) -> u32 {
    // f64::round rounds half away from zero.
    let extent = (max.round() + padding).ceil();
    if extent.is_finite() && extent > 0.0 {
        extent.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_padding() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(10.0, 20.0),
        ];
        assert_eq!(size_for(&points, 10.0), (30, 30));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let points = vec![Point::new(12.5, 7.49)];
        assert_eq!(size_for(&points, 0.0), (13, 7));
    }

    #[test]
    fn size_covers_points_plus_padding() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(110.0, 60.0),
            Point::new(47.3, 58.9),
        ];
        for padding in [0.0, 1.0, 10.0, 25.0] {
            let (width, height) = size_for(&points, padding);
            for point in &points {
                // Rounding the maximum may shave off up to half a pixel.
                assert!(width as f64 + 0.5 >= point.x + padding);
                assert!(height as f64 + 0.5 >= point.y + padding);
            }
        }
    }

    #[test]
    fn empty_points_yield_padding_only() {
        assert_eq!(size_for(&[], 10.0), (10, 10));
    }
}
