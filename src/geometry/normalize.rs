//! Translation of pixel coordinates into surface-local coordinates.

use super::{PixelBounds, Point};

/// Moves `points` into the local coordinate system of the output surface.
///
/// The bounding box origin (componentwise minimum of `bounds`) lands at
/// `(padding, padding)`. The result does not depend on which corner of
/// `bounds` holds the larger coordinates, and every coordinate is
/// non-negative as long as the points lie inside `bounds`.
pub fn normalize(points: &[Point], bounds: &PixelBounds, padding: f64) -> Vec<Point> {
    let delta = bounds.min();
    points
        .iter()
        .map(|point| Point::new(point.x - delta.x + padding, point.y - delta.y + padding))
        .collect()
}
