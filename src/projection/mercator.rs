//! Ellipsoidal (WGS84) Mercator projection into map pixel space.
//!
//! Pixel coordinates are global: at zoom `z` the whole world spans
//! `256 * 2^z` pixels on each axis, `x` grows eastward and `y` grows
//! southward.

use super::{LatLon, ViewportSize};
use crate::geometry::Point;
use std::f64::consts::{FRAC_PI_4, PI};

/// First eccentricity of the WGS84 ellipsoid.
const EARTH_ECCENTRICITY: f64 = 0.0818191908426;

/// Side of the world in pixels at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit where the projected world becomes square.
const MAX_LATITUDE: f64 = 85.084_059_050_11;

/// Highest zoom the projection supports.
pub const MAX_ZOOM: f64 = 23.0;

/// World size in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Projects a geographic point to world coordinates in `0.0..=1.0`.
fn to_unit(point: LatLon) -> Point {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let phi = lat.to_radians();
    let esin = EARTH_ECCENTRICITY * phi.sin();
    let merc_y = ((FRAC_PI_4 + phi / 2.0).tan()
        * ((1.0 - esin) / (1.0 + esin)).powf(EARTH_ECCENTRICITY / 2.0))
    .ln();

    Point::new((point.lon + 180.0) / 360.0, 0.5 - merc_y / (2.0 * PI))
}

/// Projects a geographic point into global pixel coordinates at `zoom`.
pub fn project(point: LatLon, zoom: f64) -> Point {
    let unit = to_unit(point);
    let size = world_size(zoom);
    Point::new(unit.x * size, unit.y * size)
}

/// Finds the zoom at which `points` exactly fit `viewport`.
///
/// Fractional zooms are allowed. The result is clamped to `0..=MAX_ZOOM`;
/// a single point or an empty set gets the maximum zoom.
pub fn fit_zoom(points: &[LatLon], viewport: ViewportSize) -> f64 {
    let projected: Vec<Point> = points.iter().copied().map(to_unit).collect();
    let Some(bounds) = crate::geometry::PixelBounds::of_points(&projected) else {
        return MAX_ZOOM;
    };

    let span_x = (bounds.p1.x - bounds.p0.x) * TILE_SIZE;
    let span_y = (bounds.p1.y - bounds.p0.y) * TILE_SIZE;
    let scale_x = viewport.width as f64 / span_x;
    let scale_y = viewport.height as f64 / span_y;
    let scale = scale_x.min(scale_y);

    if !scale.is_finite() || scale <= 0.0 {
        return MAX_ZOOM;
    }
    scale.log2().clamp(0.0, MAX_ZOOM)
}
