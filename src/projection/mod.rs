//! Pixel geometry sources for map shapes.
//!
//! A render never projects geographic coordinates itself; it asks a
//! [`PixelGeometryProvider`] for the shape's pixel geometry in one of two
//! modes:
//! - current projection: the pixel geometry the shape has on the live map
//! - fit to bounds: the pixel geometry on a transient viewport whose bounds
//!   equal the shape's own geographic bounds
//!
//! Providers report an [`AbortReason`] when the shape cannot be projected;
//! the render then stops without producing output.

pub mod mercator;

use crate::draw::StyleOptions;
use crate::geometry::{PixelBounds, PixelGeometry, Point, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate, serialized as `[lat, lon]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(point: LatLon) -> Self {
        [point.lat, point.lon]
    }
}

/// A shape in geographic coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoGeometry {
    /// Outline rings; only the first ring is drawn.
    Polygon(Vec<Vec<LatLon>>),
    /// Two opposite corners.
    Rectangle([LatLon; 2]),
}

impl GeoGeometry {
    /// Every coordinate of the geometry.
    pub fn points(&self) -> Vec<LatLon> {
        match self {
            GeoGeometry::Polygon(rings) => rings.iter().flatten().copied().collect(),
            GeoGeometry::Rectangle(corners) => corners.to_vec(),
        }
    }

    /// Projects the geometry into pixel space at `zoom`, keeping point order.
    pub fn project(&self, zoom: f64) -> Shape {
        let project = |p: &LatLon| mercator::project(*p, zoom);
        match self {
            GeoGeometry::Polygon(rings) => Shape::Polygon(
                rings
                    .iter()
                    .map(|ring| ring.iter().map(project).collect())
                    .collect(),
            ),
            GeoGeometry::Rectangle([a, b]) => Shape::Rectangle([project(a), project(b)]),
        }
    }
}

/// A shape as the host map holds it.
///
/// `pixel_geometry` is the shape's projection on the live map, if the host
/// supplied one; `pixel_bounds` overrides the bounds computed from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapShape {
    #[serde(default)]
    pub geometry: Option<GeoGeometry>,
    #[serde(default)]
    pub pixel_geometry: Option<Shape>,
    #[serde(default)]
    pub pixel_bounds: Option<PixelBounds>,
    #[serde(default)]
    pub options: StyleOptions,
}

/// Size of the transient viewport used for fit-to-bounds rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(500, 500)
    }
}

/// Why a render produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// The shape has no geometry or cannot be projected to pixels.
    MissingGeometry,
    /// The host lacks the projection engine needed for fit-to-bounds mode.
    MissingCollaborator,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::MissingGeometry => write!(f, "shape has no pixel geometry"),
            AbortReason::MissingCollaborator => {
                write!(f, "no projection available for fit-to-bounds rendering")
            }
        }
    }
}

/// Source of pixel geometry for a shape.
pub trait PixelGeometryProvider: Send + Sync {
    /// Pixel geometry as currently projected on the live map.
    fn current_pixel_geometry(&self, shape: &MapShape) -> Result<PixelGeometry, AbortReason>;

    /// Pixel geometry on a transient `viewport` fitted to the shape's bounds.
    ///
    /// Providers without a projection engine keep the default, which reports
    /// [`AbortReason::MissingCollaborator`].
    fn fitted_pixel_geometry(
        &self,
        shape: &MapShape,
        viewport: ViewportSize,
    ) -> Result<PixelGeometry, AbortReason> {
        let _ = (shape, viewport);
        Err(AbortReason::MissingCollaborator)
    }
}

/// Reads the live pixel geometry attached to the shape by the host.
fn attached_pixel_geometry(shape: &MapShape) -> Option<PixelGeometry> {
    let pixel = shape.pixel_geometry.clone()?;
    match shape.pixel_bounds {
        Some(bounds) if !pixel.points().is_empty() => Some(PixelGeometry {
            bounds,
            shape: pixel,
        }),
        _ => PixelGeometry::from_shape(pixel),
    }
}

/// Provider for hosts that only hand over live pixel geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct LivePixelProvider;

impl PixelGeometryProvider for LivePixelProvider {
    fn current_pixel_geometry(&self, shape: &MapShape) -> Result<PixelGeometry, AbortReason> {
        attached_pixel_geometry(shape).ok_or(AbortReason::MissingGeometry)
    }
}

/// Provider that projects geographic geometry with [`mercator`].
///
/// For the current projection it prefers live pixel geometry attached to the
/// shape and otherwise projects at `live_zoom`, when known.
#[derive(Clone, Copy, Debug, Default)]
pub struct MercatorProjector {
    pub live_zoom: Option<f64>,
}

impl MercatorProjector {
    pub fn new(live_zoom: Option<f64>) -> Self {
        Self { live_zoom }
    }
}

impl PixelGeometryProvider for MercatorProjector {
    fn current_pixel_geometry(&self, shape: &MapShape) -> Result<PixelGeometry, AbortReason> {
        if let Some(geometry) = attached_pixel_geometry(shape) {
            return Ok(geometry);
        }
        let (Some(geometry), Some(zoom)) = (&shape.geometry, self.live_zoom) else {
            return Err(AbortReason::MissingGeometry);
        };
        let zoom = zoom.clamp(0.0, mercator::MAX_ZOOM);
        PixelGeometry::from_shape(geometry.project(zoom)).ok_or(AbortReason::MissingGeometry)
    }

    fn fitted_pixel_geometry(
        &self,
        shape: &MapShape,
        viewport: ViewportSize,
    ) -> Result<PixelGeometry, AbortReason> {
        let geometry = shape.geometry.as_ref().ok_or(AbortReason::MissingGeometry)?;
        let zoom = mercator::fit_zoom(&geometry.points(), viewport);
        log::debug!(
            "Fitted {}x{} viewport at zoom {:.3}",
            viewport.width,
            viewport.height,
            zoom
        );
        PixelGeometry::from_shape(geometry.project(zoom)).ok_or(AbortReason::MissingGeometry)
    }
}

/// Convenience for building live pixel geometry in tests and hosts.
pub fn pixel_polygon(points: &[(f64, f64)]) -> Shape {
    Shape::Polygon(vec![points.iter().copied().map(Point::from).collect()])
}
