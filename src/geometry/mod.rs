//! Pixel-space geometry types and the local coordinate transforms.
//!
//! This module defines the geometry that flows through a render:
//! - [`Point`]: a 2D coordinate in pixel space
//! - [`PixelBounds`]: an unordered pair of corners describing a bounding box
//! - [`Shape`]: the polygon or rectangle being rasterized
//! - [`PixelGeometry`]: a shape together with its pixel bounds
//!
//! The [`normalize`] and [`sizer`] submodules move pixel geometry into the
//! local coordinate system of the output surface.

pub mod normalize;
pub mod sizer;

pub use normalize::normalize;
pub use sizer::size_for;

use serde::{Deserialize, Serialize};

/// A point in pixel space.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Two corners of a bounding box in pixel space.
///
/// The corners are not ordered: either one may hold the smaller coordinate on
/// either axis. Use [`PixelBounds::min`] to get the box origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point; 2]", into = "[Point; 2]")]
pub struct PixelBounds {
    pub p0: Point,
    pub p1: Point,
}

impl PixelBounds {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Computes the bounding box of a point set.
    ///
    /// Returns `None` for an empty slice.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for point in &points[1..] {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Some(Self::new(min, max))
    }

    /// Componentwise minimum of the two corners.
    pub fn min(&self) -> Point {
        Point::new(self.p0.x.min(self.p1.x), self.p0.y.min(self.p1.y))
    }

    /// Returns the same bounds with the corners swapped.
    pub fn swapped(self) -> Self {
        Self::new(self.p1, self.p0)
    }
}

impl From<[Point; 2]> for PixelBounds {
    fn from([p0, p1]: [Point; 2]) -> Self {
        Self { p0, p1 }
    }
}

impl From<PixelBounds> for [Point; 2] {
    fn from(bounds: PixelBounds) -> Self {
        [bounds.p0, bounds.p1]
    }
}

/// The drawable shape kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Polygon,
    Rectangle,
}

/// A polygon or rectangle in pixel space.
///
/// Serialized as `{"type": "Polygon", "coordinates": [[[x, y], ...]]}` or
/// `{"type": "Rectangle", "coordinates": [[x1, y1], [x2, y2]]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Shape {
    /// Outline rings; only the first ring is drawn.
    Polygon(Vec<Vec<Point>>),
    /// Two opposite corners, kept in the order they were supplied.
    Rectangle([Point; 2]),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    /// The points that get drawn: the outer ring of a polygon, or both
    /// rectangle corners.
    pub fn points(&self) -> &[Point] {
        match self {
            Shape::Polygon(rings) => rings.first().map(Vec::as_slice).unwrap_or(&[]),
            Shape::Rectangle(corners) => corners.as_slice(),
        }
    }

    /// Bounding box of the drawn points.
    pub fn bounds(&self) -> Option<PixelBounds> {
        PixelBounds::of_points(self.points())
    }
}

/// A shape's pixel geometry as reported by a projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelGeometry {
    pub bounds: PixelBounds,
    pub shape: Shape,
}

impl PixelGeometry {
    /// Builds pixel geometry whose bounds enclose the shape's drawn points.
    ///
    /// Returns `None` when the shape has no points.
    pub fn from_shape(shape: Shape) -> Option<Self> {
        let bounds = shape.bounds()?;
        Some(Self { bounds, shape })
    }
}
