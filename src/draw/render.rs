//! Cairo-based rasterization of polygons and rectangles.

use super::color::Color;
use super::style::RenderStyle;
use crate::geometry::{Point, ShapeKind};
use std::f64::consts::{FRAC_PI_2, PI};

/// Rectangle placement derived from two corner points.
///
/// Width and height keep their sign: with the corner convention used by
/// [`rectangle_frame`] a rectangle whose first corner is above the second
/// gets a negative height, which Cairo draws upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Derives the drawn rectangle from corners `p0` and `p1`, in supplied order.
///
/// The origin is `(p0.x, p1.y)`, the width `p1.x - p0.x`, and the height
/// `p0.y - p1.y`. Corners are not sorted.
pub fn rectangle_frame(p0: Point, p1: Point) -> RectFrame {
    RectFrame {
        x: p0.x,
        y: p1.y,
        width: p1.x - p0.x,
        height: p0.y - p1.y,
    }
}

/// Draws local points as the given shape kind.
pub fn draw_shape(
    ctx: &cairo::Context,
    kind: ShapeKind,
    style: &RenderStyle,
    points: &[Point],
) -> Result<(), cairo::Error> {
    match kind {
        ShapeKind::Polygon => draw_polygon(ctx, style, points),
        ShapeKind::Rectangle => draw_rectangle(ctx, style, points),
    }
}

/// Draws a closed polygon through `points` in the order supplied.
///
/// Points are neither reordered nor deduplicated. An empty slice draws nothing.
pub fn draw_polygon(
    ctx: &cairo::Context,
    style: &RenderStyle,
    points: &[Point],
) -> Result<(), cairo::Error> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };

    ctx.new_path();
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.close_path();

    stroke_and_fill(ctx, style)
}

/// Draws the rectangle spanned by the first two points.
///
/// See [`rectangle_frame`] for the corner convention. Corners are rounded by
/// `style.border_radius` when it is positive. Fewer than two points draws
/// nothing.
pub fn draw_rectangle(
    ctx: &cairo::Context,
    style: &RenderStyle,
    points: &[Point],
) -> Result<(), cairo::Error> {
    let [p0, p1, ..] = points else {
        log::warn!("Rectangle needs two corners, got {}", points.len());
        return Ok(());
    };
    let frame = rectangle_frame(*p0, *p1);

    ctx.new_path();
    if style.border_radius > 0.0 {
        rounded_rectangle(ctx, frame, style.border_radius);
    } else {
        ctx.rectangle(frame.x, frame.y, frame.width, frame.height);
    }

    stroke_and_fill(ctx, style)
}

/// Appends a rounded rectangle path built from four quarter arcs.
///
/// Negative extents are flipped first; the radius is clamped to half the
/// shorter side.
fn rounded_rectangle(ctx: &cairo::Context, frame: RectFrame, radius: f64) {
    let (x, width) = if frame.width >= 0.0 {
        (frame.x, frame.width)
    } else {
        (frame.x + frame.width, -frame.width)
    };
    let (y, height) = if frame.height >= 0.0 {
        (frame.y, frame.height)
    } else {
        (frame.y + frame.height, -frame.height)
    };
    let r = radius.min(width / 2.0).min(height / 2.0);

    ctx.new_sub_path();
    ctx.arc(x + width - r, y + r, r, -FRAC_PI_2, 0.0);
    ctx.arc(x + width - r, y + height - r, r, 0.0, FRAC_PI_2);
    ctx.arc(x + r, y + height - r, r, FRAC_PI_2, PI);
    ctx.arc(x + r, y + r, r, PI, 3.0 * FRAC_PI_2);
    ctx.close_path();
}

/// Strokes the current path, then fills it, leaving the path consumed.
fn stroke_and_fill(ctx: &cairo::Context, style: &RenderStyle) -> Result<(), cairo::Error> {
    set_source(ctx, style.stroke_color);
    ctx.set_line_width(style.stroke_width);
    ctx.set_line_join(cairo::LineJoin::Miter);
    if style.stroke_width > 0.0 {
        ctx.stroke_preserve()?;
    }

    set_source(ctx, style.fill_color);
    ctx.fill()
}

fn set_source(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}
