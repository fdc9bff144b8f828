//! Rendering primitives and style resolution (Cairo-based).
//!
//! This module defines the drawing side of a render:
//! - [`Color`]: RGBA color representation with CSS string parsing
//! - [`StyleOptions`] / [`RenderStyle`]: raw shape options and the paint resolved from them
//! - Rasterization functions for polygons and rectangles

pub mod color;
pub mod render;
pub mod style;

// Re-export commonly used types at module level
pub use color::Color;
pub use render::{RectFrame, draw_polygon, draw_rectangle, draw_shape, rectangle_frame};
pub use style::{Channel, RenderStyle, StyleOptions, resolve_color, resolve_style};
