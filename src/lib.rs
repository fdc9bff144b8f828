//! Render map polygons and rectangles into standalone raster images.
//!
//! A shape from a web map is turned into an image that contains exactly that
//! shape, styled like it is on the map:
//! - [`projection`] supplies the shape's pixel geometry, either as currently
//!   projected or fitted to a fixed-size viewport
//! - [`geometry`] moves it into a tight local coordinate system with padding
//!   and sizes the output surface
//! - [`draw`] resolves stroke and fill paint from the shape's options and
//!   rasterizes it with Cairo
//! - [`export`] ties the steps together and optionally saves a PNG

pub mod config;
pub mod draw;
pub mod export;
pub mod geometry;
pub mod projection;
pub mod util;

pub use config::Config;
pub use export::{GeoRasterExporter, RenderDependencies, RenderOptions, RenderOutcome};
pub use projection::MapShape;
