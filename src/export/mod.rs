//! Shape-to-image export for geo2png.
//!
//! This module drives a render from start to finish:
//! - Pixel geometry retrieval (live projection or fitted viewport)
//! - Surface allocation sized to the shape
//! - Drawing with the resolved style
//! - Optional saving of the finished image

pub mod dependencies;
pub mod file;
pub mod types;

mod pipeline;
#[cfg(test)]
mod tests;

pub use dependencies::{
    DirectorySaver, IdGenerator, ImageSurfaceProvider, PathSaver, RandomIdGenerator,
    RenderDependencies, SurfaceProvider, SurfaceSaver,
};
pub use file::ExportConfig;
pub use pipeline::GeoRasterExporter;
pub use types::{
    DEFAULT_PADDING, RenderError, RenderOptions, RenderOutcome, RenderState, RenderSurface,
};
