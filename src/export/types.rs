//! Data types for shape rendering and export.

use crate::geometry::ShapeKind;
use crate::projection::{AbortReason, ViewportSize};
use cairo::ImageSurface;
use log::warn;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Padding in pixels between the shape and the surface edge by default.
pub const DEFAULT_PADDING: f64 = 10.0;

/// Options fixed for the lifetime of a [`GeoRasterExporter`](super::GeoRasterExporter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Margin added around the shape, in pixels.
    pub padding: f64,
    /// Render on a transient viewport fitted to the shape instead of the live map zoom.
    pub fit_to_bounds: bool,
    /// Hand the finished surface to the saver.
    pub download: bool,
    /// Transient viewport size for fit-to-bounds rendering.
    pub viewport: ViewportSize,
}

impl RenderOptions {
    /// Creates options with the given padding and the default viewport.
    ///
    /// Negative or non-finite padding is replaced with zero.
    pub fn new(padding: f64, fit_to_bounds: bool, download: bool) -> Self {
        let padding = if padding.is_finite() && padding >= 0.0 {
            padding
        } else {
            warn!("Invalid padding {}, using 0", padding);
            0.0
        };
        Self {
            padding,
            fit_to_bounds,
            download,
            viewport: ViewportSize::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: ViewportSize) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING, false, false)
    }
}

/// Progress of a single render.
///
/// States advance in declaration order; `Aborted` is only reachable from
/// `Idle` when no pixel geometry can be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    GeometryResolved,
    Normalized,
    Sized,
    Styled,
    Drawn,
    Exported,
    Aborted(AbortReason),
}

/// A drawn raster image together with its identifier.
#[derive(Debug)]
pub struct RenderSurface {
    id: String,
    kind: ShapeKind,
    surface: ImageSurface,
}

impl RenderSurface {
    pub(crate) fn new(id: String, kind: ShapeKind, surface: ImageSurface) -> Self {
        Self { id, kind, surface }
    }

    /// Identifier assigned when the surface was created.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of shape drawn on the surface.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.surface.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height().max(0) as u32
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn into_surface(self) -> ImageSurface {
        self.surface
    }

    /// Encodes the surface as PNG into `writer`.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), RenderError> {
        self.surface.write_to_png(writer)?;
        Ok(())
    }

    /// Encodes the surface as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.write_png(&mut buffer)?;
        Ok(buffer)
    }
}

/// Result of a render request.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The shape was drawn; the surface was not exported.
    Drawn(RenderSurface),
    /// The shape was drawn and saved to `path`.
    Exported { surface: RenderSurface, path: PathBuf },
    /// No pixel geometry was available; nothing was created.
    Aborted(AbortReason),
}

impl RenderOutcome {
    /// The drawn surface, unless the render was aborted.
    pub fn surface(&self) -> Option<&RenderSurface> {
        match self {
            RenderOutcome::Drawn(surface) | RenderOutcome::Exported { surface, .. } => {
                Some(surface)
            }
            RenderOutcome::Aborted(_) => None,
        }
    }

    pub fn saved_path(&self) -> Option<&PathBuf> {
        match self {
            RenderOutcome::Exported { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Errors that stop a render after geometry was resolved.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create {width}x{height} surface: {source}")]
    Surface {
        width: u32,
        height: u32,
        #[source]
        source: cairo::Error,
    },

    #[error("Drawing failed: {0}")]
    Draw(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("Failed to save image: {0}")]
    SaveError(#[from] std::io::Error),
}
