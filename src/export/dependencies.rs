use std::{path::PathBuf, sync::Arc};

use cairo::{Format, ImageSurface};

use crate::export::{
    file::{self, ExportConfig},
    types::{RenderError, RenderSurface},
};
use crate::projection::{MercatorProjector, PixelGeometryProvider};
use crate::util;

/// Abstraction over allocating drawing surfaces.
pub trait SurfaceProvider: Send + Sync {
    fn create_surface(&self, width: u32, height: u32) -> Result<ImageSurface, RenderError>;
}

/// Abstraction over saving a finished surface.
pub trait SurfaceSaver: Send + Sync {
    fn save(&self, surface: &RenderSurface) -> Result<PathBuf, RenderError>;
}

/// Abstraction over surface identifier generation.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Bundle of dependencies used by the render pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct RenderDependencies {
    pub geometry: Arc<dyn PixelGeometryProvider>,
    pub surfaces: Arc<dyn SurfaceProvider>,
    pub saver: Arc<dyn SurfaceSaver>,
    pub ids: Arc<dyn IdGenerator>,
}

impl RenderDependencies {
    /// Default collaborators with the given projector and export settings.
    pub fn new(geometry: Arc<dyn PixelGeometryProvider>, export: ExportConfig) -> Self {
        Self {
            geometry,
            surfaces: Arc::new(ImageSurfaceProvider),
            saver: Arc::new(DirectorySaver { config: export }),
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Replaces the saver, keeping the other collaborators.
    pub fn with_saver(mut self, saver: Arc<dyn SurfaceSaver>) -> Self {
        self.saver = saver;
        self
    }
}

impl Default for RenderDependencies {
    fn default() -> Self {
        Self::new(
            Arc::new(MercatorProjector::default()),
            ExportConfig::default(),
        )
    }
}

/// Allocates ARGB32 image surfaces.
pub struct ImageSurfaceProvider;

/// Saves into a directory under a generated filename.
pub struct DirectorySaver {
    pub config: ExportConfig,
}

/// Saves to one fixed path.
pub struct PathSaver {
    pub path: PathBuf,
}

/// Generates `canvas_xxxxx` identifiers.
pub struct RandomIdGenerator;

impl SurfaceProvider for ImageSurfaceProvider {
    fn create_surface(&self, width: u32, height: u32) -> Result<ImageSurface, RenderError> {
        let too_large = |source| RenderError::Surface {
            width,
            height,
            source,
        };
        let w = i32::try_from(width).map_err(|_| too_large(cairo::Error::InvalidSize))?;
        let h = i32::try_from(height).map_err(|_| too_large(cairo::Error::InvalidSize))?;
        ImageSurface::create(Format::ARgb32, w, h).map_err(too_large)
    }
}

impl SurfaceSaver for DirectorySaver {
    fn save(&self, surface: &RenderSurface) -> Result<PathBuf, RenderError> {
        file::save_surface(surface, &self.config)
    }
}

impl SurfaceSaver for PathSaver {
    fn save(&self, surface: &RenderSurface) -> Result<PathBuf, RenderError> {
        file::write_png_file(surface, &self.path)?;
        log::info!("Image saved successfully: {}", self.path.display());
        Ok(self.path.clone())
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        util::random_id("canvas", 5)
    }
}
