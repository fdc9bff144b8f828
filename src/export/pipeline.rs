use std::sync::Arc;

use crate::draw::{self, RenderStyle};
use crate::export::{
    dependencies::RenderDependencies,
    types::{RenderError, RenderOptions, RenderOutcome, RenderState, RenderSurface},
};
use crate::geometry::{self, PixelGeometry};
use crate::projection::{AbortReason, MapShape};

/// Turns map shapes into standalone raster images.
///
/// Every call to [`render`](Self::render) walks the same linear pipeline:
/// resolve pixel geometry, normalize it into surface-local coordinates, size
/// and allocate the surface, resolve the style, draw, and optionally export.
/// Only the geometry source (live projection or fitted viewport) and the
/// final draw operation depend on the shape and options.
pub struct GeoRasterExporter {
    options: RenderOptions,
    dependencies: Arc<RenderDependencies>,
    state: RenderState,
}

impl GeoRasterExporter {
    pub fn new(options: RenderOptions, dependencies: Arc<RenderDependencies>) -> Self {
        Self {
            options,
            dependencies,
            state: RenderState::Idle,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The last state reached by the most recent render.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Renders `shape` onto a new surface.
    ///
    /// Returns [`RenderOutcome::Aborted`] without allocating anything when no
    /// pixel geometry is available. Surface, drawing, and export failures are
    /// returned as errors; export is attempted once.
    pub fn render(&mut self, shape: &MapShape) -> Result<RenderOutcome, RenderError> {
        self.state = RenderState::Idle;

        let pixel = match self.resolve_geometry(shape) {
            Ok(pixel) => pixel,
            Err(reason) => {
                log::info!("Render aborted: {}", reason);
                self.advance(RenderState::Aborted(reason));
                return Ok(RenderOutcome::Aborted(reason));
            }
        };
        let kind = pixel.shape.kind();
        self.advance(RenderState::GeometryResolved);

        let padding = self.options.padding;
        let points = geometry::normalize(pixel.shape.points(), &pixel.bounds, padding);
        self.advance(RenderState::Normalized);

        // The surface must have its final size before anything is drawn.
        let (width, height) = geometry::size_for(&points, padding);
        let surface = self.dependencies.surfaces.create_surface(width, height)?;
        let surface = RenderSurface::new(self.dependencies.ids.next_id(), kind, surface);
        log::debug!(
            "Allocated {}x{} surface {} for {:?}",
            width,
            height,
            surface.id(),
            kind
        );
        self.advance(RenderState::Sized);

        let style: RenderStyle = draw::resolve_style(&shape.options);
        log::debug!("Resolved style: {:?}", style);
        self.advance(RenderState::Styled);

        {
            let ctx = cairo::Context::new(surface.surface())?;
            draw::draw_shape(&ctx, kind, &style, &points)?;
        }
        self.advance(RenderState::Drawn);

        if !self.options.download {
            return Ok(RenderOutcome::Drawn(surface));
        }

        let path = self.dependencies.saver.save(&surface)?;
        self.advance(RenderState::Exported);
        Ok(RenderOutcome::Exported { surface, path })
    }

    /// Reads the shape's pixel geometry once, from the mode the options select.
    fn resolve_geometry(&self, shape: &MapShape) -> Result<PixelGeometry, AbortReason> {
        let provider = &self.dependencies.geometry;
        let pixel = if self.options.fit_to_bounds {
            provider.fitted_pixel_geometry(shape, self.options.viewport)?
        } else {
            provider.current_pixel_geometry(shape)?
        };

        if pixel.shape.points().is_empty() {
            return Err(AbortReason::MissingGeometry);
        }
        Ok(pixel)
    }

    fn advance(&mut self, next: RenderState) {
        log::debug!("Render state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
