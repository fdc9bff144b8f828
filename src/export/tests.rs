use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use cairo::ImageSurface;

use super::{
    dependencies::{
        IdGenerator, ImageSurfaceProvider, RenderDependencies, SurfaceProvider, SurfaceSaver,
    },
    pipeline::GeoRasterExporter,
    types::{RenderError, RenderOptions, RenderOutcome, RenderState, RenderSurface},
};
use crate::draw::StyleOptions;
use crate::geometry::{PixelBounds, PixelGeometry, Point, Shape, ShapeKind};
use crate::projection::{
    AbortReason, GeoGeometry, LatLon, LivePixelProvider, MapShape, MercatorProjector,
    PixelGeometryProvider, ViewportSize,
};

#[derive(Clone)]
struct MockGeometry {
    result: Result<PixelGeometry, AbortReason>,
    current_calls: Arc<Mutex<usize>>,
    fitted_calls: Arc<Mutex<Vec<ViewportSize>>>,
}

impl MockGeometry {
    fn new(result: Result<PixelGeometry, AbortReason>) -> Self {
        Self {
            result,
            current_calls: Arc::new(Mutex::new(0)),
            fitted_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PixelGeometryProvider for MockGeometry {
    fn current_pixel_geometry(&self, _shape: &MapShape) -> Result<PixelGeometry, AbortReason> {
        *self.current_calls.lock().unwrap() += 1;
        self.result.clone()
    }

    fn fitted_pixel_geometry(
        &self,
        _shape: &MapShape,
        viewport: ViewportSize,
    ) -> Result<PixelGeometry, AbortReason> {
        self.fitted_calls.lock().unwrap().push(viewport);
        self.result.clone()
    }
}

#[derive(Clone, Default)]
struct CountingSurfaces {
    sizes: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl SurfaceProvider for CountingSurfaces {
    fn create_surface(&self, width: u32, height: u32) -> Result<ImageSurface, RenderError> {
        self.sizes.lock().unwrap().push((width, height));
        ImageSurfaceProvider.create_surface(width, height)
    }
}

#[derive(Clone)]
struct MockSaver {
    pub should_fail: bool,
    pub path: PathBuf,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl SurfaceSaver for MockSaver {
    fn save(&self, surface: &RenderSurface) -> Result<PathBuf, RenderError> {
        self.calls.lock().unwrap().push(surface.id().to_string());
        if self.should_fail {
            Err(RenderError::SaveError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "save failed",
            )))
        } else {
            Ok(self.path.clone())
        }
    }
}

struct FixedIds;

impl IdGenerator for FixedIds {
    fn next_id(&self) -> String {
        "canvas_test1".to_string()
    }
}

struct Harness {
    surfaces: CountingSurfaces,
    saver: MockSaver,
}

impl Harness {
    fn new(should_fail: bool) -> Self {
        Self {
            surfaces: CountingSurfaces::default(),
            saver: MockSaver {
                should_fail,
                path: PathBuf::from("/tmp/shape.png"),
                calls: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    fn exporter(
        &self,
        geometry: Arc<dyn PixelGeometryProvider>,
        options: RenderOptions,
    ) -> GeoRasterExporter {
        let deps = RenderDependencies {
            geometry,
            surfaces: Arc::new(self.surfaces.clone()),
            saver: Arc::new(self.saver.clone()),
            ids: Arc::new(FixedIds),
        };
        GeoRasterExporter::new(options, Arc::new(deps))
    }

    fn surface_sizes(&self) -> Vec<(u32, u32)> {
        self.surfaces.sizes.lock().unwrap().clone()
    }

    fn save_calls(&self) -> usize {
        self.saver.calls.lock().unwrap().len()
    }
}

fn square_geometry() -> PixelGeometry {
    PixelGeometry::from_shape(Shape::Polygon(vec![vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]]))
    .unwrap()
}

fn rectangle_geometry() -> PixelGeometry {
    let corners = [Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
    PixelGeometry {
        bounds: PixelBounds::new(corners[1], corners[0]),
        shape: Shape::Rectangle(corners),
    }
}

fn red_fill() -> MapShape {
    MapShape {
        options: StyleOptions {
            fill_color: Some("#ff0000".to_string()),
            stroke_width: Some(0.0),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Returns the (B, G, R, A) bytes of one ARGB32 pixel.
fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
}

fn drawn_surface(outcome: RenderOutcome) -> RenderSurface {
    match outcome {
        RenderOutcome::Drawn(surface) => surface,
        other => panic!("expected a drawn surface, got {:?}", other),
    }
}

#[test]
fn polygon_scenario_sizes_surface_to_shape() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let mut exporter = harness.exporter(Arc::new(geometry.clone()), RenderOptions::default());

    let outcome = exporter.render(&red_fill()).unwrap();
    assert_eq!(exporter.state(), RenderState::Drawn);
    assert_eq!(harness.surface_sizes(), vec![(30, 30)]);
    assert_eq!(*geometry.current_calls.lock().unwrap(), 1);
    assert!(geometry.fitted_calls.lock().unwrap().is_empty());

    let surface = drawn_surface(outcome);
    assert_eq!(surface.id(), "canvas_test1");
    assert_eq!(surface.kind(), ShapeKind::Polygon);
    assert_eq!((surface.width(), surface.height()), (30, 30));

    let mut image = surface.into_surface();
    assert_eq!(pixel(&mut image, 15, 15), [0, 0, 255, 255]);
    assert_eq!(pixel(&mut image, 3, 3), [0, 0, 0, 0]);
}

#[test]
fn rectangle_scenario_draws_between_corners() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(rectangle_geometry()));
    let mut exporter = harness.exporter(Arc::new(geometry), RenderOptions::default());

    let surface = drawn_surface(exporter.render(&red_fill()).unwrap());
    assert_eq!(surface.kind(), ShapeKind::Rectangle);
    assert_eq!(harness.surface_sizes(), vec![(120, 70)]);

    let mut image = surface.into_surface();
    assert_eq!(pixel(&mut image, 60, 35), [0, 0, 255, 255]);
    assert_eq!(pixel(&mut image, 5, 35), [0, 0, 0, 0]);
    assert_eq!(pixel(&mut image, 60, 65), [0, 0, 0, 0]);
}

#[test]
fn missing_geometry_creates_no_surface() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Err(AbortReason::MissingGeometry));
    let options = RenderOptions::new(10.0, false, true);
    let mut exporter = harness.exporter(Arc::new(geometry), options);

    let outcome = exporter.render(&MapShape::default()).unwrap();
    assert!(matches!(
        outcome,
        RenderOutcome::Aborted(AbortReason::MissingGeometry)
    ));
    assert!(outcome.surface().is_none());
    assert_eq!(
        exporter.state(),
        RenderState::Aborted(AbortReason::MissingGeometry)
    );
    assert!(harness.surface_sizes().is_empty());
    assert_eq!(harness.save_calls(), 0);
}

#[test]
fn empty_polygon_is_treated_as_missing_geometry() {
    let harness = Harness::new(false);
    let empty = PixelGeometry {
        bounds: PixelBounds::new(Point::default(), Point::default()),
        shape: Shape::Polygon(vec![]),
    };
    let mut exporter = harness.exporter(
        Arc::new(MockGeometry::new(Ok(empty))),
        RenderOptions::default(),
    );

    let outcome = exporter.render(&MapShape::default()).unwrap();
    assert!(matches!(
        outcome,
        RenderOutcome::Aborted(AbortReason::MissingGeometry)
    ));
    assert!(harness.surface_sizes().is_empty());
}

#[test]
fn fit_mode_without_projection_aborts() {
    let harness = Harness::new(false);
    let options = RenderOptions::new(10.0, true, false);
    let mut exporter = harness.exporter(Arc::new(LivePixelProvider), options);

    let shape = MapShape {
        pixel_geometry: Some(square_geometry().shape),
        ..Default::default()
    };
    let outcome = exporter.render(&shape).unwrap();
    assert!(matches!(
        outcome,
        RenderOutcome::Aborted(AbortReason::MissingCollaborator)
    ));
    assert!(harness.surface_sizes().is_empty());
}

#[test]
fn fit_mode_queries_fitted_geometry_once() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let options =
        RenderOptions::new(4.0, true, false).with_viewport(ViewportSize::new(320, 240));
    let mut exporter = harness.exporter(Arc::new(geometry.clone()), options);

    exporter.render(&red_fill()).unwrap();
    assert_eq!(*geometry.current_calls.lock().unwrap(), 0);
    assert_eq!(
        *geometry.fitted_calls.lock().unwrap(),
        vec![ViewportSize::new(320, 240)]
    );
    assert_eq!(harness.surface_sizes(), vec![(18, 18)]);
}

#[test]
fn download_exports_once() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let options = RenderOptions::new(10.0, false, true);
    let mut exporter = harness.exporter(Arc::new(geometry), options);

    let outcome = exporter.render(&red_fill()).unwrap();
    assert_eq!(exporter.state(), RenderState::Exported);
    assert_eq!(outcome.saved_path(), Some(&PathBuf::from("/tmp/shape.png")));
    assert!(outcome.surface().is_some());
    assert_eq!(
        *harness.saver.calls.lock().unwrap(),
        vec!["canvas_test1".to_string()]
    );
}

#[test]
fn without_download_nothing_is_saved() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let mut exporter = harness.exporter(Arc::new(geometry), RenderOptions::default());

    let outcome = exporter.render(&red_fill()).unwrap();
    assert!(outcome.saved_path().is_none());
    assert_eq!(harness.save_calls(), 0);
}

#[test]
fn failed_export_is_not_retried() {
    let harness = Harness::new(true);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let options = RenderOptions::new(10.0, false, true);
    let mut exporter = harness.exporter(Arc::new(geometry), options);

    let err = exporter.render(&red_fill()).unwrap_err();
    assert!(matches!(err, RenderError::SaveError(_)));
    assert_eq!(exporter.state(), RenderState::Drawn);
    assert_eq!(harness.save_calls(), 1);
}

#[test]
fn state_resets_between_renders() {
    let harness = Harness::new(false);
    let geometry = MockGeometry::new(Ok(square_geometry()));
    let mut exporter = harness.exporter(Arc::new(geometry.clone()), RenderOptions::default());

    exporter.render(&red_fill()).unwrap();
    exporter.render(&red_fill()).unwrap();
    assert_eq!(exporter.state(), RenderState::Drawn);
    assert_eq!(*geometry.current_calls.lock().unwrap(), 2);
    assert_eq!(harness.surface_sizes().len(), 2);
}

#[test]
fn negative_padding_is_clamped() {
    let options = RenderOptions::new(-5.0, false, false);
    assert_eq!(options.padding, 0.0);
    assert_eq!(RenderOptions::default().padding, 10.0);
}

#[test]
fn fitted_mercator_rectangle_end_to_end() {
    let harness = Harness::new(false);
    let options = RenderOptions::new(10.0, true, false);
    let mut exporter = harness.exporter(Arc::new(MercatorProjector::default()), options);

    let shape = MapShape {
        geometry: Some(GeoGeometry::Rectangle([
            LatLon::new(55.70, 37.50),
            LatLon::new(55.80, 37.70),
        ])),
        options: StyleOptions {
            fill_color: Some("#00ff00".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    let surface = drawn_surface(exporter.render(&shape).unwrap());
    let (width, height) = (surface.width(), surface.height());
    // The longer side fills the 500px viewport plus padding on both ends.
    assert_eq!(width.max(height), 520);
    assert!(width.min(height) <= 520);

    let mut image = surface.into_surface();
    let (cx, cy) = (width as usize / 2, height as usize / 2);
    assert_eq!(pixel(&mut image, cx, cy), [0, 255, 0, 255]);
}
