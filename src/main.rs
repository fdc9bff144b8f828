use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use geo2png::export::{PathSaver, RenderDependencies, RenderOutcome};
use geo2png::projection::{MapShape, MercatorProjector};
use geo2png::{Config, GeoRasterExporter};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "geo2png")]
#[command(version, about = "Render map polygons and rectangles into PNG images")]
struct Cli {
    /// Shape description (JSON with geometry, pixelGeometry and options)
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Margin around the shape in pixels
    #[arg(long, short = 'p', value_name = "PIXELS")]
    padding: Option<f64>,

    /// Fit the shape into the configured viewport instead of the live zoom
    #[arg(long, short = 'f', action = ArgAction::SetTrue)]
    fit: bool,

    /// Live map zoom used to project geographic geometry
    #[arg(long, short = 'z', value_name = "ZOOM")]
    zoom: Option<f64>,

    /// Save the image into the configured export directory
    #[arg(long, short = 'd', action = ArgAction::SetTrue)]
    download: bool,

    /// Write the image to this exact path
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Alternate configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created default config at {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let Some(input) = cli.input.as_ref() else {
        return Err(anyhow::anyhow!("No input file given"));
    };
    let input_str = fs::read_to_string(input)
        .with_context(|| format!("Failed to read shape from {}", input.display()))?;
    let shape: MapShape = serde_json::from_str(&input_str)
        .with_context(|| format!("Failed to parse shape from {}", input.display()))?;

    let mut options = config.render_options();
    if let Some(padding) = cli.padding {
        options = geo2png::RenderOptions::new(padding, options.fit_to_bounds, options.download)
            .with_viewport(options.viewport);
    }
    options.fit_to_bounds |= cli.fit;
    options.download |= cli.download || cli.output.is_some();

    let mut dependencies = RenderDependencies::new(
        Arc::new(MercatorProjector::new(cli.zoom)),
        config.export_config(),
    );
    if let Some(path) = cli.output.clone() {
        dependencies = dependencies.with_saver(Arc::new(PathSaver { path }));
    }

    log::info!(
        "Rendering {} (padding {}, fit_to_bounds {})",
        input.display(),
        options.padding,
        options.fit_to_bounds
    );

    let mut exporter = GeoRasterExporter::new(options, Arc::new(dependencies));
    match exporter.render(&shape)? {
        RenderOutcome::Aborted(reason) => {
            println!("Nothing rendered: {}", reason);
        }
        RenderOutcome::Drawn(surface) => {
            println!(
                "Rendered {}x{} image {} (not saved, use --download or --output)",
                surface.width(),
                surface.height(),
                surface.id()
            );
        }
        RenderOutcome::Exported { surface, path } => {
            println!(
                "Saved {}x{} image to {}",
                surface.width(),
                surface.height(),
                path.display()
            );
        }
    }

    Ok(())
}
