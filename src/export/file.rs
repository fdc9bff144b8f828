//! File saving for rendered shapes.

use super::types::{RenderError, RenderSurface};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory to save images to.
    pub directory: PathBuf,
    /// Filename template (supports chrono format specifiers and `{id}`).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("geo2png"),
            filename_template: "shape_%Y-%m-%d_%H%M%S_{id}".to_string(),
            format: "png".to_string(),
        }
    }
}

/// Generate a filename based on the template, the surface id and current time.
///
/// `{id}` is substituted before chrono formatting, so ids containing `%`
/// would be interpreted as specifiers; generated ids never do.
pub fn generate_filename(template: &str, id: &str, format: &str) -> String {
    let template = template.replace("{id}", id);
    let filename = Local::now().format(&template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, RenderError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write the surface as PNG to exactly `path`.
pub fn write_png_file(surface: &RenderSurface, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    surface.write_png(&mut writer)?;
    writer.flush()?;

    let written_size = fs::metadata(path)?.len();
    log::debug!("File written: {} bytes", written_size);
    Ok(())
}

/// Save the surface into the configured directory under a generated name.
///
/// # Returns
/// Path to the saved file
pub fn save_surface(surface: &RenderSurface, config: &ExportConfig) -> Result<PathBuf, RenderError> {
    let directory = ensure_directory_exists(&config.directory)?;
    let filename = generate_filename(&config.filename_template, surface.id(), &config.format);
    let file_path = directory.join(&filename);

    log::info!(
        "Saving {}x{} image to: {}",
        surface.width(),
        surface.height(),
        file_path.display()
    );

    write_png_file(surface, &file_path)?;

    log::info!("Image saved successfully: {}", file_path.display());
    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ShapeKind;
    use cairo::{Format, ImageSurface};
    use tempfile::TempDir;

    fn blank_surface(id: &str) -> RenderSurface {
        let surface = ImageSurface::create(Format::ARgb32, 12, 8).unwrap();
        RenderSurface::new(id.to_string(), ShapeKind::Polygon, surface)
    }

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("test_%Y%m%d_{id}", "canvas_ab12c", "png");
        assert!(filename.starts_with("test_"));
        assert!(filename.ends_with("_canvas_ab12c.png"));
        assert!(filename.contains("20"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.format, "png");
        assert!(config.directory.to_string_lossy().contains("geo2png"));
        assert!(config.filename_template.contains("{id}"));
    }

    #[test]
    fn save_surface_creates_directory_and_png() {
        let temp = TempDir::new().unwrap();
        let config = ExportConfig {
            directory: temp.path().join("nested").join("out"),
            filename_template: "{id}".to_string(),
            format: "png".to_string(),
        };
        let path = save_surface(&blank_surface("canvas_x1y2z"), &config).unwrap();
        assert_eq!(path.file_name().unwrap(), "canvas_x1y2z.png");

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
