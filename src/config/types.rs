//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Rendering defaults.
///
/// Controls how shapes are placed on the output image. Command-line flags
/// override these values for a single run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Margin between the shape and the image edge in pixels (valid range: 0 - 1000)
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Fit the shape into a fixed-size viewport instead of using the live map zoom
    #[serde(default)]
    pub fit_to_bounds: bool,

    /// Save every rendered image to the export directory
    #[serde(default)]
    pub download: bool,

    /// Width of the fit-to-bounds viewport in pixels (valid range: 16 - 4096)
    #[serde(default = "default_viewport_side")]
    pub viewport_width: u32,

    /// Height of the fit-to-bounds viewport in pixels (valid range: 16 - 4096)
    #[serde(default = "default_viewport_side")]
    pub viewport_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            fit_to_bounds: false,
            download: false,
            viewport_width: default_viewport_side(),
            viewport_height: default_viewport_side(),
        }
    }
}

/// Image export settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory for saved images; `~/` is expanded. Empty means the
    /// pictures directory.
    #[serde(default)]
    pub directory: String,

    /// Filename template with chrono format specifiers and an `{id}` placeholder
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format extension (only "png" is supported)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: String::new(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_padding() -> f64 {
    crate::export::DEFAULT_PADDING
}

fn default_viewport_side() -> u32 {
    500
}

fn default_filename_template() -> String {
    "shape_%Y-%m-%d_%H%M%S_{id}".to_string()
}

fn default_format() -> String {
    "png".to_string()
}
