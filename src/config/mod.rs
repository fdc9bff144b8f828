//! Configuration file support for geo2png.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/geo2png/config.toml`. Settings include rendering defaults
//! (padding, fit-to-bounds viewport) and where exported images are saved.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{ExportSettings, RenderConfig};

use crate::export::{ExportConfig, RenderOptions, file::expand_tilde};
use crate::projection::ViewportSize;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [render]
/// padding = 10
/// fit_to_bounds = false
/// viewport_width = 500
/// viewport_height = 500
///
/// [export]
/// directory = "~/Pictures/geo2png"
/// filename_template = "shape_%Y-%m-%d_%H%M%S_{id}"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Rendering defaults
    #[serde(default)]
    pub render: RenderConfig,

    /// Image export settings
    #[serde(default)]
    pub export: ExportSettings,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `padding`: 0.0 - 1000.0
    /// - `viewport_width`, `viewport_height`: 16 - 4096
    /// - `format`: "png"
    fn validate_and_clamp(&mut self) {
        if !self.render.padding.is_finite() {
            log::warn!("Invalid padding {}, using 10", self.render.padding);
            self.render.padding = crate::export::DEFAULT_PADDING;
        } else if !(0.0..=1000.0).contains(&self.render.padding) {
            log::warn!(
                "Invalid padding {:.1}, clamping to 0.0-1000.0 range",
                self.render.padding
            );
            self.render.padding = self.render.padding.clamp(0.0, 1000.0);
        }

        for (name, side) in [
            ("viewport_width", &mut self.render.viewport_width),
            ("viewport_height", &mut self.render.viewport_height),
        ] {
            if !(16..=4096).contains(&*side) {
                log::warn!("Invalid {} {}, clamping to 16-4096 range", name, side);
                *side = (*side).clamp(16, 4096);
            }
        }

        if !self.export.format.eq_ignore_ascii_case("png") {
            log::warn!(
                "Unsupported export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/geo2png/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("geo2png");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// Render options derived from the `[render]` section.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(
            self.render.padding,
            self.render.fit_to_bounds,
            self.render.download,
        )
        .with_viewport(ViewportSize::new(
            self.render.viewport_width,
            self.render.viewport_height,
        ))
    }

    /// Export settings resolved into a runtime [`ExportConfig`].
    pub fn export_config(&self) -> ExportConfig {
        let defaults = ExportConfig::default();
        let directory = if self.export.directory.trim().is_empty() {
            defaults.directory
        } else {
            expand_tilde(self.export.directory.trim())
        };
        ExportConfig {
            directory,
            filename_template: self.export.filename_template.clone(),
            format: self.export.format.to_ascii_lowercase(),
        }
    }
}
