//! Style resolution from a shape's option mapping.
//!
//! The host map keeps drawing options for every shape (stroke and fill
//! colors, their opacities, stroke width, corner radius). [`StyleOptions`]
//! is the typed view of that mapping: every key is optional and absent keys
//! fall back to the documented defaults in [`resolve_style`].

use super::color::Color;
use log::warn;
use serde::{Deserialize, Serialize};

/// Stroke color used when the options do not name one.
pub const DEFAULT_STROKE_COLOR: &str = "#0000FF";
/// Fill color used when the options do not name one.
pub const DEFAULT_FILL_COLOR: &str = "#7df9ff33";
/// Stroke width in pixels used when the options do not set one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
/// Corner radius used when the options do not set one.
pub const DEFAULT_BORDER_RADIUS: f64 = 0.0;

/// Drawing options attached to a shape on the source map.
///
/// Deserialized from the host's camelCase option keys (`strokeColor`,
/// `fillOpacity`, ...). Unknown keys are ignored. The resolver only reads
/// from this structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

/// Which paint a color/opacity pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stroke,
    Fill,
}

impl Channel {
    fn default_color(self) -> &'static str {
        match self {
            Channel::Stroke => DEFAULT_STROKE_COLOR,
            Channel::Fill => DEFAULT_FILL_COLOR,
        }
    }
}

impl StyleOptions {
    /// The raw color value for `channel`, if present.
    pub fn color(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Stroke => self.stroke_color.as_deref(),
            Channel::Fill => self.fill_color.as_deref(),
        }
    }

    /// The sibling opacity value for `channel`, if present.
    pub fn opacity(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Stroke => self.stroke_opacity,
            Channel::Fill => self.fill_opacity,
        }
    }
}

/// Resolved paint parameters for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub fill_color: Color,
    pub border_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        resolve_style(&StyleOptions::default())
    }
}

/// Combines a color option with its sibling opacity option.
///
/// Returns `None` when the color is absent so the caller can apply its own
/// default. Without an opacity the color comes back unchanged. With an
/// opacity, an 8-digit hex color (`#RRGGBBAA`) has its embedded alpha
/// multiplied by the opacity and is returned as `rgba(r,g,b,a)`. A 6-digit
/// hex color is returned unchanged and the opacity is not applied.
pub fn resolve_color(options: &StyleOptions, channel: Channel) -> Option<String> {
    let color = options.color(channel)?;
    let Some(opacity) = options.opacity(channel) else {
        return Some(color.to_string());
    };

    if color.len() == 9
        && let Some((r, g, b, alpha)) = hex_channels(color)
    {
        let alpha = (alpha as f64 / 255.0) * opacity;
        return Some(format!("rgba({},{},{},{})", r, g, b, alpha));
    }
    Some(color.to_string())
}

/// Splits `#RRGGBBAA` into its four channels.
fn hex_channels(color: &str) -> Option<(u8, u8, u8, u8)> {
    let pair = |range: std::ops::Range<usize>| {
        color
            .get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    Some((pair(1..3)?, pair(3..5)?, pair(5..7)?, pair(7..9)?))
}

/// Resolves the full drawing style from a shape's options.
///
/// Colors that cannot be parsed fall back to the channel default with a
/// warning. Missing, negative, or non-finite widths and radii fall back to
/// their defaults.
pub fn resolve_style(options: &StyleOptions) -> RenderStyle {
    RenderStyle {
        stroke_color: resolve_paint(options, Channel::Stroke),
        stroke_width: non_negative(options.stroke_width, DEFAULT_STROKE_WIDTH, "strokeWidth"),
        fill_color: resolve_paint(options, Channel::Fill),
        border_radius: non_negative(options.border_radius, DEFAULT_BORDER_RADIUS, "borderRadius"),
    }
}

fn resolve_paint(options: &StyleOptions, channel: Channel) -> Color {
    let fallback = || {
        Color::parse(channel.default_color())
            .unwrap_or(Color::new(0.0, 0.0, 0.0, 1.0))
    };
    match resolve_color(options, channel) {
        Some(value) => Color::parse(&value).unwrap_or_else(|err| {
            warn!(
                "{}, using default {:?} color {}",
                err,
                channel,
                channel.default_color()
            );
            fallback()
        }),
        None => fallback(),
    }
}

fn non_negative(value: Option<f64>, default: f64, key: &str) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            warn!("Invalid {} {}, using {}", key, v, default);
            default
        }
        None => default,
    }
}
