//! Utility functions for color names and random identifiers.

use crate::draw::{Color, color::*};
use rand::{Rng, distributions::Alphanumeric};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by [`Color::parse`] when a style option holds a plain color name
/// instead of a hex or `rgba()` value.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black",
///   "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Builds an identifier of the form `<prefix>_<suffix>` where the suffix is
/// `len` random lowercase alphanumeric characters.
pub fn random_id(prefix: &str, len: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}_{}", prefix, suffix)
}
