//! Construction-time configuration.

use crate::error::{SnapError, SnapResult};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Default snapping distance in screen pixels.
pub const DEFAULT_SNAP_SIZE: f64 = 10.0;
/// Default guide line color.
pub const DEFAULT_LINE_COLOR: &str = "#7F6EF6";
/// Default guide stroke width.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
/// Default dash pattern for guides.
pub const DEFAULT_DASH_PATTERN: [f64; 1] = [5.0];

/// Optional overrides applied when a [`Snap`](crate::snap::Snap) is created.
///
/// Every field falls back to its default when absent, so an empty JSON
/// object is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Snapping distance in screen pixels (zoom-compensated at match time).
    pub snap_size: Option<f64>,
    /// Guide color as a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    pub line_color: Option<String>,
    /// Whether guides are drawn at all.
    pub show_line: Option<bool>,
    /// Guide stroke width.
    pub stroke_width: Option<f64>,
    /// Dash pattern used when `is_dash` is on.
    pub dash_pattern: Option<Vec<f64>>,
    /// Whether guides are dashed.
    pub is_dash: Option<bool>,
    /// Whether a marker is drawn at every guide endpoint.
    pub show_line_points: Option<bool>,
}

impl SnapConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> SnapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> SnapResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the configured line color, or the default one.
    pub fn resolve_line_color(&self) -> SnapResult<Color> {
        parse_hex_color(self.line_color.as_deref().unwrap_or(DEFAULT_LINE_COLOR))
    }
}

/// Parse a hex color string (`#rgb`, `#rrggbb` or `#rrggbbaa`).
pub fn parse_hex_color(color: &str) -> SnapResult<Color> {
    let invalid = || SnapError::InvalidColor(color.to_string());
    let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Ok(Color::from_rgba8(r, g, b, 255))
        }
        6 => Ok(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        )),
        8 => Ok(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => Err(invalid()),
    }
}
