//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name.
//!
//! Palette types:
//! - `categorical`: Discrete colors for distinct curves (colors repeat after exhausting the list)
//! - `sequential`: Gradient from low to high values, used for velocity images and color bars
//! - `diverging`: Gradient with a neutral midpoint

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        warn!("failed to load embedded palettes.json: {e}");
        PaletteRegistry::default()
    })
});

/// Default categorical palette: the ten-color cycle used for per-shot curves
pub const DEFAULT_CATEGORICAL_PALETTE: &str = "Tab10";

/// Default sequential palette for velocity images
pub const DEFAULT_SEQUENTIAL_PALETTE: &str = "Viridis";

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Categorical,
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around for categorical palettes)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128]; // Gray fallback
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or([128, 128, 128])
    }

    /// Number of colors in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 the last. Values in between are
    /// linearly interpolated between neighboring stops.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128];
        }

        let t = t.clamp(0.0, 1.0);
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let lo = self.get_color(idx_low);
        let hi = self.get_color(idx_high);

        [
            (lo[0] as f64 * (1.0 - frac) + hi[0] as f64 * frac) as u8,
            (lo[1] as f64 * (1.0 - frac) + hi[1] as f64 * frac) as u8,
            (lo[2] as f64 * (1.0 - frac) + hi[2] as f64 * frac) as u8,
        ]
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
}

impl PaletteRegistry {
    /// Load palettes from a JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> =
            serde_json::from_str(json).map_err(|e| format!("failed to parse palettes JSON: {e}"))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.palettes.insert(def.name.to_lowercase(), def);
        }
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get the default categorical palette
    pub fn default_categorical(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_CATEGORICAL_PALETTE)
    }

    /// Get a sequential palette by name, falling back to the default
    pub fn sequential_or_default(&self, name: &str) -> Option<&PaletteDefinition> {
        self.get(name).or_else(|| self.get(DEFAULT_SEQUENTIAL_PALETTE))
    }
}

/// Parse a hex color string to an RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored), with or without `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        warn!("invalid hex color '{hex}' (length {})", hex.len());
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Color for the n-th distinct curve in a plot
///
/// Cycles through the default categorical palette: with the ten-color
/// default, curve 10 gets the same color as curve 0.
pub fn curve_color(index: usize) -> [u8; 3] {
    match PALETTE_REGISTRY.default_categorical() {
        Some(palette) => palette.get_color(index),
        None => [128, 128, 128],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#1F77B4"), Some([31, 119, 180]));
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));

        // 8-digit hex (with alpha, ignored)
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        // Invalid
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn test_registry_loads() {
        let registry = &*PALETTE_REGISTRY;

        let tab10 = registry.get("Tab10").expect("Tab10 palette missing");
        assert_eq!(tab10.palette_type, PaletteType::Categorical);
        assert_eq!(tab10.len(), 10);
        assert_eq!(tab10.get_color(0), [31, 119, 180]);

        let viridis = registry.get("viridis").expect("case-insensitive lookup");
        assert_eq!(viridis.palette_type, PaletteType::Sequential);
    }

    #[test]
    fn test_curve_color_cycles_after_ten() {
        // The ten-color cycle repeats for the 11th distinct curve
        assert_eq!(curve_color(10), curve_color(0));
        assert_eq!(curve_color(11), curve_color(1));
        assert_ne!(curve_color(0), curve_color(1));
    }

    #[test]
    fn test_interpolate_endpoints() {
        let viridis = PALETTE_REGISTRY.get("Viridis").unwrap();
        assert_eq!(viridis.interpolate(0.0), viridis.get_color(0));
        assert_eq!(viridis.interpolate(1.0), viridis.get_color(9));

        // Out-of-range values clamp
        assert_eq!(viridis.interpolate(-0.5), viridis.get_color(0));
        assert_eq!(viridis.interpolate(1.5), viridis.get_color(9));
    }

    #[test]
    fn test_sequential_fallback() {
        let registry = &*PALETTE_REGISTRY;
        let fallback = registry.sequential_or_default("no-such-palette").unwrap();
        assert_eq!(fallback.name, DEFAULT_SEQUENTIAL_PALETTE);
    }
}
