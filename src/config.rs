//! Figure and render configuration
//!
//! All plots share one configuration struct describing figure geometry
//! (canvas size, margins, label areas) and default styling. `Default` gives
//! the values used by the development binary; callers override fields as
//! needed before creating a `Figure`.

use tracing::warn;

use crate::palettes::DEFAULT_SEQUENTIAL_PALETTE;

/// A figure dimension, either automatic or an explicit pixel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigureDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl FigureDimension {
    /// Parse from a string value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "800" → Pixels(800) if in valid range [100, 10000]
    pub fn from_str(value: &str, default: FigureDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return FigureDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (100..=10_000).contains(&px) => FigureDimension::Pixels(px),
            Ok(px) => {
                warn!(
                    "figure dimension {px} out of valid range [100-10000], using default {default:?}"
                );
                default
            }
            Err(_) => {
                warn!("invalid figure dimension '{trimmed}', using default {default:?}");
                default
            }
        }
    }

    /// Resolve to actual pixels, using `fallback` for Auto
    pub fn resolve(&self, fallback: u32) -> u32 {
        match self {
            FigureDimension::Pixels(px) => *px,
            FigureDimension::Auto => fallback,
        }
    }
}

/// Fallback canvas width for `FigureDimension::Auto`
pub const AUTO_WIDTH: u32 = 800;

/// Fallback canvas height for `FigureDimension::Auto`
pub const AUTO_HEIGHT: u32 = 600;

/// Configuration for figure geometry and default styling
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Canvas width (excluding color bar)
    pub width: FigureDimension,

    /// Canvas height
    pub height: FigureDimension,

    /// Outer margin around the plot area, pixels
    pub margin: u32,

    /// Height reserved below the plot area for x tick labels and the x label
    pub x_label_area: u32,

    /// Width reserved left of the plot area for y tick labels and the y label
    pub y_label_area: u32,

    /// Width of the color bar strip attached right of the plot area
    pub colorbar_width: u32,

    /// Multiplier applied to marker sizes
    pub marker_scale: f64,

    /// Sequential palette used for velocity images and color bars
    pub sequential_palette: String,

    /// Axis label and tick font size, points
    pub font_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: FigureDimension::Auto,
            height: FigureDimension::Auto,
            margin: 10,
            x_label_area: 45,
            y_label_area: 65,
            colorbar_width: 90,
            marker_scale: 1.0,
            sequential_palette: DEFAULT_SEQUENTIAL_PALETTE.to_string(),
            font_size: 16,
        }
    }
}

impl PlotConfig {
    /// Resolve the full canvas size in pixels
    ///
    /// `with_colorbar` adds the color bar strip to the width, mirroring how
    /// the canvas is split at render time.
    pub fn resolve_dimensions(&self, with_colorbar: bool) -> (u32, u32) {
        let w = self.width.resolve(AUTO_WIDTH);
        let h = self.height.resolve(AUTO_HEIGHT);
        if with_colorbar {
            (w + self.colorbar_width, h)
        } else {
            (w, h)
        }
    }

    /// Size of the inner plot area in pixels (canvas minus margins and label areas)
    pub fn plot_area(&self) -> (u32, u32) {
        let (w, h) = self.resolve_dimensions(false);
        let pw = w.saturating_sub(2 * self.margin + self.y_label_area).max(1);
        let ph = h.saturating_sub(2 * self.margin + self.x_label_area).max(1);
        (pw, ph)
    }
}
