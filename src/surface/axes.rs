use std::path::Path;

use crate::config::PlotConfig;
use crate::error::Result;
use crate::surface::elements::{Element, LineStyle, MarkerStyle};
use crate::surface::matrix::MatrixImage;
use crate::surface::render;

/// Explicit tick positions with their display labels
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

/// Color bar description attached to an axes
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub label: String,
    pub vmin: f64,
    pub vmax: f64,
    pub palette: String,
}

/// A mutable drawing surface
///
/// Holds retained elements plus axis state. Renderers only ever mutate this
/// struct; rasterization happens when the owning [`Figure`] is presented.
#[derive(Debug, Clone)]
pub struct Axes {
    elements: Vec<Element>,
    xlim: Option<(f64, f64)>,
    /// Stored as (bottom, top); bottom > top encodes a descending axis
    ylim: Option<(f64, f64)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xticks: Option<Ticks>,
    yticks: Option<Ticks>,
    grid: bool,
    y_inverted: bool,
    colorbar: Option<Colorbar>,
    /// Inner plot area size in device pixels
    plot_px: (u32, u32),
}

impl Axes {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            elements: Vec::new(),
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            xticks: None,
            yticks: None,
            grid: false,
            y_inverted: false,
            colorbar: None,
            plot_px: config.plot_area(),
        }
    }

    // === Element mutation ===

    pub fn plot_line(&mut self, xs: Vec<f64>, ys: Vec<f64>, style: LineStyle) {
        self.elements.push(Element::Line {
            xs,
            ys,
            style,
            marker: None,
        });
    }

    pub fn plot_line_with_markers(
        &mut self,
        xs: Vec<f64>,
        ys: Vec<f64>,
        style: LineStyle,
        marker: MarkerStyle,
    ) {
        self.elements.push(Element::Line {
            xs,
            ys,
            style,
            marker: Some(marker),
        });
    }

    pub fn plot_markers(&mut self, xs: Vec<f64>, ys: Vec<f64>, style: MarkerStyle) {
        self.elements.push(Element::Markers { xs, ys, style });
    }

    /// Add a matrix image and return a handle to the stored copy
    pub fn draw_matrix(&mut self, image: MatrixImage) -> &MatrixImage {
        self.elements.push(Element::Matrix(image));
        match self.elements.last() {
            Some(Element::Matrix(img)) => img,
            _ => unreachable!("matrix element was just pushed"),
        }
    }

    // === Axis state ===

    pub fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = Some((left, right));
    }

    /// Set the y range as (bottom, top); bottom > top draws a descending axis
    pub fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = Some((bottom, top));
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_xticks(&mut self, positions: Vec<f64>, labels: Vec<String>) {
        self.xticks = Some(Ticks { positions, labels });
    }

    pub fn set_yticks(&mut self, positions: Vec<f64>, labels: Vec<String>) {
        self.yticks = Some(Ticks { positions, labels });
    }

    pub fn grid(&mut self, on: bool) {
        self.grid = on;
    }

    /// Flip the y axis so values increase downward
    pub fn invert_yaxis(&mut self) {
        self.y_inverted = !self.y_inverted;
    }

    pub fn set_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbar = Some(colorbar);
    }

    // === Inspection (used by the renderer and by tests) ===

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn xticks(&self) -> Option<&Ticks> {
        self.xticks.as_ref()
    }

    pub fn yticks(&self) -> Option<&Ticks> {
        self.yticks.as_ref()
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid
    }

    pub fn y_inverted(&self) -> bool {
        self.y_inverted
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    // === Coordinate transform ===

    /// Extent of all element data as (xmin, xmax, ymin, ymax)
    pub fn data_extent(&self) -> Option<(f64, f64, f64, f64)> {
        let mut extent: Option<(f64, f64, f64, f64)> = None;
        let mut include = |x: f64, y: f64| {
            if !x.is_finite() || !y.is_finite() {
                return;
            }
            extent = Some(match extent {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        };

        for element in &self.elements {
            match element {
                Element::Line { xs, ys, .. } | Element::Markers { xs, ys, .. } => {
                    for (&x, &y) in xs.iter().zip(ys) {
                        include(x, y);
                    }
                }
                Element::Matrix(img) => {
                    // Matrix cells occupy index coordinates [-0.5, n - 0.5]
                    include(-0.5, -0.5);
                    include(img.ncols() as f64 - 0.5, img.nrows() as f64 - 0.5);
                }
            }
        }
        extent
    }

    /// Effective x range as (left, right)
    pub fn effective_xlim(&self) -> (f64, f64) {
        self.xlim.unwrap_or_else(|| {
            let (x0, x1, _, _) = self.data_extent().unwrap_or((0.0, 1.0, 0.0, 1.0));
            pad_degenerate(x0, x1)
        })
    }

    /// Effective y range as (bottom, top), with the inversion flag applied
    pub fn effective_ylim(&self) -> (f64, f64) {
        let (bottom, top) = self.ylim.unwrap_or_else(|| {
            let (_, _, y0, y1) = self.data_extent().unwrap_or((0.0, 1.0, 0.0, 1.0));
            pad_degenerate(y0, y1)
        });
        if self.y_inverted {
            (top, bottom)
        } else {
            (bottom, top)
        }
    }

    /// Data units spanned by one device pixel, as (dx, dy)
    ///
    /// Signs follow the axis directions: a descending y axis yields a
    /// negative dy. This is how marker rows are placed a fixed number of
    /// pixels from the axis regardless of the data scale.
    pub fn data_per_pixel(&self) -> (f64, f64) {
        let (left, right) = self.effective_xlim();
        let (bottom, top) = self.effective_ylim();
        let (pw, ph) = self.plot_px;
        (
            (right - left) / pw as f64,
            (top - bottom) / ph as f64,
        )
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(&PlotConfig::default())
    }
}

fn pad_degenerate(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// A figure: one axes surface plus canvas geometry
///
/// Presentation is explicit: [`Figure::save_png`] or [`Figure::render_rgb`]
/// rasterize the retained scene. Draw functions never present.
#[derive(Debug, Clone)]
pub struct Figure {
    pub axes: Axes,
    config: PlotConfig,
}

impl Figure {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            axes: Axes::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Full canvas size in pixels, including the color bar strip if present
    pub fn dimensions(&self) -> (u32, u32) {
        self.config
            .resolve_dimensions(self.axes.colorbar().is_some())
    }

    /// Rasterize to a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        render::save_png(self, path.as_ref())
    }

    /// Rasterize to a raw RGB pixel buffer (width * height * 3 bytes)
    pub fn render_rgb(&self) -> Result<Vec<u8>> {
        render::render_rgb(self)
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(PlotConfig::default())
    }
}
