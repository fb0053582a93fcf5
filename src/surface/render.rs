//! Presentation of a retained figure through the plotters bitmap backend
//!
//! This is the only module that touches pixels. Everything above it mutates
//! `Axes` state; callers present a finished figure with
//! [`Figure::save_png`](crate::surface::Figure::save_png) or
//! [`Figure::render_rgb`](crate::surface::Figure::render_rgb).

use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::{PlotError, Result};
use crate::palettes::{PaletteDefinition, PALETTE_REGISTRY};
use crate::surface::axes::{Colorbar, Figure, Ticks};
use crate::surface::elements::{Element, LineKind, LineStyle, MarkerShape, MarkerStyle};
use crate::surface::matrix::MatrixImage;

/// Gradient resolution of the color bar strip
const COLORBAR_STEPS: usize = 128;

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn rgb(c: [u8; 3]) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

/// Rasterize a figure into a PNG file
pub fn save_png(figure: &Figure, path: &Path) -> Result<()> {
    let dims = figure.dimensions();
    let root = BitMapBackend::new(path, dims).into_drawing_area();
    render(figure, &root)?;
    root.present().map_err(render_err)
}

/// Rasterize a figure into a raw RGB buffer (width * height * 3 bytes)
pub fn render_rgb(figure: &Figure) -> Result<Vec<u8>> {
    let (w, h) = figure.dimensions();
    let mut buffer = vec![0u8; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
        render(figure, &root)?;
        root.present().map_err(render_err)?;
    }
    Ok(buffer)
}

fn render<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let config = figure.config();
    let palette = PALETTE_REGISTRY.sequential_or_default(&config.sequential_palette);

    match figure.axes.colorbar() {
        Some(colorbar) => {
            let (plot_width, _) = config.resolve_dimensions(false);
            let (plot_area, colorbar_area) = root.split_horizontally(plot_width as i32);
            render_axes(figure, &plot_area, palette)?;
            render_colorbar(colorbar, &colorbar_area, config.font_size, palette)?;
        }
        None => render_axes(figure, root, palette)?,
    }

    Ok(())
}

fn render_axes<DB: DrawingBackend>(
    figure: &Figure,
    area: &DrawingArea<DB, Shift>,
    palette: Option<&PaletteDefinition>,
) -> Result<()> {
    let axes = &figure.axes;
    let config = figure.config();

    let (left, right) = axes.effective_xlim();
    let (bottom, top) = axes.effective_ylim();

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(config.margin)
        .x_label_area_size(config.x_label_area)
        .y_label_area_size(config.y_label_area);
    let mut chart = builder
        .build_cartesian_2d(left..right, bottom..top)
        .map_err(render_err)?;

    let font = config.font_size as i32;
    let xticks = axes.xticks().cloned();
    let yticks = axes.yticks().cloned();
    let x_fmt = move |v: &f64| tick_label(xticks.as_ref(), *v);
    let y_fmt = move |v: &f64| tick_label(yticks.as_ref(), *v);

    let mut mesh = chart.configure_mesh();
    mesh.label_style(("sans-serif", font))
        .axis_desc_style(("sans-serif", font))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt);
    if !axes.grid_enabled() {
        mesh.disable_x_mesh().disable_y_mesh();
    }
    if let Some(label) = axes.xlabel() {
        mesh.x_desc(label);
    }
    if let Some(label) = axes.ylabel() {
        mesh.y_desc(label);
    }
    if let Some(ticks) = axes.xticks() {
        mesh.x_labels(ticks.positions.len().max(2));
    }
    if let Some(ticks) = axes.yticks() {
        mesh.y_labels(ticks.positions.len().max(2));
    }
    mesh.draw().map_err(render_err)?;

    for element in axes.elements() {
        match element {
            Element::Line {
                xs,
                ys,
                style,
                marker,
            } => {
                draw_line(&mut chart, xs, ys, style)?;
                if let Some(marker) = marker {
                    draw_markers(&mut chart, xs, ys, marker, config.marker_scale)?;
                }
            }
            Element::Markers { xs, ys, style } => {
                draw_markers(&mut chart, xs, ys, style, config.marker_scale)?;
            }
            Element::Matrix(image) => draw_matrix_cells(&mut chart, image, palette)?,
        }
    }

    Ok(())
}

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_line<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    xs: &[f64],
    ys: &[f64],
    style: &LineStyle,
) -> Result<()> {
    if xs.len() < 2 {
        return Ok(());
    }
    let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    let stroke = rgb(style.color).stroke_width(style.width);
    match style.kind {
        LineKind::Solid => {
            chart
                .draw_series(LineSeries::new(points, stroke))
                .map_err(render_err)?;
        }
        LineKind::Dashed => {
            chart
                .draw_series(DashedLineSeries::new(points, 6, 4, stroke))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

fn draw_markers<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    xs: &[f64],
    ys: &[f64],
    style: &MarkerStyle,
    scale: f64,
) -> Result<()> {
    let color = rgb(style.color);
    let size = ((style.size as f64 * scale) as i32).max(1);
    let half = (size / 2).max(1);
    let points = xs.iter().copied().zip(ys.iter().copied());

    match style.shape {
        MarkerShape::Cross => {
            chart
                .draw_series(points.map(|c| Cross::new(c, half, color.stroke_width(2))))
                .map_err(render_err)?;
        }
        MarkerShape::Circle => {
            chart
                .draw_series(points.map(|c| Circle::new(c, half, color.filled())))
                .map_err(render_err)?;
        }
        MarkerShape::Square => {
            chart
                .draw_series(points.map(|c| {
                    EmptyElement::at(c)
                        + Rectangle::new([(-half, -half), (half, half)], color.filled())
                }))
                .map_err(render_err)?;
        }
        MarkerShape::TriangleUp => {
            chart
                .draw_series(points.map(|c| {
                    EmptyElement::at(c)
                        + Polygon::new(vec![(-half, half), (half, half), (0, -half)], color.filled())
                }))
                .map_err(render_err)?;
        }
        MarkerShape::TriangleDown => {
            chart
                .draw_series(points.map(|c| {
                    EmptyElement::at(c)
                        + Polygon::new(vec![(-half, -half), (half, -half), (0, half)], color.filled())
                }))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

fn draw_matrix_cells<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    image: &MatrixImage,
    palette: Option<&PaletteDefinition>,
) -> Result<()> {
    let mut cells = Vec::new();
    for row in 0..image.nrows() {
        for col in 0..image.ncols() {
            if let Some(value) = image.get(col, row) {
                let t = image.normalized(value);
                let color = palette.map_or([128, 128, 128], |p| p.interpolate(t));
                let x = col as f64;
                let y = row as f64;
                cells.push(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    rgb(color).filled(),
                ));
            }
        }
    }
    chart.draw_series(cells).map_err(render_err)?;
    Ok(())
}

fn render_colorbar<DB: DrawingBackend>(
    colorbar: &Colorbar,
    area: &DrawingArea<DB, Shift>,
    font_size: u32,
    fallback: Option<&PaletteDefinition>,
) -> Result<()> {
    let palette = PALETTE_REGISTRY.get(&colorbar.palette).or(fallback);
    let span = (colorbar.vmax - colorbar.vmin).max(1.0e-12);
    let vmin = colorbar.vmin;
    let vmax = vmin + span;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(5)
        .margin_right(10)
        .set_label_area_size(LabelAreaPosition::Left, 45);
    let mut chart = builder
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(render_err)?;

    let font = font_size as i32;
    chart
        .configure_mesh()
        .disable_x_axis()
        .disable_x_mesh()
        .disable_y_mesh()
        .label_style(("sans-serif", font - 2))
        .axis_desc_style(("sans-serif", font))
        .y_desc(colorbar.label.clone())
        .draw()
        .map_err(render_err)?;

    let delta = span / COLORBAR_STEPS as f64;
    for step in 0..COLORBAR_STEPS {
        let v0 = vmin + delta * step as f64;
        let v1 = v0 + delta;
        let t = (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        let color = palette.map_or([128, 128, 128], |p| p.interpolate(t));
        chart
            .plotting_area()
            .draw(&Rectangle::new([(0.0, v0), (1.0, v1)], rgb(color).filled()))
            .map_err(render_err)?;
    }

    Ok(())
}

/// Label for an axis value: the matching explicit tick label, or a plain
/// numeric rendering when the axes carries no explicit ticks
fn tick_label(ticks: Option<&Ticks>, value: f64) -> String {
    match ticks {
        Some(ticks) if !ticks.positions.is_empty() => {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (i, &p) in ticks.positions.iter().enumerate() {
                let d = (p - value).abs();
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            if best_dist <= tick_tolerance(&ticks.positions) {
                ticks.labels.get(best).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        }
        _ => {
            if value == value.trunc() && value.abs() < 1.0e7 {
                format!("{}", value as i64)
            } else {
                format!("{value:.3}")
            }
        }
    }
}

/// Half the smallest spacing between tick positions
fn tick_tolerance(positions: &[f64]) -> f64 {
    let mut sorted = positions.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min)
        .min(1.0)
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FigureDimension, PlotConfig};
    use crate::surface::elements::LineStyle;

    fn small_figure() -> Figure {
        let config = PlotConfig {
            width: FigureDimension::Pixels(200),
            height: FigureDimension::Pixels(150),
            ..PlotConfig::default()
        };
        let mut fig = Figure::new(config);
        fig.axes
            .plot_line(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.5], LineStyle::default());
        fig
    }

    #[test]
    fn test_render_rgb_buffer_size() {
        let fig = small_figure();
        let buffer = fig.render_rgb().unwrap();
        assert_eq!(buffer.len(), 200 * 150 * 3);
        // The white fill plus a black line leaves both extremes in the buffer
        assert!(buffer.iter().any(|&b| b == 255));
        assert!(buffer.iter().any(|&b| b < 255));
    }

    #[test]
    fn test_render_rgb_includes_colorbar_strip() {
        let mut fig = small_figure();
        fig.axes.set_colorbar(Colorbar {
            label: "v".into(),
            vmin: 0.0,
            vmax: 2.0,
            palette: "Viridis".into(),
        });
        let (w, h) = fig.dimensions();
        assert_eq!(w, 200 + fig.config().colorbar_width);
        let buffer = fig.render_rgb().unwrap();
        assert_eq!(buffer.len(), (w * h * 3) as usize);
    }

    #[test]
    fn test_save_png_writes_png_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        small_figure().save_png(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_tick_label_matching() {
        let ticks = Ticks {
            positions: vec![0.0, 50.0, 100.0],
            labels: vec!["0".into(), "250".into(), "500".into()],
        };
        assert_eq!(tick_label(Some(&ticks), 50.0), "250");
        assert_eq!(tick_label(Some(&ticks), 50.4), "250");
        assert_eq!(tick_label(Some(&ticks), 30.0), "");
        assert_eq!(tick_label(None, 50.0), "50");
        assert_eq!(tick_label(None, 0.25), "0.250");
    }
}
