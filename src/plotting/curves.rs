//! Raw traveltime curves
//!
//! One polyline per shot over (receiver x, traveltime), with marker rows
//! near the top edge showing where shots and receivers sit along the line.

use crate::error::{PlotError, Result};
use crate::palettes::curve_color;
use crate::surface::axes::Axes;
use crate::surface::elements::{LineStyle, MarkerShape, MarkerStyle};
use crate::survey::container::TraveltimeData;
use crate::survey::index::{base_or_detect, IndexBase};

/// Marker row offsets from the zero-time line, in device pixels
const SHOT_ROW_PIXELS: f64 = 8.0;
const RECEIVER_ROW_PIXELS: f64 = 3.0;

/// Horizontal padding and top headroom, in device pixels
const X_PAD_PIXELS: f64 = 5.0;
const Y_HEADROOM_PIXELS: f64 = 16.0;

/// Options for [`draw_traveltime_curves`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TraveltimeCurveOptions<'a> {
    /// Values plotted instead of the container's `t` column
    pub traveltimes: Option<&'a [f64]>,
    /// Explicit index convention; `None` detects it from the data
    pub index_base: Option<IndexBase>,
}

/// Draw raw traveltime curves into `ax`
///
/// Each distinct shot index becomes one cross-marked polyline connecting its
/// receivers, ordered by receiver coordinate. Shot positions are marked by
/// downward triangles, receiver positions by upward triangles, both placed a
/// fixed number of pixels above the zero-time line. The y axis runs from the
/// slowest arrival down to slightly above zero, so first arrivals read from
/// the top.
pub fn draw_traveltime_curves<D: TraveltimeData + ?Sized>(
    ax: &mut Axes,
    data: &D,
    opts: &TraveltimeCurveOptions,
) -> Result<()> {
    if data.is_empty() || data.sensor_count() == 0 {
        return Err(PlotError::EmptyData);
    }

    let shots = data.shot_indices()?;
    let receivers = data.receiver_indices()?;
    let times = match opts.traveltimes {
        Some(t) => t,
        None => data.traveltimes()?,
    };
    if times.len() != data.len() {
        return Err(PlotError::ColumnLength {
            name: "t".to_string(),
            got: times.len(),
            expected: data.len(),
        });
    }

    let base = base_or_detect(opts.index_base, shots, receivers);
    let sensor_count = data.sensor_count();
    let x = data.sensor_x();

    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let t_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Provisional limits fix the coordinate transform used for the
    // pixel-based marker rows and padding below
    ax.set_xlim(x_min, x_max);
    ax.set_ylim(t_max, -0.002);
    let (dx, dy) = ax.data_per_pixel();

    let mut unique_shots = shots.to_vec();
    unique_shots.sort_by(f64::total_cmp);
    unique_shots.dedup();

    for (curve, &shot) in unique_shots.iter().enumerate() {
        let mut points: Vec<(f64, f64)> = shots
            .iter()
            .zip(receivers)
            .zip(times)
            .filter(|((&s, _), _)| s == shot)
            .map(|((_, &g), &t)| Ok((x[base.resolve_one(g, sensor_count)?], t)))
            .collect::<Result<_>>()?;
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (xs, ys) = points.into_iter().unzip();
        let color = curve_color(curve);
        ax.plot_line_with_markers(
            xs,
            ys,
            LineStyle::solid(color),
            MarkerStyle {
                shape: MarkerShape::Cross,
                size: 6,
                color,
            },
        );
    }

    // Shot positions, a marker row above the zero-time line
    let shot_x = positions_of(&unique_shots, &x, base, sensor_count)?;
    let n_shots = shot_x.len();
    ax.plot_markers(
        shot_x,
        vec![SHOT_ROW_PIXELS * dy; n_shots],
        MarkerStyle {
            shape: MarkerShape::TriangleDown,
            size: 8,
            color: [0, 128, 0],
        },
    );

    // Receiver positions, a second row closer to the line
    let mut unique_receivers = receivers.to_vec();
    unique_receivers.sort_by(f64::total_cmp);
    unique_receivers.dedup();
    let receiver_x = positions_of(&unique_receivers, &x, base, sensor_count)?;
    let n_receivers = receiver_x.len();
    ax.plot_markers(
        receiver_x,
        vec![RECEIVER_ROW_PIXELS * dy; n_receivers],
        MarkerStyle {
            shape: MarkerShape::TriangleUp,
            size: 8,
            color: [200, 0, 0],
        },
    );

    ax.grid(true);
    ax.set_ylim(t_max, Y_HEADROOM_PIXELS * dy);
    ax.set_xlim(x_min - X_PAD_PIXELS * dx, x_max + X_PAD_PIXELS * dx);
    ax.set_xlabel("x-Coordinate [m]");
    ax.set_ylabel("Traveltime [ms]");

    Ok(())
}

fn positions_of(
    indices: &[f64],
    sensor_x: &[f64],
    base: IndexBase,
    sensor_count: usize,
) -> Result<Vec<f64>> {
    indices
        .iter()
        .map(|&i| Ok(sensor_x[base.resolve_one(i, sensor_count)?]))
        .collect()
}
