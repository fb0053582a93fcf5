//! First-arrival pick curves
//!
//! One curve per distinct shot position over (receiver x, traveltime),
//! color-cycled through the categorical palette, with a square marker at the
//! shot's zero-time position. An optional mode converts traveltimes to
//! apparent velocity before plotting.

use crate::error::{PlotError, Result};
use crate::palettes::curve_color;
use crate::surface::axes::Axes;
use crate::surface::elements::{LineKind, LineStyle, MarkerShape, MarkerStyle};
use crate::survey::container::TraveltimeData;
use crate::survey::geometry::shot_receiver_x;
use crate::survey::index::IndexBase;

/// Styling overrides for pick curves
///
/// Defaults match the conventional rendering: cross markers of size 8 on a
/// solid line. Colors always come from the per-shot cycle.
#[derive(Debug, Clone, Copy)]
pub struct FirstPickStyle {
    pub marker: MarkerShape,
    pub marker_size: u32,
    pub line_width: u32,
    pub line_kind: LineKind,
}

impl Default for FirstPickStyle {
    fn default() -> Self {
        Self {
            marker: MarkerShape::Cross,
            marker_size: 8,
            line_width: 1,
            line_kind: LineKind::Solid,
        }
    }
}

/// Options for [`draw_first_picks`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPickOptions<'a> {
    /// Values plotted instead of the container's `t` column
    pub traveltimes: Option<&'a [f64]>,
    /// Plot `|receiver_x - shot_x| / t` instead of raw traveltime
    pub apparent_velocity: bool,
    /// Explicit index convention; `None` detects it from the data
    pub index_base: Option<IndexBase>,
    pub style: FirstPickStyle,
}

/// Plot first arrivals as connected curves, one per shot position
pub fn draw_first_picks<D: TraveltimeData + ?Sized>(
    ax: &mut Axes,
    data: &D,
    opts: &FirstPickOptions,
) -> Result<()> {
    if data.is_empty() || data.sensor_count() == 0 {
        return Err(PlotError::EmptyData);
    }

    let (gx, sx) = shot_receiver_x(data, opts.index_base)?;
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

    let values: Vec<f64> = if opts.apparent_velocity {
        gx.iter()
            .zip(&sx)
            .zip(times)
            .map(|((&g, &s), &t)| (g - s).abs() / t)
            .collect()
    } else {
        times.to_vec()
    };

    let mut shot_positions = sx.clone();
    shot_positions.sort_by(f64::total_cmp);
    shot_positions.dedup();

    for (curve, &shot_x) in shot_positions.iter().enumerate() {
        let mut points: Vec<(f64, f64)> = sx
            .iter()
            .zip(&gx)
            .zip(&values)
            .filter(|((&s, _), _)| s == shot_x)
            .map(|((_, &g), &v)| (g, v))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let color = curve_color(curve);
        let (xs, ys) = points.into_iter().unzip();
        ax.plot_line_with_markers(
            xs,
            ys,
            LineStyle {
                color,
                width: opts.style.line_width,
                kind: opts.style.line_kind,
            },
            MarkerStyle {
                shape: opts.style.marker,
                size: opts.style.marker_size,
                color,
            },
        );

        // Shot location at zero time, same color as its curve
        ax.plot_markers(
            vec![shot_x],
            vec![0.0],
            MarkerStyle {
                shape: MarkerShape::Square,
                size: opts.style.marker_size,
                color,
            },
        );
    }

    ax.grid(true);
    if opts.apparent_velocity {
        ax.set_ylabel("Apparent velocity (m/s)");
    } else {
        ax.set_ylabel("Traveltime (s)");
    }
    ax.set_xlabel("x (m)");
    ax.invert_yaxis();

    Ok(())
}
