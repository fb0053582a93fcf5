//! Apparent-velocity images
//!
//! Divides each record's shot-receiver offset by its traveltime and shows
//! the result as a dense matrix: receiver versus shot coordinate by default,
//! midpoint versus offset in pseudosection mode. Velocities are meaningless
//! when a traveltime sits at zero, so near-zero values fail the call before
//! any division happens.

use tracing::error;

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::surface::axes::{Axes, Colorbar, Figure};
use crate::surface::matrix::{vec_to_matrix, MatrixImage};
use crate::survey::container::TraveltimeData;
use crate::survey::geometry::{midpoints, shot_receiver_distances, shot_receiver_x};
use crate::survey::index::IndexBase;

/// Traveltimes below this are treated as zero and rejected
pub const ZERO_TRAVELTIME_THRESHOLD: f64 = 1e-10;

/// Sensor-position tick labels are sampled at this stride
pub const POSITION_TICK_STRIDE: usize = 50;

/// Where the velocity denominator comes from
#[derive(Debug, Clone, Copy, Default)]
pub enum ValueSource<'a> {
    /// The container's `t` column
    #[default]
    Traveltimes,
    /// A named container column
    Column(&'a str),
    /// An explicit value slice
    Values(&'a [f64]),
}

/// Options for [`draw_velocity_image`]
#[derive(Debug, Clone, Copy)]
pub struct VelocityImageOptions<'a> {
    pub values: ValueSource<'a>,
    /// Relabel coordinate ticks with sensor positions (matrix view only)
    pub use_positions: bool,
    /// Key cells by (midpoint, offset) instead of (receiver, shot)
    pub pseudosection: bool,
    /// Explicit index convention; `None` detects it from the data
    pub index_base: Option<IndexBase>,
}

impl Default for VelocityImageOptions<'_> {
    fn default() -> Self {
        Self {
            values: ValueSource::Traveltimes,
            use_positions: true,
            pseudosection: false,
            index_base: None,
        }
    }
}

/// Draw apparent velocities as a matrix image into `ax`
///
/// Returns a handle to the rasterized matrix, carrying the value range an
/// attached color bar needs.
pub fn draw_velocity_image<D: TraveltimeData + ?Sized>(
    ax: &mut Axes,
    data: &D,
    opts: &VelocityImageOptions,
) -> Result<MatrixImage> {
    if data.is_empty() || data.sensor_count() == 0 {
        return Err(PlotError::EmptyData);
    }

    let values: &[f64] = match opts.values {
        ValueSource::Traveltimes => data.traveltimes()?,
        ValueSource::Column(name) => data.column(name)?,
        ValueSource::Values(v) => v,
    };
    if values.len() != data.len() {
        return Err(PlotError::ColumnLength {
            name: "t".to_string(),
            got: values.len(),
            expected: data.len(),
        });
    }

    // Division by a zero traveltime is meaningless; report the offending
    // values instead of producing infinities
    let near_zero: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| v < ZERO_TRAVELTIME_THRESHOLD)
        .collect();
    if !near_zero.is_empty() {
        error!(
            "zero traveltimes found: {} value(s) below {ZERO_TRAVELTIME_THRESHOLD:e}: {near_zero:?}",
            near_zero.len()
        );
        return Err(PlotError::NearZeroTraveltime {
            count: near_zero.len(),
            min: near_zero.iter().copied().fold(f64::INFINITY, f64::min),
            threshold: ZERO_TRAVELTIME_THRESHOLD,
        });
    }

    let offsets = shot_receiver_distances(data, true, opts.index_base)?;
    let va: Vec<f64> = offsets
        .iter()
        .zip(values)
        .map(|(&d, &v)| d / v)
        .collect();

    let image = if opts.pseudosection {
        let mids = midpoints(data, opts.index_base)?;
        vec_to_matrix(&mids, &offsets, &va, "Apparent velocity [m/s]")?
    } else {
        let (gx, sx) = shot_receiver_x(data, opts.index_base)?;
        vec_to_matrix(&gx, &sx, &va, "Apparent velocity [m/s]")?
    };

    if opts.use_positions && !opts.pseudosection {
        let px = data.sensor_x();
        let positions: Vec<f64> = (0..data.sensor_count())
            .step_by(POSITION_TICK_STRIDE)
            .map(|i| i as f64)
            .collect();
        let labels: Vec<String> = positions
            .iter()
            .map(|&i| format!("{}", px[i as usize] as i64))
            .collect();
        ax.set_xticks(positions.clone(), labels.clone());
        ax.set_yticks(positions, labels);
    }

    let handle = image.clone();
    ax.draw_matrix(image);
    ax.set_xlim(-0.5, handle.ncols() as f64 - 0.5);
    ax.set_ylim(-0.5, handle.nrows() as f64 - 0.5);

    Ok(handle)
}

/// Create a figure, draw the velocity image, and attach a color bar
///
/// Returns the figure together with the color bar handle; presenting the
/// figure stays with the caller.
pub fn show_velocity_image<D: TraveltimeData + ?Sized>(
    data: &D,
    opts: &VelocityImageOptions,
    config: &PlotConfig,
) -> Result<(Figure, Colorbar)> {
    let mut figure = Figure::new(config.clone());
    let image = draw_velocity_image(&mut figure.axes, data, opts)?;

    let colorbar = Colorbar {
        label: image.label.clone(),
        vmin: image.vmin,
        vmax: image.vmax,
        palette: config.sequential_palette.clone(),
    };
    figure.axes.set_colorbar(colorbar.clone());

    Ok((figure, colorbar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::container::SurveyData;

    fn survey() -> SurveyData {
        // Four sensors at 10 m spacing, shots at both ends
        SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)])
            .shots(vec![0.0, 0.0, 3.0, 3.0])
            .receivers(vec![1.0, 2.0, 1.0, 2.0])
            .traveltimes(vec![0.01, 0.02, 0.02, 0.01])
            .build()
            .unwrap()
    }

    #[test]
    fn test_velocity_is_offset_over_traveltime() {
        let mut ax = Axes::default();
        let image = draw_velocity_image(&mut ax, &survey(), &VelocityImageOptions::default())
            .unwrap();

        // Offsets: 10, 20, 20, 10 m; traveltimes: .01, .02, .02, .01 s
        // Every record lands at offset/t = 1000 m/s
        assert_eq!(image.vmin, 1000.0);
        assert_eq!(image.vmax, 1000.0);

        // Matrix is keyed by (receiver x, shot x)
        assert_eq!(image.x_coords, vec![10.0, 20.0]);
        assert_eq!(image.y_coords, vec![0.0, 30.0]);
        assert_eq!(image.get(0, 0), Some(1000.0));
    }

    #[test]
    fn test_near_zero_traveltime_rejected() {
        let data = SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (10.0, 0.0)])
            .shots(vec![0.0, 0.0])
            .receivers(vec![1.0, 1.0])
            .traveltimes(vec![0.01, 1e-12])
            .build()
            .unwrap();

        let mut ax = Axes::default();
        let err = draw_velocity_image(&mut ax, &data, &VelocityImageOptions::default());
        assert!(matches!(
            err,
            Err(PlotError::NearZeroTraveltime { count: 1, .. })
        ));
        // Nothing was drawn
        assert!(ax.elements().is_empty());
    }

    #[test]
    fn test_explicit_values_override() {
        let mut ax = Axes::default();
        let vals = vec![0.02, 0.04, 0.04, 0.02];
        let image = draw_velocity_image(
            &mut ax,
            &survey(),
            &VelocityImageOptions {
                values: ValueSource::Values(&vals),
                ..VelocityImageOptions::default()
            },
        )
        .unwrap();
        assert_eq!(image.vmax, 500.0);
    }

    #[test]
    fn test_named_column_values() {
        let data = SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (10.0, 0.0)])
            .shots(vec![0.0])
            .receivers(vec![1.0])
            .traveltimes(vec![0.01])
            .column("t_picked", vec![0.02])
            .build()
            .unwrap();

        let mut ax = Axes::default();
        let image = draw_velocity_image(
            &mut ax,
            &data,
            &VelocityImageOptions {
                values: ValueSource::Column("t_picked"),
                ..VelocityImageOptions::default()
            },
        )
        .unwrap();
        assert_eq!(image.vmax, 500.0);
    }

    #[test]
    fn test_pseudosection_keys_midpoint_offset() {
        let mut ax = Axes::default();
        let image = draw_velocity_image(
            &mut ax,
            &survey(),
            &VelocityImageOptions {
                pseudosection: true,
                ..VelocityImageOptions::default()
            },
        )
        .unwrap();

        // Midpoints: 5, 10, 25, 20; offsets: 10, 20, 20, 10
        assert_eq!(image.x_coords, vec![5.0, 10.0, 20.0, 25.0]);
        assert_eq!(image.y_coords, vec![10.0, 20.0]);
        // Pseudosection mode never relabels ticks with sensor positions
        assert!(ax.xticks().is_none());
    }

    #[test]
    fn test_position_ticks_sampled_every_fifty_sensors() {
        // 120 sensors at 2 m spacing; every record between neighbors
        let sensors: Vec<(f64, f64)> = (0..120).map(|i| (i as f64 * 2.0, 0.0)).collect();
        let n = 119;
        let data = SurveyData::builder()
            .sensors_xz(&sensors)
            .shots((0..n).map(|i| i as f64).collect())
            .receivers((1..=n).map(|i| i as f64).collect())
            .traveltimes(vec![0.01; n])
            .build()
            .unwrap();

        let mut ax = Axes::default();
        draw_velocity_image(&mut ax, &data, &VelocityImageOptions::default()).unwrap();

        let ticks = ax.xticks().expect("position ticks set");
        assert_eq!(ticks.positions, vec![0.0, 50.0, 100.0]);
        // Labels carry the sensor x coordinate at each sampled index
        assert_eq!(ticks.labels, vec!["0", "100", "200"]);
        assert_eq!(ax.yticks(), ax.xticks());
    }

    #[test]
    fn test_show_wrapper_attaches_colorbar() {
        let config = PlotConfig::default();
        let (figure, colorbar) =
            show_velocity_image(&survey(), &VelocityImageOptions::default(), &config).unwrap();

        assert_eq!(figure.axes.colorbar(), Some(&colorbar));
        assert_eq!(colorbar.vmin, 1000.0);
        assert_eq!(colorbar.vmax, 1000.0);
        assert_eq!(colorbar.palette, config.sequential_palette);

        // The canvas grew by the color bar strip
        let (w, _) = figure.dimensions();
        assert_eq!(w, config.resolve_dimensions(true).0);
    }
}
