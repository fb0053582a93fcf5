//! Development entry point
//!
//! Builds a synthetic two-layer refraction survey and renders every plot
//! kind to PNG files in a local output directory.
//!
//! Usage:
//! ```bash
//! cargo run --bin dev [output_dir]
//! ```

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use traveltime_viz::plotting::{
    draw_first_picks, draw_line_file, draw_traveltime_curves, show_velocity_image,
    FirstPickOptions, TraveltimeCurveOptions, VelocityImageOptions,
};
use traveltime_viz::surface::Figure;
use traveltime_viz::survey::{SurveyData, TraveltimeData};
use traveltime_viz::PlotConfig;

fn log_phase(start: Instant, phase: &str) {
    eprintln!("[PHASE @{:.3}s] {}", start.elapsed().as_secs_f64(), phase);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let start = Instant::now();
    println!("=== Traveltime Viz - Development Mode ===\n");

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "dev_plots".to_string());
    let out = Path::new(&out_dir);
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    log_phase(start, "PHASE 1: Building synthetic survey");
    let data = synthetic_survey();
    println!(
        "Survey: {} sensors, {} records",
        data.sensor_count(),
        data.len()
    );

    let config = PlotConfig::default();

    log_phase(start, "PHASE 2: Traveltime curves");
    let mut figure = Figure::new(config.clone());
    draw_traveltime_curves(&mut figure.axes, &data, &TraveltimeCurveOptions::default())?;
    save(&figure, out, "curves.png")?;

    log_phase(start, "PHASE 3: First picks");
    let mut figure = Figure::new(config.clone());
    draw_first_picks(&mut figure.axes, &data, &FirstPickOptions::default())?;
    save(&figure, out, "picks.png")?;

    let mut figure = Figure::new(config.clone());
    draw_first_picks(
        &mut figure.axes,
        &data,
        &FirstPickOptions {
            apparent_velocity: true,
            ..FirstPickOptions::default()
        },
    )?;
    save(&figure, out, "picks_va.png")?;

    log_phase(start, "PHASE 4: Apparent-velocity images");
    let (figure, _) = show_velocity_image(&data, &VelocityImageOptions::default(), &config)?;
    save(&figure, out, "va_matrix.png")?;

    let (figure, _) = show_velocity_image(
        &data,
        &VelocityImageOptions {
            pseudosection: true,
            ..VelocityImageOptions::default()
        },
        &config,
    )?;
    save(&figure, out, "va_pseudosection.png")?;

    log_phase(start, "PHASE 5: Line overlay");
    let line_path = out.join("interface.xz");
    let mut line_file = std::fs::File::create(&line_path)?;
    for i in 0..=20 {
        let x = i as f64 * 10.0;
        writeln!(line_file, "{x} {}", -12.0 - 3.0 * (x / 60.0).sin())?;
    }
    let mut figure = Figure::new(config);
    draw_traveltime_curves(&mut figure.axes, &data, &TraveltimeCurveOptions::default())?;
    draw_line_file(&mut figure.axes, &line_path, 1)?;
    save(&figure, out, "curves_overlay.png")?;

    println!("\n✓ All plots written to {}", out.display());
    Ok(())
}

fn save(figure: &Figure, out: &Path, name: &str) -> anyhow::Result<()> {
    let path = out.join(name);
    figure
        .save_png(&path)
        .with_context(|| format!("rendering {}", path.display()))?;
    let (w, h) = figure.dimensions();
    println!("  {} ({}x{})", path.display(), w, h);
    Ok(())
}

/// Two-layer refraction model over a 200 m spread
///
/// 41 sensors at 5 m spacing; every 8th sensor fires a shot recorded by all
/// others. Direct wave at 800 m/s, refracted arrival at 2400 m/s taking over
/// past the crossover offset.
fn synthetic_survey() -> SurveyData {
    const V1: f64 = 800.0;
    const V2: f64 = 2400.0;
    const INTERCEPT: f64 = 0.02;

    let sensors: Vec<(f64, f64)> = (0..41).map(|i| (i as f64 * 5.0, 0.0)).collect();

    let mut shots = Vec::new();
    let mut receivers = Vec::new();
    let mut times = Vec::new();

    for shot in (0..41).step_by(8) {
        for receiver in 0..41 {
            if receiver == shot {
                continue;
            }
            let offset = ((receiver as f64) - (shot as f64)).abs() * 5.0;
            let direct = offset / V1;
            let refracted = INTERCEPT + offset / V2;
            shots.push(shot as f64);
            receivers.push(receiver as f64);
            times.push(direct.min(refracted) * 1000.0); // ms
        }
    }

    SurveyData::builder()
        .sensors_xz(&sensors)
        .shots(shots)
        .receivers(receivers)
        .traveltimes(times)
        .build()
        .expect("synthetic columns share one length")
}
