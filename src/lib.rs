//! Diagnostic plotting for seismic traveltime surveys
//!
//! Renders shot-receiver traveltime data as traveltime curves, first-arrival
//! pick plots, and apparent-velocity matrix/pseudosection images, plus plain
//! (x, z) line overlays loaded from disk. The crate reads a caller-owned
//! survey container, mutates a caller-owned plot surface, and leaves
//! presentation (rasterizing to PNG) as a separate, explicit call.
//!
//! Module organization:
//! - `survey`: data-container contract, index conventions, offsets
//! - `surface`: the mutable `Axes`/`Figure` surface and its renderer
//! - `plotting`: the rendering entry points
//! - `palettes`: embedded color palette registry
//! - `config`: figure geometry and styling defaults

pub mod config;
pub mod error;
pub mod palettes;
pub mod plotting;
pub mod surface;
pub mod survey;

pub use config::{FigureDimension, PlotConfig};
pub use error::{PlotError, Result};
pub use plotting::{
    draw_first_picks, draw_line_file, draw_traveltime_curves, draw_velocity_image,
    show_velocity_image, FirstPickOptions, FirstPickStyle, TraveltimeCurveOptions, ValueSource,
    VelocityImageOptions,
};
pub use surface::{Axes, Colorbar, Element, Figure, LineKind, LineStyle, MarkerShape, MarkerStyle};
pub use survey::{IndexBase, SensorPos, SurveyData, TraveltimeData};
