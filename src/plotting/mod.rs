//! Rendering entry points
//!
//! Each function reads a caller-owned survey container, derives what it
//! needs, and mutates a caller-owned [`Axes`](crate::surface::Axes). None
//! of them present the figure; rasterization stays with the caller.
//!
//! - `curves.rs`: raw traveltime curves with shot/receiver marker rows
//! - `picks.rs`: first-arrival pick curves, color-cycled per shot
//! - `va.rs`: apparent-velocity matrix and pseudosection images
//! - `lines.rs`: (x, z) line overlays loaded from disk

pub mod curves;
pub mod lines;
pub mod picks;
pub mod va;

pub use curves::{draw_traveltime_curves, TraveltimeCurveOptions};
pub use lines::{draw_line_file, load_line_file};
pub use picks::{draw_first_picks, FirstPickOptions, FirstPickStyle};
pub use va::{
    draw_velocity_image, show_velocity_image, ValueSource, VelocityImageOptions,
    ZERO_TRAVELTIME_THRESHOLD,
};
