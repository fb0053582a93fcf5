//! The mutable plot surface
//!
//! Renderers mutate an [`Axes`]: they append retained drawing elements and
//! adjust axis state (limits, labels, ticks, grid, inversion). Nothing is
//! rasterized until the caller presents the owning [`Figure`], which hands
//! the retained scene to the plotters bitmap backend. Keeping mutation and
//! presentation separate is deliberate; a draw call never forces a display.
//!
//! - `elements.rs`: line/marker/matrix primitives and their styles
//! - `axes.rs`: the `Axes` surface, `Figure`, and `Colorbar`
//! - `matrix.rs`: scattered (x, y, value) triples to a dense cell grid
//! - `render.rs`: plotters-backed PNG presentation

pub mod axes;
pub mod elements;
pub mod matrix;
pub mod render;

pub use axes::{Axes, Colorbar, Figure, Ticks};
pub use elements::{Element, LineKind, LineStyle, MarkerShape, MarkerStyle};
pub use matrix::{vec_to_matrix, MatrixImage};
