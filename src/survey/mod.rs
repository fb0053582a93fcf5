//! Survey data access
//!
//! The traveltime renderers read from a caller-owned data container holding
//! shot/receiver sensor indices, measured traveltimes, and the sensor
//! positions those indices refer to. This module defines that contract and
//! the bookkeeping around it:
//!
//! - `container.rs`: the `TraveltimeData` trait and a vector-backed impl
//! - `index.rs`: 0- vs 1-based sensor index convention handling
//! - `geometry.rs`: shot-receiver offsets and midpoints

pub mod container;
pub mod geometry;
pub mod index;

pub use container::{
    SensorPos, SurveyData, SurveyDataBuilder, TraveltimeData, RECEIVER_COLUMN, SHOT_COLUMN,
    TRAVELTIME_COLUMN,
};
pub use geometry::{midpoints, shot_receiver_distances, shot_receiver_x};
pub use index::IndexBase;
