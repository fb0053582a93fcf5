use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling or rendering survey plots
#[derive(Debug, Error)]
pub enum PlotError {
    /// Data container lacks a requested column
    #[error("missing data column '{0}'")]
    MissingColumn(String),

    /// Column length disagrees with the record count
    #[error("column '{name}' has {got} values, expected {expected}")]
    ColumnLength {
        name: String,
        got: usize,
        expected: usize,
    },

    /// Sensor index outside [0, sensor_count) after base correction
    #[error(
        "sensor index {index} out of range for {sensor_count} sensors \
         (after subtracting index base {base_offset})"
    )]
    SensorIndexOutOfRange {
        index: i64,
        sensor_count: usize,
        base_offset: i64,
    },

    /// Traveltimes too close to zero for apparent-velocity division
    #[error("{count} traveltime value(s) below {threshold:e} (min {min:e})")]
    NearZeroTraveltime {
        count: usize,
        min: f64,
        threshold: f64,
    },

    /// Renderer invoked over an empty container
    #[error("no records or sensors to draw")]
    EmptyData,

    /// Line-overlay file could not be parsed
    #[error("line file {}: {reason} (line {line})", .path.display())]
    LineFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// I/O failure reading an input file
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rasterization backend failure during presentation
    #[error("render backend error: {0}")]
    Render(String),
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
