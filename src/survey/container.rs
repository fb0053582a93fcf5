use std::collections::HashMap;

use crate::error::{PlotError, Result};

/// Conventional column name for shot sensor indices
pub const SHOT_COLUMN: &str = "s";

/// Conventional column name for receiver sensor indices
pub const RECEIVER_COLUMN: &str = "g";

/// Conventional column name for measured traveltimes
pub const TRAVELTIME_COLUMN: &str = "t";

/// A sensor position in survey coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SensorPos {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A sensor on a 2D profile: x along the line, z elevation
    pub fn xz(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Euclidean distance to another sensor
    pub fn distance_to(&self, other: &SensorPos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Read access to traveltime survey records
///
/// Each record is a (shot index, receiver index, traveltime) triple stored
/// in named columns; sensor indices address the position list. The container
/// is owned entirely by the caller and only read here.
pub trait TraveltimeData {
    /// Column access by name, `None` if the column does not exist
    fn values(&self, name: &str) -> Option<&[f64]>;

    /// Position of the sensor at `index`, `None` if out of range
    fn sensor_position(&self, index: usize) -> Option<SensorPos>;

    /// Number of sensors in the survey layout
    fn sensor_count(&self) -> usize;

    /// Number of records (length of the shot column)
    fn len(&self) -> usize {
        self.values(SHOT_COLUMN).map_or(0, <[f64]>::len)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column access that fails with `MissingColumn`
    fn column(&self, name: &str) -> Result<&[f64]> {
        self.values(name)
            .ok_or_else(|| PlotError::MissingColumn(name.to_string()))
    }

    fn shot_indices(&self) -> Result<&[f64]> {
        self.column(SHOT_COLUMN)
    }

    fn receiver_indices(&self) -> Result<&[f64]> {
        self.column(RECEIVER_COLUMN)
    }

    fn traveltimes(&self) -> Result<&[f64]> {
        self.column(TRAVELTIME_COLUMN)
    }

    /// X coordinates of all sensors in index order
    fn sensor_x(&self) -> Vec<f64> {
        (0..self.sensor_count())
            .map(|i| self.sensor_position(i).map_or(f64::NAN, |p| p.x))
            .collect()
    }
}

/// Vector-backed survey data container
///
/// Sensors plus named `f64` columns. Built through [`SurveyDataBuilder`],
/// which checks that all columns agree on the record count.
#[derive(Debug, Clone, Default)]
pub struct SurveyData {
    sensors: Vec<SensorPos>,
    columns: HashMap<String, Vec<f64>>,
}

impl SurveyData {
    pub fn builder() -> SurveyDataBuilder {
        SurveyDataBuilder::default()
    }
}

impl TraveltimeData for SurveyData {
    fn values(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    fn sensor_position(&self, index: usize) -> Option<SensorPos> {
        self.sensors.get(index).copied()
    }

    fn sensor_count(&self) -> usize {
        self.sensors.len()
    }
}

/// Builder for [`SurveyData`]
#[derive(Debug, Clone, Default)]
pub struct SurveyDataBuilder {
    sensors: Vec<SensorPos>,
    columns: HashMap<String, Vec<f64>>,
}

impl SurveyDataBuilder {
    pub fn sensors(mut self, sensors: Vec<SensorPos>) -> Self {
        self.sensors = sensors;
        self
    }

    /// Sensors on a 2D profile from (x, z) pairs
    pub fn sensors_xz(mut self, positions: &[(f64, f64)]) -> Self {
        self.sensors = positions.iter().map(|&(x, z)| SensorPos::xz(x, z)).collect();
        self
    }

    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    pub fn shots(self, values: Vec<f64>) -> Self {
        self.column(SHOT_COLUMN, values)
    }

    pub fn receivers(self, values: Vec<f64>) -> Self {
        self.column(RECEIVER_COLUMN, values)
    }

    pub fn traveltimes(self, values: Vec<f64>) -> Self {
        self.column(TRAVELTIME_COLUMN, values)
    }

    /// Build the container, checking that all columns share one record count
    pub fn build(self) -> Result<SurveyData> {
        let expected = self
            .columns
            .values()
            .map(Vec::len)
            .next()
            .unwrap_or(0);

        for (name, values) in &self.columns {
            if values.len() != expected {
                return Err(PlotError::ColumnLength {
                    name: name.clone(),
                    got: values.len(),
                    expected,
                });
            }
        }

        Ok(SurveyData {
            sensors: self.sensors,
            columns: self.columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_survey() -> SurveyData {
        SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (5.0, 0.0), (10.0, -1.0)])
            .shots(vec![0.0, 0.0, 1.0])
            .receivers(vec![1.0, 2.0, 2.0])
            .traveltimes(vec![0.01, 0.02, 0.015])
            .build()
            .unwrap()
    }

    #[test]
    fn test_column_access() {
        let data = small_survey();
        assert_eq!(data.len(), 3);
        assert_eq!(data.sensor_count(), 3);
        assert_eq!(data.traveltimes().unwrap(), &[0.01, 0.02, 0.015]);
        assert_eq!(data.sensor_x(), vec![0.0, 5.0, 10.0]);
        assert_eq!(data.sensor_position(2), Some(SensorPos::xz(10.0, -1.0)));
        assert_eq!(data.sensor_position(3), None);
    }

    #[test]
    fn test_missing_column() {
        let data = small_survey();
        assert!(data.values("err").is_none());
        assert!(matches!(
            data.column("err"),
            Err(PlotError::MissingColumn(name)) if name == "err"
        ));
    }

    #[test]
    fn test_builder_rejects_mismatched_lengths() {
        let err = SurveyData::builder()
            .shots(vec![0.0, 1.0])
            .receivers(vec![1.0])
            .build();
        assert!(matches!(err, Err(PlotError::ColumnLength { .. })));
    }

    #[test]
    fn test_distance() {
        let a = SensorPos::xz(0.0, 0.0);
        let b = SensorPos::xz(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
