use crate::error::{PlotError, Result};

/// Sensor index convention of a dataset
///
/// Survey files number their sensors either from 0 or from 1. The renderers
/// accept the convention explicitly, or detect it per call with
/// [`IndexBase::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

impl IndexBase {
    /// Infer the index base from the observed shot and receiver indices
    ///
    /// The dataset is taken as 1-based when the minimum index across both
    /// columns equals 1, 0-based otherwise.
    ///
    /// Known limitation: this is a heuristic, not a guarantee. A 1-based
    /// dataset that never references sensor 1 is misdetected as 0-based.
    /// Callers that know their convention should pass it explicitly instead.
    pub fn detect(shots: &[f64], receivers: &[f64]) -> Self {
        let min = shots
            .iter()
            .chain(receivers)
            .fold(f64::INFINITY, |acc, &v| acc.min(v));

        if min == 1.0 {
            IndexBase::One
        } else {
            IndexBase::Zero
        }
    }

    /// Offset subtracted from raw indices before position lookup
    pub fn offset(self) -> i64 {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Correct a single raw index and check it addresses a sensor
    ///
    /// Fractional values are truncated toward zero before correction.
    pub fn resolve_one(self, raw: f64, sensor_count: usize) -> Result<usize> {
        let index = raw as i64 - self.offset();
        if index < 0 || index as usize >= sensor_count {
            return Err(PlotError::SensorIndexOutOfRange {
                index,
                sensor_count,
                base_offset: self.offset(),
            });
        }
        Ok(index as usize)
    }

    /// Correct a whole index column, enforcing `[0, sensor_count)` throughout
    pub fn resolve(self, raw: &[f64], sensor_count: usize) -> Result<Vec<usize>> {
        raw.iter()
            .map(|&v| self.resolve_one(v, sensor_count))
            .collect()
    }
}

/// The explicit base when given, the detected one otherwise
pub fn base_or_detect(explicit: Option<IndexBase>, shots: &[f64], receivers: &[f64]) -> IndexBase {
    explicit.unwrap_or_else(|| IndexBase::detect(shots, receivers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_one_based() {
        // Minimum observed index 1 means every lookup shifts down by one
        let base = IndexBase::detect(&[1.0, 3.0], &[2.0, 4.0]);
        assert_eq!(base, IndexBase::One);
        assert_eq!(base.resolve(&[1.0, 4.0], 4).unwrap(), vec![0, 3]);
    }

    #[test]
    fn test_detect_zero_based() {
        // Minimum observed index 0 leaves indices untouched
        let base = IndexBase::detect(&[0.0, 3.0], &[2.0, 1.0]);
        assert_eq!(base, IndexBase::Zero);
        assert_eq!(base.resolve(&[0.0, 3.0], 4).unwrap(), vec![0, 3]);
    }

    #[test]
    fn test_detect_spans_both_columns() {
        // The 1 may appear only in the receiver column
        assert_eq!(IndexBase::detect(&[2.0, 3.0], &[1.0, 4.0]), IndexBase::One);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let base = IndexBase::One;
        assert!(matches!(
            base.resolve_one(0.0, 4),
            Err(PlotError::SensorIndexOutOfRange { index: -1, .. })
        ));
        assert!(matches!(
            base.resolve_one(5.0, 4),
            Err(PlotError::SensorIndexOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_explicit_base_wins() {
        // A 1-based dataset that omits sensor 1 is misdetected; an explicit
        // base bypasses the heuristic
        let shots = [2.0, 3.0];
        let receivers = [4.0, 5.0];
        assert_eq!(IndexBase::detect(&shots, &receivers), IndexBase::Zero);
        assert_eq!(
            base_or_detect(Some(IndexBase::One), &shots, &receivers),
            IndexBase::One
        );
    }
}
