//! Shot-receiver geometry derived from sensor positions
//!
//! Offsets and midpoints are computed fresh on every call from the positions
//! the container hands out; nothing is cached.

use tracing::warn;

use crate::error::Result;
use crate::survey::container::TraveltimeData;
use crate::survey::index::{base_or_detect, IndexBase};

/// Shot and receiver x coordinates for every record
///
/// Returns `(receiver_x, shot_x)`, each one value per record, after index
/// base correction.
pub fn shot_receiver_x<D: TraveltimeData + ?Sized>(
    data: &D,
    base: Option<IndexBase>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let shots = data.shot_indices()?;
    let receivers = data.receiver_indices()?;
    let base = base_or_detect(base, shots, receivers);

    let px = data.sensor_x();
    let sensor_count = data.sensor_count();

    let gx = base
        .resolve(receivers, sensor_count)?
        .into_iter()
        .map(|i| px[i])
        .collect();
    let sx = base
        .resolve(shots, sensor_count)?
        .into_iter()
        .map(|i| px[i])
        .collect();

    Ok((gx, sx))
}

/// Euclidean shot-receiver distance for every record
///
/// With `full`, returns one offset per record in record order. Without,
/// returns the distinct offset values sorted ascending (the set of offsets
/// occurring in the survey layout).
pub fn shot_receiver_distances<D: TraveltimeData + ?Sized>(
    data: &D,
    full: bool,
    base: Option<IndexBase>,
) -> Result<Vec<f64>> {
    let shots = data.shot_indices()?;
    let receivers = data.receiver_indices()?;
    let base = base_or_detect(base, shots, receivers);
    let sensor_count = data.sensor_count();

    let mut offsets = Vec::with_capacity(data.len());
    for (&s, &g) in shots.iter().zip(receivers) {
        let si = base.resolve_one(s, sensor_count)?;
        let gi = base.resolve_one(g, sensor_count)?;
        // resolve_one guarantees both positions exist
        let sp = data.sensor_position(si).unwrap_or_default();
        let gp = data.sensor_position(gi).unwrap_or_default();
        offsets.push(sp.distance_to(&gp));
    }

    if !full {
        offsets.sort_by(f64::total_cmp);
        offsets.dedup();
    }

    Ok(offsets)
}

/// Shot-receiver midpoint x coordinate for every record
///
/// The horizontal position a pseudosection plots each measurement at.
pub fn midpoints<D: TraveltimeData + ?Sized>(
    data: &D,
    base: Option<IndexBase>,
) -> Result<Vec<f64>> {
    let (gx, sx) = shot_receiver_x(data, base)?;
    Ok(gx
        .iter()
        .zip(&sx)
        .map(|(&g, &s)| (g + s) / 2.0)
        .collect())
}

/// Former name of [`shot_receiver_distances`]
#[deprecated(note = "use shot_receiver_distances")]
pub fn get_offset<D: TraveltimeData + ?Sized>(data: &D, full: bool) -> Result<Vec<f64>> {
    warn!("get_offset is deprecated, use shot_receiver_distances");
    shot_receiver_distances(data, full, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::container::SurveyData;

    /// Four sensors at 10 m spacing, two shots at the line ends
    fn line_survey() -> SurveyData {
        SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)])
            .shots(vec![0.0, 0.0, 3.0, 3.0])
            .receivers(vec![1.0, 2.0, 1.0, 2.0])
            .traveltimes(vec![0.01, 0.02, 0.02, 0.01])
            .build()
            .unwrap()
    }

    #[test]
    fn test_full_distances_in_record_order() {
        let data = line_survey();
        let offsets = shot_receiver_distances(&data, true, None).unwrap();
        assert_eq!(offsets, vec![10.0, 20.0, 20.0, 10.0]);
    }

    #[test]
    fn test_unique_distances_sorted() {
        let data = line_survey();
        let offsets = shot_receiver_distances(&data, false, None).unwrap();
        assert_eq!(offsets, vec![10.0, 20.0]);
    }

    #[test]
    fn test_distance_uses_elevation() {
        let data = SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (3.0, 4.0)])
            .shots(vec![0.0])
            .receivers(vec![1.0])
            .traveltimes(vec![0.01])
            .build()
            .unwrap();
        let offsets = shot_receiver_distances(&data, true, None).unwrap();
        assert_eq!(offsets, vec![5.0]);
    }

    #[test]
    fn test_midpoints() {
        let data = line_survey();
        let mids = midpoints(&data, None).unwrap();
        assert_eq!(mids, vec![5.0, 10.0, 25.0, 20.0]);
    }

    #[test]
    fn test_shot_receiver_x_one_based() {
        let data = SurveyData::builder()
            .sensors_xz(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)])
            .shots(vec![1.0, 1.0])
            .receivers(vec![2.0, 3.0])
            .traveltimes(vec![0.01, 0.02])
            .build()
            .unwrap();
        let (gx, sx) = shot_receiver_x(&data, None).unwrap();
        assert_eq!(gx, vec![10.0, 20.0]);
        assert_eq!(sx, vec![0.0, 0.0]);
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias_forwards() {
        let data = line_survey();
        assert_eq!(
            get_offset(&data, true).unwrap(),
            shot_receiver_distances(&data, true, None).unwrap()
        );
    }
}
