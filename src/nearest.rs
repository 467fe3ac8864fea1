//! Nearest-milepost matching.
//!
//! Both searches are a single linear pass over the dataset. That is fine for
//! a route's worth of mileposts (tens to a few thousand points); a spatial
//! index could sit behind the same signatures if datasets grow.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::error::MatchError;
use crate::geo::{distance, GeoPoint};
use crate::reference::{ReferenceDataset, ReferencePoint};

/// A matched reference point and how far it is from the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub point: ReferencePoint,
    /// Great-circle distance from the query, in meters. Never negative.
    pub distance_m: f64,
}

/// Returns the reference point closest to `query`.
///
/// Among points at exactly the same distance, the first one in dataset
/// order wins.
///
/// ```
/// use milepost::geo::GeoPoint;
/// use milepost::nearest::find_nearest;
/// use milepost::reference::{ReferenceDataset, ReferencePoint};
///
/// let dataset = ReferenceDataset::new(vec![
///     ReferencePoint::new("PR10", GeoPoint::new(4.60, -74.08).unwrap()),
///     ReferencePoint::new("PR20", GeoPoint::new(4.65, -74.10).unwrap()),
/// ]);
/// let query = GeoPoint::new(4.601, -74.081).unwrap();
///
/// let found = find_nearest(query, &dataset).unwrap();
/// assert_eq!(found.point.label, "PR10");
/// ```
pub fn find_nearest(
    query: GeoPoint,
    dataset: &ReferenceDataset,
) -> Result<MatchResult, MatchError> {
    let mut best_distance = f64::INFINITY;
    let mut best: Option<&ReferencePoint> = None;

    for point in dataset {
        let d = distance(query, point.location);
        // strict: the earlier point keeps a tie
        if d < best_distance {
            best_distance = d;
            best = Some(point);
        }
    }

    best.map(|point| MatchResult {
        point: point.clone(),
        distance_m: best_distance,
    })
    .ok_or(MatchError::EmptyDataset)
}

/// Returns every reference point within `radius_m` meters of `query`,
/// closest first.
///
/// Equal distances keep dataset order. An empty dataset, or a negative or
/// NaN radius, gives an empty result.
pub fn find_within(
    query: GeoPoint,
    dataset: &ReferenceDataset,
    radius_m: f64,
) -> Vec<MatchResult> {
    let mut found: Vec<MatchResult> = dataset
        .iter()
        .filter_map(|point| {
            let d = distance(query, point.location);
            (d <= radius_m).then(|| MatchResult {
                point: point.clone(),
                distance_m: d,
            })
        })
        .collect();

    found.sort_by_key(|m| OrderedFloat(m.distance_m));
    found
}
