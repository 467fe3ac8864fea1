//! Reference mileposts and the dataset they are matched against.

use serde::Serialize;

use crate::error::MatchError;
use crate::geo::GeoPoint;
use crate::nearest::{self, MatchResult};

/// A milepost (abscissa) on a route: a display label and where it is.
///
/// The label is opaque and plays no part in matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePoint {
    pub label: String,
    pub location: GeoPoint,
}

impl ReferencePoint {
    pub fn new(label: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }
}

/// An ordered, read-only collection of reference points.
///
/// Order matters only for breaking exact distance ties: the earlier
/// point wins. The dataset is never mutated after construction, so a
/// shared `&ReferenceDataset` can be queried from many threads at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    points: Vec<ReferencePoint>,
}

impl ReferenceDataset {
    pub fn new(points: Vec<ReferencePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ReferencePoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferencePoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// See [`nearest::find_nearest`].
    pub fn nearest(&self, query: GeoPoint) -> Result<MatchResult, MatchError> {
        nearest::find_nearest(query, self)
    }

    /// See [`nearest::find_within`].
    pub fn within(&self, query: GeoPoint, radius_m: f64) -> Vec<MatchResult> {
        nearest::find_within(query, self, radius_m)
    }
}

impl FromIterator<ReferencePoint> for ReferenceDataset {
    fn from_iter<I: IntoIterator<Item = ReferencePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReferenceDataset {
    type Item = &'a ReferencePoint;
    type IntoIter = std::slice::Iter<'a, ReferencePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, lat: f64, lng: f64) -> ReferencePoint {
        ReferencePoint::new(label, GeoPoint::new(lat, lng).unwrap())
    }

    #[test]
    fn empty_dataset() {
        let ds = ReferenceDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert!(ds.get(0).is_none());
    }

    #[test]
    fn keeps_insertion_order() {
        let ds: ReferenceDataset = [
            point("PR30", 4.70, -74.12),
            point("PR10", 4.60, -74.08),
            point("PR20", 4.65, -74.10),
        ]
        .into_iter()
        .collect();

        let labels: Vec<&str> = ds.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["PR30", "PR10", "PR20"]);
        assert_eq!(ds.get(1).map(|p| p.label.as_str()), Some("PR10"));
        assert_eq!(ds.as_slice().len(), 3);
    }

    #[test]
    fn borrowed_into_iter() {
        let ds = ReferenceDataset::new(vec![point("K0+000", 0.0, 0.0)]);
        let mut count = 0;
        for p in &ds {
            assert_eq!(p.label, "K0+000");
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn dataset_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReferenceDataset>();
        assert_send_sync::<ReferencePoint>();
    }

    #[test]
    fn serializes_label_and_location() {
        let json = serde_json::to_value(point("PR10", 4.6, -74.08)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "PR10",
                "location": { "latitude": 4.6, "longitude": -74.08 }
            })
        );
    }
}
