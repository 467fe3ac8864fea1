//! Geographic points and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCoordinate;

/// Earth mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
///
/// Latitude is in `[-90, 90]` and longitude in `[-180, 180]`; both are
/// finite. This is checked at construction, so any `GeoPoint` is a valid
/// input to [`distance`].
///
/// # Examples
///
/// ```
/// use milepost::geo::GeoPoint;
///
/// let bogota = GeoPoint::new(4.60, -74.08).unwrap();
/// assert_eq!(bogota.latitude(), 4.60);
///
/// assert!(GeoPoint::new(90.5, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(*self, *other)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Great-circle distance using the haversine formula. Output in meters.
///
/// Symmetric bit-for-bit: the operands are put in a canonical order before
/// evaluating, so `distance(a, b) == distance(b, a)` exactly.
///
/// ```
/// use milepost::geo::{distance, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 90.0).unwrap();
/// let quarter = distance(a, b);
/// assert!((quarter - 10_007_543.4).abs() < 1.0);
/// ```
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let (p, q) = if (a.latitude, a.longitude) <= (b.latitude, b.longitude) {
        (a, b)
    } else {
        (b, a)
    };
    let (lat1, lon1, lat2, lon2) = (
        p.latitude.to_radians(),
        p.longitude.to_radians(),
        q.latitude.to_radians(),
        q.longitude.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}
