//! Nearest-milepost matching for geotagged photos.
//!
//! Given where the device is, find the closest milepost in a route's
//! reference dataset and build the text stamped onto the photo.
//!
//! ```
//! use milepost::{find_nearest, GeoPoint, ReferenceDataset, ReferencePoint};
//!
//! let route = ReferenceDataset::new(vec![
//!     ReferencePoint::new("PR10", GeoPoint::new(4.60, -74.08)?),
//!     ReferencePoint::new("PR20", GeoPoint::new(4.65, -74.10)?),
//! ]);
//! let here = GeoPoint::new(4.601, -74.081)?;
//!
//! let found = find_nearest(here, &route)?;
//! assert_eq!(found.point.label, "PR10");
//! assert!(found.distance_m < 200.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod geo;
pub mod load;
pub mod nearest;
pub mod reference;
pub mod stamp;

pub use error::{InvalidCoordinate, LoadError, MatchError, StampError};
pub use geo::{distance, GeoPoint, EARTH_RADIUS_M};
pub use nearest::{find_nearest, find_within, MatchResult};
pub use reference::{ReferenceDataset, ReferencePoint};
pub use stamp::{PhotoStamp, StampConfig, StampLabels};

/// Install the `tracing` subscriber used by the binaries.
///
/// Honours `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
