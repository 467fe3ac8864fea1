//! Error types.
//!
//! Coordinate and matching errors come from the pure core and are surfaced
//! as-is to the caller. Load errors belong to the dataset readers.

use std::path::PathBuf;

/// A latitude or longitude outside its valid range, or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidCoordinate {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Errors from nearest-point matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// There is no nearest point in an empty dataset.
    #[error("reference dataset is empty")]
    EmptyDataset,
}

/// Errors from building a photo stamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StampError {
    /// `field` holds a `chrono` format string with an unknown or malformed specifier.
    #[error("invalid {field} format {format:?}")]
    InvalidFormat { field: &'static str, format: String },
}

/// Errors from reading a reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record `index` (0-based, in file order) has an invalid coordinate.
    #[error("record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: InvalidCoordinate,
    },

    #[error("record {index}: label is empty")]
    EmptyLabel { index: usize },

    #[error("unsupported dataset format: {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidCoordinate::Latitude(91.5);
        assert_eq!(err.to_string(), "latitude 91.5 is outside [-90, 90]");

        let err = InvalidCoordinate::Longitude(-180.25);
        assert_eq!(err.to_string(), "longitude -180.25 is outside [-180, 180]");

        let err = InvalidCoordinate::Latitude(f64::NAN);
        assert_eq!(err.to_string(), "latitude NaN is outside [-90, 90]");

        let err = MatchError::EmptyDataset;
        assert_eq!(err.to_string(), "reference dataset is empty");

        let err = LoadError::InvalidRecord {
            index: 3,
            source: InvalidCoordinate::Longitude(200.0),
        };
        assert_eq!(
            err.to_string(),
            "record 3: longitude 200 is outside [-180, 180]"
        );

        let err = StampError::InvalidFormat {
            field: "date",
            format: "%Q".to_string(),
        };
        assert_eq!(err.to_string(), "invalid date format \"%Q\"");

        let err = LoadError::EmptyLabel { index: 0 };
        assert_eq!(err.to_string(), "record 0: label is empty");

        let err = LoadError::UnsupportedFormat(PathBuf::from("points.xml"));
        assert_eq!(
            err.to_string(),
            "unsupported dataset format: points.xml (expected .csv or .json)"
        );
    }

    #[test]
    fn invalid_record_exposes_source() {
        use std::error::Error;

        let err = LoadError::InvalidRecord {
            index: 1,
            source: InvalidCoordinate::Latitude(-95.0),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("latitude -95 is outside [-90, 90]"));
    }
}
