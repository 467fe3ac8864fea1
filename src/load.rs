//! Reading reference datasets from CSV and JSON.
//!
//! Records carry a label, a latitude and a longitude. Field names follow
//! either the English form (`label`, `latitude`, `longitude`) or the one
//! used by the route survey exports (`Abcisa`, `Latitud`, `Longitud`).
//! Every record is validated; the first bad one fails the whole load.
//!
//! Labels are text. CSV keeps the cell exactly as written. A JSON label
//! given as a number is re-rendered from its parsed value, so `10.50`
//! becomes `"10.5"` and `1e3` becomes `"1000"`; quote the label in the
//! export when its written form matters.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use tracing::debug;

use crate::error::LoadError;
use crate::geo::GeoPoint;
use crate::reference::{ReferenceDataset, ReferencePoint};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Abcisa", alias = "abscissa")]
    label: String,
    #[serde(alias = "Latitud", alias = "lat")]
    latitude: f64,
    #[serde(alias = "Longitud", alias = "lng", alias = "lon")]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(alias = "Abcisa", alias = "abscissa", deserialize_with = "label_text")]
    label: String,
    #[serde(alias = "Latitud", alias = "lat")]
    latitude: f64,
    #[serde(alias = "Longitud", alias = "lng", alias = "lon")]
    longitude: f64,
}

/// JSON exports store abscissas as either strings or numbers.
fn label_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LabelVisitor;

    impl Visitor<'_> for LabelVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or number label")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(LabelVisitor)
}

fn to_point(
    index: usize,
    label: String,
    latitude: f64,
    longitude: f64,
) -> Result<ReferencePoint, LoadError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(LoadError::EmptyLabel { index });
    }
    let location = GeoPoint::new(latitude, longitude)
        .map_err(|source| LoadError::InvalidRecord { index, source })?;
    Ok(ReferencePoint::new(label, location))
}

/// Read a headered CSV dataset. Columns beyond the three known ones are ignored.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<ReferenceDataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (index, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let record = result?;
        points.push(to_point(index, record.label, record.latitude, record.longitude)?);
    }

    debug!(records = points.len(), "loaded CSV reference dataset");
    Ok(ReferenceDataset::new(points))
}

/// Read a JSON array of records.
pub fn from_json_reader<R: Read>(reader: R) -> Result<ReferenceDataset, LoadError> {
    let records: Vec<JsonRecord> = serde_json::from_reader(reader)?;

    let points = records
        .into_iter()
        .enumerate()
        .map(|(index, r)| to_point(index, r.label, r.latitude, r.longitude))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = points.len(), "loaded JSON reference dataset");
    Ok(ReferenceDataset::new(points))
}

/// Read a dataset file, choosing the format from its extension.
pub fn from_path(path: impl AsRef<Path>) -> Result<ReferenceDataset, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let open = || {
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
    };

    match extension.as_deref() {
        Some("csv") => from_csv_reader(open()?),
        Some("json") => from_json_reader(open()?),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}
