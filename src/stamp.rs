//! Text stamped onto a captured photo.
//!
//! A stamp records when the photo was taken and which milepost it was
//! matched to. Drawing the text onto the image is left to the caller; this
//! module only decides what the text says and what the file is called.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

use crate::error::StampError;
use crate::geo::GeoPoint;
use crate::nearest::MatchResult;

/// Prefixes for the four overlay lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampLabels {
    pub date: String,
    pub time: String,
    pub coords: String,
    pub milepost: String,
}

impl StampLabels {
    /// The prefixes used on the route survey photos.
    pub fn spanish() -> Self {
        Self {
            date: "Fecha".to_string(),
            time: "Hora".to_string(),
            coords: "Coords".to_string(),
            milepost: "PR".to_string(),
        }
    }
}

impl Default for StampLabels {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            time: "Time".to_string(),
            coords: "Coords".to_string(),
            milepost: "PR".to_string(),
        }
    }
}

/// Formatting options for [`PhotoStamp`].
#[derive(Debug, Clone)]
pub struct StampConfig {
    /// Route name printed after the milepost label, e.g. `MAGDALENA 2`.
    pub route_name: Option<String>,

    /// `chrono` format string for the date line.
    pub date_format: String,

    /// `chrono` format string for the time line.
    pub time_format: String,

    /// Decimal places for the coordinates line.
    pub coordinate_precision: usize,

    /// Line prefixes.
    pub labels: StampLabels,
}

impl StampConfig {
    /// Default formatting with a route name.
    pub fn for_route(route_name: impl Into<String>) -> Self {
        Self {
            route_name: Some(route_name.into()),
            ..Self::default()
        }
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            route_name: None,
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
            coordinate_precision: 6,
            labels: StampLabels::default(),
        }
    }
}

/// Render `taken_at` with `format`, rejecting unknown specifiers up front.
fn render<Tz>(
    taken_at: &DateTime<Tz>,
    field: &'static str,
    format: &str,
) -> Result<String, StampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let invalid = || StampError::InvalidFormat {
        field,
        format: format.to_string(),
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", taken_at.format_with_items(items.iter())).map_err(|_| invalid())?;
    Ok(out)
}

/// The overlay for one photo.
///
/// Coordinates are those of the matched milepost, not the raw device
/// reading, so every photo at the same milepost carries the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoStamp {
    date: String,
    time: String,
    location: GeoPoint,
    label: String,
    route_name: Option<String>,
    precision: usize,
    labels: StampLabels,
    taken_at_ms: i64,
}

impl PhotoStamp {
    /// Fails with [`StampError::InvalidFormat`] when either format string
    /// holds a specifier `chrono` does not know.
    pub fn new<Tz>(
        taken_at: &DateTime<Tz>,
        matched: &MatchResult,
        config: &StampConfig,
    ) -> Result<Self, StampError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Ok(Self {
            date: render(taken_at, "date", &config.date_format)?,
            time: render(taken_at, "time", &config.time_format)?,
            location: matched.point.location,
            label: matched.point.label.clone(),
            route_name: config.route_name.clone(),
            precision: config.coordinate_precision,
            labels: config.labels.clone(),
            taken_at_ms: taken_at.timestamp_millis(),
        })
    }

    /// Overlay lines, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let p = self.precision;
        let labels = &self.labels;
        let milepost = match &self.route_name {
            Some(route) => format!("{}: {}     {}", labels.milepost, self.label, route),
            None => format!("{}: {}", labels.milepost, self.label),
        };
        vec![
            format!("{}: {}", labels.date, self.date),
            format!("{}: {}", labels.time, self.time),
            format!(
                "{}: {:.p$}, {:.p$}",
                labels.coords,
                self.location.latitude(),
                self.location.longitude()
            ),
            milepost,
        ]
    }

    /// Output file name: capture time in epoch milliseconds.
    pub fn file_name(&self) -> String {
        format!("{}.jpeg", self.taken_at_ms)
    }
}

impl fmt::Display for PhotoStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
