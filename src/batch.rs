use anyhow::{Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

use milepost::{load, GeoPoint, ReferenceDataset};

#[derive(Parser, Debug)]
#[command(name = "batch")]
#[command(about = "Match every coordinate in a CSV (latitude,longitude[,id]) to its nearest milepost.", long_about = None)]
struct Cli {
    /// Path to the reference dataset (.csv or .json)
    #[arg(short, long)]
    dataset: String,

    /// Path to the query .csv file
    #[arg(short, long)]
    queries: String,

    /// Output CSV (id, latitude, longitude, label, distance_m). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Order output rows by distance instead of input order
    #[arg(long, default_value_t = false)]
    sort: bool,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    id: Option<String>,
    #[serde(alias = "lat", alias = "Latitud")]
    latitude: f64,
    #[serde(alias = "lng", alias = "lon", alias = "Longitud")]
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct MatchRow {
    id: String,
    latitude: f64,
    longitude: f64,
    label: String,
    distance_m: f64,
}

fn read_queries(path: &str) -> Result<Vec<(String, GeoPoint)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {path}"))?;

    let mut queries = Vec::new();
    for (row, result) in rdr.deserialize::<QueryRow>().enumerate() {
        let record = result.with_context(|| format!("{path}: row {row}"))?;
        let point = GeoPoint::new(record.latitude, record.longitude)
            .with_context(|| format!("{path}: row {row}"))?;
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| row.to_string());
        queries.push((id, point));
    }
    Ok(queries)
}

fn match_all(dataset: &ReferenceDataset, queries: &[(String, GeoPoint)]) -> Result<Vec<MatchRow>> {
    queries
        .iter()
        .map(|(id, point)| -> Result<MatchRow> {
            let found = dataset.nearest(*point)?;
            Ok(MatchRow {
                id: id.clone(),
                latitude: point.latitude(),
                longitude: point.longitude(),
                label: found.point.label,
                distance_m: found.distance_m,
            })
        })
        .collect()
}

fn main() -> Result<()> {
    milepost::init_logging();
    let cli = Cli::parse();

    let dataset =
        load::from_path(&cli.dataset).with_context(|| format!("loading {}", &cli.dataset))?;
    info!(points = dataset.len(), path = %cli.dataset, "loaded reference dataset");

    let queries = read_queries(&cli.queries)?;
    info!(queries = queries.len(), path = %cli.queries, "loaded queries");
    if queries.is_empty() {
        warn!("no queries to match");
    }

    let now = Instant::now();
    let mut rows = match_all(&dataset, &queries)?;
    info!(elapsed_ms = now.elapsed().as_secs_f64() * 1000.0, "matched");

    if cli.sort {
        rows.sort_by_key(|r| OrderedFloat(r.distance_m));
    }

    if let Some(out_path) = cli.out {
        let mut wtr =
            Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        println!("Wrote {} matches to {}", rows.len(), out_path);
    } else {
        println!("Queries: {}", rows.len());
        if let Some(farthest) = rows.iter().max_by_key(|r| OrderedFloat(r.distance_m)) {
            println!(
                "Max distance (m): {:.2} (query {} -> {})",
                farthest.distance_m, farthest.id, farthest.label
            );
        }
    }

    Ok(())
}
