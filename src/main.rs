use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;

use milepost::{load, GeoPoint, PhotoStamp, StampConfig, StampLabels};

#[derive(Parser, Debug)]
#[command(name = "milepost")]
#[command(about = "Find the milepost nearest to a coordinate and print the photo stamp for it.", long_about = None)]
struct Cli {
    /// Path to the reference dataset (.csv or .json)
    #[arg(short, long)]
    dataset: String,

    /// Current latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Current longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// Route name printed after the milepost label
    #[arg(short, long)]
    route: Option<String>,

    /// Use the survey's Spanish line prefixes (Fecha, Hora)
    #[arg(long, default_value_t = false)]
    spanish: bool,

    /// Also list every milepost within this many meters
    #[arg(long)]
    radius: Option<f64>,
}

fn main() -> Result<()> {
    milepost::init_logging();
    let cli = Cli::parse();

    let query = GeoPoint::new(cli.lat, cli.lng).context("invalid --lat/--lng")?;

    let dataset =
        load::from_path(&cli.dataset).with_context(|| format!("loading {}", &cli.dataset))?;
    info!(points = dataset.len(), path = %cli.dataset, "loaded reference dataset");

    let found = dataset
        .nearest(query)
        .with_context(|| format!("matching {query} against {}", &cli.dataset))?;

    println!("Nearest: {}", found.point.label);
    println!("Distance (m): {:.2}", found.distance_m);

    let labels = if cli.spanish {
        StampLabels::spanish()
    } else {
        StampLabels::default()
    };
    let config = StampConfig {
        route_name: cli.route,
        labels,
        ..StampConfig::default()
    };
    let stamp = PhotoStamp::new(&Local::now(), &found, &config)?;
    println!();
    println!("{stamp}");
    println!();
    println!("File: {}", stamp.file_name());

    if let Some(radius) = cli.radius {
        let nearby = dataset.within(query, radius);
        println!();
        println!("Within {radius} m: {}", nearby.len());
        for m in &nearby {
            println!("  {:<12} {:>10.2}", m.point.label, m.distance_m);
        }
    }

    Ok(())
}
