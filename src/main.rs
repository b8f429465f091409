//! Verdok CLI: one verification run per invocation.
//!
//! Reads a coordinate table, loads the reference layers, evaluates the
//! geometry, prints the report, and writes the shapefile bundle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use verdok::config::Sources;
use verdok::eval::Message;
use verdok::input::{read_records, CoordinateFormat};
use verdok::layers::LayerCache;
use verdok::models::{MatchedRow, ReferenceLayerSet, Severity};
use verdok::{export, pipeline, ShapeKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// OSS degree/minute/second columns with hemisphere letters
    Dms,
    /// Plain decimal-degree x/y columns
    Decimal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeArg {
    Point,
    Polygon,
}

#[derive(Parser, Debug)]
#[command(name = "verdok")]
#[command(about = "Convert coordinate sheets and verify them against maritime boundary layers")]
struct Args {
    /// Coordinate CSV file to process
    #[arg(short, long)]
    file: PathBuf,

    /// Coordinate format of the input columns
    #[arg(long, value_enum, default_value = "dms")]
    format: FormatArg,

    /// Geometry to build from the rows
    #[arg(long, value_enum, default_value = "point")]
    shape: ShapeArg,

    /// Base name for the exported shapefile bundle (without extension)
    #[arg(long, default_value = "hasil_konversi")]
    name: String,

    /// Directory the zip bundle is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Also check the sedimentation priority layer
    #[arg(long)]
    sedimentation: bool,

    /// Layer sources TOML (defaults are compiled in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the KKPRL JSON path from the config
    #[arg(long)]
    kkprl_file: Option<PathBuf>,

    /// Skip reference layers entirely (conversion + export only)
    #[arg(long)]
    skip_layers: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut sources = match &args.config {
        Some(path) => Sources::load_from_file(path)?,
        None => Sources::default(),
    };
    if let Some(path) = &args.kkprl_file {
        sources.kkprl_path = path.clone();
    }

    let format = match args.format {
        FormatArg::Dms => CoordinateFormat::Dms,
        FormatArg::Decimal => CoordinateFormat::Decimal,
    };
    let shape = match args.shape {
        ShapeArg::Point => ShapeKind::Point,
        ShapeArg::Polygon => ShapeKind::Polygon,
    };

    info!("Verdok");
    info!("File: {}", args.file.display());

    let records = read_records(&args.file, format)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let cache = LayerCache::new();
    let layers = if args.skip_layers {
        std::sync::Arc::new(ReferenceLayerSet::all_unavailable("skipped by request"))
    } else {
        cache.get_or_load(&sources, args.sedimentation).await
    };

    let outcome = pipeline::run(records, shape, &layers)?;

    if outcome.truncated {
        warn!("input exceeded 100 coordinates; only the first 50 were processed");
    }

    for message in &outcome.report.messages {
        emit(message);
    }
    if let Some(rows) = &outcome.report.kkprl_rows {
        print_kkprl_table(rows);
    }

    println!("\nConversion result:");
    println!("{:<12} {:>14} {:>14}", "id", "longitude", "latitude");
    for row in &outcome.table {
        println!("{:<12} {:>14.8} {:>14.8}", row.id, row.longitude, row.latitude);
    }

    let zip_path = export::export_bundle(&outcome.geometry, &args.name, &args.output_dir)?;
    info!("Shapefile bundle: {}", zip_path.display());

    Ok(())
}

fn emit(message: &Message) {
    match message.severity {
        Severity::Warning => warn!("{}", message.text),
        Severity::Success => info!("{}", message.text),
    }
}

fn print_kkprl_table(rows: &[MatchedRow]) {
    println!("\nOverlapping KKPRL permits:");
    println!("{:<12} {:<24} {:<32}", "id", "NO_KKPRL", "NAMA_SUBJ");
    for row in rows {
        let get = |field: &str| {
            row.attributes
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value.as_str())
                .unwrap_or("")
        };
        println!(
            "{:<12} {:<24} {:<32}",
            row.id,
            get("NO_KKPRL"),
            get("NAMA_SUBJ")
        );
    }
}
