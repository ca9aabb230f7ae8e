use anyhow::{Context, Result};
use clap::Parser;
use corridor_cli::{parse_bbox, DatasetSummary};
use corridor_core::DatasetKind;
use corridor_sdk::CorridorClient;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Download a corridor dataset as GeoJSON", long_about = None)]
struct Args {
    /// Corridor server URL
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,

    /// Dataset: 2d-corridors, 3d-network or hdb-footprints
    #[arg(long)]
    dataset: DatasetKind,

    /// Bounding box as min_lon,min_lat,max_lon,max_lat
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    bbox: Option<corridor_core::BoundingBox>,

    /// Write the FeatureCollection here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = CorridorClient::new(args.url);

    let response = client
        .fetch(args.dataset, args.bbox)
        .await
        .with_context(|| format!("failed to fetch {}", args.dataset))?;

    let summary = DatasetSummary::of(&response.collection);
    let body = serde_json::to_string(&response.collection)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} to {}", summary, path.display());
        }
        None => {
            println!("{}", body);
            eprintln!("{}", summary);
        }
    }

    if args.bbox.is_some() && response.bbox_filtering.as_deref() == Some("ignored") {
        eprintln!("Note: server is in static mode, bounding box was not applied");
    }

    Ok(())
}
