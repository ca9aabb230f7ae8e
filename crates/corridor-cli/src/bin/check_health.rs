use anyhow::Result;
use clap::Parser;
use corridor_sdk::CorridorClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "Report corridor server health", long_about = None)]
struct Args {
    /// Corridor server URL
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = CorridorClient::new(args.url);

    let health = client.health().await?;
    println!("Status:    {}", health.status);
    println!("Mode:      {}", health.mode);
    println!(
        "Filtering: {}",
        if health.filters_bbox() { "bounding boxes applied" } else { "bounding boxes ignored" }
    );
    if let Some(database) = &health.database {
        println!("Database:  {}", database);
    }

    if !health.database_ok() {
        std::process::exit(1);
    }
    Ok(())
}
