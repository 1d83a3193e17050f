use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ipfs_mirror::{Mirror, Settings, gateway_urls};

/// Mirrors gateway-published content onto a locally-run node.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Gateway URL to mirror.
    #[arg(long)]
    url: Option<String>,

    /// HTML file to scan for gateway URLs; each one is mirrored in turn.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let args = Args::parse();
    let settings = Settings::from_env();

    if let Some(url) = args.url {
        let mirror = Mirror::new(&settings)?;
        mirror.process_url(&url).await?;
    } else if let Some(html) = args.html {
        let document = std::fs::read_to_string(&html)?;
        let mirror = Mirror::new(&settings)?;
        // One URL failing must not take the rest of the batch down with it.
        for url in gateway_urls(&document) {
            if let Err(err) = mirror.process_url(&url).await {
                error!("failed to mirror {url}: {err}");
            }
        }
    }
    Ok(())
}
