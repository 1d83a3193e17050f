//! Per-URL mirror-and-republish flow.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::publish::IpfsClient;
use crate::settings::Settings;

pub struct Mirror {
    fetcher: Fetcher,
    node: IpfsClient,
}

impl Mirror {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            node: IpfsClient::new(&settings.ipfs_api)?,
        })
    }

    /// Mirrors one gateway URL into a scratch directory and re-adds the
    /// result to the node. The scratch directory is removed when this
    /// returns, on every exit path.
    pub async fn process_url(&self, url: &str) -> Result<()> {
        self.process_url_in(url, &std::env::temp_dir()).await
    }

    /// Same as [`process_url`](Self::process_url), with the scratch
    /// directory created under `base`.
    pub async fn process_url_in(&self, url: &str, base: &Path) -> Result<()> {
        let scratch = tempfile::tempdir_in(base)?;
        debug!("scratch directory at {}", scratch.path().display());

        let outcome = self.fetcher.fetch(url, scratch.path()).await?;
        let result = match outcome {
            FetchOutcome::Empty => {
                println!("No files found.");
                return Ok(());
            }
            FetchOutcome::Directory { path, .. } => {
                println!("Adding {} to IPFS node...", path.display());
                self.node.add_dir(&path).await?
            }
            FetchOutcome::File(path) => {
                println!("Adding {} to IPFS node...", path.display());
                self.node.add_file(&path).await?
            }
        };
        println!("Added as {}", result.root_hash());
        println!("Done.");
        Ok(())
    }
}
