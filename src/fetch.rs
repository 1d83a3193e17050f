//! Recursive fetch of a gateway resource into a local scratch tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::debug;

use crate::error::Result;
use crate::gateway::GatewayRef;
use crate::http;
use crate::listing;

/// What one fetch produced under the destination directory.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The URL was a directory listing; `children` recursions completed.
    Directory { path: PathBuf, children: usize },
    /// The URL was a leaf file, written to `path`.
    File(PathBuf),
    /// The URL was a directory listing with nothing downloadable in it.
    Empty,
}

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http::client()?,
        })
    }

    /// Fetches `url` and reconstructs it (leaf file or directory subtree)
    /// under `dest`. Directory listings are expanded recursively, and every
    /// recursion writes its entries directly into `dest`: nested gateway
    /// directories collapse to siblings in the mirrored tree.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchOutcome> {
        let mut visited = HashSet::from([url.to_string()]);
        self.fetch_inner(url.to_string(), dest, &mut visited).await
    }

    fn fetch_inner<'a>(
        &'a self,
        url: String,
        dest: &'a Path,
        visited: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Result<FetchOutcome>> {
        async move {
            let reference = GatewayRef::parse(&url)?;
            println!("Downloading {url}...");
            let response = http::get(&self.client, &url).await?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();

            if content_type.starts_with("text/html") {
                // Directory listing: recurse into each child entry.
                let body = response.text().await?;
                let mut children = 0;
                for href in listing::anchor_hrefs(&body) {
                    if !href.contains("/ipfs/") {
                        continue;
                    }
                    let child = reference.child_url(&href);
                    if child == url {
                        // The listing's self-reference.
                        continue;
                    }
                    if !visited.insert(child.clone()) {
                        debug!("already fetched {child}, skipping");
                        continue;
                    }
                    self.fetch_inner(child, dest, visited).await?;
                    children += 1;
                }
                if children > 0 {
                    Ok(FetchOutcome::Directory {
                        path: dest.to_path_buf(),
                        children,
                    })
                } else {
                    Ok(FetchOutcome::Empty)
                }
            } else {
                let bytes = response.bytes().await?;
                println!("Downloaded {} bytes.", bytes.len());
                let path = dest.join(reference.entry_name());
                tokio::fs::write(&path, &bytes).await?;
                Ok(FetchOutcome::File(path))
            }
        }
        .boxed()
    }
}
