//! Client for the local node's add API.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::http;

/// One record from the node's add response.
#[derive(Debug, Clone, Deserialize)]
pub struct AddEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Hash")]
    pub hash: String,
}

/// Result of an add call. Recursive adds return one record per entry with
/// the root last; single-file adds return exactly one record.
#[derive(Debug)]
pub enum AddResult {
    Single(AddEntry),
    Batch(Vec<AddEntry>),
}

impl AddResult {
    /// Identifier assigned to the added root.
    pub fn root_hash(&self) -> &str {
        match self {
            AddResult::Single(entry) => &entry.hash,
            AddResult::Batch(entries) => {
                entries.last().map_or("", |entry| entry.hash.as_str())
            }
        }
    }
}

pub struct IpfsClient {
    add_url: String,
    client: reqwest::Client,
}

impl IpfsClient {
    /// Connects to the node API at `address`, e.g. `http://127.0.0.1:5001`.
    pub fn new(address: &str) -> Result<Self> {
        let address = address.trim_end_matches('/');
        Ok(Self {
            add_url: format!("{address}/api/v0/add"),
            client: http::client()?,
        })
    }

    /// Adds a single file without pinning it.
    pub async fn add_file(&self, path: &Path) -> Result<AddResult> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::publish(format!("not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);

        let mut entries = self.send(form, false).await?;
        let entry = entries
            .pop()
            .ok_or_else(|| Error::publish("add returned no entries"))?;
        Ok(AddResult::Single(entry))
    }

    /// Adds a directory tree recursively, without pinning. Every file is
    /// uploaded under its path relative to the directory's parent, so the
    /// node reconstructs the tree under the directory's own name.
    pub async fn add_dir(&self, dir: &Path) -> Result<AddResult> {
        let files = collect_files(dir)?;
        if files.is_empty() {
            return Err(Error::publish(format!(
                "nothing to add under {}",
                dir.display()
            )));
        }

        let base = dir.parent().unwrap_or(dir);
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file).await?;
            let relative = file
                .strip_prefix(base)
                .unwrap_or(&file)
                .to_string_lossy()
                .replace('\\', "/");
            let part = Part::bytes(bytes)
                .file_name(urlencoding::encode(&relative).into_owned())
                .mime_str("application/octet-stream")?;
            form = form.part("file", part);
        }

        let entries = self.send(form, true).await?;
        Ok(AddResult::Batch(entries))
    }

    async fn send(&self, form: Form, recursive: bool) -> Result<Vec<AddEntry>> {
        let mut request = self.client.post(&self.add_url).query(&[("pin", "false")]);
        if recursive {
            request = request.query(&[("recursive", "true")]);
        }
        let response = request.multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::publish(format!("add failed with {status}: {body}")));
        }
        decode_entries(&response.text().await?)
    }
}

/// Decodes the node's response: one JSON record per line.
fn decode_entries(body: &str) -> Result<Vec<AddEntry>> {
    let mut entries = Vec::new();
    for line in body.lines().filter(|line| !line.trim().is_empty()) {
        entries.push(serde_json::from_str::<AddEntry>(line)?);
    }
    if entries.is_empty() {
        return Err(Error::publish("add returned no entries"));
    }
    Ok(entries)
}

fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
