use std::io;
use thiserror::Error;

/// All errors produced by the mirror pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Input URL has no `/ipfs/<id>` segment.
    #[error("malformed gateway url: {0}")]
    MalformedUrl(String),

    /// HTTP transfer failed (network error or non-2xx status).
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// Scratch-directory I/O failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// Node response could not be decoded.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// The node rejected or failed the add call.
    #[error("publish: {0}")]
    Publish(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn publish(msg: impl Into<String>) -> Self {
        Error::Publish(msg.into())
    }
}
