use std::env;

const DEFAULT_API_ADDRESS: &str = "http://127.0.0.1:5001";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Address of the local node's HTTP API.
    pub ipfs_api: String,
}

impl Settings {
    /// Reads settings from the process environment. `IPFS_API` overrides
    /// the default local daemon address.
    pub fn from_env() -> Self {
        Self {
            ipfs_api: env::var("IPFS_API").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string()),
        }
    }
}
