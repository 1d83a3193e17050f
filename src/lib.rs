mod error;
mod fetch;
mod gateway;
mod http;
mod listing;
mod mirror;
mod publish;
mod settings;

// Flat re-exports — the public API surface
pub use error::{Error, Result};
pub use fetch::{FetchOutcome, Fetcher};
pub use gateway::{DEFAULT_ENTRY_NAME, GatewayRef};
pub use listing::{anchor_hrefs, gateway_urls};
pub use mirror::Mirror;
pub use publish::{AddEntry, AddResult, IpfsClient};
pub use settings::Settings;
