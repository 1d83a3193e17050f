//! Parsed view of a gateway URL.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// On-disk name for a leaf file whose URL carries no trailing segment.
pub const DEFAULT_ENTRY_NAME: &str = "default";

static GATEWAY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<gateway>.+)/ipfs/(?P<id>[A-Za-z0-9]+)/?(?P<path>.*)$")
        .expect("gateway url pattern is valid")
});

/// Decomposed gateway URL: `{gateway}/ipfs/{resource_id}[/{path}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRef {
    gateway: String,
    resource_id: String,
    path: String,
}

impl GatewayRef {
    /// Parses a gateway URL. Fails when no `/ipfs/<id>` segment is present.
    pub fn parse(url: &str) -> Result<Self> {
        let caps = GATEWAY_URL
            .captures(url)
            .ok_or_else(|| Error::MalformedUrl(url.to_string()))?;
        Ok(Self {
            gateway: caps["gateway"].to_string(),
            resource_id: caps["id"].to_string(),
            path: caps["path"].to_string(),
        })
    }

    /// Scheme + host + any prefix preceding the `/ipfs/` segment.
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    /// The content-identifier path segment.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// On-disk name for a leaf file: the final non-empty path segment, or
    /// [`DEFAULT_ENTRY_NAME`] when the URL ends at the identifier.
    pub fn entry_name(&self) -> &str {
        self.path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_ENTRY_NAME)
    }

    /// Reconstructs the URL this reference was parsed from.
    pub fn url(&self) -> String {
        if self.path.is_empty() {
            format!("{}/ipfs/{}", self.gateway, self.resource_id)
        } else {
            format!("{}/ipfs/{}/{}", self.gateway, self.resource_id, self.path)
        }
    }

    /// Resolves a listing anchor to an absolute child URL.
    pub fn child_url(&self, href: &str) -> String {
        format!("{}{}", self.gateway, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_url() {
        let r = GatewayRef::parse("https://gw.example/ipfs/Qm123/report.txt").unwrap();
        assert_eq!(r.gateway(), "https://gw.example");
        assert_eq!(r.resource_id(), "Qm123");
        assert_eq!(r.entry_name(), "report.txt");
    }

    #[test]
    fn parse_without_name_uses_default() {
        let r = GatewayRef::parse("https://gw.example/ipfs/Qm123").unwrap();
        assert_eq!(r.entry_name(), DEFAULT_ENTRY_NAME);

        let r = GatewayRef::parse("https://gw.example/ipfs/Qm123/").unwrap();
        assert_eq!(r.entry_name(), DEFAULT_ENTRY_NAME);
    }

    #[test]
    fn entry_name_is_final_segment() {
        let r = GatewayRef::parse("https://gw.example/ipfs/QmRoot/sub/b.txt").unwrap();
        assert_eq!(r.entry_name(), "b.txt");

        // Trailing slash on a directory URL.
        let r = GatewayRef::parse("https://gw.example/ipfs/QmRoot/sub/").unwrap();
        assert_eq!(r.entry_name(), "sub");
    }

    #[test]
    fn reconstruction_is_equivalent() {
        for url in [
            "https://gw.example/ipfs/Qm123/report.txt",
            "https://gw.example/ipfs/Qm123/",
            "https://gw.example/ipfs/Qm123",
            "https://gw.example/prefix/ipfs/QmRoot/sub/b.txt",
        ] {
            let parsed = GatewayRef::parse(url).unwrap();
            let reparsed = GatewayRef::parse(&parsed.url()).unwrap();
            assert_eq!(parsed, reparsed, "round-trip changed meaning for {url}");
        }
    }

    #[test]
    fn reconstruction_is_exact_for_named_urls() {
        let url = "https://gw.example/ipfs/Qm123/report.txt";
        assert_eq!(GatewayRef::parse(url).unwrap().url(), url);
    }

    #[test]
    fn rejects_url_without_ipfs_segment() {
        let err = GatewayRef::parse("https://example.com/foo/bar").unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(_)));
    }

    #[test]
    fn child_url_concatenates_gateway_and_href() {
        let r = GatewayRef::parse("https://gw.example/ipfs/QmRoot/").unwrap();
        assert_eq!(
            r.child_url("/ipfs/QmRoot/a.txt"),
            "https://gw.example/ipfs/QmRoot/a.txt"
        );
    }
}
