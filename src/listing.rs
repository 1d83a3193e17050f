//! Href extraction from gateway HTML.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']*)["']"#).expect("anchor pattern is valid")
});

static QUOTED_GATEWAY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+/ipfs/[A-Za-z0-9]+/?)[^"]*""#).expect("quoted url pattern is valid")
});

/// Every anchor `href` value in a directory listing, in document order.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every quoted gateway URL in an HTML document, truncated after the
/// content-identifier segment and deduplicated in first-seen order.
pub fn gateway_urls(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    QUOTED_GATEWAY_URL
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_in_document_order() {
        let html = r#"<html><body>
            <a href="/ipfs/QmRoot/a.txt">a.txt</a>
            <a class="dir" href='/ipfs/QmRoot/sub/'>sub</a>
        </body></html>"#;
        assert_eq!(
            anchor_hrefs(html),
            vec!["/ipfs/QmRoot/a.txt", "/ipfs/QmRoot/sub/"]
        );
    }

    #[test]
    fn non_anchor_hrefs_are_ignored() {
        let html = r#"<link href="/style.css"><a href="/ipfs/Qm1">x</a>"#;
        assert_eq!(anchor_hrefs(html), vec!["/ipfs/Qm1"]);
    }

    #[test]
    fn gateway_urls_truncate_after_id() {
        let html = r#"<a href="https://gw.example/ipfs/Qm123/deep/path.txt">x</a>"#;
        assert_eq!(gateway_urls(html), vec!["https://gw.example/ipfs/Qm123/"]);
    }

    #[test]
    fn gateway_urls_deduplicate_in_first_seen_order() {
        let html = concat!(
            r#"<a href="https://gw.example/ipfs/QmB/x">b</a>"#,
            r#"<img src="https://gw.example/ipfs/QmA/pic.png">"#,
            r#"<a href="https://gw.example/ipfs/QmB/y">b again</a>"#,
        );
        assert_eq!(
            gateway_urls(html),
            vec![
                "https://gw.example/ipfs/QmB/",
                "https://gw.example/ipfs/QmA/",
            ]
        );
    }

    #[test]
    fn unquoted_text_is_not_extracted() {
        let html = "visit https://gw.example/ipfs/QmPlain for details";
        assert!(gateway_urls(html).is_empty());
    }
}
