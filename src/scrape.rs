//! Pattern scraping for provider bodies that are not valid JSON.
//!
//! The key names mirror the provider payloads, which are unversioned; keep
//! new shapes in `LINK_PATTERNS` rather than adding control flow.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::VideoLink;

/// A `(url, quality)` key pair to look for in loosely structured text.
pub struct LinkPattern {
    pub url_key: &'static str,
    pub quality_key: &'static str,
}

pub const LINK_PATTERNS: &[LinkPattern] = &[
    LinkPattern { url_key: "link", quality_key: "resolutionStr" },
    LinkPattern { url_key: "file", quality_key: "label" },
    LinkPattern { url_key: "url", quality_key: "quality" },
];

static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    LINK_PATTERNS
        .iter()
        .map(|p| {
            let source = format!(
                r#""{}":"([^"]*)".*?"{}":"([^"]*)""#,
                regex::escape(p.url_key),
                regex::escape(p.quality_key)
            );
            Regex::new(&source).expect("link pattern is a valid regex")
        })
        .collect()
});

/// Applies every pattern in order; all matches of all patterns are kept.
pub fn scrape_links(body: &str) -> Vec<VideoLink> {
    let mut links = Vec::new();

    for regex in COMPILED.iter() {
        for caps in regex.captures_iter(body) {
            let url = &caps[1];
            if url.is_empty() {
                continue;
            }
            let quality = match &caps[2] {
                "" => "unknown",
                q => q,
            };
            links.push(VideoLink::new(quality, url));
        }
    }

    links
}
