//! Decoding of wixmp "repackager" URLs, which pack several resolutions of one
//! video into a single comma-delimited path segment:
//!
//! `repackager.wixmp.com/video.wixstatic.com/video/<id>/,480,720,1080,/mp4/file.mp4.urlset/master.m3u8`

use std::sync::LazyLock;

use regex::Regex;

use crate::models::VideoLink;

const REPACKAGER_HOST: &str = "repackager.wixmp.com";

static PACKED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"repackager\.wixmp\.com/[^"]*\.urlset[^"]*"#).expect("valid wixmp regex")
});

/// Whether the packed-URL decoder should run for this request.
pub fn applies(provider_url: &str, body: &str) -> bool {
    provider_url.contains("wixmp") || body.contains(REPACKAGER_HOST)
}

pub fn extract_links(body: &str) -> Vec<VideoLink> {
    PACKED_URL
        .find_iter(body)
        .flat_map(|m| decode(m.as_str()))
        .collect()
}

/// Expands one packed URL into one link per resolution token.
fn decode(packed: &str) -> Vec<VideoLink> {
    let stripped = packed.replacen(&format!("{}/", REPACKAGER_HOST), "", 1);
    let base = match stripped.find(".urlset") {
        Some(end) => &stripped[..end],
        None => stripped.as_str(),
    };

    // The placeholder runs from the first comma to the next path separator.
    let Some(start) = base.find(',') else {
        return Vec::new();
    };
    let end = base[start..].find('/').map_or(base.len(), |i| start + i);
    let (prefix, placeholder, suffix) = (&base[..start], &base[start..end], &base[end..]);

    placeholder
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| VideoLink::new(format!("{}p", token), format!("{}{}{}", prefix, token, suffix)))
        .collect()
}
