//! Adaptive playlist resolution: find a master playlist referenced by the
//! provider body, fetch it, and list its variant streams.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::models::VideoLink;
use crate::utils::resolve_playlist_entry;

const STREAM_INF: &str = "#EXT-X-STREAM-INF:";

static PLAYLIST_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^"]*\.m3u8[^"]*"#).expect("valid playlist regex"));
static REFERER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""Referer":"([^"]*)""#).expect("valid referer regex"));
static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RESOLUTION=\d+x(\d+)").expect("valid resolution regex"));

/// Whether playlist resolution should run for this request.
pub fn applies(provider_url: &str, body: &str) -> bool {
    provider_url.contains(".m3u8") || body.contains("master.m3u8")
}

/// First absolute playlist URL in the body.
pub fn find_playlist_url(body: &str) -> Option<&str> {
    PLAYLIST_URL.find(body).map(|m| m.as_str())
}

/// Referer the body asks for when fetching its streams, if any.
pub fn find_referer(body: &str) -> Option<&str> {
    REFERER
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Fetches the playlist referenced by `body` and lists its variants.
///
/// Never fails: a missing playlist URL, a transport error or a non-success
/// status all yield an empty list.
pub async fn fetch_variants(fetcher: &dyn Fetcher, config: &Config, body: &str) -> Vec<VideoLink> {
    let Some(playlist_url) = find_playlist_url(body) else {
        debug!("no playlist url in provider body");
        return Vec::new();
    };
    let referer = find_referer(body).unwrap_or(&config.referer);

    let fetched = match fetcher.get(playlist_url, referer).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(%playlist_url, error = %e, "playlist fetch failed");
            return Vec::new();
        }
    };
    if !fetched.status.is_success() {
        warn!(%playlist_url, status = %fetched.status, "playlist fetch rejected");
        return Vec::new();
    }

    parse_master_playlist(&fetched.body, playlist_url)
}

/// Lists the variant streams of a master playlist.
///
/// Each `#EXT-X-STREAM-INF:` tag yields one link for the line right after it,
/// provided that line is a URI. Quality keeps only the pixel height.
pub fn parse_master_playlist(manifest: &str, playlist_url: &str) -> Vec<VideoLink> {
    let lines: Vec<&str> = manifest.split('\n').map(str::trim).collect();
    let mut links = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !line.starts_with(STREAM_INF) {
            continue;
        }

        let quality = RESOLUTION
            .captures(line)
            .map(|caps| format!("{}p", &caps[1]))
            .unwrap_or_else(|| "unknown".to_string());

        match lines.get(i + 1) {
            Some(uri) if !uri.is_empty() && !uri.starts_with('#') => {
                let mut link = VideoLink::new(quality, resolve_playlist_entry(playlist_url, uri));
                link.subtitles = Some(None);
                links.push(link);
            }
            _ => {}
        }
    }

    links
}
