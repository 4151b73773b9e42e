// src/extractor.rs

use tracing::debug;

use crate::config::Config;
use crate::error::ExtractError;
use crate::fetch::Fetcher;
use crate::models::VideoLink;
use crate::{payload, playlist, scrape, subtitles, wixmp};

/// Returns every playable stream found for a provider URL.
///
/// Only the provider page fetch can fail; each extraction step after it adds
/// zero or more links. Results are concatenated in step order and are not
/// deduplicated.
pub async fn get_video_links(
    fetcher: &dyn Fetcher,
    config: &Config,
    provider_url: &str,
) -> Result<Vec<VideoLink>, ExtractError> {
    let page_url = config.provider_url(provider_url);
    let page = fetcher.get(&page_url, &config.referer).await?;

    if !page.status.is_success() {
        return Err(ExtractError::Status(page.status.as_u16()));
    }
    let body = page.body;

    let mut links = match payload::parse(&body) {
        Some(parsed) => parsed.into_links(),
        None => scrape::scrape_links(&body),
    };
    debug!(count = links.len(), "structured/scraped links");

    if wixmp::applies(provider_url, &body) {
        let packed = wixmp::extract_links(&body);
        debug!(count = packed.len(), "wixmp links");
        links.extend(packed);
    }

    if playlist::applies(provider_url, &body) {
        let variants = playlist::fetch_variants(fetcher, config, &body).await;
        debug!(count = variants.len(), "playlist variants");
        links.extend(variants);
    }

    if let Some(track) = subtitles::find_subtitles(&body) {
        subtitles::attach(&mut links, &track);
    }

    Ok(links)
}
