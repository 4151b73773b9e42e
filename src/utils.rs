use url::Url;

use crate::models::StreamType;

// Adaptive playlists are recognized by the `.m3u8` substring anywhere in the URL;
// everything else is treated as a progressive file.
pub fn stream_type(url: &str) -> StreamType {
    if url.contains(".m3u8") {
        StreamType::M3u8
    } else {
        StreamType::Mp4
    }
}

// Resolves a playlist entry against the playlist's own URL.
//
// Entries starting with `http` are already absolute. If the playlist URL
// cannot be parsed, the entry is appended to its directory prefix.
pub fn resolve_playlist_entry(playlist_url: &str, entry: &str) -> String {
    if entry.starts_with("http") {
        return entry.to_string();
    }

    if let Ok(joined) = Url::parse(playlist_url).and_then(|base| base.join(entry)) {
        return joined.to_string();
    }

    let dir_end = playlist_url.rfind('/').map_or(0, |i| i + 1);
    format!("{}{}", &playlist_url[..dir_end], entry)
}

// First value of a query parameter, percent-decoded.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
