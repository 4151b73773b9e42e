use std::sync::LazyLock;

use regex::Regex;

use crate::models::VideoLink;

static SUBTITLE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""subtitles":\[.*?"src":"([^"]*)".*?\]"#).expect("valid subtitle regex")
});

/// Subtitle track URL of the first subtitle descriptor in the body.
pub fn find_subtitles(body: &str) -> Option<String> {
    SUBTITLE_SRC
        .captures(body)
        .map(|caps| caps[1].to_string())
}

/// Assigns the same subtitle track to every link, replacing prior values.
pub fn attach(links: &mut [VideoLink], subtitles: &str) {
    for link in links {
        link.subtitles = Some(Some(subtitles.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_subtitles() {
        let body = r#"{"links":[],"subtitles":[{"lang":"en","src":"subs.vtt"},{"lang":"pt","src":"pt.vtt"}]}"#;
        assert_eq!(find_subtitles(body).as_deref(), Some("subs.vtt"));
    }

    #[test]
    fn test_no_subtitles() {
        assert_eq!(find_subtitles(r#"{"subtitles":[]}"#), None);
        assert_eq!(find_subtitles("plain text"), None);
    }

    #[test]
    fn test_attach_overwrites() {
        let mut links = vec![VideoLink::new("720p", "https://cdn/a.mp4"), VideoLink::new("1080p", "https://cdn/b.m3u8")];
        links[1].subtitles = Some(None);

        attach(&mut links, "subs.vtt");
        assert!(links.iter().all(|l| l.subtitles == Some(Some("subs.vtt".to_string()))));
    }
}
