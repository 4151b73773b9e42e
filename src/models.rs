use serde::Serialize;

use crate::utils::stream_type;

/// Container kind of a playable stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    M3u8,
    Mp4,
}

/// A playable stream extracted from a provider page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLink {
    pub quality: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: StreamType,
    /// Absent, explicit `null`, or a subtitle track URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Option<String>>,
}

impl VideoLink {
    pub fn new(quality: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            quality: quality.into(),
            kind: stream_type(&url),
            url,
            subtitles: None,
        }
    }
}

/// Body of a successful `/provider` response.
#[derive(Debug, Serialize)]
pub struct LinksEnvelope {
    pub success: bool,
    pub links: Vec<VideoLink>,
}

/// Body of a failed `/provider` extraction.
#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
}
