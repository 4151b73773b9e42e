//! Recognition of the structured JSON shapes provider pages answer with.

use serde::Deserialize;
use serde_json::Value;

use crate::models::VideoLink;

/// A provider body that parsed as JSON.
#[derive(Debug, PartialEq)]
pub enum Payload {
    /// `{"links": [{"link": ..., "resolutionStr": ...}]}`
    Links(Vec<Value>),
    /// `{"data": [{"file": ..., "label": ...}]}`
    Data(Vec<Value>),
    Unrecognized,
}

#[derive(Deserialize)]
struct LinkItem {
    link: Option<Value>,
    #[serde(rename = "resolutionStr")]
    resolution_str: Option<Value>,
}

#[derive(Deserialize)]
struct DataItem {
    file: Option<Value>,
    label: Option<Value>,
}

/// Classifies a body. `None` means the body is not usable JSON and the
/// caller should fall back to pattern scraping.
pub fn parse(body: &str) -> Option<Payload> {
    let value: Value = serde_json::from_str(body).ok()?;
    if value.is_null() {
        return None;
    }

    if let Some(links) = value.get("links").filter(|v| is_truthy(v)) {
        return as_items(links).map(Payload::Links);
    }
    if let Some(data) = value.get("data").filter(|v| is_truthy(v)) {
        return as_items(data).map(Payload::Data);
    }

    Some(Payload::Unrecognized)
}

impl Payload {
    pub fn into_links(self) -> Vec<VideoLink> {
        match self {
            Payload::Links(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<LinkItem>(item).ok())
                .filter_map(|item| {
                    let url = url_field(item.link)?;
                    let quality = label_field(item.resolution_str)?;
                    Some(VideoLink::new(quality, url))
                })
                .collect(),
            Payload::Data(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<DataItem>(item).ok())
                .filter_map(|item| {
                    let url = url_field(item.file)?;
                    let quality = label_field(item.label).unwrap_or_else(|| "unknown".to_string());
                    Some(VideoLink::new(quality, url))
                })
                .collect(),
            Payload::Unrecognized => Vec::new(),
        }
    }
}

// Arrays iterate normally and strings iterate to nothing; any other truthy
// value cannot be walked as a collection.
fn as_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(_) => Some(Vec::new()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// URLs must be non-empty strings.
fn url_field(field: Option<Value>) -> Option<String> {
    match field? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

// Any truthy quality label is kept; numbers render as their JSON text (`720`).
fn label_field(field: Option<Value>) -> Option<String> {
    let value = field.filter(is_truthy)?;
    match value {
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreamType;

    #[test]
    fn test_links_shape() {
        let body = r#"{"links":[
            {"link":"https://cdn/a/1080.mp4","resolutionStr":"1080p"},
            {"link":"https://cdn/a/master.m3u8","resolutionStr":"Hls"},
            {"link":"https://cdn/a/nores.mp4"},
            {"resolutionStr":"720p"}
        ]}"#;

        let links = parse(body).unwrap().into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://cdn/a/1080.mp4");
        assert_eq!(links[0].quality, "1080p");
        assert_eq!(links[0].kind, StreamType::Mp4);
        assert_eq!(links[1].quality, "Hls");
        assert_eq!(links[1].kind, StreamType::M3u8);
    }

    #[test]
    fn test_data_shape() {
        let body = r#"{"data":[
            {"file":"https://cdn/v.mp4","label":"480p"},
            {"file":"https://cdn/v2.mp4"},
            {"label":"720p"}
        ]}"#;

        let links = parse(body).unwrap().into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].quality, "480p");
        assert_eq!(links[1].quality, "unknown");
        assert_eq!(links[1].url, "https://cdn/v2.mp4");
    }

    #[test]
    fn test_links_takes_precedence_over_data() {
        let body = r#"{"links":[],"data":[{"file":"https://cdn/v.mp4"}]}"#;
        assert_eq!(parse(body), Some(Payload::Links(vec![])));
    }

    #[test]
    fn test_falsy_links_falls_through_to_data() {
        let body = r#"{"links":null,"data":[{"file":"https://cdn/v.mp4"}]}"#;
        let links = parse(body).unwrap().into_links();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_unrecognized_json() {
        assert_eq!(parse(r#"{"episode":{"sourceUrls":[]}}"#), Some(Payload::Unrecognized));
        assert_eq!(parse("[1,2,3]"), Some(Payload::Unrecognized));
        assert!(parse(r#"{"other":1}"#).unwrap().into_links().is_empty());
    }

    #[test]
    fn test_not_json() {
        assert_eq!(parse("<html>nope</html>"), None);
        assert_eq!(parse("null"), None);
    }

    #[test]
    fn test_non_iterable_collection_is_malformed() {
        assert_eq!(parse(r#"{"links":{"link":"x"}}"#), None);
        assert_eq!(parse(r#"{"data":42}"#), None);
    }

    #[test]
    fn test_numeric_labels_are_kept() {
        let links = parse(r#"{"data":[{"file":"https://cdn/v.mp4","label":720}]}"#)
            .unwrap()
            .into_links();
        assert_eq!(links, vec![VideoLink::new("720", "https://cdn/v.mp4")]);

        let links = parse(r#"{"links":[{"link":"https://cdn/v.mp4","resolutionStr":1080}]}"#)
            .unwrap()
            .into_links();
        assert_eq!(links, vec![VideoLink::new("1080", "https://cdn/v.mp4")]);
    }

    #[test]
    fn test_falsy_labels() {
        let links = parse(r#"{"data":[{"file":"https://cdn/v.mp4","label":0},{"file":"https://cdn/w.mp4","label":null}]}"#)
            .unwrap()
            .into_links();
        assert!(links.iter().all(|l| l.quality == "unknown"));
        assert_eq!(links.len(), 2);

        let links = parse(r#"{"links":[{"link":"https://cdn/v.mp4","resolutionStr":0}]}"#)
            .unwrap()
            .into_links();
        assert!(links.is_empty());
    }

    #[test]
    fn test_wrongly_typed_items_are_skipped() {
        let body = r#"{"links":[null,{"link":5,"resolutionStr":"x"},{"link":"https://cdn/ok.mp4","resolutionStr":"360p"}]}"#;
        let links = parse(body).unwrap().into_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].quality, "360p");
    }
}
