/// Video type the hero carousel and detail pages play.
pub const TRAILER_TYPE: &str = "Trailer";
/// Hosting platform whose embeddable player renders previews.
pub const YOUTUBE_SITE: &str = "YouTube";

/// One entry of a `/videos` listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoDescriptor {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub site: String,
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub official: bool,
}

impl VideoDescriptor {
    pub fn new(
        kind: impl Into<String>,
        site: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            site: site.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    /// Exact match on both fields; teasers, clips and other hosts never count.
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == TRAILER_TYPE && self.site == YOUTUBE_SITE
    }
}

/// `{ "results": [...] }` envelope of the videos endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoList {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<VideoDescriptor>,
}

impl VideoList {
    pub fn trailer(&self) -> Option<&VideoDescriptor> {
        find_trailer(&self.results)
    }
}

/// First YouTube trailer in listing order.
pub fn find_trailer(videos: &[VideoDescriptor]) -> Option<&VideoDescriptor> {
    videos.iter().find(|v| v.is_youtube_trailer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teaser_is_not_a_trailer() {
        let videos = vec![VideoDescriptor::new("Teaser", "YouTube", "x")];
        assert!(find_trailer(&videos).is_none());
    }

    #[test]
    fn picks_first_youtube_trailer_in_order() {
        let videos = vec![
            VideoDescriptor::new("Trailer", "Vimeo", "v"),
            VideoDescriptor::new("Clip", "YouTube", "c"),
            VideoDescriptor::new("Trailer", "YouTube", "first"),
            VideoDescriptor::new("Trailer", "YouTube", "second"),
        ];
        assert_eq!(find_trailer(&videos).map(|v| v.key.as_str()), Some("first"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let videos = vec![VideoDescriptor::new("trailer", "youtube", "k")];
        assert!(find_trailer(&videos).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_type_field() {
        let raw = r#"{"id": 550, "results": [
            {"type": "Trailer", "site": "YouTube", "key": "BdJKm16Co6M", "name": "Official Trailer", "official": true}
        ]}"#;
        let list: VideoList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.trailer().map(|v| v.key.as_str()), Some("BdJKm16Co6M"));
    }
}
