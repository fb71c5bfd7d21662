// rss2json feed conversion endpoint.
// Turns any RSS feed URL into a typed list of items.

use serde::Deserialize;

use crate::error::Result;

use super::client::SourceClient;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: Option<FeedSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSource {
    pub title: String,
}

impl FeedItem {
    /// Byline for the item: author, else the source feed's title, else empty.
    pub fn byline(&self) -> &str {
        if !self.author.is_empty() {
            &self.author
        } else if let Some(source) = &self.source {
            &source.title
        } else {
            ""
        }
    }
}

impl SourceClient {
    /// Fetch a feed's items through the conversion service.
    pub async fn fetch_feed(&self, feed_url: &str) -> Result<FeedResponse> {
        let url = format!("{}/v1/api.json", self.endpoints.feeds);
        let params = [("rss_url", feed_url)];
        self.get_json(&url, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(author: &str, source: Option<&str>) -> FeedItem {
        FeedItem {
            title: "t".to_string(),
            link: "https://example.com".to_string(),
            author: author.to_string(),
            source: source.map(|title| FeedSource {
                title: title.to_string(),
            }),
        }
    }

    #[test]
    fn test_byline_prefers_author() {
        assert_eq!(item("Ada", Some("BBC")).byline(), "Ada");
    }

    #[test]
    fn test_byline_falls_back_to_source_then_empty() {
        assert_eq!(item("", Some("BBC")).byline(), "BBC");
        assert_eq!(item("", None).byline(), "");
    }

    #[test]
    fn test_response_tolerates_missing_items_field() {
        let response: FeedResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(response.items.is_empty());
    }
}
