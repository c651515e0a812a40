//! Pixabay adapter.
//!
//! [Pixabay API documentation](https://pixabay.com/api/docs/)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::auth::Identity;
use crate::config::Config;
use crate::error::ProviderError;
use crate::providers::{parse_body, send_with_retry, ImageProvider, USER_AGENT};
use crate::types::{ImageRecord, Source};

const DEFAULT_BASE_URL: &str = "https://pixabay.com/api";

pub struct PixabayProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PixabayProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            api_key: config.pixabay_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different host. Test seam.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Pixabay ships tags as one comma-separated string.
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

#[async_trait]
impl ImageProvider for PixabayProvider {
    fn source(&self) -> Source {
        Source::Pixabay
    }

    async fn search(
        &self,
        query: &str,
        _identity: Option<&Identity>,
    ) -> Result<Vec<ImageRecord>, ProviderError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("PIXABAY_KEY"))?;

        tracing::debug!(query, "Fetching results from Pixabay");

        let url = format!("{}/", self.base_url);
        let response = send_with_retry(Source::Pixabay, || {
            self.client
                .get(&url)
                .query(&[("key", key.as_str()), ("q", query)])
        })
        .await?;

        let body = response.text().await?;
        let parsed: SearchResponse = parse_body(Source::Pixabay, &body)?;

        Ok(parsed
            .hits
            .into_iter()
            .map(|hit| ImageRecord {
                image_id: hit.id.to_string(),
                thumbnails: hit.preview_url,
                preview: hit.webformat_url,
                tags: split_tags(&hit.tags),
                title: hit.tags,
                source: Source::Pixabay,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "previewURL")]
    preview_url: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_comma_split_and_trimmed() {
        assert_eq!(split_tags("cat, dog ,bird"), vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn single_tag_stays_whole() {
        assert_eq!(split_tags("sunset"), vec!["sunset"]);
    }

    #[test]
    fn maps_hit_fields_and_stringifies_id() {
        let body = r#"{
            "total": 1,
            "hits": [
                {
                    "id": 195893,
                    "previewURL": "https://p/preview.jpg",
                    "webformatURL": "https://p/web.jpg",
                    "tags": "blossom, bloom, flower"
                }
            ]
        }"#;

        let parsed: SearchResponse = parse_body(Source::Pixabay, body).unwrap();
        assert_eq!(parsed.hits.len(), 1);
        assert_eq!(parsed.hits[0].id, 195893);
        assert_eq!(parsed.hits[0].tags, "blossom, bloom, flower");
    }

    #[test]
    fn missing_preview_url_is_a_mapping_defect() {
        let body = r#"{"hits": [{"id": 1, "webformatURL": "https://p/w.jpg", "tags": "x"}]}"#;
        let err = parse_body::<SearchResponse>(Source::Pixabay, body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse { .. }));
    }
}
