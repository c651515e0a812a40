//! Unsplash adapter.
//!
//! [Unsplash API documentation](https://unsplash.com/documentation)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::auth::Identity;
use crate::config::Config;
use crate::error::ProviderError;
use crate::providers::{parse_body, send_with_retry, ImageProvider, USER_AGENT};
use crate::types::{ImageRecord, Source};

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

pub struct UnsplashProvider {
    client: Client,
    access_key: Option<String>,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            access_key: config.unsplash_access.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different host. Test seam.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn source(&self) -> Source {
        Source::Unsplash
    }

    async fn search(
        &self,
        query: &str,
        _identity: Option<&Identity>,
    ) -> Result<Vec<ImageRecord>, ProviderError> {
        let key = self
            .access_key
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("UNSPLASH_ACCESS"))?;

        tracing::debug!(query, "Fetching results from Unsplash");

        let url = format!("{}/search/photos", self.base_url);
        let response = send_with_retry(Source::Unsplash, || {
            self.client
                .get(&url)
                .header("Accept-Version", "v1")
                .header("Authorization", format!("Client-ID {key}"))
                .query(&[("query", query)])
        })
        .await?;

        let body = response.text().await?;
        let parsed: SearchResponse = parse_body(Source::Unsplash, &body)?;

        Ok(parsed
            .results
            .into_iter()
            .map(|photo| ImageRecord {
                image_id: photo.id,
                thumbnails: photo.urls.thumb,
                preview: photo.urls.regular,
                // Nullable on the wire; title is always a string, possibly empty.
                title: photo.description.unwrap_or_default(),
                source: Source::Unsplash,
                tags: vec![],
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    description: Option<String>,
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    thumb: String,
    regular: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_photo_fields() {
        let body = r#"{
            "results": [
                {
                    "id": "abc123",
                    "description": "a red panda",
                    "urls": {"thumb": "https://u/t.jpg", "regular": "https://u/r.jpg", "full": "https://u/f.jpg"}
                },
                {
                    "id": "def456",
                    "description": null,
                    "urls": {"thumb": "https://u/t2.jpg", "regular": "https://u/r2.jpg"}
                }
            ]
        }"#;

        let parsed: SearchResponse = parse_body(Source::Unsplash, body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, "abc123");
        assert_eq!(parsed.results[1].description, None);
    }

    #[test]
    fn missing_urls_is_a_mapping_defect() {
        let body = r#"{"results": [{"id": "abc123", "description": "x"}]}"#;
        let err = parse_body::<SearchResponse>(Source::Unsplash, body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse { .. }));
    }
}
