//! Storyblocks adapter.
//!
//! Storyblocks authenticates with a time-boxed signed request: every call
//! carries an expiry timestamp and an HMAC over the resource path, keyed by
//! the private key concatenated with that expiry. It is also the one
//! provider that attributes usage to the authenticated caller.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;

use crate::auth::Identity;
use crate::config::{Config, STORYBLOCKS_PROJECT};
use crate::error::ProviderError;
use crate::providers::{parse_body, send_with_retry, ImageProvider, USER_AGENT};
use crate::types::{ImageRecord, Source};

const DEFAULT_BASE_URL: &str = "https://api.storyblocks.com";
const SEARCH_RESOURCE: &str = "/api/v2/images/search";

/// Signed requests are valid for this many seconds past issue time.
const EXPIRY_WINDOW_SECS: i64 = 10;

pub struct StoryblocksProvider {
    client: Client,
    public_key: Option<String>,
    private_key: Option<String>,
    base_url: String,
}

impl StoryblocksProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            public_key: config.storyblocks_public.clone(),
            private_key: config.storyblocks_private.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different host. Test seam; the signature is
    /// computed over the resource path, not the host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Hex-encoded SHA-256 HMAC over `resource`, keyed by the private key with
/// the expiry timestamp appended.
///
/// Pure so the signing scheme is testable without network I/O.
pub fn compute_signature(resource: &str, expires: i64, private_key: &str) -> String {
    let key = format!("{private_key}{expires}");
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(resource.as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .fold(String::with_capacity(64), |mut hex, byte| {
            use std::fmt::Write;
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}

#[async_trait]
impl ImageProvider for StoryblocksProvider {
    fn source(&self) -> Source {
        Source::Storyblocks
    }

    async fn search(
        &self,
        query: &str,
        identity: Option<&Identity>,
    ) -> Result<Vec<ImageRecord>, ProviderError> {
        let public = self
            .public_key
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("STORYBLOCKS_PUBLIC"))?;
        let private = self
            .private_key
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("STORYBLOCKS_PRIVATE"))?;
        let identity = identity.ok_or(ProviderError::MissingIdentity {
            provider: Source::Storyblocks,
        })?;

        tracing::debug!(query, "Fetching results from Storyblocks");

        let expires = chrono::Utc::now().timestamp() + EXPIRY_WINDOW_SECS;
        let expires_str = expires.to_string();
        let hmac = compute_signature(SEARCH_RESOURCE, expires, private);
        let user_id = format!("{STORYBLOCKS_PROJECT}:{identity}");
        let url = format!("{}{}", self.base_url, SEARCH_RESOURCE);

        let response = send_with_retry(Source::Storyblocks, || {
            self.client.get(&url).query(&[
                ("APIKEY", public.as_str()),
                ("EXPIRES", expires_str.as_str()),
                ("HMAC", hmac.as_str()),
                ("keywords", query),
                ("user_id", user_id.as_str()),
                ("project_id", STORYBLOCKS_PROJECT),
            ])
        })
        .await?;

        let body = response.text().await?;
        let parsed: SearchResponse = parse_body(Source::Storyblocks, &body)?;

        Ok(parsed
            .results
            .into_iter()
            .map(|item| ImageRecord {
                image_id: item.id.to_string(),
                thumbnails: item.thumbnail_url,
                preview: item.preview_url,
                title: item.title,
                source: Source::Storyblocks,
                tags: vec![],
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: u64,
    thumbnail_url: String,
    preview_url: String,
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_known_vector() {
        // HMAC-SHA256(key = "TEST-PRIVATE" + "1000000000", msg = resource path)
        assert_eq!(
            compute_signature(SEARCH_RESOURCE, 1_000_000_000, "TEST-PRIVATE"),
            "17061a37e4c5cf9089ac278d68ce9d5c2c3f7dc340c0f21f10d495b22c8483ca"
        );
    }

    #[test]
    fn signature_depends_on_expiry() {
        let a = compute_signature(SEARCH_RESOURCE, 1_000_000_000, "secret");
        let b = compute_signature(SEARCH_RESOURCE, 1_000_000_001, "secret");
        assert_ne!(a, b);
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let sig = compute_signature(SEARCH_RESOURCE, 42, "secret42");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn maps_item_fields_and_stringifies_id() {
        let body = r#"{
            "total_results": 1,
            "results": [
                {
                    "id": 4712,
                    "title": "City skyline at dusk",
                    "thumbnail_url": "https://s/t.jpg",
                    "preview_url": "https://s/p.jpg"
                }
            ]
        }"#;

        let parsed: SearchResponse = parse_body(Source::Storyblocks, body).unwrap();
        assert_eq!(parsed.results[0].id, 4712);
        assert_eq!(parsed.results[0].title, "City skyline at dusk");
    }
}
