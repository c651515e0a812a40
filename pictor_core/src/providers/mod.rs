//! Provider adapters: one module per image library.
//!
//! Each adapter turns a query into a provider-specific HTTP request and the
//! provider's JSON body into normalized [`ImageRecord`]s. Adapters are
//! stateless across invocations and perform no side effects beyond the
//! network call.

pub mod pixabay;
pub mod storyblocks;
pub mod unsplash;

use crate::auth::Identity;
use crate::error::ProviderError;
use crate::types::{ImageRecord, Source};
use async_trait::async_trait;
use tokio::time::{sleep, Duration};

pub use pixabay::PixabayProvider;
pub use storyblocks::StoryblocksProvider;
pub use unsplash::UnsplashProvider;

pub(crate) const USER_AGENT: &str = "pictor/0.1.0";

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// The library this adapter searches.
    fn source(&self) -> Source;

    /// Search the provider for `query`.
    ///
    /// `identity` is forwarded only by providers that attribute usage to a
    /// caller; the others ignore it. Returns the provider's records in its
    /// own response order.
    async fn search(
        &self,
        query: &str,
        identity: Option<&Identity>,
    ) -> Result<Vec<ImageRecord>, ProviderError>;
}

/// Send a request, retrying transient failures with exponential backoff.
///
/// Network errors, 429 and 5xx responses are retried up to [`MAX_ATTEMPTS`]
/// total attempts. Any other non-200 status fails immediately. Retries are
/// per-adapter; nothing is coordinated across providers.
pub(crate) async fn send_with_retry<F>(
    source: Source,
    build: F,
) -> Result<reqwest::Response, ProviderError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    const MAX_ATTEMPTS: u32 = 5;
    let mut delay_ms = 200u64;

    for attempt in 1..=MAX_ATTEMPTS {
        match build().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                let err = ProviderError::Status {
                    provider: source,
                    status: status.as_u16(),
                };
                if !err.is_transient() || attempt == MAX_ATTEMPTS {
                    return Err(err);
                }
                tracing::debug!(
                    provider = %source,
                    status = status.as_u16(),
                    attempt,
                    "Retrying after transient HTTP status"
                );
            }
            Err(e) => {
                if attempt == MAX_ATTEMPTS {
                    return Err(ProviderError::HttpRequest(e));
                }
                tracing::debug!(provider = %source, attempt, error = %e, "Retrying after network error");
            }
        }
        sleep(Duration::from_millis(delay_ms)).await;
        delay_ms = (delay_ms as f64 * 1.6) as u64;
    }

    unreachable!("loop returns on final attempt")
}

/// Parse a provider body, tagging failures as mapping defects rather than
/// transport errors.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    source: Source,
    body: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse {
        provider: source,
        detail: e.to_string(),
    })
}
