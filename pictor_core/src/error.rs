// src/error.rs
use crate::types::Source;

/// Failure of a single provider call.
///
/// All of these are recovered by the aggregator: a failing provider
/// contributes zero records instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}")]
    Status { provider: Source, status: u16 },

    #[error("malformed {provider} response: {detail}")]
    MalformedResponse { provider: Source, detail: String },

    #[error("missing credentials: set {0}")]
    MissingCredentials(&'static str),

    #[error("{provider} requires an authenticated caller identity")]
    MissingIdentity { provider: Source },
}

impl ProviderError {
    /// Whether another attempt at the same request could plausibly succeed.
    ///
    /// Transport errors and server-side failures are transient; a parse
    /// defect or missing credential will not get better by retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::HttpRequest(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::MalformedResponse { .. } => false,
            ProviderError::MissingCredentials(_) => false,
            ProviderError::MissingIdentity { .. } => false,
        }
    }
}

/// Cache failures are soft: the aggregator proceeds as if caching were
/// disabled rather than failing the request.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
    #[error("persist error: {0}")]
    Persist(String),
}

/// Authentication failures are the only error class surfaced to callers as
/// a rejected request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid or expired credential token")]
    InvalidToken,
    #[error("identity could not be verified")]
    UnknownIdentity,
}
