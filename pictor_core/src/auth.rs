//! Access gate consumed before any aggregation work starts.
//!
//! The aggregator never authenticates by itself; it only receives the
//! [`Identity`] produced here and forwards it to providers that attribute
//! usage to a caller.

use crate::error::AuthError;

/// Opaque authenticated caller name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verifies a credential token and yields the caller's identity.
pub trait AccessGate: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}

/// An in-memory token table. Covers the CLI and tests; real credential
/// storage lives outside this crate.
pub struct StaticAccessGate {
    tokens: std::collections::HashMap<String, Identity>,
}

impl StaticAccessGate {
    pub fn new() -> Self {
        Self {
            tokens: std::collections::HashMap::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

impl Default for StaticAccessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGate for StaticAccessGate {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::UnknownIdentity)
    }
}
