//! Runtime configuration for provider credentials and caching.

use std::env;

/// Attribution values embedded in Storyblocks requests.
pub const STORYBLOCKS_PROJECT: &str = "PANTHEON_PROJECT";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Unsplash access key (`Authorization: Client-ID <key>`).
    pub unsplash_access: Option<String>,
    /// Pixabay API key (`key` query parameter).
    pub pixabay_key: Option<String>,
    /// Storyblocks public key (`APIKEY` query parameter).
    pub storyblocks_public: Option<String>,
    /// Storyblocks private key, used only to sign requests.
    pub storyblocks_private: Option<String>,
    /// Whether aggregation results are cached.
    pub cache_results: bool,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `CACHE_RESULT` accepts `true`/`True`/`1`; anything else (including
    /// absence) disables caching.
    pub fn from_env() -> Self {
        Self {
            unsplash_access: env::var("UNSPLASH_ACCESS").ok(),
            pixabay_key: env::var("PIXABAY_KEY").ok(),
            storyblocks_public: env::var("STORYBLOCKS_PUBLIC").ok(),
            storyblocks_private: env::var("STORYBLOCKS_PRIVATE").ok(),
            cache_results: env::var("CACHE_RESULT")
                .map(|v| matches!(v.as_str(), "true" | "True" | "1"))
                .unwrap_or(false),
        }
    }

    pub fn with_unsplash_access(mut self, key: impl Into<String>) -> Self {
        self.unsplash_access = Some(key.into());
        self
    }

    pub fn with_pixabay_key(mut self, key: impl Into<String>) -> Self {
        self.pixabay_key = Some(key.into());
        self
    }

    pub fn with_storyblocks_keys(
        mut self,
        public: impl Into<String>,
        private: impl Into<String>,
    ) -> Self {
        self.storyblocks_public = Some(public.into());
        self.storyblocks_private = Some(private.into());
        self
    }
}
