// src/lib.rs
pub mod aggregator;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use aggregator::{Aggregator, SearchService};
pub use auth::{AccessGate, Identity, StaticAccessGate};
pub use cache::{FileResultCache, MemoryResultCache, ResultCache};
pub use config::Config;
pub use error::{AuthError, CacheError, ProviderError};
pub use providers::{ImageProvider, PixabayProvider, StoryblocksProvider, UnsplashProvider};
pub use types::{AggregationResult, ImageRecord, Source};
