//! Core types for aggregated image search results.

use serde::{Deserialize, Serialize};

/// Image library a record was fetched from.
///
/// Closed set on purpose: adding a provider means adding a variant, which
/// forces every field mapping and merge site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Unsplash,
    Pixabay,
    Storyblocks,
}

impl Source {
    /// Fixed merge order for aggregation results.
    pub const MERGE_ORDER: [Source; 3] = [Source::Unsplash, Source::Pixabay, Source::Storyblocks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Unsplash => "Unsplash",
            Source::Pixabay => "Pixabay",
            Source::Storyblocks => "Storyblocks",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized image search result from any provider.
///
/// Field names match the service-facing JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Provider-native identifier, stringified if the provider uses numbers.
    pub image_id: String,

    /// Thumbnail URL.
    pub thumbnails: String,

    /// Preview (larger rendition) URL.
    pub preview: String,

    /// Title/description/tag text. Semantics vary by provider; always a
    /// string, possibly empty.
    pub title: String,

    /// Which image library this record came from.
    pub source: Source,

    /// Tags/keywords, in provider order. Empty for providers without tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ordered result set for one query: records concatenated provider by
/// provider in [`Source::MERGE_ORDER`], each provider's own order preserved.
pub type AggregationResult = Vec<ImageRecord>;
