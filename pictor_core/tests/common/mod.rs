//! Shared fixtures for provider and aggregator integration tests.

use pictor_core::{Config, PixabayProvider, StoryblocksProvider, UnsplashProvider};

pub fn test_config() -> Config {
    Config::default()
        .with_unsplash_access("TEST-KEY")
        .with_pixabay_key("TEST-KEY")
        .with_storyblocks_keys("TEST-PUBLIC", "TEST-PRIVATE")
}

pub fn unsplash_at(uri: &str) -> UnsplashProvider {
    UnsplashProvider::new(&test_config()).with_base_url(uri)
}

pub fn pixabay_at(uri: &str) -> PixabayProvider {
    PixabayProvider::new(&test_config()).with_base_url(uri)
}

pub fn storyblocks_at(uri: &str) -> StoryblocksProvider {
    StoryblocksProvider::new(&test_config()).with_base_url(uri)
}

/// Unsplash search body with one photo per id.
pub fn unsplash_body(ids: &[&str]) -> String {
    let results: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "description": format!("photo {id}"),
                "urls": {
                    "thumb": format!("https://images.unsplash.com/{id}/thumb.jpg"),
                    "regular": format!("https://images.unsplash.com/{id}/regular.jpg")
                }
            })
        })
        .collect();
    serde_json::json!({ "total": ids.len(), "results": results }).to_string()
}

/// Pixabay search body with one hit per numeric id.
pub fn pixabay_body(ids: &[u64]) -> String {
    let hits: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "previewURL": format!("https://cdn.pixabay.com/{id}/preview.jpg"),
                "webformatURL": format!("https://cdn.pixabay.com/{id}/web.jpg"),
                "tags": "cat, dog ,bird"
            })
        })
        .collect();
    serde_json::json!({ "total": ids.len(), "hits": hits }).to_string()
}

/// Storyblocks search body with one item per numeric id.
pub fn storyblocks_body(ids: &[u64]) -> String {
    let results: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("stock image {id}"),
                "thumbnail_url": format!("https://sb.example.com/{id}/thumb.jpg"),
                "preview_url": format!("https://sb.example.com/{id}/preview.jpg")
            })
        })
        .collect();
    serde_json::json!({ "total_results": ids.len(), "results": results }).to_string()
}
