//! Result cache keyed by the raw query string.
//!
//! Pure pass-through accelerator: point lookup and insert-or-replace, no
//! eviction, no TTL, no size bound. The key is the query exactly as the
//! caller sent it; no case folding or trimming.

use crate::error::CacheError;
use crate::types::AggregationResult;

pub trait ResultCache: Send + Sync {
    fn lookup(&self, query: &str) -> Result<Option<AggregationResult>, CacheError>;
    fn store(&self, query: &str, result: &AggregationResult) -> Result<(), CacheError>;
}

/// A simple in-memory cache, mainly for testing.
pub struct MemoryResultCache {
    map: std::sync::Mutex<std::collections::HashMap<String, AggregationResult>>,
}

impl MemoryResultCache {
    pub fn new() -> Self {
        Self {
            map: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

impl Default for MemoryResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache for MemoryResultCache {
    fn lookup(&self, query: &str) -> Result<Option<AggregationResult>, CacheError> {
        Ok(self
            .map
            .lock()
            .map_err(|e| CacheError::Unavailable(format!("lock poisoned: {}", e)))?
            .get(query)
            .cloned())
    }

    fn store(&self, query: &str, result: &AggregationResult) -> Result<(), CacheError> {
        self.map
            .lock()
            .map_err(|e| CacheError::Persist(format!("lock poisoned: {}", e)))?
            .insert(query.to_string(), result.clone());
        Ok(())
    }
}

/// A file-backed JSON cache at `~/.config/pictor/cache.json` (Unix) or
/// `%APPDATA%/pictor/cache.json` (Windows).
pub struct FileResultCache {
    path: std::path::PathBuf,
}

impl FileResultCache {
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let dir = base.join("pictor");
        std::fs::create_dir_all(&dir).ok();
        Self {
            path: dir.join("cache.json"),
        }
    }

    pub fn at_path(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> std::collections::HashMap<String, AggregationResult> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => std::collections::HashMap::new(),
        }
    }

    fn write_map(
        &self,
        map: &std::collections::HashMap<String, AggregationResult>,
    ) -> Result<(), CacheError> {
        let s = serde_json::to_string(map).map_err(|e| CacheError::Persist(format!("serde: {}", e)))?;
        std::fs::write(&self.path, &s).map_err(|e| CacheError::Persist(e.to_string()))
    }
}

impl ResultCache for FileResultCache {
    fn lookup(&self, query: &str) -> Result<Option<AggregationResult>, CacheError> {
        Ok(self.read_map().get(query).cloned())
    }

    fn store(&self, query: &str, result: &AggregationResult) -> Result<(), CacheError> {
        let mut map = self.read_map();
        map.insert(query.to_string(), result.clone());
        self.write_map(&map)
    }
}
