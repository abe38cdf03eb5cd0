//! Disk-based AI response cache.
//!
//! Only consulted when caching is switched on in [`super::AiConfig`]; by
//! default every price lookup reaches the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{ChatMessage, ChatResponse, Usage};

/// Disk-based AI response cache.
#[derive(Debug, Clone)]
pub struct AiCache {
    cache_dir: PathBuf,
}

/// A cached response as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAiResponse {
    pub content: String,
    pub usage: Usage,
    pub cached_at: DateTime<Utc>,
    pub model: String,
}

impl From<CachedAiResponse> for ChatResponse {
    fn from(cached: CachedAiResponse) -> Self {
        Self {
            content: cached.content,
            usage: cached.usage,
            cached: true,
        }
    }
}

/// Cache key components.
#[derive(Debug, Clone)]
pub struct CacheKey {
    pub prompt_name: String,
    pub model: String,
    pub input_hash: String,
}

impl CacheKey {
    /// Create a new cache key. Any change to the rendered messages changes the hash.
    pub fn new(prompt_name: &str, model: &str, messages: &[ChatMessage]) -> Self {
        let input_json = serde_json::to_string(messages).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(input_json.as_bytes());

        Self {
            prompt_name: prompt_name.to_string(),
            model: model.to_string(),
            input_hash: hex::encode(hasher.finalize()),
        }
    }

    /// Convert to a filesystem path relative to the cache directory.
    ///
    /// Format: {prompt_name}/{model_safe}/{hash[0:2]}/{hash}.json
    pub fn to_path(&self) -> PathBuf {
        // "openai/gpt-4o-mini" -> "openai--gpt-4o-mini"
        let model_safe = self.model.replace('/', "--");

        PathBuf::new()
            .join(&self.prompt_name)
            .join(model_safe)
            .join(&self.input_hash[..2])
            .join(format!("{}.json", &self.input_hash))
    }
}

impl AiCache {
    /// Create a new cache with the given directory.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get a cached response if it exists and parses.
    pub fn get(&self, key: &CacheKey) -> Option<CachedAiResponse> {
        let path = self.cache_dir.join(key.to_path());
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Store a response in the cache.
    pub fn put(&self, key: &CacheKey, response: &ChatResponse, model: &str) -> std::io::Result<()> {
        let path = self.cache_dir.join(key.to_path());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let cached = CachedAiResponse {
            content: response.content.clone(),
            usage: response.usage.clone(),
            cached_at: Utc::now(),
            model: model.to_string(),
        };

        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&path, json)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        count_json_files(&self.cache_dir, &mut stats.cached_responses);
        stats
    }

    /// Clear all cached responses.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

fn count_json_files(dir: &Path, count: &mut usize) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            count_json_files(&path, count);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            *count += 1;
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub cached_responses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn response(content: &str) -> ChatResponse {
        ChatResponse {
            content: content.to_string(),
            usage: Usage::default(),
            cached: false,
        }
    }

    #[test]
    fn test_cache_key_path() {
        let key = CacheKey::new(
            "price_lookup",
            "openai/gpt-4o-mini",
            &[ChatMessage::user("Rice")],
        );

        let path = key.to_path();
        assert!(path.starts_with("price_lookup/openai--gpt-4o-mini/"));
        assert!(path.to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn test_different_messages_different_keys() {
        let rice = CacheKey::new("price_lookup", "m", &[ChatMessage::user("Rice")]);
        let milk = CacheKey::new("price_lookup", "m", &[ChatMessage::user("Milk")]);
        assert_ne!(rice.input_hash, milk.input_hash);
    }

    #[test]
    fn test_put_get_stats_clear() {
        let temp_dir = TempDir::new().unwrap();
        let cache = AiCache::new(temp_dir.path().join("ai-cache"));
        let key = CacheKey::new("price_lookup", "m", &[ChatMessage::user("Rice")]);

        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().cached_responses, 0);

        cache.put(&key, &response(r#"{"price": 2.5}"#), "m").unwrap();

        let cached = cache.get(&key).unwrap();
        assert_eq!(cached.content, r#"{"price": 2.5}"#);
        assert_eq!(cached.model, "m");
        assert!(ChatResponse::from(cached).cached);
        assert_eq!(cache.stats().cached_responses, 1);

        cache.clear().unwrap();
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().cached_responses, 0);
    }
}
