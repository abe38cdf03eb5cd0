//! AI configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default rate limit between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 500;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Model name (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Directory for caching responses.
    pub cache_dir: PathBuf,
    /// If false, responses are never read from or written to disk.
    pub cache_enabled: bool,
    /// If true, only use cache, error if not cached.
    pub offline: bool,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
    /// Upper bound for a single completion call.
    pub timeout: Duration,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter
    ///
    /// Optional:
    /// - `GROCERY_AI_MODEL`: Model name (default: "openai/gpt-4o-mini")
    /// - `GROCERY_AI_BASE_URL`: API base URL (default: "https://openrouter.ai/api/v1")
    /// - `GROCERY_AI_CACHE`: Enable the disk cache (default: false)
    /// - `GROCERY_AI_CACHE_DIR`: Cache directory (default: "~/.grocery-budget/ai-cache")
    /// - `GROCERY_AI_OFFLINE`: Use cache only, implies `GROCERY_AI_CACHE` (default: false)
    /// - `GROCERY_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 500)
    /// - `GROCERY_AI_TIMEOUT_SECS`: Per-request timeout (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = env::var("GROCERY_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("GROCERY_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_dir = env::var("GROCERY_AI_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_cache_dir());

        let offline = env_flag("GROCERY_AI_OFFLINE");
        let cache_enabled = offline || env_flag("GROCERY_AI_CACHE");

        let rate_limit_ms = env::var("GROCERY_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        let timeout_secs = env::var("GROCERY_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            model,
            base_url,
            cache_dir,
            cache_enabled,
            offline,
            rate_limit_ms,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Get the default cache directory: ~/.grocery-budget/ai-cache
    pub fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".grocery-budget").join("ai-cache"))
            .unwrap_or_else(|| PathBuf::from("data/ai-cache"))
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}
