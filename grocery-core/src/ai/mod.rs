//! AI client module for LLM integration via OpenRouter.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `CachingAiClient` implementation with optional disk-based caching
//! - `FakeAiClient` with canned responses for tests
//! - Configuration via environment variables
//! - Prompt templates for price lookups and recipe suggestions
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): Your OpenRouter API key
//! - `GROCERY_AI_MODEL` (optional): Model name, e.g., "openai/gpt-4o-mini"
//! - `GROCERY_AI_BASE_URL` (optional): API base URL
//! - `GROCERY_AI_CACHE` (optional): Set to "true" to cache responses on disk
//! - `GROCERY_AI_CACHE_DIR` (optional): Cache directory path
//! - `GROCERY_AI_OFFLINE` (optional): Set to "true" to use cache only
//! - `GROCERY_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//! - `GROCERY_AI_TIMEOUT_SECS` (optional): Per-request timeout
//!
//! # Example
//!
//! ```ignore
//! use grocery_core::ai::{AiClient, CachingAiClient, ChatRequest};
//!
//! let client = CachingAiClient::from_env()?;
//! let request = ChatRequest::json("You are terse.", "Price of rice?", 64, 0.2);
//! let response = client.complete("price_lookup", request).await?;
//! println!("Response: {}", response.content);
//! ```

mod cache;
mod client;
mod config;
mod fake;
pub mod prompts;
mod types;

pub use cache::{AiCache, CacheKey, CacheStats, CachedAiResponse};
pub use client::{AiClient, AiError, CachingAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
