//! Completion response caching with TTL expiry.

pub mod prompt_cache;

pub use prompt_cache::PromptCache;
