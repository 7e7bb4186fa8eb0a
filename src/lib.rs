#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Sampling pool configuration types.
pub mod config;
/// Centralized constants used across parsing, sources, and the pool.
pub mod constants;
/// Recipe item type.
pub mod data;
/// Reusable example runners shared by demo binaries.
pub mod example_apps;
mod hash;
/// Markdown recipe document parsing.
pub mod markdown;
/// Pool counters and batch diversity helpers.
pub mod metrics;
/// Generic unique random sampling pool.
pub mod pool;
/// Owning component that lazily loads a source and draws from it.
pub mod recipe_pool;
/// Recipe source traits and built-in sources.
pub mod source;
/// Input transports used by sources (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use config::PoolConfig;
pub use data::CodeRecipe;
pub use errors::PoolError;
pub use markdown::parse_recipe_markdown;
pub use metrics::{CategoryShare, CategorySkew, PoolStats, category_skew};
pub use pool::SamplingPool;
pub use recipe_pool::RecipePool;
pub use source::{InMemorySource, MarkdownAssetSource, MarkdownSourceConfig, RecipeSource};
pub use types::{CategoryId, PathString, SourceId};
