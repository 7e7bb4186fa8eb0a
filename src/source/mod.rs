//! Recipe source interfaces.
//!
//! A `RecipeSource` supplies the full recipe collection in one call. The pool
//! calls it at most once per owner and caches the result for its lifetime.

use std::sync::Arc;

use crate::constants::pool::IN_MEMORY_SOURCE_ID;
use crate::data::CodeRecipe;
use crate::errors::PoolError;
use crate::types::SourceId;

/// Markdown asset directory source.
pub mod markdown_assets;

pub use markdown_assets::{MarkdownAssetSource, MarkdownSourceConfig};

/// Pool-facing recipe source interface.
pub trait RecipeSource: Send + Sync {
    /// Stable source identifier used in logs and seed derivation.
    fn id(&self) -> &str;
    /// Load the complete recipe collection.
    ///
    /// Called once per pool owner. Duplicate values are allowed.
    fn load_all(&self) -> Result<Vec<CodeRecipe>, PoolError>;
}

/// In-memory recipe source for tests and small collections.
pub struct InMemorySource {
    id: SourceId,
    recipes: Arc<Vec<CodeRecipe>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt recipes.
    pub fn new(id: impl Into<SourceId>, recipes: Vec<CodeRecipe>) -> Self {
        Self {
            id: id.into(),
            recipes: Arc::new(recipes),
        }
    }

    /// Create an in-memory source with the default id.
    pub fn from_recipes(recipes: Vec<CodeRecipe>) -> Self {
        Self::new(IN_MEMORY_SOURCE_ID, recipes)
    }
}

impl RecipeSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load_all(&self) -> Result<Vec<CodeRecipe>, PoolError> {
        Ok(self.recipes.as_ref().clone())
    }
}
