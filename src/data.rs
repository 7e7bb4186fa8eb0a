use serde::{Deserialize, Serialize};

pub use crate::types::CategoryId;

/// One distributable code recipe entry.
///
/// Identity is full value equality: two recipes with identical fields are the
/// same draw, even when a source lists them more than once.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRecipe {
    /// Human-readable recipe title.
    pub title: String,
    /// Category (language, area, or topic) the recipe belongs to.
    pub category: CategoryId,
    /// Short description shown alongside the title.
    pub description: String,
    /// Full markdown body of the recipe.
    pub body: String,
}

impl CodeRecipe {
    /// Create a recipe from its four fields.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<CategoryId>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            description: description.into(),
            body: body.into(),
        }
    }

    /// Compact `category: title` label for listings and logs.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.category, self.title)
    }
}
