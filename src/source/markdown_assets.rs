use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::markdown::{DEFAULT_CATEGORY, SKIP_INVALID_MSG};
use crate::constants::pool::MARKDOWN_SOURCE_ID;
use crate::data::CodeRecipe;
use crate::errors::PoolError;
use crate::markdown::parse_recipe_markdown;
use crate::source::RecipeSource;
use crate::transport::fs::{FileStream, top_level_dir};
use crate::types::{CategoryId, SourceId};
use crate::utils::title_from_stem;

/// Configuration for a markdown asset directory source.
#[derive(Clone, Debug)]
pub struct MarkdownSourceConfig {
    /// Stable source identifier used in logs and seed derivation.
    pub source_id: SourceId,
    /// Root directory containing recipe documents.
    pub root: PathBuf,
    /// Whether to follow symlinks while walking the root.
    pub follow_links: bool,
    /// Category used when neither front matter nor directory names one.
    pub default_category: CategoryId,
    /// Whether file-stem titles replace `_` and `-` with spaces.
    pub title_replace_separators: bool,
}

impl MarkdownSourceConfig {
    /// Create a config for `root` with the default source id.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            source_id: MARKDOWN_SOURCE_ID.to_string(),
            root: root.into(),
            follow_links: true,
            default_category: DEFAULT_CATEGORY.to_string(),
            title_replace_separators: true,
        }
    }

    /// Override the source id.
    pub fn with_source_id(mut self, source_id: impl Into<SourceId>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Override whether symlinks are followed during the walk.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Override the fallback category.
    pub fn with_default_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Set whether file-stem titles replace separators with spaces.
    pub fn with_title_replace_separators(mut self, replace: bool) -> Self {
        self.title_replace_separators = replace;
        self
    }
}

/// Recipe source backed by a directory of markdown documents.
///
/// Category defaults to the first directory below the root, so
/// `assets/kotlin/debounce.md` lands in `kotlin` unless front matter says otherwise.
pub struct MarkdownAssetSource {
    config: MarkdownSourceConfig,
}

impl MarkdownAssetSource {
    /// Create a source from configuration.
    pub fn new(config: MarkdownSourceConfig) -> Self {
        Self { config }
    }

    fn build_recipe(&self, path: &Path) -> Result<CodeRecipe, PoolError> {
        let text = std::fs::read_to_string(path)?;
        let display = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let fallback_title = title_from_stem(path, self.config.title_replace_separators);
        let fallback_category = top_level_dir(&self.config.root, path)
            .unwrap_or_else(|| self.config.default_category.clone());
        parse_recipe_markdown(&display, &text, &fallback_title, &fallback_category)
    }
}

impl RecipeSource for MarkdownAssetSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn load_all(&self) -> Result<Vec<CodeRecipe>, PoolError> {
        let files = FileStream::new(&self.config.root)
            .with_follow_symlinks(self.config.follow_links)
            .markdown_files()
            .map_err(|err| PoolError::SourceUnavailable {
                source_id: self.config.source_id.clone(),
                reason: err.to_string(),
            })?;
        let mut recipes = Vec::with_capacity(files.len());
        for path in &files {
            match self.build_recipe(path) {
                Ok(recipe) => recipes.push(recipe),
                Err(err) => {
                    warn!(
                        source_id = %self.config.source_id,
                        path = %path.display(),
                        error = %err,
                        "{SKIP_INVALID_MSG}"
                    );
                }
            }
        }
        debug!(
            source_id = %self.config.source_id,
            files = files.len(),
            loaded = recipes.len(),
            "loaded markdown recipes"
        );
        Ok(recipes)
    }
}
