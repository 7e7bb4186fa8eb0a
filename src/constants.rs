/// Constants used by markdown recipe parsing and asset discovery.
pub mod markdown {
    /// Line that opens and closes a front matter block.
    pub const FRONT_MATTER_DELIMITER: &str = "---";
    /// Separator between a front matter key and its value.
    pub const FRONT_MATTER_KEY_DELIMITER: char = ':';
    /// Front matter key holding the recipe title.
    pub const KEY_TITLE: &str = "title";
    /// Front matter key holding the recipe category.
    pub const KEY_CATEGORY: &str = "category";
    /// Front matter key holding the one-line recipe description.
    pub const KEY_DESCRIPTION: &str = "description";
    /// Prefix marking a top-level markdown heading.
    pub const HEADING_PREFIX: &str = "# ";
    /// Prefix marking a fenced code block boundary.
    pub const CODE_FENCE: &str = "```";
    /// File extension (without dot) of recipe documents.
    pub const MARKDOWN_EXTENSION: &str = "md";
    /// Category assigned when neither front matter nor directory layout names one.
    pub const DEFAULT_CATEGORY: &str = "uncategorized";
    /// Warning emitted when a single recipe document is skipped.
    pub const SKIP_INVALID_MSG: &str = "skipping unreadable recipe document";
}

/// Constants used by the sampling pool runtime.
pub mod pool {
    /// Source id used by `InMemorySource` when none is provided.
    pub const IN_MEMORY_SOURCE_ID: &str = "in_memory";
    /// Source id used by the bundled markdown asset source.
    pub const MARKDOWN_SOURCE_ID: &str = "code_recipes";
}

/// Constants used by the demo runner.
pub mod demo {
    /// Default number of recipes drawn per round.
    pub const DEFAULT_DRAW_COUNT: usize = 3;
    /// Default number of draw rounds.
    pub const DEFAULT_ROUNDS: usize = 3;
    /// Environment variable used to filter demo log output.
    pub const LOG_FILTER_ENV: &str = "RECIPE_POOL_LOG";
}
