/// Identifier for the source that produced a recipe collection.
/// Examples: `code_recipes`, `bundled_assets`
pub type SourceId = String;
/// Category label attached to a recipe.
/// Examples: `kotlin`, `algorithms`, `uncategorized`
pub type CategoryId = String;
/// File path strings used in diagnostics and parse errors.
/// Example: `algorithms/binary_search.md`
pub type PathString = String;
