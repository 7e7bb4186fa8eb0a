//! Text normalization helpers shared by recipe parsing and sources.

use std::path::Path;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Human-readable title derived from a file stem.
///
/// `binary_search-iterative.md` becomes `binary search iterative` when
/// `replace_separators` is set.
pub fn title_from_stem(path: &Path, replace_separators: bool) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    if replace_separators {
        normalize_inline_whitespace(stem.replace(['_', '-'], " "))
    } else {
        normalize_inline_whitespace(stem)
    }
}

/// Strip one layer of matching single or double quotes.
pub fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
