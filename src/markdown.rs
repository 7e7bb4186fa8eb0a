//! Parsing of markdown recipe documents.
//!
//! A document may open with a front matter block:
//!
//! ```text
//! ---
//! title: Binary search
//! category: algorithms
//! description: Find a value in a sorted slice.
//! ---
//! # Binary search
//! ...
//! ```
//!
//! Fields missing from the front matter fall back to the first `# ` heading,
//! the first prose paragraph, and caller-provided defaults.

use crate::constants::markdown::{
    CODE_FENCE, FRONT_MATTER_DELIMITER, FRONT_MATTER_KEY_DELIMITER, HEADING_PREFIX, KEY_CATEGORY,
    KEY_DESCRIPTION, KEY_TITLE,
};
use crate::data::CodeRecipe;
use crate::errors::PoolError;
use crate::utils::{normalize_inline_whitespace, strip_quotes};

/// Values found in a front matter block.
#[derive(Debug, Default, PartialEq, Eq)]
struct FrontMatter {
    title: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

/// Parse one recipe document.
///
/// `path` is only used for error messages. `fallback_title` and
/// `fallback_category` fill fields the document does not provide.
pub fn parse_recipe_markdown(
    path: &str,
    text: &str,
    fallback_title: &str,
    fallback_category: &str,
) -> Result<CodeRecipe, PoolError> {
    let (front, body) = split_front_matter(path, text)?;
    let body = body.trim();
    if body.is_empty() {
        return Err(PoolError::InvalidRecipe {
            path: path.to_string(),
            reason: "recipe body is empty".into(),
        });
    }

    let title = front
        .title
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| fallback_title.to_string());
    if title.is_empty() {
        return Err(PoolError::InvalidRecipe {
            path: path.to_string(),
            reason: "recipe has no title".into(),
        });
    }
    let category = front
        .category
        .unwrap_or_else(|| fallback_category.to_string());
    let description = front
        .description
        .or_else(|| first_paragraph(body))
        .unwrap_or_default();

    Ok(CodeRecipe::new(title, category, description, body))
}

fn split_front_matter<'a>(path: &str, text: &'a str) -> Result<(FrontMatter, &'a str), PoolError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((FrontMatter::default(), text));
    };
    if first.trim() != FRONT_MATTER_DELIMITER {
        return Ok((FrontMatter::default(), text));
    }

    let mut front = FrontMatter::default();
    let mut consumed = first.len();
    for line in lines {
        consumed += line.len();
        let trimmed = line.trim();
        if trimmed == FRONT_MATTER_DELIMITER {
            return Ok((front, &text[consumed..]));
        }
        let Some((key, value)) = trimmed.split_once(FRONT_MATTER_KEY_DELIMITER) else {
            continue;
        };
        let value = normalize_inline_whitespace(strip_quotes(value));
        if value.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            KEY_TITLE => front.title = Some(value),
            KEY_CATEGORY => front.category = Some(value),
            KEY_DESCRIPTION => front.description = Some(value),
            _ => {}
        }
    }
    Err(PoolError::InvalidRecipe {
        path: path.to_string(),
        reason: "front matter is not closed".into(),
    })
}

fn first_heading(body: &str) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(CODE_FENCE) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix(HEADING_PREFIX) {
            let heading = normalize_inline_whitespace(heading);
            if !heading.is_empty() {
                return Some(heading);
            }
        }
    }
    None
}

fn first_paragraph(body: &str) -> Option<String> {
    let mut in_fence = false;
    let mut paragraph: Vec<&str> = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(CODE_FENCE) {
            in_fence = !in_fence;
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        if in_fence {
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        paragraph.push(trimmed);
    }
    let joined = normalize_inline_whitespace(paragraph.join(" "));
    (!joined.is_empty()).then_some(joined)
}
