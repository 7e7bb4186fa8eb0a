use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::CodeRecipe;
use crate::types::CategoryId;

/// Running counters for a sampling pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Completed `draw` calls that asked for at least one item.
    pub draws: u64,
    /// Number of times a shuffled copy of the source was appended.
    pub refills: u64,
    /// Items pushed back because they were already collected in the same call.
    pub requeues: u64,
    /// Total items handed out.
    pub dispensed: u64,
    /// Draws whose request exceeded the distinct-value count and were capped.
    pub capped_draws: u64,
    /// Surplus duplicate copies dropped from the queue before a refill.
    pub trimmed: u64,
}

/// Aggregate category skew for a drawn batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySkew {
    pub total: usize,
    pub categories: usize,
    pub min: usize,
    pub max: usize,
    pub max_share: f64,
    pub ratio: f64,
    pub per_category: Vec<CategoryShare>,
}

/// Per-category share of a batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: CategoryId,
    pub count: usize,
    pub share: f64,
}

/// Compute category skew for a batch of recipes.
/// Returns `None` for an empty batch.
pub fn category_skew(batch: &[CodeRecipe]) -> Option<CategorySkew> {
    if batch.is_empty() {
        return None;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for recipe in batch {
        *counts.entry(recipe.category.as_str()).or_default() += 1;
    }
    let total = batch.len();
    let categories = counts.len();
    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);
    let mut per_category: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            share: count as f64 / total as f64,
        })
        .collect();
    per_category.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });
    Some(CategorySkew {
        total,
        categories,
        min,
        max,
        max_share: max as f64 / total as f64,
        ratio: if min == 0 {
            f64::INFINITY
        } else {
            max as f64 / min as f64
        },
        per_category,
    })
}
