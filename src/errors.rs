use std::io;

use thiserror::Error;

use crate::types::{PathString, SourceId};

/// Error type for recipe loading, parsing, and configuration failures.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("recipe source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error("invalid recipe document '{path}': {reason}")]
    InvalidRecipe { path: PathString, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
