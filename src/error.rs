//! Error types for codesieve
//!
//! Only caller mistakes surface here. Conditions such as "no syntax nodes",
//! "no matching ancestor" or "span out of bounds" degrade to empty grains
//! and never become errors.

use thiserror::Error;

use crate::tree_sitter::TreeSitterError;

#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Allowed parent node types should not be empty")]
    EmptyAncestorKinds,

    #[error("`{0}` is not an accepted distance function")]
    UnknownDistance(String),

    #[error("`{0}` is not a supported granularity")]
    UnknownGranularity(String),

    #[error("Level must be a positive integer, got {0}")]
    InvalidLevel(usize),

    #[error("Cannot pick a closest node from an empty candidate list")]
    NoCandidates,

    #[error(transparent)]
    TreeSitter(#[from] TreeSitterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
