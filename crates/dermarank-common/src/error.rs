//! Engine error types.
//!
//! Load-time reference-data problems are fatal (`Config`); request-level
//! problems abort only the request that raised them. Data-quality issues
//! (unresolved tokens, missing percentages) are collected as warnings in
//! the load report and never surface here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Reference data error: {0}")]
    Config(String),

    #[error("No catalog snapshot loaded")]
    CatalogNotLoaded,

    #[error("No products passed the hard filters")]
    EmptyCatalog,

    #[error("Invalid user profile: {0}")]
    InvalidProfile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
