//! dermarank-common — Shared types, errors, and configuration used across all dermarank crates.

pub mod config;
pub mod entities;
pub mod error;

// Re-export commonly used types
pub use config::{ConcentrationConfig, EngineConfig};
pub use entities::{
    ActiveIngredientProfile, CanonicalIngredient, CatalogFile, ConcentrationClass, ConcernScore,
    EstimateSource, IngredientContribution, IngredientEntry, IrritationFlag, Product,
    RawProductRecord, ScoredProduct, Severity, SkinType, UserProfile,
};
pub use error::{EngineError, Result};
