//! dermarank-catalog — Catalog build pipeline: raw product records are
//! normalized, classified, concentration-annotated, and assembled into an
//! immutable snapshot published by atomic swap.

pub mod classifier;
pub mod concentration;
pub mod normalizer;
pub mod snapshot;
pub mod store;

pub use normalizer::{normalize_ingredient_list, NormalizedIngredients, UnresolvedToken};
pub use snapshot::{build_snapshot, CatalogSnapshot, LoadReport, UnresolvedIngredient};
pub use store::CatalogStore;
