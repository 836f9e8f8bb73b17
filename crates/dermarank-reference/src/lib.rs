//! dermarank-reference — Immutable reference data: canonical ingredient
//! registry with alias resolution, active-ingredient registry, concern
//! effectiveness tables, and the irritant registry.
//!
//! Loaded once, validated transactionally, then shared read-only across all
//! requests as a single bundle.

pub mod bundle;
pub mod concerns;
pub mod irritants;
pub mod registry;

pub use bundle::{ingredients_from_csv, ReferenceBundle, ReferenceData};
pub use concerns::ConcernTable;
pub use irritants::{CombinationRule, IrritantEntry, IrritantRegistry};
pub use registry::{normalize_token, IngredientRegistry, IngredientResolver, MockResolver};
