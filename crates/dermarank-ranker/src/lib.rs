//! dermarank-ranker — Concern scoring, irritation flagging, and catalog
//! ranking, plus the `Engine` facade exposing the core's contract:
//! load-then-recommend over an atomically swapped snapshot.

pub mod engine;
pub mod irritation;
pub mod ranker;
pub mod scorer;
pub mod weights;

pub use engine::Engine;
pub use irritation::flag_irritants;
pub use ranker::rank_catalog;
pub use scorer::score_concern;
pub use weights::{rank_weight, ConcentrationWeights};
