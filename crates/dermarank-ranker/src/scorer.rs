//! Per-concern effectiveness scoring.
//!
//! A rank-weighted overlap between the product's active-ingredient set and
//! the concern's ranked relevance list — not text similarity: two products
//! with no ingredient-string overlap can share canonical actives, and vice
//! versa.

use std::collections::HashMap;

use dermarank_common::{ActiveIngredientProfile, IngredientContribution};

use crate::weights::{rank_weight, ConcentrationWeights};

/// Score a product's actives against one concern's ranked ingredient list.
///
/// Each active present in the list contributes
/// `1/(1+rank) × multiplier(class)`. The sum is normalised by the maximum
/// attainable single-ingredient score (top rank at high concentration) and
/// clamped to [0, 1]. A product with zero qualifying actives scores
/// exactly 0 — a valid terminal case, not an error.
///
/// Returns the score and all contributions, largest first.
pub fn score_concern(
    actives: &[ActiveIngredientProfile],
    ranked: &[String],
    weights: &ConcentrationWeights,
) -> (f64, Vec<IngredientContribution>) {
    let rank_by_key: HashMap<&str, usize> = ranked
        .iter()
        .enumerate()
        .map(|(rank, key)| (key.as_str(), rank))
        .collect();

    let mut contributions: Vec<IngredientContribution> = actives
        .iter()
        .filter_map(|profile| {
            let rank = *rank_by_key.get(profile.key.as_str())?;
            Some(IngredientContribution {
                key: profile.key.clone(),
                rank,
                class: profile.class,
                contribution: rank_weight(rank) * weights.multiplier(profile.class),
            })
        })
        .collect();

    contributions.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.rank.cmp(&b.rank))
            .then_with(|| a.key.cmp(&b.key))
    });

    let max_single = rank_weight(0) * weights.high;
    let raw: f64 = contributions.iter().map(|c| c.contribution).sum();
    let score = (raw / max_single).clamp(0.0, 1.0);

    (score, contributions)
}
