//! Catalog ranking.
//!
//! Hard filters first (budget, skin type — pass/fail, no partial credit),
//! then per-concern scoring combined with rank decay over the profile's
//! priority-ordered concerns, then a deterministic multi-key sort.

use std::cmp::Ordering;

use dermarank_catalog::CatalogSnapshot;
use dermarank_common::{
    ConcernScore, EngineError, Product, Result, ScoredProduct, UserProfile,
};
use tracing::debug;

use crate::irritation::flag_irritants;
use crate::scorer::score_concern;
use crate::weights::{rank_weight, ConcentrationWeights};

/// How many contributing ingredients are reported per concern.
const RATIONALE_TOP_N: usize = 3;

fn validate_profile(profile: &UserProfile, snapshot: &CatalogSnapshot) -> Result<()> {
    if profile.concerns.is_empty() {
        return Err(EngineError::InvalidProfile("concern list is empty".into()));
    }
    if profile.budget <= 0.0 {
        return Err(EngineError::InvalidProfile(format!(
            "budget must be positive, got {}",
            profile.budget
        )));
    }
    for (index, concern) in profile.concerns.iter().enumerate() {
        if profile.concerns[..index].contains(concern) {
            return Err(EngineError::InvalidProfile(format!(
                "concern '{concern}' listed more than once"
            )));
        }
        if !snapshot.reference.concerns().contains(concern) {
            let message = match snapshot.reference.suggest_concern(concern) {
                Some(suggestion) => {
                    format!("unknown concern '{concern}' (did you mean '{suggestion}'?)")
                }
                None => format!("unknown concern '{concern}'"),
            };
            return Err(EngineError::InvalidProfile(message));
        }
    }
    Ok(())
}

fn score_product(
    product: &Product,
    profile: &UserProfile,
    snapshot: &CatalogSnapshot,
    weights: &ConcentrationWeights,
) -> ScoredProduct {
    let mut combined_score = 0.0;
    let mut concern_scores = Vec::with_capacity(profile.concerns.len());

    for (priority, concern) in profile.concerns.iter().enumerate() {
        // validate_profile guarantees the concern exists
        let ranked = snapshot.reference.concerns().ranked(concern).unwrap_or(&[]);
        let (score, mut contributions) = score_concern(&product.actives, ranked, weights);
        combined_score += rank_weight(priority) * score;

        contributions.truncate(RATIONALE_TOP_N);
        concern_scores.push(ConcernScore {
            concern: concern.clone(),
            score,
            top_contributors: contributions,
        });
    }

    ScoredProduct {
        product_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        combined_score,
        concern_scores,
        flags: flag_irritants(&product.actives, snapshot.reference.irritants()),
    }
}

/// Deterministic ordering: combined score descending, then fewer
/// high-severity flags, then lower price, then stable catalog id.
fn compare(a: &ScoredProduct, b: &ScoredProduct) -> Ordering {
    b.combined_score
        .partial_cmp(&a.combined_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.high_severity_flags().cmp(&b.high_severity_flags()))
        .then_with(|| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
        .then_with(|| a.product_id.cmp(&b.product_id))
}

/// Rank the snapshot's catalog against a user profile, returning the
/// top-K scored products.
pub fn rank_catalog(
    snapshot: &CatalogSnapshot,
    profile: &UserProfile,
    top_k: usize,
    weights: &ConcentrationWeights,
) -> Result<Vec<ScoredProduct>> {
    validate_profile(profile, snapshot)?;

    let eligible: Vec<&Product> = snapshot
        .products
        .iter()
        .filter(|p| p.price <= profile.budget && p.suits(profile.skin_type))
        .collect();

    if eligible.is_empty() {
        return Err(EngineError::EmptyCatalog);
    }
    debug!(
        "{} of {} products passed hard filters",
        eligible.len(),
        snapshot.products.len()
    );

    let mut scored: Vec<ScoredProduct> = eligible
        .into_iter()
        .map(|product| score_product(product, profile, snapshot, weights))
        .collect();

    scored.sort_by(compare);
    scored.truncate(top_k);
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dermarank_catalog::build_snapshot;
    use dermarank_common::{EngineConfig, SkinType};
    use dermarank_test_utils::{sample_bundle, sample_records};

    fn snapshot() -> CatalogSnapshot {
        build_snapshot(
            &sample_records(),
            Arc::new(sample_bundle()),
            &EngineConfig::default(),
        )
        .unwrap()
    }

    fn profile(concerns: &[&str], skin_type: SkinType, budget: f64) -> UserProfile {
        UserProfile {
            concerns: concerns.iter().map(|c| c.to_string()).collect(),
            skin_type,
            budget,
        }
    }

    #[test]
    fn test_budget_is_a_hard_filter() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["acne", "dryness"], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        )
        .unwrap();
        // p2 ($35) and p3 ($48) are over budget regardless of score
        assert!(result.iter().all(|s| s.price <= 30.0));
    }

    #[test]
    fn test_skin_type_is_a_hard_filter() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["dryness"], SkinType::Dry, 100.0),
            10,
            &Default::default(),
        )
        .unwrap();
        // p1 is tagged oily/combination only
        assert!(result.iter().all(|s| s.product_id != "p1"));
    }

    #[test]
    fn test_all_filtered_is_an_error() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["acne"], SkinType::Normal, 1.0),
            10,
            &Default::default(),
        );
        assert!(matches!(result, Err(EngineError::EmptyCatalog)));
    }

    #[test]
    fn test_all_failing_skin_type_is_an_error() {
        let mut records = sample_records();
        for record in &mut records {
            record.skin_types = vec![SkinType::Dry];
        }
        let snapshot = build_snapshot(
            &records,
            Arc::new(sample_bundle()),
            &EngineConfig::default(),
        )
        .unwrap();
        let result = rank_catalog(
            &snapshot,
            &profile(&["acne"], SkinType::Oily, 100.0),
            10,
            &Default::default(),
        );
        assert!(matches!(result, Err(EngineError::EmptyCatalog)));
    }

    #[test]
    fn test_empty_concern_list_rejected() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&[], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidProfile(_))));
    }

    #[test]
    fn test_unknown_concern_rejected_with_suggestion() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["bad acne"], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        );
        match result {
            Err(EngineError::InvalidProfile(message)) => {
                assert!(message.contains("did you mean 'acne'"), "{message}");
            }
            other => panic!("expected InvalidProfile, got {other:?}"),
        }
    }

    #[test]
    fn test_priority_order_weights_concerns() {
        let snapshot = snapshot();
        // p1 is the acne product, p4 only carries glycerin (dryness).
        let acne_first = rank_catalog(
            &snapshot,
            &profile(&["acne", "dryness"], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        )
        .unwrap();
        assert_eq!(acne_first[0].product_id, "p1");

        let dryness_first = rank_catalog(
            &snapshot,
            &profile(&["dryness", "acne"], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        )
        .unwrap();
        // p1 still wins overall (it scores on both concerns), but its
        // combined score must drop when acne is deprioritized.
        let p1_acne_first = acne_first.iter().find(|s| s.product_id == "p1").unwrap();
        let p1_dryness_first = dryness_first.iter().find(|s| s.product_id == "p1").unwrap();
        assert!(p1_acne_first.combined_score > p1_dryness_first.combined_score);
    }

    #[test]
    fn test_zero_score_products_still_listed() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["acne"], SkinType::Normal, 30.0),
            10,
            &Default::default(),
        )
        .unwrap();
        // p4 has no acne-relevant actives: scored 0, included, ranked last
        let p4 = result.iter().find(|s| s.product_id == "p4").unwrap();
        assert_eq!(p4.combined_score, 0.0);
        assert_eq!(result.last().unwrap().product_id, "p4");
    }

    #[test]
    fn test_rationale_limited_to_top_three() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["dryness"], SkinType::Dry, 100.0),
            10,
            &Default::default(),
        )
        .unwrap();
        for scored in &result {
            for concern in &scored.concern_scores {
                assert!(concern.top_contributors.len() <= 3);
            }
        }
        // p2 carries all three dryness actives
        let p2 = result.iter().find(|s| s.product_id == "p2").unwrap();
        assert_eq!(p2.concern_scores[0].top_contributors.len(), 3);
    }

    #[test]
    fn test_deterministic_output() {
        let snapshot = snapshot();
        let request = profile(&["acne", "dryness"], SkinType::Normal, 100.0);
        let first = rank_catalog(&snapshot, &request, 10, &Default::default()).unwrap();
        let second = rank_catalog(&snapshot, &request, 10, &Default::default()).unwrap();
        let ids = |result: &[ScoredProduct]| {
            result.iter().map(|s| s.product_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_flags_do_not_change_score() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["aging"], SkinType::Normal, 100.0),
            10,
            &Default::default(),
        )
        .unwrap();
        let p3 = result.iter().find(|s| s.product_id == "p3").unwrap();
        assert!(!p3.flags.is_empty());
        // Combined score is exactly the rank-decayed sum of concern scores.
        let recomputed: f64 = p3
            .concern_scores
            .iter()
            .enumerate()
            .map(|(i, c)| rank_weight(i) * c.score)
            .sum();
        assert!((p3.combined_score - recomputed).abs() < 1e-12);
    }

    #[test]
    fn test_top_k_truncation() {
        let snapshot = snapshot();
        let result = rank_catalog(
            &snapshot,
            &profile(&["dryness"], SkinType::Normal, 100.0),
            2,
            &Default::default(),
        )
        .unwrap();
        assert_eq!(result.len(), 2);
    }
}
