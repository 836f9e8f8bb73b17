//! Irritation flagging.
//!
//! Irritation is a property of the product, not of the product/concern
//! pair: flags are computed from the active set alone and attached to the
//! scored result without touching the numeric score, so callers can choose
//! to exclude or merely warn.

use std::collections::HashSet;

use dermarank_common::{ActiveIngredientProfile, IrritationFlag};
use dermarank_reference::IrritantRegistry;

/// One flag per matched single-ingredient irritant, plus one per
/// co-occurrence rule whose full ingredient set is present.
pub fn flag_irritants(
    actives: &[ActiveIngredientProfile],
    registry: &IrritantRegistry,
) -> Vec<IrritationFlag> {
    let present: HashSet<&str> = actives.iter().map(|p| p.key.as_str()).collect();
    let mut flags = Vec::new();

    for entry in &registry.irritants {
        if present.contains(entry.key.as_str()) {
            flags.push(IrritationFlag::SingleIngredient {
                key: entry.key.clone(),
                severity: entry.severity,
            });
        }
    }

    for rule in &registry.combinations {
        if rule.keys.iter().all(|key| present.contains(key.as_str())) {
            flags.push(IrritationFlag::Combination {
                keys: rule.keys.clone(),
                severity: rule.severity,
            });
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use dermarank_common::{ConcentrationClass, EstimateSource, Severity};
    use dermarank_test_utils::sample_bundle;

    fn profile(key: &str) -> ActiveIngredientProfile {
        ActiveIngredientProfile {
            key: key.into(),
            position: 0,
            class: ConcentrationClass::Medium,
            disclosed_pct: None,
            source: EstimateSource::Inferred,
        }
    }

    #[test]
    fn test_single_irritant_flagged() {
        let bundle = sample_bundle();
        let flags = flag_irritants(&[profile("retinol")], bundle.irritants());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity(), Severity::Medium);
    }

    #[test]
    fn test_combination_needs_full_set() {
        let bundle = sample_bundle();

        // retinol alone: only the single-ingredient flag
        let partial = flag_irritants(&[profile("retinol")], bundle.irritants());
        assert_eq!(partial.len(), 1);

        // retinol + glycolic acid: single flag plus the combination rule
        let full = flag_irritants(
            &[profile("retinol"), profile("glycolic-acid")],
            bundle.irritants(),
        );
        assert_eq!(full.len(), 2);
        assert!(full
            .iter()
            .any(|f| matches!(f, IrritationFlag::Combination { severity: Severity::High, .. })));
    }

    #[test]
    fn test_clean_product_has_no_flags() {
        let bundle = sample_bundle();
        let flags = flag_irritants(&[profile("glycerin"), profile("squalane")], bundle.irritants());
        assert!(flags.is_empty());
    }
}
