//! Concentration estimation.
//!
//! Disclosed percentages are used directly; otherwise the estimate is
//! inferred from list position, since ingredient lists are disclosed in
//! descending concentration order.

use dermarank_common::{
    ActiveIngredientProfile, ConcentrationClass, ConcentrationConfig, EstimateSource,
    IngredientEntry,
};
use tracing::warn;

/// Class for a disclosed percentage already known to be in [0, 100].
pub fn class_from_pct(pct: f64, config: &ConcentrationConfig) -> ConcentrationClass {
    if pct >= config.high_pct {
        ConcentrationClass::High
    } else if pct >= config.medium_pct {
        ConcentrationClass::Medium
    } else if pct >= config.low_pct {
        ConcentrationClass::Low
    } else {
        ConcentrationClass::Trace
    }
}

/// Class inferred from relative rank r = index / active_count.
/// A single-active product has r = 0 and always buckets High.
pub fn class_from_rank(
    index: usize,
    active_count: usize,
    config: &ConcentrationConfig,
) -> ConcentrationClass {
    let r = index as f64 / active_count as f64;
    if r < config.high_rank {
        ConcentrationClass::High
    } else if r < config.medium_rank {
        ConcentrationClass::Medium
    } else if r < config.low_rank {
        ConcentrationClass::Low
    } else {
        ConcentrationClass::Trace
    }
}

/// Annotate each active entry with a concentration estimate.
///
/// Entries arrive in source order; the stable sort keeps the
/// earliest-declared entry first if upstream data ever repeats a position.
pub fn estimate_profiles(
    actives: &[IngredientEntry],
    config: &ConcentrationConfig,
) -> Vec<ActiveIngredientProfile> {
    let mut ordered: Vec<&IngredientEntry> = actives.iter().collect();
    ordered.sort_by_key(|entry| entry.position);

    let active_count = ordered.len();
    ordered
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.disclosed_pct {
            Some(pct) if (0.0..=100.0).contains(&pct) => ActiveIngredientProfile {
                key: entry.key.clone(),
                position: entry.position,
                class: class_from_pct(pct, config),
                disclosed_pct: Some(pct),
                source: EstimateSource::Disclosed,
            },
            Some(pct) => {
                warn!("'{}' discloses out-of-range percentage {pct}", entry.key);
                ActiveIngredientProfile {
                    key: entry.key.clone(),
                    position: entry.position,
                    class: ConcentrationClass::Unknown,
                    disclosed_pct: None,
                    source: EstimateSource::Disclosed,
                }
            }
            None => ActiveIngredientProfile {
                key: entry.key.clone(),
                position: entry.position,
                class: class_from_rank(index, active_count, config),
                disclosed_pct: None,
                source: EstimateSource::Inferred,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ConcentrationConfig {
        ConcentrationConfig::default()
    }

    fn entry(key: &str, position: usize, pct: Option<f64>) -> IngredientEntry {
        IngredientEntry {
            key: key.into(),
            position,
            disclosed_pct: pct,
        }
    }

    #[test]
    fn test_disclosed_percentage_wins() {
        let profiles = estimate_profiles(&[entry("niacinamide", 5, Some(10.0))], &config());
        assert_eq!(profiles[0].class, ConcentrationClass::High);
        assert_eq!(profiles[0].source, EstimateSource::Disclosed);
        assert_eq!(profiles[0].disclosed_pct, Some(10.0));
    }

    #[test]
    fn test_disclosed_bucket_thresholds() {
        let c = config();
        assert_eq!(class_from_pct(10.0, &c), ConcentrationClass::High);
        assert_eq!(class_from_pct(5.0, &c), ConcentrationClass::Medium);
        assert_eq!(class_from_pct(1.0, &c), ConcentrationClass::Low);
        assert_eq!(class_from_pct(0.1, &c), ConcentrationClass::Trace);
    }

    #[test]
    fn test_single_active_buckets_high() {
        let profiles = estimate_profiles(&[entry("retinol", 7, None)], &config());
        assert_eq!(profiles[0].class, ConcentrationClass::High);
        assert_eq!(profiles[0].source, EstimateSource::Inferred);
    }

    #[test]
    fn test_positional_buckets_monotonic() {
        let actives: Vec<IngredientEntry> =
            (0..10).map(|i| entry(&format!("a{i}"), i, None)).collect();
        let profiles = estimate_profiles(&actives, &config());

        fn weight_rank(class: ConcentrationClass) -> usize {
            match class {
                ConcentrationClass::High => 4,
                ConcentrationClass::Medium => 3,
                ConcentrationClass::Low => 2,
                ConcentrationClass::Trace => 1,
                ConcentrationClass::Unknown => 0,
            }
        }

        for pair in profiles.windows(2) {
            assert!(weight_rank(pair[0].class) >= weight_rank(pair[1].class));
        }
        assert_eq!(profiles[0].class, ConcentrationClass::High);
        assert_eq!(profiles[9].class, ConcentrationClass::Trace);
    }

    #[test]
    fn test_out_of_range_disclosure_is_unknown() {
        let profiles = estimate_profiles(&[entry("niacinamide", 0, Some(140.0))], &config());
        assert_eq!(profiles[0].class, ConcentrationClass::Unknown);
        assert_eq!(profiles[0].disclosed_pct, None);
    }

    #[test]
    fn test_repeated_position_keeps_declaration_order() {
        // Upstream invariant violation: two entries at position 3.
        let profiles = estimate_profiles(
            &[entry("first", 3, None), entry("second", 3, None), entry("third", 9, None)],
            &config(),
        );
        assert_eq!(profiles[0].key, "first");
        assert_eq!(profiles[1].key, "second");
    }
}
