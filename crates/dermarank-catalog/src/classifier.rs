//! Active-ingredient classification.
//!
//! Binary and registry-driven: an ingredient is active iff its canonical
//! key is in the active registry. No fuzzy matching here — the matching
//! policy lives entirely in the alias index, keeping classification
//! auditable. Unknown ingredients are inactive, not errors.

use std::collections::HashSet;

use dermarank_common::IngredientEntry;
use dermarank_reference::ReferenceBundle;

/// Filter resolved entries down to actives, preserving source order.
/// If an active key occurs twice in one list, the earliest occurrence
/// (highest declared concentration) wins.
pub fn classify_actives(
    entries: &[IngredientEntry],
    bundle: &ReferenceBundle,
) -> Vec<IngredientEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    entries
        .iter()
        .filter(|entry| bundle.is_active(&entry.key) && seen.insert(entry.key.as_str()))
        .cloned()
        .collect()
}
