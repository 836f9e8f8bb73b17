//! Canonical ingredient registry with precomputed alias index.
//!
//! Matching policy is centralized here: a raw token resolves iff its
//! normalized form is in the index. No string-similarity guessing at
//! runtime — the index is a plain hash map built once at load.

use std::collections::HashMap;

use dermarank_common::{CanonicalIngredient, EngineError, Result};
use tracing::info;

/// Normalize a token or alias for index lookup: lower-case, punctuation
/// collapsed to spaces, whitespace runs collapsed.
pub fn normalize_token(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alias resolution seam.
///
/// Implementations can use:
/// - The production registry's precomputed alias index
/// - Hardcoded fixtures (testing)
pub trait IngredientResolver: Send + Sync {
    /// Resolve a raw token to a canonical ingredient, or None if unmatched.
    fn resolve(&self, raw: &str) -> Option<&CanonicalIngredient>;
}

/// Ingredient registry with by-key and by-alias lookup.
#[derive(Debug, Clone)]
pub struct IngredientRegistry {
    by_key: HashMap<String, CanonicalIngredient>,
    /// normalized name/alias -> canonical key
    alias_index: HashMap<String, String>,
}

impl IngredientRegistry {
    /// Build the registry and its alias index.
    ///
    /// Fatal if two ingredients share a key, or if one normalized alias
    /// maps to two different canonical keys — either would make matching
    /// ambiguous and non-auditable.
    pub fn build(ingredients: Vec<CanonicalIngredient>) -> Result<Self> {
        let mut by_key: HashMap<String, CanonicalIngredient> = HashMap::new();
        let mut alias_index: HashMap<String, String> = HashMap::new();

        for ingredient in ingredients {
            if by_key.contains_key(&ingredient.key) {
                return Err(EngineError::Config(format!(
                    "duplicate ingredient key: {}",
                    ingredient.key
                )));
            }

            let mut candidates = vec![ingredient.key.clone(), ingredient.name.clone()];
            candidates.extend(ingredient.aliases.iter().cloned());

            for candidate in candidates {
                let normalized = normalize_token(&candidate);
                if normalized.is_empty() {
                    continue;
                }
                match alias_index.get(&normalized) {
                    Some(existing) if existing != &ingredient.key => {
                        return Err(EngineError::Config(format!(
                            "alias '{}' maps to both '{}' and '{}'",
                            normalized, existing, ingredient.key
                        )));
                    }
                    _ => {
                        alias_index.insert(normalized, ingredient.key.clone());
                    }
                }
            }

            by_key.insert(ingredient.key.clone(), ingredient);
        }

        info!(
            "ingredient registry loaded: {} ingredients, {} alias entries",
            by_key.len(),
            alias_index.len()
        );

        Ok(Self { by_key, alias_index })
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalIngredient> {
        self.by_key.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl IngredientResolver for IngredientRegistry {
    fn resolve(&self, raw: &str) -> Option<&CanonicalIngredient> {
        let key = self.alias_index.get(&normalize_token(raw))?;
        self.by_key.get(key)
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock resolver with hardcoded entries for unit tests.
pub struct MockResolver {
    entries: Vec<CanonicalIngredient>,
    index: HashMap<String, usize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a canonical ingredient resolvable by its key, name, and aliases.
    pub fn with(mut self, key: &str, name: &str, aliases: &[&str]) -> Self {
        let idx = self.entries.len();
        self.index.insert(normalize_token(key), idx);
        self.index.insert(normalize_token(name), idx);
        for alias in aliases {
            self.index.insert(normalize_token(alias), idx);
        }
        self.entries.push(CanonicalIngredient {
            key: key.to_string(),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientResolver for MockResolver {
    fn resolve(&self, raw: &str) -> Option<&CanonicalIngredient> {
        self.index
            .get(&normalize_token(raw))
            .map(|&idx| &self.entries[idx])
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn niacinamide() -> CanonicalIngredient {
        CanonicalIngredient {
            key: "niacinamide".into(),
            name: "Niacinamide".into(),
            aliases: vec!["Vitamin B3".into(), "Nicotinamide".into()],
        }
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("  Salicylic   Acid "), "salicylic acid");
        assert_eq!(normalize_token("Beta-Glucan"), "beta glucan");
        assert_eq!(normalize_token("Vitamin C (Ascorbic Acid)"), "vitamin c ascorbic acid");
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let registry = IngredientRegistry::build(vec![niacinamide()]).unwrap();
        assert_eq!(registry.resolve("NIACINAMIDE").unwrap().key, "niacinamide");
        assert_eq!(registry.resolve("vitamin b3").unwrap().key, "niacinamide");
        assert!(registry.resolve("retinol").is_none());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = IngredientRegistry::build(vec![niacinamide(), niacinamide()]);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_conflicting_alias_rejected() {
        let other = CanonicalIngredient {
            key: "nicotinamide-riboside".into(),
            name: "Nicotinamide Riboside".into(),
            aliases: vec!["Vitamin B3".into()], // collides with niacinamide
        };
        let result = IngredientRegistry::build(vec![niacinamide(), other]);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_mock_resolver() {
        let resolver = MockResolver::new().with("glycerin", "Glycerin", &["glycerol"]);
        assert!(resolver.resolve("Glycerol").is_some());
        assert!(resolver.resolve("squalane").is_none());
    }
}
