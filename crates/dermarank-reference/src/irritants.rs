//! Known-irritant registry: single ingredients plus co-occurrence rules.

use std::collections::HashSet;

use dermarank_common::{EngineError, Result, Severity};
use serde::{Deserialize, Serialize};

use crate::registry::IngredientRegistry;

/// A single ingredient flagged as a potential irritant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrritantEntry {
    pub key: String,
    pub severity: Severity,
}

/// A combination whose joint presence elevates risk, e.g. retinol with
/// an exfoliating acid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationRule {
    pub keys: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IrritantRegistry {
    #[serde(default)]
    pub irritants: Vec<IrritantEntry>,
    #[serde(default)]
    pub combinations: Vec<CombinationRule>,
}

impl IrritantRegistry {
    /// Fatal if an entry references an unknown ingredient, the same key is
    /// flagged twice, or a combination rule has fewer than two members.
    pub fn validate(&self, registry: &IngredientRegistry) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.irritants {
            if !registry.contains_key(&entry.key) {
                return Err(EngineError::Config(format!(
                    "irritant entry references unknown ingredient '{}'",
                    entry.key
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(EngineError::Config(format!(
                    "ingredient '{}' flagged as irritant more than once",
                    entry.key
                )));
            }
        }
        for rule in &self.combinations {
            if rule.keys.len() < 2 {
                return Err(EngineError::Config(
                    "combination rule needs at least two ingredients".to_string(),
                ));
            }
            for key in &rule.keys {
                if !registry.contains_key(key) {
                    return Err(EngineError::Config(format!(
                        "combination rule references unknown ingredient '{key}'"
                    )));
                }
            }
        }
        Ok(())
    }
}
