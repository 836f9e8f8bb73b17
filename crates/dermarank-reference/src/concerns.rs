//! Concern effectiveness tables.
//!
//! Each concern maps to an ordered list of canonical ingredient keys,
//! most-to-least effective. Order is significant: it defines relative
//! weight downstream.

use std::collections::{BTreeMap, HashSet};

use dermarank_common::{EngineError, Result};
use serde::{Deserialize, Serialize};

use crate::registry::IngredientRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcernTable {
    concerns: BTreeMap<String, Vec<String>>,
}

impl ConcernTable {
    pub fn new(concerns: BTreeMap<String, Vec<String>>) -> Self {
        Self { concerns }
    }

    /// The ranked ingredient keys for a concern, most effective first.
    pub fn ranked(&self, concern: &str) -> Option<&[String]> {
        self.concerns.get(concern).map(|keys| keys.as_slice())
    }

    pub fn contains(&self, concern: &str) -> bool {
        self.concerns.contains_key(concern)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concerns.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.concerns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concerns.is_empty()
    }

    /// Fatal if a concern list repeats an ingredient (ambiguous rank) or
    /// references a key missing from the registry.
    pub fn validate(&self, registry: &IngredientRegistry) -> Result<()> {
        for (concern, keys) in &self.concerns {
            if keys.is_empty() {
                return Err(EngineError::Config(format!(
                    "concern '{concern}' has an empty effectiveness list"
                )));
            }
            let mut seen: HashSet<&str> = HashSet::new();
            for key in keys {
                if !seen.insert(key.as_str()) {
                    return Err(EngineError::Config(format!(
                        "concern '{concern}' lists ingredient '{key}' more than once"
                    )));
                }
                if !registry.contains_key(key) {
                    return Err(EngineError::Config(format!(
                        "concern '{concern}' references unknown ingredient '{key}'"
                    )));
                }
            }
        }
        Ok(())
    }
}
