//! The immutable reference bundle threaded through every component call.
//!
//! Loading is transactional: any inconsistency rejects the whole bundle
//! with a Config error, so callers keep serving their last good snapshot.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use dermarank_common::{CanonicalIngredient, EngineError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::concerns::ConcernTable;
use crate::irritants::IrritantRegistry;
use crate::registry::{IngredientRegistry, IngredientResolver};

/// Raw reference document shape as authored by the curation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub ingredients: Vec<CanonicalIngredient>,
    pub actives: Vec<String>,
    pub concerns: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub irritants: IrritantRegistry,
}

/// Validated reference bundle. Immutable after construction.
pub struct ReferenceBundle {
    ingredients: IngredientRegistry,
    actives: HashSet<String>,
    concerns: ConcernTable,
    irritants: IrritantRegistry,
}

impl ReferenceBundle {
    pub fn from_data(data: ReferenceData) -> Result<Self> {
        let ingredients = IngredientRegistry::build(data.ingredients)?;

        let mut actives: HashSet<String> = HashSet::new();
        for key in data.actives {
            if !ingredients.contains_key(&key) {
                return Err(EngineError::Config(format!(
                    "active registry references unknown ingredient '{key}'"
                )));
            }
            actives.insert(key);
        }

        let concerns = ConcernTable::new(data.concerns);
        concerns.validate(&ingredients)?;
        data.irritants.validate(&ingredients)?;

        info!(
            "reference bundle loaded: {} ingredients, {} actives, {} concerns, {} irritant rules",
            ingredients.len(),
            actives.len(),
            concerns.len(),
            data.irritants.irritants.len() + data.irritants.combinations.len()
        );

        Ok(Self {
            ingredients,
            actives,
            concerns,
            irritants: data.irritants,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let data: ReferenceData = serde_json::from_str(raw)?;
        Self::from_data(data)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn ingredients(&self) -> &IngredientRegistry {
        &self.ingredients
    }

    pub fn resolver(&self) -> &dyn IngredientResolver {
        &self.ingredients
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.actives.contains(key)
    }

    pub fn concerns(&self) -> &ConcernTable {
        &self.concerns
    }

    pub fn irritants(&self) -> &IrritantRegistry {
        &self.irritants
    }

    /// Best-effort suggestion for an unknown concern name, by
    /// case-insensitive containment either way. Used to enrich request
    /// errors, never to silently rewrite a request.
    pub fn suggest_concern(&self, unknown: &str) -> Option<&str> {
        let needle = unknown.to_lowercase();
        self.concerns.names().find(|known| {
            let known_lower = known.to_lowercase();
            known_lower.contains(&needle) || needle.contains(&known_lower)
        })
    }
}

/// Load canonical ingredients from a curated CSV sheet with header
/// `key,name,aliases`, aliases '|'-separated.
pub fn ingredients_from_csv(raw: &str) -> Result<Vec<CanonicalIngredient>> {
    #[derive(Debug, Deserialize)]
    struct Row {
        key: String,
        name: String,
        #[serde(default)]
        aliases: String,
    }

    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    let mut ingredients = Vec::new();
    for row in reader.deserialize::<Row>() {
        let row = row.map_err(|e| EngineError::Config(format!("ingredient csv: {e}")))?;
        let aliases = row
            .aliases
            .split('|')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(String::from)
            .collect();
        ingredients.push(CanonicalIngredient {
            key: row.key,
            name: row.name,
            aliases,
        });
    }
    Ok(ingredients)
}
