//! Engine facade — the core's exposed contract.
//!
//! `load_catalog` validates reference data and builds the snapshot fully
//! off to the side before publishing it; a failed load leaves the last
//! good snapshot serving. `recommend` pins one snapshot for the whole
//! request, so concurrent refreshes are invisible to it.

use std::sync::Arc;

use dermarank_catalog::{build_snapshot, CatalogSnapshot, CatalogStore, LoadReport};
use dermarank_common::{
    EngineConfig, EngineError, RawProductRecord, Result, ScoredProduct, UserProfile,
};
use dermarank_reference::{ReferenceBundle, ReferenceData};
use tracing::info;

use crate::ranker::rank_catalog;
use crate::weights::ConcentrationWeights;

pub struct Engine {
    config: EngineConfig,
    weights: ConcentrationWeights,
    store: CatalogStore,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            weights: ConcentrationWeights::default(),
            store: CatalogStore::new(),
        }
    }

    pub fn with_config(config: EngineConfig, weights: ConcentrationWeights) -> Result<Self> {
        config.validate()?;
        if !weights.validate() {
            return Err(EngineError::Config(
                "concentration multipliers must be positive and bounded by 'high'".into(),
            ));
        }
        Ok(Self {
            config,
            weights,
            store: CatalogStore::new(),
        })
    }

    /// Load (or refresh) the catalog against freshly validated reference
    /// data. Malformed reference data rejects the whole load.
    pub fn load_catalog(
        &self,
        records: &[RawProductRecord],
        reference: ReferenceData,
    ) -> Result<LoadReport> {
        let bundle = Arc::new(ReferenceBundle::from_data(reference)?);
        let snapshot = build_snapshot(records, bundle, &self.config)?;
        let report = snapshot.report.clone();
        info!("publishing catalog snapshot {}", snapshot.id);
        self.store.publish(snapshot);
        Ok(report)
    }

    /// Rank the current catalog against a user profile.
    pub fn recommend(&self, profile: &UserProfile, top_k: usize) -> Result<Vec<ScoredProduct>> {
        let snapshot = self.store.current().ok_or(EngineError::CatalogNotLoaded)?;
        rank_catalog(&snapshot, profile, top_k, &self.weights)
    }

    /// The currently published snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.store.current()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
