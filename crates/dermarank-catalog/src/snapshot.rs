//! Catalog snapshot construction.
//!
//! A snapshot pairs the product catalog with the exact reference bundle it
//! was built against, so a request can never observe products from one
//! generation with registries from another.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dermarank_common::{EngineConfig, Product, RawProductRecord, Result};
use dermarank_reference::ReferenceBundle;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::classifier::classify_actives;
use crate::concentration::estimate_profiles;
use crate::normalizer::normalize_ingredient_list;

/// An unresolved token, attributed to the product it came from.
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedIngredient {
    pub product_id: String,
    pub position: usize,
    pub token: String,
}

/// Data-quality summary for one catalog load. Warnings only — a report is
/// produced even for a perfectly clean load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub snapshot_id: Uuid,
    pub product_count: usize,
    pub unresolved: Vec<UnresolvedIngredient>,
    /// Actives whose concentration had to be inferred from list position.
    pub inferred_estimates: usize,
    /// Actives whose disclosed percentage was unusable.
    pub unknown_estimates: usize,
}

/// An immutable view of the catalog plus the reference data it was scored
/// against. Shared read-only across concurrent requests.
pub struct CatalogSnapshot {
    pub id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub reference: Arc<ReferenceBundle>,
    pub products: Vec<Product>,
    pub report: LoadReport,
}

/// Build a full snapshot off to the side. Publishing it is the caller's
/// concern (see `CatalogStore`).
pub fn build_snapshot(
    records: &[RawProductRecord],
    reference: Arc<ReferenceBundle>,
    config: &EngineConfig,
) -> Result<CatalogSnapshot> {
    let snapshot_id = Uuid::new_v4();
    let mut products = Vec::with_capacity(records.len());
    let mut unresolved = Vec::new();
    let mut inferred_estimates = 0usize;
    let mut unknown_estimates = 0usize;

    for record in records {
        let normalized = normalize_ingredient_list(&record.ingredients, reference.resolver());
        for token in normalized.unresolved {
            unresolved.push(UnresolvedIngredient {
                product_id: record.id.clone(),
                position: token.position,
                token: token.token,
            });
        }

        let actives = classify_actives(&normalized.entries, &reference);
        let profiles = estimate_profiles(&actives, &config.concentration);
        inferred_estimates += profiles
            .iter()
            .filter(|p| p.source == dermarank_common::EstimateSource::Inferred)
            .count();
        unknown_estimates += profiles
            .iter()
            .filter(|p| p.class == dermarank_common::ConcentrationClass::Unknown)
            .count();

        products.push(Product {
            id: record.id.clone(),
            name: record.name.clone(),
            brand: record.brand.clone(),
            price: record.price,
            skin_types: record.skin_types.clone(),
            ingredients: normalized.entries,
            actives: profiles,
        });
    }

    let report = LoadReport {
        snapshot_id,
        product_count: products.len(),
        unresolved,
        inferred_estimates,
        unknown_estimates,
    };

    info!(
        "catalog snapshot {snapshot_id} built: {} products, {} unresolved tokens",
        report.product_count,
        report.unresolved.len()
    );

    Ok(CatalogSnapshot {
        id: snapshot_id,
        loaded_at: Utc::now(),
        reference,
        products,
        report,
    })
}
