/// Core entity types shared across the engine.
/// Reference entities are built once at load time and treated as immutable;
/// request inputs and scored outputs are transient.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical ingredient (reference entity)
// ---------------------------------------------------------------------------

/// The deduplicated, alias-resolved identity of a raw ingredient-list token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalIngredient {
    /// Stable identifier, e.g. "niacinamide"
    pub key: String,
    /// Human-readable name, e.g. "Niacinamide"
    pub name: String,
    /// Known synonyms used for matching, e.g. ["vitamin b3", "nicotinamide"]
    #[serde(default)]
    pub aliases: Vec<String>,
}

// ---------------------------------------------------------------------------
// Per-product ingredient occurrences
// ---------------------------------------------------------------------------

/// One resolved occurrence in a product's ingredient list.
///
/// `position` is the raw source-order index (0 = first listed, typically
/// highest concentration). Positions are never renumbered around tokens
/// that failed to resolve, so gaps are expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub key: String,
    pub position: usize,
    /// Disclosed percentage in [0, 100], when the label states one.
    pub disclosed_pct: Option<f64>,
}

/// Bucketed concentration estimate for an active ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationClass {
    High,
    Medium,
    Low,
    Trace,
    Unknown,
}

impl ConcentrationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcentrationClass::High    => "high",
            ConcentrationClass::Medium  => "medium",
            ConcentrationClass::Low     => "low",
            ConcentrationClass::Trace   => "trace",
            ConcentrationClass::Unknown => "unknown",
        }
    }
}

/// Where a concentration estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    Disclosed,
    Inferred,
}

/// Per-product, per-active-ingredient concentration profile.
/// Recomputed whenever the owning product's ingredient list changes
/// (in practice: on every catalog load, products are rebuilt wholesale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveIngredientProfile {
    pub key: String,
    pub position: usize,
    pub class: ConcentrationClass,
    pub disclosed_pct: Option<f64>,
    pub source: EstimateSource,
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Skin-type suitability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Normal,
    Dry,
    Oily,
    Combination,
    Sensitive,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Normal      => "normal",
            SkinType::Dry         => "dry",
            SkinType::Oily        => "oily",
            SkinType::Combination => "combination",
            SkinType::Sensitive   => "sensitive",
        }
    }
}

/// A catalog product with its resolved ingredient list and derived
/// active-ingredient profiles. Immutable for the lifetime of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    /// Suitability tags. An empty set means suitable for all skin types.
    pub skin_types: Vec<SkinType>,
    /// Resolved entries in source order.
    pub ingredients: Vec<IngredientEntry>,
    /// Derived active profiles, in source order.
    pub actives: Vec<ActiveIngredientProfile>,
}

impl Product {
    /// Hard skin-type filter check.
    pub fn suits(&self, skin_type: SkinType) -> bool {
        self.skin_types.is_empty() || self.skin_types.contains(&skin_type)
    }
}

/// Raw product record as delivered by the catalog source (scraper output).
/// The ingredient list is still a free-text string at this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub skin_types: Vec<SkinType>,
    pub ingredients: String,
}

/// Top-level shape of a scraped catalog file: `{"products": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<RawProductRecord>,
}

// ---------------------------------------------------------------------------
// Request input
// ---------------------------------------------------------------------------

/// Transient per-request profile. Concerns are priority-ordered, most
/// important first; earlier concerns carry more weight in ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub concerns: Vec<String>,
    pub skin_type: SkinType,
    /// Budget ceiling; products priced above it are excluded outright.
    pub budget: f64,
}

// ---------------------------------------------------------------------------
// Scored output
// ---------------------------------------------------------------------------

/// Irritation severity, ordered so that `High` sorts above `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A safety flag attached to a scored product. Flags never alter the
/// numeric score; ranking and safety are reported separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IrritationFlag {
    /// A single known-irritant ingredient is present.
    SingleIngredient { key: String, severity: Severity },
    /// Every member of a co-occurrence rule is present.
    Combination { keys: Vec<String>, severity: Severity },
}

impl IrritationFlag {
    pub fn severity(&self) -> Severity {
        match self {
            IrritationFlag::SingleIngredient { severity, .. } => *severity,
            IrritationFlag::Combination { severity, .. } => *severity,
        }
    }
}

/// One active ingredient's contribution to a concern score, kept for
/// rationale reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientContribution {
    pub key: String,
    /// Rank index in the concern's effectiveness table (0 = most effective).
    pub rank: usize,
    pub class: ConcentrationClass,
    /// Raw contribution, pre-normalisation.
    pub contribution: f64,
}

/// A product's effectiveness score against a single concern, in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcernScore {
    pub concern: String,
    pub score: f64,
    /// Top contributing actives by raw contribution magnitude.
    pub top_contributors: Vec<IngredientContribution>,
}

/// Final ranked result item. Created per request, discarded after response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub combined_score: f64,
    pub concern_scores: Vec<ConcernScore>,
    pub flags: Vec<IrritationFlag>,
}

impl ScoredProduct {
    /// Number of high-severity flags; used as a ranking tie-breaker.
    pub fn high_severity_flags(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| f.severity() == Severity::High)
            .count()
    }
}
