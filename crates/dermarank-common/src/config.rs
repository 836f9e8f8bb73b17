//! Engine tuning configuration.
//! Reads dermarank.toml from a caller-supplied path; every field has a
//! default so an absent or partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub concentration: ConcentrationConfig,
}

/// Thresholds for turning disclosed percentages and list positions into
/// concentration classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationConfig {
    /// Disclosed percentage at or above which an active is High.
    #[serde(default = "default_high_pct")]
    pub high_pct: f64,
    #[serde(default = "default_medium_pct")]
    pub medium_pct: f64,
    #[serde(default = "default_low_pct")]
    pub low_pct: f64,

    /// Relative-rank boundary below which an inferred active is High.
    #[serde(default = "default_high_rank")]
    pub high_rank: f64,
    #[serde(default = "default_medium_rank")]
    pub medium_rank: f64,
    #[serde(default = "default_low_rank")]
    pub low_rank: f64,
}

fn default_high_pct()    -> f64 { 10.0 }
fn default_medium_pct()  -> f64 { 3.0 }
fn default_low_pct()     -> f64 { 0.5 }
fn default_high_rank()   -> f64 { 0.2 }
fn default_medium_rank() -> f64 { 0.5 }
fn default_low_rank()    -> f64 { 0.8 }

impl Default for ConcentrationConfig {
    fn default() -> Self {
        Self {
            high_pct:    default_high_pct(),
            medium_pct:  default_medium_pct(),
            low_pct:     default_low_pct(),
            high_rank:   default_high_rank(),
            medium_rank: default_medium_rank(),
            low_rank:    default_low_rank(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(raw).map_err(|e| EngineError::Config(format!("engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Thresholds must be strictly ordered or classification is ambiguous.
    pub fn validate(&self) -> Result<()> {
        let c = &self.concentration;
        if !(c.high_pct > c.medium_pct && c.medium_pct > c.low_pct && c.low_pct > 0.0) {
            return Err(EngineError::Config(format!(
                "disclosed thresholds must satisfy high > medium > low > 0, got {} / {} / {}",
                c.high_pct, c.medium_pct, c.low_pct
            )));
        }
        if !(c.high_rank > 0.0 && c.high_rank < c.medium_rank && c.medium_rank < c.low_rank && c.low_rank <= 1.0)
        {
            return Err(EngineError::Config(format!(
                "rank buckets must satisfy 0 < high < medium < low <= 1, got {} / {} / {}",
                c.high_rank, c.medium_rank, c.low_rank
            )));
        }
        Ok(())
    }
}
