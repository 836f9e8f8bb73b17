//! Concentration multipliers and the shared rank-decay weight.

use dermarank_common::ConcentrationClass;
use serde::{Deserialize, Serialize};

/// Multiplier applied to an ingredient's rank weight per concentration
/// class. `high` is also the normalisation ceiling, so it must dominate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub trace: f64,
    pub unknown: f64,
}

impl Default for ConcentrationWeights {
    fn default() -> Self {
        Self {
            high:    1.0,
            medium:  0.7,
            low:     0.4,
            trace:   0.15,
            unknown: 0.3,
        }
    }
}

impl ConcentrationWeights {
    pub fn multiplier(&self, class: ConcentrationClass) -> f64 {
        match class {
            ConcentrationClass::High    => self.high,
            ConcentrationClass::Medium  => self.medium,
            ConcentrationClass::Low     => self.low,
            ConcentrationClass::Trace   => self.trace,
            ConcentrationClass::Unknown => self.unknown,
        }
    }

    /// All multipliers must be positive and none may exceed `high`.
    pub fn validate(&self) -> bool {
        let all = [self.high, self.medium, self.low, self.trace, self.unknown];
        all.iter().all(|w| *w > 0.0 && *w <= self.high)
    }
}

/// Rank-decay weight 1/(1+index). Used both for an ingredient's rank in a
/// concern's effectiveness table and for a concern's position in the
/// user's priority list, so both follow the same convention.
pub fn rank_weight(index: usize) -> f64 {
    1.0 / (1.0 + index as f64)
}
