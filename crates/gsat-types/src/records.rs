//! Result records produced by the scoring engine.
//!
//! Records are created fresh for every evaluation and never mutated
//! afterwards, except through [`ScoreRecord::rounded`], which returns a
//! new presentation copy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EvaluationMode, ScoreRuleId};

/// Score statistics for one guessing strategy under one scoring rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoreRecord {
    /// Number of undetermined options guessed as correct (`z`).
    pub guess_count: u32,
    /// Size of the full selection: known-correct options plus guesses.
    pub total_selected: u32,
    /// The scoring rule the statistics were computed under.
    pub rule: ScoreRuleId,
    /// Whether the statistics are exact or simulated.
    pub mode: EvaluationMode,
    /// Worlds enumerated (exact) or trials drawn (simulated).
    pub sample_size: u32,
    /// Expected (or average) score.
    pub mean: f64,
    /// Population standard deviation of the score.
    pub std_dev: f64,
    /// Probability (or relative frequency) of each attainable score.
    pub distribution: BTreeMap<u32, f64>,
}

impl ScoreRecord {
    /// Sum of all distribution probabilities; `1.0` up to float error.
    pub fn total_probability(&self) -> f64 {
        self.distribution.values().sum()
    }

    /// Return a copy with mean, deviation, and probabilities rounded to
    /// `places` decimal places (half away from zero).
    #[must_use]
    pub fn rounded(&self, places: u8) -> Self {
        Self {
            mean: round_to(self.mean, places),
            std_dev: round_to(self.std_dev, places),
            distribution: self
                .distribution
                .iter()
                .map(|(&score, &p)| (score, round_to(p, places)))
                .collect(),
            ..self.clone()
        }
    }
}

/// One row of the all-rules strategy table: a guess count and the exact
/// record for every scoring rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StrategyRow {
    /// Number of undetermined options guessed as correct.
    pub guess_count: u32,
    /// Size of the full selection.
    pub total_selected: u32,
    /// Exact record per rule.
    pub records: BTreeMap<ScoreRuleId, ScoreRecord>,
}

impl StrategyRow {
    /// Return a copy with every record rounded to `places` decimal places.
    #[must_use]
    pub fn rounded(&self, places: u8) -> Self {
        Self {
            records: self
                .records
                .iter()
                .map(|(&rule, record)| (rule, record.rounded(places)))
                .collect(),
            ..self.clone()
        }
    }
}

/// A simulated record placed next to its theoretical counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationComparison {
    /// Exact record for the strategy.
    pub theoretical: ScoreRecord,
    /// Simulated record for the same strategy.
    pub simulated: ScoreRecord,
    /// `simulated.mean - theoretical.mean`.
    pub mean_difference: f64,
}

impl SimulationComparison {
    /// Return a copy with every number rounded to `places` decimal places.
    #[must_use]
    pub fn rounded(&self, places: u8) -> Self {
        Self {
            theoretical: self.theoretical.rounded(places),
            simulated: self.simulated.rounded(places),
            mean_difference: round_to(self.mean_difference, places),
        }
    }
}

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(places));
    (value * factor).round() / factor
}
