//! Score accumulation for exact and simulated evaluations.
//!
//! [`ScoreTally`] counts how often each score occurs and derives exact
//! moments from the integer counts. [`Welford`] keeps a numerically stable
//! running mean and variance for long simulations.

use std::collections::BTreeMap;

use gsat_types::{EvaluationMode, ScoreRecord, ScoreRuleId};

use crate::error::ScoringError;

/// Frequency table of scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTally {
    counts: BTreeMap<u32, u32>,
    total: u32,
}

impl ScoreTally {
    /// An empty tally.
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `score`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::ArithmeticOverflow`] if a counter overflows.
    pub fn record(&mut self, score: u32) -> Result<(), ScoringError> {
        let count = self.counts.entry(score).or_insert(0);
        *count = count.checked_add(1).ok_or(ScoringError::ArithmeticOverflow)?;
        self.total = self
            .total
            .checked_add(1)
            .ok_or(ScoringError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Number of recorded scores.
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Occurrences per score.
    pub const fn counts(&self) -> &BTreeMap<u32, u32> {
        &self.counts
    }

    /// Mean score, or `0.0` for an empty tally.
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .map(|(&score, &count)| f64::from(score) * f64::from(count))
            .sum();
        weighted / f64::from(self.total)
    }

    /// Population standard deviation, or `0.0` for an empty tally.
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let squared: f64 = self
            .counts
            .iter()
            .map(|(&score, &count)| {
                let deviation = f64::from(score) - mean;
                deviation * deviation * f64::from(count)
            })
            .sum();
        (squared / f64::from(self.total)).sqrt()
    }

    /// Relative frequency of each score.
    pub fn distribution(&self) -> BTreeMap<u32, f64> {
        if self.total == 0 {
            return BTreeMap::new();
        }
        let total = f64::from(self.total);
        self.counts
            .iter()
            .map(|(&score, &count)| (score, f64::from(count) / total))
            .collect()
    }
}

/// Running mean and variance (Welford's online algorithm).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Welford {
    count: u32,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// An empty accumulator.
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one observation into the running moments.
    pub fn push(&mut self, value: f64) {
        self.count = self.count.saturating_add(1);
        let delta = value - self.mean;
        self.mean += delta / f64::from(self.count);
        self.m2 += delta * (value - self.mean);
    }

    /// Number of observations.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Running mean.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / f64::from(self.count)).max(0.0)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Identity fields shared by every record of one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    /// Number of guessed options.
    pub guess_count: u32,
    /// Known-correct options plus guesses.
    pub total_selected: u32,
    /// Scoring rule.
    pub rule: ScoreRuleId,
}

impl Strategy {
    /// Assemble a record from externally computed moments.
    pub(crate) fn record(
        self,
        mode: EvaluationMode,
        sample_size: u32,
        mean: f64,
        std_dev: f64,
        distribution: BTreeMap<u32, f64>,
    ) -> ScoreRecord {
        ScoreRecord {
            guess_count: self.guess_count,
            total_selected: self.total_selected,
            rule: self.rule,
            mode,
            sample_size,
            mean,
            std_dev,
            distribution,
        }
    }

    /// Assemble an exact record from a tally.
    pub(crate) fn exact_record(self, tally: &ScoreTally) -> ScoreRecord {
        self.record(
            EvaluationMode::Exact,
            tally.total(),
            tally.mean(),
            tally.std_dev(),
            tally.distribution(),
        )
    }
}
