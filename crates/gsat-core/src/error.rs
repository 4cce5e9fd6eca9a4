//! Error types for the `gsat-core` crate.
//!
//! Every variant except [`ScoringError::ExchangeabilityViolated`] and
//! [`ScoringError::ArithmeticOverflow`] is an input-validation failure
//! detected before any computation begins. None of them is transient.

use gsat_types::ParseScoreRuleError;

/// Errors that can occur while evaluating a scoring strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// The option count is outside the supported range.
    #[error("option count {requested} is outside the supported range 1..={max}")]
    InvalidOptionCount {
        /// The requested number of options.
        requested: u32,
        /// The largest supported number of options.
        max: u32,
    },

    /// The declared knowledge is self-contradictory or does not fit the
    /// option universe.
    #[error("invalid knowledge constraint: {reason}")]
    InvalidConstraint {
        /// Description of why the constraint was rejected.
        reason: String,
    },

    /// The guess count is negative or exceeds the undetermined options.
    #[error("guess count {requested} is infeasible: only {undetermined} option(s) are undetermined")]
    InfeasibleGuessCount {
        /// The requested guess count.
        requested: i64,
        /// Number of undetermined options available for guessing.
        undetermined: u32,
    },

    /// The rule identifier does not name a known scoring rule.
    #[error("unknown score rule: {0:?}")]
    UnknownScoreRule(String),

    /// The trial count is zero or negative.
    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(i64),

    /// The trial count exceeds the configured ceiling.
    #[error("trial count {requested} exceeds the configured maximum of {max}")]
    TrialCountExceeded {
        /// The requested trial count.
        requested: u32,
        /// The configured maximum.
        max: u32,
    },

    /// A simulation was cancelled between trial batches.
    #[error("simulation cancelled after {completed_trials} trial(s)")]
    Cancelled {
        /// Trials completed before the cancellation was observed.
        completed_trials: u32,
    },

    /// Two guess sets of the same size produced different score
    /// distributions, so no single record can represent the guess count.
    #[error("guess sets of size {guess_count} produced differing score distributions")]
    ExchangeabilityViolated {
        /// The guess count whose guess sets disagreed.
        guess_count: u32,
    },

    /// A counter overflowed while accumulating scores.
    #[error("arithmetic overflow in score accumulation")]
    ArithmeticOverflow,
}

impl From<ParseScoreRuleError> for ScoringError {
    fn from(err: ParseScoreRuleError) -> Self {
        Self::UnknownScoreRule(err.identifier)
    }
}

impl ScoringError {
    /// Shorthand for an [`InvalidConstraint`](Self::InvalidConstraint) error.
    pub fn invalid_constraint(reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            reason: reason.into(),
        }
    }
}
