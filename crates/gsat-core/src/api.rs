//! Entry points called by the UI layer.
//!
//! Inputs are plain counts, as a form would submit them: `x` known-correct
//! options, `y` known-incorrect options, `z` guesses, and a trial count.
//! The first `x` option labels are the known-correct ones, the next `y`
//! the known-incorrect ones. Negative or oversized counts are rejected
//! with a typed [`ScoringError`] before any computation starts.

use gsat_types::{ScoreRecord, ScoreRuleId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::constraint::KnowledgeConstraint;
use crate::error::ScoringError;
use crate::exact::ExactEvaluator;
use crate::monte_carlo::MonteCarloEvaluator;

/// Validate `x` and `y` and build the constraint they describe.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidConstraint`] for negative counts or
/// `x + y` beyond the option count.
pub fn constraint_from_counts(
    x: i64,
    y: i64,
    config: &ScoringConfig,
) -> Result<KnowledgeConstraint, ScoringError> {
    let to_count = |name: &str, value: i64| {
        u32::try_from(value).map_err(|err| {
            ScoringError::invalid_constraint(format!(
                "{name} must be a non-negative count, got {value} ({err})"
            ))
        })
    };
    KnowledgeConstraint::from_counts(
        config.scoring.option_count,
        to_count("x", x)?,
        to_count("y", y)?,
    )
}

/// Validate a guess count against the undetermined options.
///
/// # Errors
///
/// Returns [`ScoringError::InfeasibleGuessCount`] if `z` is negative or
/// exceeds `undetermined`.
pub fn guess_count(z: i64, undetermined: u32) -> Result<u32, ScoringError> {
    u32::try_from(z)
        .ok()
        .filter(|&count| count <= undetermined)
        .ok_or(ScoringError::InfeasibleGuessCount {
            requested: z,
            undetermined,
        })
}

/// Validate a trial count against the configured ceiling.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidTrialCount`] for zero or negative counts
/// and [`ScoringError::TrialCountExceeded`] above the ceiling.
pub fn trial_count(trials: i64, config: &ScoringConfig) -> Result<u32, ScoringError> {
    if trials <= 0 {
        return Err(ScoringError::InvalidTrialCount(trials));
    }
    let max = config.simulation.max_trial_count;
    match u32::try_from(trials) {
        Ok(t) if t <= max => Ok(t),
        Ok(t) => Err(ScoringError::TrialCountExceeded { requested: t, max }),
        Err(_) => Err(ScoringError::TrialCountExceeded {
            requested: u32::MAX,
            max,
        }),
    }
}

/// A fresh random source: seeded for reproducible runs, otherwise drawn
/// from OS entropy. Each call owns its generator, so concurrent sessions
/// never share random state.
pub fn rng_for(seed: Option<u64>) -> SmallRng {
    seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64)
}

/// Exact records for every feasible guess count.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidConstraint`] for invalid `x`/`y`.
pub fn evaluate_all(
    x: i64,
    y: i64,
    rule: ScoreRuleId,
    config: &ScoringConfig,
) -> Result<Vec<ScoreRecord>, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    debug!(x, y, %rule, "Evaluating all guess counts");
    ExactEvaluator::new(&constraint)?.evaluate_all(rule)
}

/// Exact record for a single guess count.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidConstraint`] for invalid `x`/`y` or
/// [`ScoringError::InfeasibleGuessCount`] for invalid `z`.
pub fn evaluate(
    x: i64,
    y: i64,
    z: i64,
    rule: ScoreRuleId,
    config: &ScoringConfig,
) -> Result<ScoreRecord, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    let z = guess_count(z, constraint.undetermined().len())?;
    ExactEvaluator::new(&constraint)?.evaluate(z, rule)
}

/// Simulated record for one strategy, using a fresh random source.
///
/// # Errors
///
/// Returns the validation errors of [`constraint_from_counts`],
/// [`guess_count`], and [`trial_count`].
pub fn simulate(
    x: i64,
    y: i64,
    z: i64,
    rule: ScoreRuleId,
    trials: i64,
    seed: Option<u64>,
    config: &ScoringConfig,
) -> Result<ScoreRecord, ScoringError> {
    simulate_with_rng(x, y, z, rule, trials, config, &mut rng_for(seed))
}

/// Simulated record for one strategy, drawing from `rng`.
///
/// # Errors
///
/// Same as [`simulate`].
pub fn simulate_with_rng<R: Rng>(
    x: i64,
    y: i64,
    z: i64,
    rule: ScoreRuleId,
    trials: i64,
    config: &ScoringConfig,
    rng: &mut R,
) -> Result<ScoreRecord, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    let z = guess_count(z, constraint.undetermined().len())?;
    let trials = trial_count(trials, config)?;
    debug!(x, y, z, %rule, trials, "Simulating strategy");
    MonteCarloEvaluator::new(
        constraint,
        config.simulation.max_trial_count,
        config.simulation.batch_size,
    )
    .simulate(z, rule, trials, rng)
}
