//! Strategy comparison across rules and evaluation modes.
//!
//! - [`strategy_table`] -- exact records for every rule and guess count
//! - [`best_guess_count`] -- the guess count with the highest expected score
//! - [`compare`] -- a simulated record next to its exact counterpart
//! - [`compare_all`] -- the same for every rule, over shared sampled keys

use std::collections::BTreeMap;

use gsat_types::{ScoreRecord, ScoreRuleId, SimulationComparison, StrategyRow};

use crate::api::{constraint_from_counts, guess_count, rng_for, trial_count};
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::exact::ExactEvaluator;
use crate::monte_carlo::MonteCarloEvaluator;

/// Means closer than this are treated as tied.
const MEAN_TIE_TOLERANCE: f64 = 1e-12;

/// Exact records for every rule, one row per feasible guess count.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidConstraint`] for invalid `x`/`y`.
pub fn strategy_table(
    x: i64,
    y: i64,
    config: &ScoringConfig,
) -> Result<Vec<StrategyRow>, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    let evaluator = ExactEvaluator::new(&constraint)?;
    (0..=evaluator.undetermined_count())
        .map(|z| -> Result<StrategyRow, ScoringError> {
            let records = ScoreRuleId::ALL
                .iter()
                .map(|&rule| evaluator.evaluate(z, rule).map(|r| (rule, r)))
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            Ok(StrategyRow {
                guess_count: z,
                total_selected: constraint.known_correct().len().saturating_add(z),
                records,
            })
        })
        .collect()
}

/// Guess count with the highest mean; ties go to the fewer guesses.
///
/// Returns `None` for an empty slice.
pub fn best_guess_count(records: &[ScoreRecord]) -> Option<u32> {
    records
        .iter()
        .fold(None::<&ScoreRecord>, |best, record| match best {
            Some(b) if record.mean <= b.mean + MEAN_TIE_TOLERANCE => Some(b),
            _ => Some(record),
        })
        .map(|r| r.guess_count)
}

/// Best guess count per rule across a strategy table.
pub fn best_guess_counts(rows: &[StrategyRow]) -> BTreeMap<ScoreRuleId, u32> {
    ScoreRuleId::ALL
        .iter()
        .filter_map(|&rule| {
            let records: Vec<ScoreRecord> = rows
                .iter()
                .filter_map(|row| row.records.get(&rule).cloned())
                .collect();
            best_guess_count(&records).map(|z| (rule, z))
        })
        .collect()
}

/// Run the exact and simulated evaluators on the same strategy.
///
/// # Errors
///
/// Returns the validation errors of the exact and simulated entry points.
pub fn compare(
    x: i64,
    y: i64,
    z: i64,
    rule: ScoreRuleId,
    trials: i64,
    seed: Option<u64>,
    config: &ScoringConfig,
) -> Result<SimulationComparison, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    let z = guess_count(z, constraint.undetermined().len())?;
    let trials = trial_count(trials, config)?;

    let theoretical = ExactEvaluator::new(&constraint)?.evaluate(z, rule)?;
    let simulated = MonteCarloEvaluator::new(
        constraint,
        config.simulation.max_trial_count,
        config.simulation.batch_size,
    )
    .simulate(z, rule, trials, &mut rng_for(seed))?;

    let mean_difference = simulated.mean - theoretical.mean;
    Ok(SimulationComparison {
        theoretical,
        simulated,
        mean_difference,
    })
}

/// Run the exact and simulated evaluators for every rule.
///
/// The simulation scores all rules against one stream of sampled keys.
///
/// # Errors
///
/// Returns the validation errors of [`compare`].
pub fn compare_all(
    x: i64,
    y: i64,
    z: i64,
    trials: i64,
    seed: Option<u64>,
    config: &ScoringConfig,
) -> Result<BTreeMap<ScoreRuleId, SimulationComparison>, ScoringError> {
    let constraint = constraint_from_counts(x, y, config)?;
    let z = guess_count(z, constraint.undetermined().len())?;
    let trials = trial_count(trials, config)?;

    let exact = ExactEvaluator::new(&constraint)?;
    let mut simulated = MonteCarloEvaluator::new(
        constraint,
        config.simulation.max_trial_count,
        config.simulation.batch_size,
    )
    .simulate_rules(z, &ScoreRuleId::ALL, trials, &mut rng_for(seed))?;

    ScoreRuleId::ALL
        .iter()
        .filter_map(|rule| simulated.remove_entry(rule))
        .map(|(rule, simulated)| -> Result<_, ScoringError> {
            let theoretical = exact.evaluate(z, rule)?;
            let mean_difference = simulated.mean - theoretical.mean;
            Ok((
                rule,
                SimulationComparison {
                    theoretical,
                    simulated,
                    mean_difference,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    #[test]
    fn table_has_a_row_per_guess_count_and_a_record_per_rule() {
        let rows = strategy_table(1, 1, &ScoringConfig::default()).unwrap();
        assert_eq!(rows.len(), 4);
        for (z, row) in rows.iter().enumerate() {
            assert_eq!(row.guess_count as usize, z);
            assert_eq!(row.total_selected as usize, 1 + z);
            assert_eq!(row.records.len(), 3);
        }
    }

    #[test]
    fn best_guess_count_with_no_knowledge() {
        let rows = strategy_table(0, 0, &ScoringConfig::default()).unwrap();
        let best = best_guess_counts(&rows);
        // Custom keeps rising with every guess; GSAT first peaks at three
        // guesses; Strict is flat from the first guess on.
        assert_eq!(best.get(&ScoreRuleId::Custom), Some(&5));
        assert_eq!(best.get(&ScoreRuleId::GsatStandard), Some(&3));
        assert_eq!(best.get(&ScoreRuleId::Strict), Some(&1));
    }

    #[test]
    fn best_guess_count_of_nothing_is_none() {
        assert_eq!(best_guess_count(&[]), None);
    }

    #[test]
    fn flat_means_prefer_fewest_guesses() {
        let records = ExactEvaluator::new(
            &crate::constraint::KnowledgeConstraint::from_counts(5, 2, 0).unwrap(),
        )
        .unwrap()
        .evaluate_all(ScoreRuleId::Custom)
        .unwrap();
        assert_eq!(best_guess_count(&records), Some(0));
    }

    #[test]
    fn all_rule_comparison_matches_single_rule_comparisons() {
        let config = ScoringConfig::default();
        let all = compare_all(0, 0, 3, 50_000, Some(2024), &config).unwrap();
        assert_eq!(all.len(), ScoreRuleId::ALL.len());
        for rule in ScoreRuleId::ALL {
            let single = compare(0, 0, 3, rule, 50_000, Some(2024), &config).unwrap();
            assert_eq!(all.get(&rule), Some(&single));
        }
        let gsat = all.get(&ScoreRuleId::GsatStandard).unwrap();
        assert!((gsat.theoretical.mean - 30.0 / 31.0).abs() < 1e-9);
        assert!(gsat.mean_difference.abs() < 0.03);
    }

    #[test]
    fn all_rule_comparison_validates_inputs() {
        let config = ScoringConfig::default();
        assert!(matches!(
            compare_all(2, 0, 4, 1_000, Some(1), &config),
            Err(ScoringError::InfeasibleGuessCount { .. })
        ));
        assert!(matches!(
            compare_all(0, 0, 1, 0, Some(1), &config),
            Err(ScoringError::InvalidTrialCount(0))
        ));
    }

    #[test]
    fn comparison_difference_is_small_for_many_trials() {
        let comparison = compare(
            0,
            2,
            2,
            ScoreRuleId::GsatStandard,
            200_000,
            Some(17),
            &ScoringConfig::default(),
        )
        .unwrap();
        assert!((comparison.theoretical.mean - 2.285_714).abs() < 1e-6);
        assert!(comparison.mean_difference.abs() < 0.01);
        assert!(
            (comparison.mean_difference
                - (comparison.simulated.mean - comparison.theoretical.mean))
                .abs()
                < 1e-12
        );
    }
}
