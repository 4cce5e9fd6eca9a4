//! Startup summary of the theoretical strategy table.
//!
//! Logs one line per guess count for the no-knowledge case under the
//! configured option count, so a misconfigured deployment is visible in
//! the logs before the first request arrives.

use gsat_core::{ScoringConfig, ScoringError, best_guess_counts, strategy_table};
use gsat_types::ScoreRuleId;
use tracing::info;

/// Log the exact table for `x = 0`, `y = 0`.
///
/// # Errors
///
/// Propagates any [`ScoringError`] from the evaluation.
pub fn log_baseline(config: &ScoringConfig) -> Result<(), ScoringError> {
    let rows = strategy_table(0, 0, config)?;
    let precision = config.display.precision;

    for row in &rows {
        let row = row.rounded(precision);
        let mean = |rule: ScoreRuleId| row.records.get(&rule).map_or(0.0, |r| r.mean);
        info!(
            z = row.guess_count,
            total_selected = row.total_selected,
            custom = mean(ScoreRuleId::Custom),
            gsat = mean(ScoreRuleId::GsatStandard),
            strict = mean(ScoreRuleId::Strict),
            "Baseline expected score"
        );
    }

    for (rule, z) in best_guess_counts(&rows) {
        info!(%rule, best_guess_count = z, "Baseline best strategy");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_runs_for_default_and_small_configs() {
        assert!(log_baseline(&ScoringConfig::default()).is_ok());
        let mut config = ScoringConfig::default();
        config.scoring.option_count = 1;
        assert!(log_baseline(&config).is_ok());
    }
}
