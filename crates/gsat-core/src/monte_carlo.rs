//! Repeated-trial estimate of a strategy's score distribution.
//!
//! Each trial draws a ground-truth key uniformly from the keys consistent
//! with the declared knowledge: every undetermined option is correct with
//! probability one half, and when no option is known correct the
//! all-incorrect draw is rejected and redrawn. This samples the filtered
//! world space directly instead of rejecting against all `2^N` keys.
//!
//! The guess set is fixed for the whole run: the lowest-labelled `z`
//! undetermined options. Any guess set of the same size has the same
//! distribution (see [`crate::exact`]).
//!
//! Trials run in batches of `batch_size`; a cancellation check is polled
//! between batches.

use std::collections::BTreeMap;

use gsat_types::{EvaluationMode, ScoreRecord, ScoreRuleId};
use rand::Rng;
use tracing::debug;

use crate::constraint::KnowledgeConstraint;
use crate::error::ScoringError;
use crate::options::OptionSet;
use crate::rule::ScoreRule;
use crate::stats::{ScoreTally, Strategy, Welford};
use crate::world::AnswerKey;

/// Monte Carlo evaluator bound to one knowledge constraint.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloEvaluator {
    constraint: KnowledgeConstraint,
    max_trials: u32,
    batch_size: u32,
}

impl MonteCarloEvaluator {
    /// Build an evaluator that accepts at most `max_trials` trials per run
    /// and polls for cancellation every `batch_size` trials.
    pub fn new(constraint: KnowledgeConstraint, max_trials: u32, batch_size: u32) -> Self {
        Self {
            constraint,
            max_trials,
            batch_size: batch_size.max(1),
        }
    }

    /// The constraint trials are drawn under.
    pub const fn constraint(&self) -> &KnowledgeConstraint {
        &self.constraint
    }

    /// Draw one answer key uniformly from the filtered world space.
    pub fn sample_key<R: Rng>(&self, rng: &mut R) -> AnswerKey {
        let known_correct = self.constraint.known_correct();
        let undetermined = self.constraint.undetermined().bits();
        loop {
            let draw = OptionSet::from_bits(rng.random::<u32>() & undetermined);
            if let Some(key) = AnswerKey::new(known_correct.union(draw)) {
                return key;
            }
        }
    }

    /// The fixed guess set used for `guess_count` guesses.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InfeasibleGuessCount`] if `guess_count`
    /// exceeds the undetermined options.
    pub fn representative_guess(&self, guess_count: u32) -> Result<OptionSet, ScoringError> {
        let undetermined = self.constraint.undetermined();
        undetermined
            .lowest(guess_count)
            .ok_or(ScoringError::InfeasibleGuessCount {
                requested: i64::from(guess_count),
                undetermined: undetermined.len(),
            })
    }

    /// Run `trials` independent trials of guessing `guess_count` options.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidTrialCount`] for zero trials,
    /// [`ScoringError::TrialCountExceeded`] above the configured maximum,
    /// or [`ScoringError::InfeasibleGuessCount`] for too many guesses.
    pub fn simulate<R: Rng>(
        &self,
        guess_count: u32,
        rule: ScoreRuleId,
        trials: u32,
        rng: &mut R,
    ) -> Result<ScoreRecord, ScoringError> {
        self.simulate_with_cancel(guess_count, rule, trials, rng, || false)
    }

    /// Like [`simulate`](Self::simulate), polling `is_cancelled` between
    /// batches.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Cancelled`] once `is_cancelled` reports
    /// true, in addition to the errors of [`simulate`](Self::simulate).
    pub fn simulate_with_cancel<R, C>(
        &self,
        guess_count: u32,
        rule: ScoreRuleId,
        trials: u32,
        rng: &mut R,
        is_cancelled: C,
    ) -> Result<ScoreRecord, ScoringError>
    where
        R: Rng,
        C: Fn() -> bool,
    {
        let guess = self.representative_guess(guess_count)?;
        let selection = self.constraint.known_correct().union(guess);
        let mut accumulator = RuleAccumulator::new(rule);
        self.run_trials(trials, rng, is_cancelled, |key| {
            accumulator.push(selection, key)
        })?;
        let record = accumulator.into_record(guess_count, selection);

        debug!(
            guess_count,
            %rule,
            %guess,
            trials,
            mean = record.mean,
            std_dev = record.std_dev,
            "Simulation complete"
        );

        Ok(record)
    }

    /// Score every rule in `rules` against the same sampled keys.
    ///
    /// Each trial draws one key and scores it under every rule, so the
    /// records differ only by rule. A single-rule run with the same seed
    /// reproduces the corresponding record exactly.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`simulate`](Self::simulate).
    pub fn simulate_rules<R: Rng>(
        &self,
        guess_count: u32,
        rules: &[ScoreRuleId],
        trials: u32,
        rng: &mut R,
    ) -> Result<BTreeMap<ScoreRuleId, ScoreRecord>, ScoringError> {
        self.simulate_rules_with_cancel(guess_count, rules, trials, rng, || false)
    }

    /// Like [`simulate_rules`](Self::simulate_rules), polling
    /// `is_cancelled` between batches.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`simulate_with_cancel`](Self::simulate_with_cancel).
    pub fn simulate_rules_with_cancel<R, C>(
        &self,
        guess_count: u32,
        rules: &[ScoreRuleId],
        trials: u32,
        rng: &mut R,
        is_cancelled: C,
    ) -> Result<BTreeMap<ScoreRuleId, ScoreRecord>, ScoringError>
    where
        R: Rng,
        C: Fn() -> bool,
    {
        let guess = self.representative_guess(guess_count)?;
        let selection = self.constraint.known_correct().union(guess);
        let mut accumulators: Vec<RuleAccumulator> =
            rules.iter().map(|&rule| RuleAccumulator::new(rule)).collect();
        self.run_trials(trials, rng, is_cancelled, |key| {
            accumulators
                .iter_mut()
                .try_for_each(|accumulator| accumulator.push(selection, key))
        })?;

        debug!(
            guess_count,
            %guess,
            trials,
            rules = accumulators.len(),
            "Multi-rule simulation complete"
        );

        Ok(accumulators
            .into_iter()
            .map(|accumulator| {
                (accumulator.rule, accumulator.into_record(guess_count, selection))
            })
            .collect())
    }

    /// Draw `trials` keys in batches and hand each to `on_key`.
    fn run_trials<R, C, F>(
        &self,
        trials: u32,
        rng: &mut R,
        is_cancelled: C,
        mut on_key: F,
    ) -> Result<(), ScoringError>
    where
        R: Rng,
        C: Fn() -> bool,
        F: FnMut(AnswerKey) -> Result<(), ScoringError>,
    {
        if trials == 0 {
            return Err(ScoringError::InvalidTrialCount(0));
        }
        if trials > self.max_trials {
            return Err(ScoringError::TrialCountExceeded {
                requested: trials,
                max: self.max_trials,
            });
        }

        let mut completed: u32 = 0;
        while completed < trials {
            if is_cancelled() {
                return Err(ScoringError::Cancelled {
                    completed_trials: completed,
                });
            }
            let batch = self.batch_size.min(trials.saturating_sub(completed));
            for _ in 0..batch {
                on_key(self.sample_key(rng))?;
            }
            completed = completed.saturating_add(batch);
        }
        Ok(())
    }
}

/// Running statistics of one rule.
#[derive(Debug)]
struct RuleAccumulator {
    rule: ScoreRuleId,
    running: Welford,
    tally: ScoreTally,
}

impl RuleAccumulator {
    const fn new(rule: ScoreRuleId) -> Self {
        Self {
            rule,
            running: Welford::new(),
            tally: ScoreTally::new(),
        }
    }

    fn push(&mut self, selection: OptionSet, key: AnswerKey) -> Result<(), ScoringError> {
        let score = self.rule.score(selection, key);
        self.running.push(f64::from(score));
        self.tally.record(score)
    }

    fn into_record(self, guess_count: u32, selection: OptionSet) -> ScoreRecord {
        let strategy = Strategy {
            guess_count,
            total_selected: selection.len(),
            rule: self.rule,
        };
        strategy.record(
            EvaluationMode::Simulated,
            self.running.count(),
            self.running.mean(),
            self.running.std_dev(),
            self.tally.distribution(),
        )
    }
}
