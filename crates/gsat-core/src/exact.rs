//! Exact expectation over every consistent answer key.
//!
//! For a guess count `z`, the evaluator enumerates every guess set of `z`
//! undetermined options, scores the resulting selection against every key
//! of the filtered world space, and tallies the scores. All keys are
//! equally likely, so the tally is the exact score distribution.
//!
//! Guess sets of equal size are interchangeable: relabeling undetermined
//! options maps the filtered space onto itself. Every guess set of a
//! given size therefore yields the same distribution. The evaluator still
//! tallies each guess set and compares the tallies, failing with
//! [`ScoringError::ExchangeabilityViolated`] rather than reporting a
//! record that only one guess set supports.

use gsat_types::{ScoreRecord, ScoreRuleId};
use tracing::{debug, warn};

use crate::constraint::{FilteredWorldSpace, KnowledgeConstraint, filter};
use crate::error::ScoringError;
use crate::options::OptionSet;
use crate::rule::ScoreRule;
use crate::stats::{ScoreTally, Strategy};
use crate::world::WorldSpace;

/// Exact evaluator bound to one knowledge constraint.
///
/// The filtered world space depends only on the constraint, so it is
/// computed once at construction and shared by every guess count.
#[derive(Debug, Clone)]
pub struct ExactEvaluator {
    worlds: FilteredWorldSpace,
}

impl ExactEvaluator {
    /// Build the evaluator, generating and filtering the world space.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConstraint`] if no answer key is
    /// consistent with `constraint`.
    pub fn new(constraint: &KnowledgeConstraint) -> Result<Self, ScoringError> {
        let space = WorldSpace::generate(constraint.option_count())?;
        let worlds = filter(&space, constraint)?;
        Ok(Self { worlds })
    }

    /// The filtered world space scores are computed over.
    pub const fn worlds(&self) -> &FilteredWorldSpace {
        &self.worlds
    }

    /// The constraint this evaluator was built for.
    pub const fn constraint(&self) -> &KnowledgeConstraint {
        self.worlds.constraint()
    }

    /// Number of undetermined options, the largest feasible guess count.
    pub fn undetermined_count(&self) -> u32 {
        self.constraint().undetermined().len()
    }

    /// Tally the score of one explicit guess set over every world.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InfeasibleGuessCount`] if `guess` contains
    /// an option that is not undetermined.
    pub fn tally_guess(&self, guess: OptionSet, rule: ScoreRuleId) -> Result<ScoreTally, ScoringError> {
        let undetermined = self.constraint().undetermined();
        if !guess.is_subset(undetermined) {
            return Err(ScoringError::InfeasibleGuessCount {
                requested: i64::from(guess.len()),
                undetermined: undetermined.len(),
            });
        }

        let selection = self.constraint().known_correct().union(guess);
        let mut tally = ScoreTally::new();
        for &key in self.worlds.iter() {
            tally.record(rule.score(selection, key))?;
        }
        Ok(tally)
    }

    /// Exact record for guessing `guess_count` undetermined options.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InfeasibleGuessCount`] if `guess_count`
    /// exceeds the undetermined options, or
    /// [`ScoringError::ExchangeabilityViolated`] if two guess sets of that
    /// size disagree.
    pub fn evaluate(&self, guess_count: u32, rule: ScoreRuleId) -> Result<ScoreRecord, ScoringError> {
        let undetermined = self.constraint().undetermined();
        if guess_count > undetermined.len() {
            return Err(ScoringError::InfeasibleGuessCount {
                requested: i64::from(guess_count),
                undetermined: undetermined.len(),
            });
        }

        let guesses = undetermined.subsets_of_size(guess_count);
        let tallies = guesses
            .iter()
            .map(|&guess| self.tally_guess(guess, rule))
            .collect::<Result<Vec<_>, _>>()?;
        let (tally, rest) = tallies
            .split_first()
            .ok_or(ScoringError::ExchangeabilityViolated { guess_count })?;
        if let Some((guess, _)) = guesses
            .iter()
            .skip(1)
            .zip(rest)
            .find(|(_, other)| *other != tally)
        {
            warn!(guess_count, %guess, %rule, "Guess set diverged from its peers");
            return Err(ScoringError::ExchangeabilityViolated { guess_count });
        }

        let strategy = Strategy {
            guess_count,
            total_selected: self
                .constraint()
                .known_correct()
                .len()
                .saturating_add(guess_count),
            rule,
        };
        let record = strategy.exact_record(tally);

        debug!(
            guess_count,
            %rule,
            guess_sets = guesses.len(),
            worlds = tally.total(),
            mean = record.mean,
            std_dev = record.std_dev,
            "Exact evaluation complete"
        );

        Ok(record)
    }

    /// Exact records for every feasible guess count, `0..=undetermined`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`evaluate`](Self::evaluate).
    pub fn evaluate_all(&self, rule: ScoreRuleId) -> Result<Vec<ScoreRecord>, ScoringError> {
        (0..=self.undetermined_count())
            .map(|z| self.evaluate(z, rule))
            .collect()
    }
}
