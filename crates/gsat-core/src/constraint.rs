//! Declared partial knowledge and the answer keys consistent with it.
//!
//! A [`KnowledgeConstraint`] records which options the test-taker knows to
//! be correct and which they know to be incorrect. [`filter`] narrows a
//! [`WorldSpace`] to the keys that agree with both sets; the survivors form
//! a [`FilteredWorldSpace`] whose keys are treated as equally likely.
//!
//! # Size of the filtered space
//!
//! With `u` undetermined options the undetermined positions can take any
//! of `2^u` assignments. When at least one option is known correct every
//! assignment yields a valid key; otherwise the all-incorrect assignment
//! is excluded:
//!
//! ```text
//! |filtered| = 2^u       if |known_correct| >= 1
//!            = 2^u - 1   if |known_correct| == 0
//! ```

use tracing::debug;

use crate::error::ScoringError;
use crate::options::{OptionSet, validate_option_count};
use crate::world::{AnswerKey, WorldSpace};

/// What the test-taker knows before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeConstraint {
    option_count: u32,
    known_correct: OptionSet,
    known_incorrect: OptionSet,
}

impl KnowledgeConstraint {
    /// Validate and build a constraint over an `option_count`-option question.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConstraint`] when the sets overlap,
    /// name options outside the question, together exceed the option
    /// count, or declare every option incorrect (which no valid key
    /// satisfies).
    pub fn new(
        option_count: u32,
        known_correct: OptionSet,
        known_incorrect: OptionSet,
    ) -> Result<Self, ScoringError> {
        let universe = OptionSet::universe(validate_option_count(option_count)?)?;

        if !known_correct.is_disjoint(known_incorrect) {
            return Err(ScoringError::invalid_constraint(format!(
                "options {} are declared both correct and incorrect",
                known_correct.intersection(known_incorrect)
            )));
        }
        if !known_correct.union(known_incorrect).is_subset(universe) {
            return Err(ScoringError::invalid_constraint(format!(
                "declared options lie outside the {option_count} available options"
            )));
        }
        let declared = known_correct.len().saturating_add(known_incorrect.len());
        if declared > option_count {
            return Err(ScoringError::invalid_constraint(format!(
                "{declared} declared options exceed the {option_count} available options"
            )));
        }
        if known_correct.is_empty() && known_incorrect == universe {
            return Err(ScoringError::invalid_constraint(
                "every option is declared incorrect but at least one must be correct",
            ));
        }

        Ok(Self {
            option_count,
            known_correct,
            known_incorrect,
        })
    }

    /// Build a constraint from counts: the first `x` options are known
    /// correct and the next `y` are known incorrect.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConstraint`] when `x + y` exceeds the
    /// option count or declares every option incorrect.
    pub fn from_counts(option_count: u32, x: u32, y: u32) -> Result<Self, ScoringError> {
        validate_option_count(option_count)?;
        let declared = x.checked_add(y).ok_or(ScoringError::ArithmeticOverflow)?;
        if declared > option_count {
            return Err(ScoringError::invalid_constraint(format!(
                "x + y = {declared} exceeds the {option_count} available options"
            )));
        }
        let known_correct = OptionSet::range(0, x, option_count)?;
        let known_incorrect = OptionSet::range(x, y, option_count)?;
        Self::new(option_count, known_correct, known_incorrect)
    }

    /// Number of options per question.
    pub const fn option_count(&self) -> u32 {
        self.option_count
    }

    /// Options known to be correct.
    pub const fn known_correct(&self) -> OptionSet {
        self.known_correct
    }

    /// Options known to be incorrect.
    pub const fn known_incorrect(&self) -> OptionSet {
        self.known_incorrect
    }

    /// Options neither known correct nor known incorrect.
    pub fn undetermined(&self) -> OptionSet {
        OptionSet::universe(self.option_count)
            .unwrap_or(OptionSet::EMPTY)
            .difference(self.known_correct.union(self.known_incorrect))
    }

    /// Whether `key` agrees with every declared option.
    pub const fn admits(&self, key: AnswerKey) -> bool {
        self.known_correct.is_subset(key.correct())
            && key.correct().is_disjoint(self.known_incorrect)
    }

    /// Closed-form size of the filtered space (see the module docs).
    pub fn expected_world_count(&self) -> u32 {
        let assignments = 1_u32
            .checked_shl(self.undetermined().len())
            .unwrap_or(u32::MAX);
        if self.known_correct.is_empty() {
            assignments.saturating_sub(1)
        } else {
            assignments
        }
    }
}

/// The answer keys consistent with a [`KnowledgeConstraint`], each
/// equally likely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredWorldSpace {
    constraint: KnowledgeConstraint,
    keys: Vec<AnswerKey>,
}

impl FilteredWorldSpace {
    /// The constraint the space was filtered by.
    pub const fn constraint(&self) -> &KnowledgeConstraint {
        &self.constraint
    }

    /// Number of consistent keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is consistent.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The consistent keys in ascending bit-vector order.
    pub fn keys(&self) -> &[AnswerKey] {
        &self.keys
    }

    /// Iterate over the consistent keys.
    pub fn iter(&self) -> impl Iterator<Item = &AnswerKey> {
        self.keys.iter()
    }
}

/// Retain the keys of `space` that agree with `constraint`.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidConstraint`] when the constraint was
/// built for a different option count than the space, or when no key
/// survives.
pub fn filter(
    space: &WorldSpace,
    constraint: &KnowledgeConstraint,
) -> Result<FilteredWorldSpace, ScoringError> {
    if space.option_count() != constraint.option_count() {
        return Err(ScoringError::invalid_constraint(format!(
            "constraint covers {} options but the world space has {}",
            constraint.option_count(),
            space.option_count()
        )));
    }

    let keys: Vec<AnswerKey> = space
        .iter()
        .copied()
        .filter(|&key| constraint.admits(key))
        .collect();

    if keys.is_empty() {
        return Err(ScoringError::invalid_constraint(
            "no answer key is consistent with the declared knowledge",
        ));
    }

    debug!(
        known_correct = %constraint.known_correct(),
        known_incorrect = %constraint.known_incorrect(),
        worlds = keys.len(),
        "Filtered world space"
    );

    Ok(FilteredWorldSpace {
        constraint: *constraint,
        keys,
    })
}
