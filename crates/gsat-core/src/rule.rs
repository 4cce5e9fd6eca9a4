//! Scoring rules for one answered question.
//!
//! Every rule compares the options the test-taker marked (the selection)
//! against a ground-truth [`AnswerKey`] and counts two kinds of error:
//!
//! - **false positive** -- selected but actually incorrect
//! - **false negative** -- correct but not selected
//!
//! | Errors | Custom | GSAT Standard | Strict |
//! |--------|--------|---------------|--------|
//! | 0      | 5      | 5             | 5      |
//! | 1      | 4      | 3             | 0      |
//! | 2      | 3      | 1             | 0      |
//! | 3      | 2      | 0             | 0      |
//! | 4      | 1      | 0             | 0      |
//! | 5+     | 0      | 0             | 0      |
//!
//! After the rule is applied, a blank answer sheet (empty selection)
//! always scores zero.

use gsat_types::ScoreRuleId;

use crate::error::ScoringError;
use crate::options::OptionSet;
use crate::world::AnswerKey;

/// Score awarded for a perfect answer.
pub const FULL_MARKS: u32 = 5;

/// Errors of a selection measured against one answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCount {
    /// Selected options that are actually incorrect.
    pub false_positives: u32,
    /// Correct options that were not selected.
    pub false_negatives: u32,
}

impl ErrorCount {
    /// Count the errors of `selection` against `key`.
    pub const fn measure(selection: OptionSet, key: AnswerKey) -> Self {
        Self {
            false_positives: selection.difference(key.correct()).len(),
            false_negatives: key.correct().difference(selection).len(),
        }
    }

    /// Total number of errors.
    pub const fn total(self) -> u32 {
        self.false_positives.saturating_add(self.false_negatives)
    }
}

/// A scoring function from (selection, answer key) to points.
pub trait ScoreRule {
    /// Points for the rule alone, before the blank-sheet override.
    fn raw_score(&self, errors: ErrorCount) -> u32;

    /// Points awarded for marking `selection` when `key` is the truth.
    fn score(&self, selection: OptionSet, key: AnswerKey) -> u32 {
        if selection.is_empty() {
            return 0;
        }
        self.raw_score(ErrorCount::measure(selection, key))
    }
}

impl ScoreRule for ScoreRuleId {
    fn raw_score(&self, errors: ErrorCount) -> u32 {
        match self {
            Self::Custom => FULL_MARKS.saturating_sub(errors.total()),
            Self::GsatStandard => match errors.total() {
                0 => FULL_MARKS,
                1 => 3,
                2 => 1,
                _ => 0,
            },
            Self::Strict => {
                if errors.total() == 0 {
                    FULL_MARKS
                } else {
                    0
                }
            }
        }
    }
}

/// Resolve a rule identifier such as `"gsat"`.
///
/// # Errors
///
/// Returns [`ScoringError::UnknownScoreRule`] for an unrecognized identifier.
pub fn parse_rule(identifier: &str) -> Result<ScoreRuleId, ScoringError> {
    Ok(identifier.parse::<ScoreRuleId>()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(indices: &[u32]) -> AnswerKey {
        AnswerKey::new(OptionSet::from_indices(indices.iter().copied()).unwrap()).unwrap()
    }

    fn set(indices: &[u32]) -> OptionSet {
        OptionSet::from_indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn error_count_splits_false_positives_and_negatives() {
        let errors = ErrorCount::measure(set(&[0, 1, 4]), key(&[0, 2, 3]));
        assert_eq!(errors.false_positives, 2);
        assert_eq!(errors.false_negatives, 2);
        assert_eq!(errors.total(), 4);
    }

    #[test]
    fn exact_match_scores_full_marks_under_every_rule() {
        for rule in ScoreRuleId::ALL {
            assert_eq!(rule.score(set(&[1, 2]), key(&[1, 2])), FULL_MARKS);
        }
    }

    #[test]
    fn custom_deducts_one_point_per_error() {
        let rule = ScoreRuleId::Custom;
        assert_eq!(rule.score(set(&[0]), key(&[0, 1])), 4);
        assert_eq!(rule.score(set(&[0, 2]), key(&[0, 1])), 3);
        assert_eq!(rule.score(set(&[3, 4]), key(&[0, 1, 2])), 0);
    }

    #[test]
    fn gsat_standard_follows_the_ladder() {
        let rule = ScoreRuleId::GsatStandard;
        assert_eq!(rule.score(set(&[0]), key(&[0, 1])), 3);
        assert_eq!(rule.score(set(&[0, 2]), key(&[0, 1])), 1);
        assert_eq!(rule.score(set(&[2, 3]), key(&[0])), 0);
    }

    #[test]
    fn strict_requires_exact_match() {
        let rule = ScoreRuleId::Strict;
        assert_eq!(rule.score(set(&[0]), key(&[0, 1])), 0);
        assert_eq!(rule.score(set(&[0, 1]), key(&[0, 1])), FULL_MARKS);
    }

    #[test]
    fn blank_sheet_always_scores_zero() {
        for rule in ScoreRuleId::ALL {
            for bits in 1..32 {
                let k = AnswerKey::new(OptionSet::from_bits(bits)).unwrap();
                assert_eq!(rule.score(OptionSet::EMPTY, k), 0);
            }
        }
    }

    #[test]
    fn parse_rule_maps_unknown_identifiers() {
        assert_eq!(parse_rule("strict"), Ok(ScoreRuleId::Strict));
        assert_eq!(
            parse_rule("bonus"),
            Err(ScoringError::UnknownScoreRule(String::from("bonus")))
        );
    }
}
