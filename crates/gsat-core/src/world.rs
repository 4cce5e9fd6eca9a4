//! Ground-truth answer keys and the space of all valid keys.
//!
//! An [`AnswerKey`] marks every option of a question as correct or
//! incorrect. A multiple-choice question always has at least one correct
//! option, so the all-incorrect key is never generated: an
//! `N`-option [`WorldSpace`] holds exactly `2^N - 1` keys.

use std::fmt;

use crate::error::ScoringError;
use crate::options::{OptionSet, validate_option_count};

/// One fully specified ground truth: the set of options that are correct.
///
/// Options outside the set are incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerKey(OptionSet);

impl AnswerKey {
    /// Wrap a set of correct options.
    ///
    /// Returns `None` for the empty set, which is not a valid key.
    pub const fn new(correct: OptionSet) -> Option<Self> {
        if correct.is_empty() {
            None
        } else {
            Some(Self(correct))
        }
    }

    /// The options this key marks correct.
    pub const fn correct(self) -> OptionSet {
        self.0
    }

    /// Whether the option at `index` is correct under this key.
    pub const fn is_correct(self, index: u32) -> bool {
        self.0.contains(index)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Every valid answer key of an `N`-option question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSpace {
    option_count: u32,
    keys: Vec<AnswerKey>,
}

impl WorldSpace {
    /// Enumerate all `2^N - 1` non-empty keys in ascending bit-vector order.
    pub fn generate(option_count: u32) -> Result<Self, ScoringError> {
        let universe = OptionSet::universe(validate_option_count(option_count)?)?;
        let keys = (1..=universe.bits())
            .filter_map(|bits| AnswerKey::new(OptionSet::from_bits(bits)))
            .collect();
        Ok(Self { option_count, keys })
    }

    /// Number of options per question.
    pub const fn option_count(&self) -> u32 {
        self.option_count
    }

    /// Number of keys in the space.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the space holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys in ascending bit-vector order.
    pub fn keys(&self) -> &[AnswerKey] {
        &self.keys
    }

    /// Iterate over the keys.
    pub fn iter(&self) -> impl Iterator<Item = &AnswerKey> {
        self.keys.iter()
    }
}
