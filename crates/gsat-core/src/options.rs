//! Option labels and compact option sets.
//!
//! A question has `N` options labelled `A`, `B`, `C`, ... An [`OptionSet`]
//! stores a subset of them as a bit-vector where bit `i` is option `i`.
//! Bit-vectors of at most [`MAX_OPTIONS`] bits keep every set `Copy` and
//! every set operation a single instruction.
//!
//! [`MAX_OPTIONS`] also bounds exact evaluation, which scores every
//! (guess set, answer key) pair: `3^N` pairs over all guess counts.

use std::fmt;

use crate::error::ScoringError;

/// Largest supported number of options per question.
pub const MAX_OPTIONS: u32 = 10;

/// Number of options on a GSAT multiple-choice question.
pub const DEFAULT_OPTION_COUNT: u32 = 5;

/// Validate an option count against `1..=MAX_OPTIONS`.
pub const fn validate_option_count(option_count: u32) -> Result<u32, ScoringError> {
    if option_count == 0 || option_count > MAX_OPTIONS {
        return Err(ScoringError::InvalidOptionCount {
            requested: option_count,
            max: MAX_OPTIONS,
        });
    }
    Ok(option_count)
}

/// Letter label of the option at `index` (`0 -> 'A'`).
pub fn label(index: u32) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}

/// A set of options stored as a bit-vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionSet(u32);

impl OptionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set directly from its bit-vector.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The underlying bit-vector.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// All options of an `option_count`-option question.
    pub fn universe(option_count: u32) -> Result<Self, ScoringError> {
        Self::range(0, option_count, option_count)
    }

    /// The `len` consecutive options starting at index `start`, within an
    /// `option_count`-option universe.
    pub fn range(start: u32, len: u32, option_count: u32) -> Result<Self, ScoringError> {
        let option_count = validate_option_count(option_count)?;
        let end = start
            .checked_add(len)
            .ok_or(ScoringError::ArithmeticOverflow)?;
        if end > option_count {
            return Err(ScoringError::invalid_constraint(format!(
                "options {start}..{end} do not fit in {option_count} options"
            )));
        }
        Ok(Self(low_bits(end) & !low_bits(start)))
    }

    /// Build a set from option indices.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConstraint`] for an index of
    /// [`MAX_OPTIONS`] or more.
    pub fn from_indices<I: IntoIterator<Item = u32>>(indices: I) -> Result<Self, ScoringError> {
        indices.into_iter().try_fold(Self::EMPTY, |set, i| {
            if i >= MAX_OPTIONS {
                return Err(ScoringError::invalid_constraint(format!(
                    "option index {i} is outside 0..{MAX_OPTIONS}"
                )));
            }
            let bit = 1_u32.checked_shl(i).ok_or(ScoringError::ArithmeticOverflow)?;
            Ok(Self(set.0 | bit))
        })
    }

    /// Number of options in the set.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether the set has no options.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the option at `index` is in the set.
    pub const fn contains(self, index: u32) -> bool {
        match self.0.checked_shr(index) {
            Some(shifted) => index < MAX_OPTIONS && shifted & 1 == 1,
            None => false,
        }
    }

    /// Options in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Options in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Options in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Options in exactly one of the two sets.
    #[must_use]
    pub const fn symmetric_difference(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Whether the sets share no option.
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Whether every option of `self` is in `other`.
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Option indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = u32> {
        (0..MAX_OPTIONS).filter(move |&i| self.contains(i))
    }

    /// The `count` lowest-indexed options of the set, or `None` if the set
    /// has fewer than `count` options.
    pub fn lowest(self, count: u32) -> Option<Self> {
        if count > self.len() {
            return None;
        }
        let bits = self
            .indices()
            .take(usize::try_from(count).ok()?)
            .fold(0, |bits, i| bits | 1_u32.checked_shl(i).unwrap_or(0));
        Some(Self(bits))
    }

    /// Every subset of `self` with exactly `size` options, in ascending
    /// bit-vector order.
    ///
    /// There are `C(len, size)` of them; `size > len` yields none.
    pub fn subsets_of_size(self, size: u32) -> Vec<Self> {
        let mut subsets = Vec::new();
        // Walk every submask of the set, from the full set down to empty.
        let mut sub = self.0;
        loop {
            if sub.count_ones() == size {
                subsets.push(Self(sub));
            }
            if sub == 0 {
                break;
            }
            sub = sub.wrapping_sub(1) & self.0;
        }
        subsets.reverse();
        subsets
    }
}

/// Bit-vector with the lowest `n` bits set.
const fn low_bits(n: u32) -> u32 {
    match 1_u32.checked_shl(n) {
        Some(bit) => bit.wrapping_sub(1),
        None => u32::MAX,
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, index) in self.indices().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", label(index))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn labels_start_at_a() {
        assert_eq!(label(0), 'A');
        assert_eq!(label(4), 'E');
    }

    #[test]
    fn universe_of_five_options() {
        let all = OptionSet::universe(5).unwrap();
        assert_eq!(all.bits(), 0b1_1111);
        assert_eq!(all.len(), 5);
        assert_eq!(all.to_string(), "{A, B, C, D, E}");
    }

    #[test]
    fn universe_rejects_zero_and_oversized_counts() {
        assert!(matches!(
            OptionSet::universe(0),
            Err(ScoringError::InvalidOptionCount { requested: 0, .. })
        ));
        assert!(OptionSet::universe(MAX_OPTIONS).is_ok());
        assert!(OptionSet::universe(MAX_OPTIONS + 1).is_err());
    }

    #[test]
    fn range_selects_consecutive_options() {
        let set = OptionSet::range(2, 2, 5).unwrap();
        assert_eq!(set.to_string(), "{C, D}");
        assert_eq!(OptionSet::range(5, 0, 5).unwrap(), OptionSet::EMPTY);
        assert!(OptionSet::range(4, 2, 5).is_err());
    }

    #[test]
    fn set_algebra() {
        let a = OptionSet::from_indices([0, 1, 2]).unwrap();
        let b = OptionSet::from_indices([2, 3]).unwrap();
        assert_eq!(a.union(b), OptionSet::from_indices([0, 1, 2, 3]).unwrap());
        assert_eq!(a.intersection(b), OptionSet::from_indices([2]).unwrap());
        assert_eq!(a.difference(b), OptionSet::from_indices([0, 1]).unwrap());
        assert_eq!(a.symmetric_difference(b), OptionSet::from_indices([0, 1, 3]).unwrap());
        assert!(!a.is_disjoint(b));
        assert!(OptionSet::from_indices([1]).unwrap().is_subset(a));
    }

    #[test]
    fn indices_beyond_the_bit_vector_are_rejected() {
        assert!(OptionSet::from_indices([MAX_OPTIONS - 1]).is_ok());
        for index in [MAX_OPTIONS, 16, 20, 31, 32, u32::MAX] {
            assert!(matches!(
                OptionSet::from_indices([0, index]),
                Err(ScoringError::InvalidConstraint { .. })
            ));
        }
    }

    #[test]
    fn lowest_takes_smallest_indices() {
        let set = OptionSet::from_indices([1, 3, 4]).unwrap();
        assert_eq!(set.lowest(2), Some(OptionSet::from_indices([1, 3]).unwrap()));
        assert_eq!(set.lowest(0), Some(OptionSet::EMPTY));
        assert_eq!(set.lowest(4), None);
    }

    #[test]
    fn subsets_of_size_counts_binomially() {
        let set = OptionSet::from_indices([0, 2, 3, 4]).unwrap();
        assert_eq!(set.subsets_of_size(0), vec![OptionSet::EMPTY]);
        assert_eq!(set.subsets_of_size(1).len(), 4);
        assert_eq!(set.subsets_of_size(2).len(), 6);
        assert_eq!(set.subsets_of_size(4), vec![set]);
        assert!(set.subsets_of_size(5).is_empty());
        for subset in set.subsets_of_size(2) {
            assert!(subset.is_subset(set));
            assert_eq!(subset.len(), 2);
        }
    }

    #[test]
    fn subsets_are_in_ascending_order() {
        let subsets = OptionSet::from_indices([0, 1, 2]).unwrap().subsets_of_size(2);
        let bits: Vec<u32> = subsets.iter().map(|s| s.bits()).collect();
        assert_eq!(bits, vec![0b011, 0b101, 0b110]);
    }
}
