//! Fuzzy matching algorithms and implementations.
//!
//! The engine lives in [`fzy`]: a subsequence pre-check, a word-boundary
//! classifier, a two-matrix dynamic program and a backtrace recovering the
//! matched positions.

/// Word-boundary classification of haystacks
pub mod boundary;
/// Fzy-style word-boundary scoring
pub mod fzy;
/// Flat score matrices and their debug dump
pub mod matrix;
pub(crate) mod util;

pub(crate) type IndexType = usize;
pub(crate) type ScoreType = i64;

/// Matched byte indices, one per pattern character.
pub type MatchIndices = Vec<IndexType>;

/// Trait for fuzzy matching text patterns against choices
pub trait FuzzyMatcher: Send + Sync {
    /// fuzzy match choice with pattern, and return the score & matched indices of characters
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(i64, MatchIndices)>;

    /// fuzzy match choice with pattern, and return the score of matching
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<i64> {
        self.fuzzy_indices(choice, pattern).map(|(score, _)| score)
    }
}
