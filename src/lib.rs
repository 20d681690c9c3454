//! fzscore scores how well a short query fuzzily matches a candidate string.
//!
//! Scores reward matches that start words (after separators or at camelCase
//! transitions) and unbroken runs of adjacent matches. They are normalized so
//! that candidates scored against the same query can be ranked directly.
//!
//! # Examples
//!
//! ```
//! use fzscore::{SCORE_MIN, has_match, match_positions, score};
//!
//! assert!(has_match("ab", "xaxbx"));
//! assert_eq!(score("x", "abc"), SCORE_MIN);
//!
//! let mut positions = [0; 2];
//! let s = match_positions("mo", "models", Some(&mut positions));
//! assert_eq!(s, 0.6);
//! assert_eq!(positions, [0, 1]);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod filter;
pub mod fuzzy_matcher;
pub mod options;

pub use crate::filter::{FilterError, RankedItem};
pub use crate::fuzzy_matcher::fzy::{
    FzyMatcher, MATCH_MAX_LEN, SCORE_MAX, SCORE_MIN, ScoreMatrices, has_match, match_positions, score, score_matrices,
};
pub use crate::fuzzy_matcher::{FuzzyMatcher, MatchIndices};
pub use crate::options::{FilterOptions, FilterOptionsBuilder};
