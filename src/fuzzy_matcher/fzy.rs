//! Fuzzy scoring in the style of early fzy releases.
//!
//! Matching is a longest-common-subsequence variant over two matrices:
//! - `D[i][j]`: the best score of an alignment of `needle[..=i]` that ends
//!   with `haystack[j]` matched to `needle[i]` (unset when they differ).
//! - `M[i][j]`: the best score of any alignment of `needle[..=i]` within
//!   `haystack[..=j]`.
//!
//! A match earns [`BONUS_WORD_START`] at a word boundary, otherwise
//! [`BONUS_CONSECUTIVE`] per step of an unbroken run. The two never stack.
//! The raw score `M[n-1][m-1]` is normalized by `2n + 1`.
//!
//! # Example:
//! ```
//! use fzscore::fuzzy_matcher::fzy::{SCORE_MIN, match_positions, score};
//!
//! assert_eq!(score("x", "abc"), SCORE_MIN);
//!
//! let mut positions = [0; 2];
//! assert_eq!(match_positions("mo", "models", Some(&mut positions)), 0.6);
//! assert_eq!(positions, [0, 1]);
//! ```

use std::fmt::{self, Display, Formatter};

use crate::fuzzy_matcher::boundary::word_boundaries;
use crate::fuzzy_matcher::matrix::Matrix;
use crate::fuzzy_matcher::util::{cheap_matches, eq_ignore_case, leftmost_positions};
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, MatchIndices, ScoreType};

// ---------------------------------------------------------------------------
// Score constants
// ---------------------------------------------------------------------------

/// Raw DP score.
pub type Score = i32;

/// Returned when the needle is not a subsequence of the haystack.
pub const SCORE_MIN: f64 = -1.0;

/// Returned for an empty needle or a case-insensitive exact match.
pub const SCORE_MAX: f64 = 1.0;

/// Maximum haystack length we will score. Longer candidates still match but
/// receive a flat `0.0` so they sort below reasonably-sized candidates.
pub const MATCH_MAX_LEN: usize = 1024;

/// Bonus for matching the first character of a word.
pub const BONUS_WORD_START: Score = 2;

/// Bonus for each extension of a run of adjacent matches.
pub const BONUS_CONSECUTIVE: Score = 1;

/// Scale applied when converting scores for [`FuzzyMatcher`] consumers.
const INTEGER_SCALE: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Score matrices
// ---------------------------------------------------------------------------

/// The completed `D` and `M` matrices for one needle/haystack pair.
///
/// `Display` dumps both matrices, which is handy when tuning bonuses.
#[derive(Debug, Clone)]
pub struct ScoreMatrices {
    d: Matrix<Option<Score>>,
    m: Matrix<Score>,
}

impl ScoreMatrices {
    /// Runs the recurrence over every `(needle, haystack)` cell.
    ///
    /// No size guard is applied here, see [`match_positions`].
    pub fn build(needle: &[u8], haystack: &[u8]) -> Self {
        let bonus = word_boundaries(haystack);
        let mut d = Matrix::new(needle.len(), haystack.len(), None);
        let mut m = Matrix::new(needle.len(), haystack.len(), 0);

        for (i, &n_ch) in needle.iter().enumerate() {
            for (j, &h_ch) in haystack.iter().enumerate() {
                if eq_ignore_case(n_ch, h_ch) {
                    let diagonal = (i > 0 && j > 0).then(|| (m[(i - 1, j - 1)], d[(i - 1, j - 1)]));
                    let mut score = diagonal.map_or(0, |(best, _)| best);
                    if bonus[j] {
                        score += BONUS_WORD_START;
                    } else if let Some((_, Some(run))) = diagonal
                        && run > 0
                    {
                        score = score.max(run + BONUS_CONSECUTIVE);
                    }
                    d[(i, j)] = Some(score);
                    m[(i, j)] = score;
                }
                if j > 0 {
                    m[(i, j)] = m[(i, j)].max(m[(i, j - 1)]);
                }
            }
        }

        Self { d, m }
    }

    /// The "ends with a match" matrix.
    pub fn d(&self) -> &Matrix<Option<Score>> {
        &self.d
    }

    /// The "best so far" matrix.
    pub fn m(&self) -> &Matrix<Score> {
        &self.m
    }

    /// `M[n-1][m-1]`, or 0 for an empty matrix.
    pub fn raw_score(&self) -> Score {
        match (self.m.rows(), self.m.cols()) {
            (0, _) | (_, 0) => 0,
            (rows, cols) => self.m[(rows - 1, cols - 1)],
        }
    }

    /// Raw score divided by `2n + 1`.
    pub fn normalized_score(&self) -> f64 {
        f64::from(self.raw_score()) / (self.m.rows() * 2 + 1) as f64
    }

    /// Recovers one optimal position per needle byte into `positions`.
    ///
    /// Rows are walked from the last needle byte to the first with a single
    /// cursor. Within a row every cell tying the row's target score is
    /// visited and the smallest matching index wins, so ties go to the
    /// earliest occurrence. `floor` holds the greedy leftmost index of each
    /// needle byte: a row never scans below it, and it is the fallback when
    /// the tie run holds no matching cell. The next row resumes just before
    /// the chosen index, so positions are strictly increasing.
    fn backtrace(&self, needle: &[u8], haystack: &[u8], floor: &[IndexType], positions: &mut [IndexType]) {
        let Some(last) = haystack.len().checked_sub(1) else {
            return;
        };
        let mut cursor = Cursor {
            j: last,
            tie_target: 0,
        };
        for i in (0..needle.len()).rev() {
            cursor.tie_target = self.m[(i, cursor.j)];
            let mut chosen = None;
            let mut j = cursor.j;
            while self.m[(i, j)] == cursor.tie_target {
                if eq_ignore_case(needle[i], haystack[j]) {
                    chosen = Some(j);
                }
                if j <= floor[i] {
                    break;
                }
                j -= 1;
            }
            let position = chosen.unwrap_or(floor[i]);
            positions[i] = position;
            cursor.j = position.saturating_sub(1);
        }
    }
}

/// Backtrace state threaded from the last needle row to the first.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    j: usize,
    tie_target: Score,
}

impl Display for ScoreMatrices {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "D:\n{}\nM:\n{}", self.d, self.m)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Whether `needle` is a case-insensitive subsequence of `haystack`.
///
/// An empty needle matches everything.
pub fn has_match<N: AsRef<[u8]>, H: AsRef<[u8]>>(needle: N, haystack: H) -> bool {
    cheap_matches(needle.as_ref(), haystack.as_ref())
}

/// Score `needle` against `haystack` without recovering positions.
pub fn score<N: AsRef<[u8]>, H: AsRef<[u8]>>(needle: N, haystack: H) -> f64 {
    match_positions(needle, haystack, None)
}

/// Score `needle` against `haystack`, filling `positions` with the haystack
/// byte index chosen for each needle byte.
///
/// Returns [`SCORE_MIN`] when there is no match, in which case `positions`
/// is left untouched. An empty needle scores [`SCORE_MAX`] and writes
/// nothing. Haystacks longer than [`MATCH_MAX_LEN`] score `0.0` and receive
/// the greedy leftmost alignment.
///
/// # Panics
///
/// Panics if `positions` is shorter than `needle`.
pub fn match_positions<N: AsRef<[u8]>, H: AsRef<[u8]>>(
    needle: N,
    haystack: H,
    positions: Option<&mut [IndexType]>,
) -> f64 {
    let needle = needle.as_ref();
    let haystack = haystack.as_ref();

    if let Some(positions) = &positions {
        assert!(
            positions.len() >= needle.len(),
            "positions buffer holds {} entries, needle has {}",
            positions.len(),
            needle.len()
        );
    }

    if needle.is_empty() {
        return SCORE_MAX;
    }
    if !cheap_matches(needle, haystack) {
        return SCORE_MIN;
    }
    if needle.eq_ignore_ascii_case(haystack) {
        if let Some(positions) = positions {
            for (i, position) in positions[..needle.len()].iter_mut().enumerate() {
                *position = i;
            }
        }
        return SCORE_MAX;
    }

    if haystack.len() > MATCH_MAX_LEN {
        debug!(
            "haystack of {} bytes exceeds {MATCH_MAX_LEN}, skipping score matrices",
            haystack.len()
        );
        if let Some(positions) = positions
            && let Some(leftmost) = leftmost_positions(needle, haystack)
        {
            positions[..needle.len()].copy_from_slice(&leftmost);
        }
        return 0.0;
    }

    let matrices = ScoreMatrices::build(needle, haystack);
    if log_enabled!(log::Level::Trace) {
        trace!(
            "{:?} in {:?}\n{matrices}",
            String::from_utf8_lossy(needle),
            String::from_utf8_lossy(haystack)
        );
    }

    if let Some(positions) = positions
        && let Some(floor) = leftmost_positions(needle, haystack)
    {
        matrices.backtrace(needle, haystack, &floor, positions);
    }

    matrices.normalized_score()
}

/// Builds the score matrices for a pair, for inspection.
///
/// Returns `None` whenever [`match_positions`] would not run the matrices
/// for a reason other than exact equality: empty needle, no match, or a
/// haystack over [`MATCH_MAX_LEN`].
pub fn score_matrices<N: AsRef<[u8]>, H: AsRef<[u8]>>(needle: N, haystack: H) -> Option<ScoreMatrices> {
    let needle = needle.as_ref();
    let haystack = haystack.as_ref();
    if needle.is_empty() || haystack.len() > MATCH_MAX_LEN || !cheap_matches(needle, haystack) {
        return None;
    }
    Some(ScoreMatrices::build(needle, haystack))
}

/// Convert a normalized score to the integer score space of [`FuzzyMatcher`],
/// keeping three decimal places.
#[inline]
fn to_integer_score(score: f64) -> Option<ScoreType> {
    if score <= SCORE_MIN {
        None
    } else {
        Some((score * INTEGER_SCALE).round() as ScoreType)
    }
}

// ---------------------------------------------------------------------------
// Public matcher struct
// ---------------------------------------------------------------------------

/// [`FuzzyMatcher`] adapter over [`match_positions`].
///
/// Matching is always case-insensitive, and indices are byte offsets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FzyMatcher;

impl FuzzyMatcher for FzyMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)> {
        let mut positions = vec![0; pattern.len()];
        let score = match_positions(pattern, choice, Some(positions.as_mut_slice()));
        to_integer_score(score).map(|score| (score, positions))
    }

    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        to_integer_score(score(pattern, choice))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::fuzzy_matcher::util::{assert_order, wrap_matches};

    fn positions(needle: &str, haystack: &str) -> Option<Vec<usize>> {
        let mut positions = vec![usize::MAX; needle.len()];
        let score = match_positions(needle, haystack, Some(positions.as_mut_slice()));
        (score != SCORE_MIN).then_some(positions)
    }

    fn wrap_fuzzy_match(haystack: &str, needle: &str) -> Option<String> {
        let (_score, indices) = FzyMatcher.fuzzy_indices(haystack, needle)?;
        Some(wrap_matches(haystack, &indices))
    }

    #[test]
    fn test_empty_needle() {
        assert_eq!(score("", ""), SCORE_MAX);
        assert_eq!(score("", "anything"), SCORE_MAX);

        let mut buf = [42, 42];
        assert_eq!(match_positions("", "abc", Some(&mut buf)), SCORE_MAX);
        assert_eq!(buf, [42, 42]);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(score("x", "abc"), SCORE_MIN);
        assert_eq!(score("ab", "ba"), SCORE_MIN);
        assert_eq!(score("a", ""), SCORE_MIN);

        let mut buf = [7];
        assert_eq!(match_positions("x", "abc", Some(&mut buf)), SCORE_MIN);
        assert_eq!(buf, [7]);
    }

    #[test]
    fn test_exact_match_is_max() {
        assert_eq!(score("abc", "abc"), SCORE_MAX);
        assert_eq!(score("aBc", "AbC"), SCORE_MAX);
        assert_eq!(positions("Readme", "README"), Some(vec![0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_boundary_then_consecutive() {
        assert_eq!(score("mo", "models"), 0.6);
        assert_eq!(positions("mo", "models"), Some(vec![0, 1]));
    }

    #[test]
    fn test_no_bonus_scores_zero() {
        assert_eq!(score("an", "banana"), 0.0);
        assert_eq!(positions("an", "banana"), Some(vec![1, 2]));
    }

    #[test]
    fn test_boundary_does_not_stack_with_run() {
        // `b` sits on a camel boundary right after `a`: 2 + 2, not 2 + 1 + 2
        assert_eq!(score("ab", "aBc"), 0.8);
        assert_eq!(positions("ab", "aBc"), Some(vec![0, 1]));
    }

    #[test]
    fn test_matrices() {
        let matrices = score_matrices("mo", "models").unwrap();
        assert_eq!(matrices.m().row(0), &[2, 2, 2, 2, 2, 2]);
        assert_eq!(matrices.m().row(1), &[0, 3, 3, 3, 3, 3]);
        assert_eq!(matrices.d().row(0), &[Some(2), None, None, None, None, None]);
        assert_eq!(matrices.d().row(1), &[None, Some(3), None, None, None, None]);
        assert_eq!(matrices.raw_score(), 3);
    }

    #[test]
    fn test_matrices_dump() {
        let matrices = score_matrices("mo", "mod").unwrap();
        assert_eq!(
            matrices.to_string(),
            "D:\n   2   -   -\n   -   3   -\n\nM:\n   2   2   2\n   0   3   3\n"
        );
    }

    #[test]
    fn test_matrices_not_built() {
        assert!(score_matrices("", "abc").is_none());
        assert!(score_matrices("x", "abc").is_none());
        assert!(score_matrices("a", "a".repeat(MATCH_MAX_LEN + 1)).is_none());
    }

    #[test]
    fn test_d_never_exceeds_m() {
        let matrices = score_matrices("fbb", "foo_bar_baz_fooBarBaz").unwrap();
        let (d, m) = (matrices.d(), matrices.m());
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                if let Some(score) = d[(i, j)] {
                    assert!(score <= m[(i, j)]);
                }
                if j > 0 {
                    assert!(m[(i, j)] >= m[(i, j - 1)]);
                }
            }
        }
    }

    #[test]
    fn test_match_indices() {
        assert_eq!("[f]oo_[b]ar_[b]az", &wrap_fuzzy_match("foo_bar_baz", "fbb").unwrap());
        assert_eq!("[a]x[b]y[c]z", &wrap_fuzzy_match("axbycz", "abc").unwrap());
        assert_eq!("a[x]b[y]c[z]", &wrap_fuzzy_match("axbycz", "xyz").unwrap());
    }

    #[test]
    fn test_ties_prefer_earliest() {
        assert_eq!(positions("b", "a_b_b"), Some(vec![2]));
        assert_eq!(positions("a", "xaya"), Some(vec![1]));
    }

    #[test]
    fn test_backtrace_stays_in_bounds() {
        // Row 1 credits the boundary `b` at index 0 although no valid
        // alignment uses it; the backtrace must still land on a real one.
        assert_eq!(score("ab", "bab"), 0.4);
        assert_eq!(positions("ab", "bab"), Some(vec![1, 2]));
    }

    #[test]
    fn test_long_haystack() {
        let long = "a".repeat(MATCH_MAX_LEN + 1);
        assert!(has_match("a", &long));
        assert_eq!(score("a", &long), 0.0);
        assert_eq!(score("aa", &long), 0.0);
        assert_eq!(positions("aa", &long), Some(vec![0, 1]));
    }

    #[test]
    fn test_haystack_at_limit_is_scored() {
        let mut haystack = "x".repeat(MATCH_MAX_LEN - 1);
        haystack.push('a');
        assert_eq!(score("a", &haystack), 0.0);
        assert_eq!(positions("a", &haystack), Some(vec![MATCH_MAX_LEN - 1]));

        let haystack = format!("a{}", "x".repeat(MATCH_MAX_LEN - 1));
        assert!(score("a", &haystack) > 0.0);
    }

    #[test]
    fn test_bytes_input() {
        assert_eq!(score(b"mo".as_slice(), b"models".as_slice()), 0.6);
        assert!(has_match(String::from("ab"), "xaxbx"));
    }

    #[test]
    #[should_panic(expected = "positions buffer")]
    fn test_short_buffer_panics() {
        let mut buf = [0; 1];
        match_positions("ab", "ab", Some(&mut buf));
    }

    #[test]
    fn test_integer_scores() {
        assert_eq!(FzyMatcher.fuzzy_match("models", "mo"), Some(600));
        assert_eq!(FzyMatcher.fuzzy_match("banana", "an"), Some(0));
        assert_eq!(FzyMatcher.fuzzy_match("abc", "x"), None);
        assert_eq!(FzyMatcher.fuzzy_indices("abc", ""), Some((1000, vec![])));
    }

    #[test]
    fn test_match_quality_ordering() {
        // Initials
        assert_order(&FzyMatcher, "ab", &["ab", "aoo_boo", "acb"]);
        // Word starts beat runs beat scattered
        assert_order(&FzyMatcher, "mod", &["my_old_dir", "mod.rs", "amoxd"]);
    }

    #[test]
    fn test_camel_case_bonus() {
        let camel = score("fbb", "FooBarBaz");
        let flat = score("fbb", "foobarbaz");
        assert!(camel > flat, "camel={} > flat={}", camel, flat);
    }

    #[test]
    fn test_haystack_case_moves_camel_boundaries() {
        assert_eq!(score("MO", "models"), score("mo", "models"));
        assert_eq!(score("mo", "mODELS"), 0.8);
        assert!(has_match("mo", "mODELS"));
    }

    #[test]
    fn test_consecutive_bonus() {
        let consecutive = score("foo", "foox");
        let scattered = score("foo", "xfxoxo");
        assert!(consecutive > scattered, "consecutive={consecutive} > scattered={scattered}");
    }
}
