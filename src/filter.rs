//! Single-threaded filtering and ranking of candidate lines.
//!
//! This is what the `fzscore` binary runs: read every candidate, score it
//! against the query, drop non-matches and order the rest by descending
//! score. Candidates with equal scores keep their input order.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::fuzzy_matcher::fzy::{SCORE_MIN, match_positions, score_matrices};
use crate::fuzzy_matcher::{IndexType, MatchIndices};
use crate::options::FilterOptions;

/// Error type for filter mode I/O
#[derive(Error, Debug)]
pub enum FilterError {
    /// Reading candidates failed
    #[error("failed to read candidates: {0}")]
    Read(#[source] io::Error),
    /// Writing results failed
    #[error("failed to write results: {0}")]
    Write(#[source] io::Error),
}

impl FilterError {
    /// The underlying I/O error kind.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            FilterError::Read(err) | FilterError::Write(err) => err.kind(),
        }
    }
}

/// A candidate that matched the query.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    /// Position of the candidate in the input
    pub index: usize,
    /// The candidate itself
    pub text: String,
    /// Normalized match score
    pub score: f64,
    /// Matched byte positions, when requested
    pub positions: Option<MatchIndices>,
}

/// Splits `reader` into candidates on `delimiter`.
///
/// A trailing `\r` is stripped from newline-delimited records, and invalid
/// UTF-8 is replaced rather than rejected.
pub fn read_candidates<R: BufRead>(mut reader: R, delimiter: u8) -> Result<Vec<String>, FilterError> {
    let mut candidates = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(delimiter, &mut buf).map_err(FilterError::Read)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&delimiter) {
            buf.pop();
        }
        if delimiter == b'\n' && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        candidates.push(String::from_utf8_lossy(&buf).into_owned());
    }
    debug!("read {} candidates", candidates.len());
    Ok(candidates)
}

/// Scores every candidate against `query` and returns the matches, best first.
pub fn rank<I, S>(query: &str, candidates: I, with_positions: bool) -> Vec<RankedItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ranked: Vec<RankedItem> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let text: String = text.into();
            let mut positions: Option<Vec<IndexType>> = with_positions.then(|| vec![0; query.len()]);
            let score = match_positions(query, &text, positions.as_deref_mut());
            (score != SCORE_MIN).then_some(RankedItem {
                index,
                text,
                score,
                positions,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Ranks `candidates` and writes them to `out` as configured by `options`.
///
/// When `debug_matrix` is set the score matrices of every scored candidate
/// are written to `err`. Returns the number of results written.
pub fn run<W: Write, E: Write>(
    options: &FilterOptions,
    candidates: Vec<String>,
    out: &mut W,
    err: &mut E,
) -> Result<usize, FilterError> {
    if options.debug_matrix {
        for candidate in &candidates {
            if let Some(matrices) = score_matrices(&options.filter, candidate) {
                write!(err, "{candidate:?}\n{matrices}\n").map_err(FilterError::Write)?;
            }
        }
    }

    let ranked = rank(&options.filter, candidates, options.show_positions);
    let limit = options.limit.unwrap_or(usize::MAX);
    let ending = options.output_ending();
    let mut written = 0;
    for item in ranked.iter().take(limit) {
        write_item(out, item, options, ending).map_err(FilterError::Write)?;
        written += 1;
    }
    out.flush().map_err(FilterError::Write)?;
    Ok(written)
}

fn write_item<W: Write>(out: &mut W, item: &RankedItem, options: &FilterOptions, ending: &str) -> io::Result<()> {
    if options.show_scores {
        write!(out, "{:.6}\t", item.score)?;
    }
    out.write_all(item.text.as_bytes())?;
    if let Some(positions) = &item.positions {
        let joined = positions.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",");
        write!(out, "\t{joined}")?;
    }
    out.write_all(ending.as_bytes())
}
