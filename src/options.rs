//! Configuration options for filter mode.
//!
//! `FilterOptions` doubles as the command line of the `fzscore` binary (with
//! the `cli` feature) and as a builder-configured struct for library use.

use derive_builder::Builder;

/// fzscore - rank lines from stdin against a fuzzy query
///
/// Reads candidates from stdin, drops those that do not contain the query
/// as a case-insensitive subsequence and prints the rest, best match first.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "fzscore", args_override_self = true, verbatim_doc_comment, version, about)
)]
pub struct FilterOptions {
    /// Query to match candidates against
    #[cfg_attr(feature = "cli", arg(short, long, help_heading = "Search"))]
    #[builder(setter(into))]
    pub filter: String,

    /// Only print the first N results
    #[cfg_attr(feature = "cli", arg(short, long, help_heading = "Search"))]
    #[builder(setter(strip_option))]
    pub limit: Option<usize>,

    /// Prefix every result with its score
    #[cfg_attr(feature = "cli", arg(short, long, help_heading = "Display"))]
    pub show_scores: bool,

    /// Append the matched byte positions to every result
    ///
    /// Positions are comma separated and follow a tab.
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Display"))]
    pub show_positions: bool,

    /// Dump the score matrices of every candidate to stderr
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Display"))]
    pub debug_matrix: bool,

    /// Read input delimited by ASCII NUL characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Scripting"))]
    pub read0: bool,

    /// Print output delimited by ASCII NUL characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Scripting"))]
    pub print0: bool,
}

impl FilterOptions {
    /// Byte separating input candidates.
    pub fn input_delimiter(&self) -> u8 {
        if self.read0 { b'\0' } else { b'\n' }
    }

    /// String terminating every output record.
    pub fn output_ending(&self) -> &'static str {
        if self.print0 { "\0" } else { "\n" }
    }
}
