//! Command-line interface parsing for Bookscout
//!
//! This module maps subcommands onto the five discovery operations using
//! clap, including lenient parsing of the --sort option.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::catalog::SortOrder;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified sort order is not recognized
    #[error("Invalid sort order: '{0}'. Valid orders: relevance, newest")]
    InvalidSort(String),
}

/// Bookscout - search and browse books from the terminal
#[derive(Parser, Debug)]
#[command(name = "bookscout")]
#[command(about = "Search and browse books backed by the Google Books catalog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per discovery operation
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalog by free text
    Search {
        /// Free-text query
        query: String,
        /// Restrict results to a subject category
        #[arg(long)]
        category: Option<String>,
        /// Sort order: relevance or newest
        #[arg(long, default_value = "relevance")]
        sort: String,
        /// Pagination offset
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show the top-rated books of the year
    TopRated,
    /// Show the curated editor's picks
    Picks,
    /// Browse a single subject category
    Category {
        /// Category name, e.g. "science fiction"
        name: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 12)]
        limit: u32,
        /// Sort order: relevance or newest
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show the full details of one book
    Details {
        /// Catalog volume id
        id: String,
    },
}

/// Parses a sort string argument into a SortOrder.
///
/// # Arguments
/// * `s` - The sort string from CLI
///
/// # Returns
/// * `Ok(SortOrder)` if the string matches a known order
/// * `Err(CliError::InvalidSort)` if the string doesn't match
pub fn parse_sort_arg(s: &str) -> Result<SortOrder, CliError> {
    SortOrder::from_str(s).ok_or_else(|| CliError::InvalidSort(s.to_string()))
}
