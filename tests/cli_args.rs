//! Integration tests for CLI argument handling
//!
//! Tests subcommand parsing and sort-order validation from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bookscout"))
        .args(args)
        .output()
        .expect("Failed to execute bookscout")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bookscout"), "Help should mention bookscout");
    assert!(stdout.contains("search"), "Help should list the search subcommand");
    assert!(stdout.contains("details"), "Help should list the details subcommand");
}

#[test]
fn test_search_help_lists_options() {
    let output = run_cli(&["search", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--category"));
    assert!(stdout.contains("--sort"));
    assert!(stdout.contains("--limit"));
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(
        !output.status.success(),
        "Expected bare invocation to fail with usage"
    );
}

#[test]
fn test_invalid_sort_prints_error_and_exits() {
    let output = run_cli(&["search", "dune", "--sort", "alphabetical"]);
    assert!(!output.status.success(), "Expected invalid sort to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid sort") || stderr.contains("invalid"),
        "Should print error message about invalid sort: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use bookscout::catalog::SortOrder;
    use bookscout::cli::{parse_sort_arg, Cli, Command};
    use clap::Parser;

    #[test]
    fn test_cli_search_parses_query() {
        let cli = Cli::parse_from(["bookscout", "search", "sea stories"]);
        match cli.command {
            Command::Search { query, .. } => assert_eq!(query, "sea stories"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_details_parses_id() {
        let cli = Cli::parse_from(["bookscout", "details", "abc123"]);
        match cli.command {
            Command::Details { id } => assert_eq!(id, "abc123"),
            _ => panic!("Expected Details command"),
        }
    }

    #[test]
    fn test_parse_sort_arg_known_orders() {
        assert_eq!(parse_sort_arg("relevance").unwrap(), SortOrder::Relevance);
        assert_eq!(parse_sort_arg("newest").unwrap(), SortOrder::Newest);
    }

    #[test]
    fn test_parse_sort_arg_invalid_returns_error() {
        assert!(parse_sort_arg("alphabetical").is_err());
    }
}
