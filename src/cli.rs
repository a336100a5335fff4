// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There's a single operation (generate a README for one user), so the CLI
// is one flat struct of arguments instead of subcommands.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - PathBuf: An owned filesystem path
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "readme-forge",
    version = "0.1.0",
    about = "Generate a GitHub profile README.md from a user's public data",
    long_about = "readme-forge fetches a GitHub user's profile, repositories, and recent \
                  activity from the public API and renders them into a polished profile \
                  README.md, ready to commit."
)]
pub struct Cli {
    /// GitHub username to generate a README for
    ///
    /// This is a positional argument (required, no flag needed)
    pub username: String,

    /// GitHub personal access token (overrides the GITHUB_TOKEN env var)
    ///
    /// Unauthenticated requests are limited to 60 per hour; with a token
    /// you get 5000
    #[arg(short, long)]
    pub token: Option<String>,

    /// Output file path
    #[arg(short, long, default_value = "README.md")]
    pub output: PathBuf,

    /// How many repositories to show in the top repositories table
    #[arg(long, default_value_t = 6)]
    pub top_repos: usize,

    /// How many entries to show in the recent activity feed
    #[arg(long, default_value_t = 10)]
    pub max_activity: usize,

    /// Width of a full language bar, in characters
    #[arg(long, default_value_t = 20)]
    pub bar_width: usize,

    /// Let forked repositories into the top repositories table
    ///
    /// Forks always count toward the total star sum either way
    #[arg(long)]
    pub include_forks: bool,

    /// Print the aggregated report as JSON to stdout instead of writing
    /// a README file
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic (including --help and --version)
//    - Debug: generates code to print the struct for debugging
//
// 2. Why Option<String> for the token?
//    - The flag is optional; None means "not passed on the command line"
//    - main.rs falls back to the GITHUB_TOKEN environment variable, and
//      runs unauthenticated if that's unset too
//
// 3. What does default_value_t do?
//    - Supplies a typed default when the flag is omitted
//    - The plain default_value variant takes a string and parses it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["readme-forge", "ada"]);
        assert_eq!(cli.username, "ada");
        assert_eq!(cli.output, PathBuf::from("README.md"));
        assert_eq!(cli.top_repos, 6);
        assert_eq!(cli.max_activity, 10);
        assert_eq!(cli.bar_width, 20);
        assert!(!cli.include_forks);
        assert!(!cli.json);
        assert!(cli.token.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "readme-forge",
            "ada",
            "--token",
            "t0ken",
            "--output",
            "profile/README.md",
            "--top-repos",
            "3",
            "--max-activity",
            "5",
            "--include-forks",
            "--json",
        ]);
        assert_eq!(cli.token.as_deref(), Some("t0ken"));
        assert_eq!(cli.output, PathBuf::from("profile/README.md"));
        assert_eq!(cli.top_repos, 3);
        assert_eq!(cli.max_activity, 5);
        assert!(cli.include_forks);
        assert!(cli.json);
    }
}
