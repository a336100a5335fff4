// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Fetch the user's profile, repositories, and recent events (in that
//    order - each fetch finishes before the next starts)
// 3. Aggregate the records into a report
// 4. Render the report to Markdown and write it to the output file
// 5. Exit with proper code (0 = success, 1 = user-facing failure, 2 = error)
//
// Rust concepts used:
// - async/await: The fetch layer awaits network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to route errors to messages and exit codes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod error;         // src/error.rs - the shared error type
mod github;        // src/github/ - API client and typed response models
mod report;        // src/report/ - aggregation and Markdown rendering

// Import items we need from our modules
use cli::Cli;
use clap::Parser;  // Parser trait enables the parse() method
use github::ApiClient;
use report::{build_report, render_readme, ReportConfig};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function - it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = README generated
//   Ok(1) = user-facing failure (unknown user, rate limit, network)
//   Err   = unexpected error (becomes exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // --token wins; otherwise fall back to the environment
    let token = cli.token.clone().or_else(|| std::env::var("GITHUB_TOKEN").ok());
    if token.is_some() {
        println!("🔑 Authenticating with provided token...");
    } else {
        println!("⚠️  No token provided - using unauthenticated access (60 requests/hour limit)");
    }

    // All report knobs live in one immutable config value
    let config = ReportConfig {
        top_repo_limit: cli.top_repos,
        activity_limit: cli.max_activity,
        bar_width: cli.bar_width,
        include_forks_in_top: cli.include_forks,
    };

    let client = ApiClient::new(token)?;

    println!("🔍 Fetching profile for {}...", cli.username);
    let profile = match client.fetch_profile(&cli.username).await {
        Ok(profile) => profile,
        Err(e) if e.is_user_facing() => {
            eprintln!("❌ Error: {}", e);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("📦 Fetching repositories...");
    let repos = match client.fetch_repos(&cli.username).await {
        Ok(repos) => repos,
        Err(e) if e.is_user_facing() => {
            eprintln!("❌ Error: {}", e);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("   {} repositories found", repos.len());

    // The events endpoint flakes for some users; treat failure as an empty
    // feed instead of aborting the whole run
    println!("⚡ Fetching recent activity...");
    let events = match client.fetch_events(&cli.username).await {
        Ok(events) => events,
        Err(e) => {
            eprintln!("⚠️  Warning: could not fetch events, skipping activity: {}", e);
            Vec::new()
        }
    };

    println!("📝 Generating README...");
    let report = build_report(&profile, &repos, &events, &config);

    if cli.json {
        // Dump the aggregated data instead of rendering Markdown - handy
        // for piping into other tools
        let dump = serde_json::json!({ "profile": &profile, "report": &report });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(0);
    }

    let readme = render_readme(&profile, &report, &config)?;
    std::fs::write(&cli.output, &readme)?;

    println!("✅ Done! README written to {}", cli.output.display());
    Ok(0)
}
