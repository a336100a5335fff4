// src/report/render.rs
// =============================================================================
// This module renders an AggregatedReport into the final Markdown document.
//
// Section order is fixed:
// 1. Header (name, avatar, bio, location/company/blog line)
// 2. Stats table (followers, following, public repos, total stars)
// 3. Top repositories table
// 4. Language bar chart
// 5. Recent activity list
// 6. Connect footer (blog, twitter, email, GitHub profile)
//
// Rendering is a pure function: the same profile and report always produce
// byte-identical output, which is what lets the tests compare exact strings.
// Missing optional profile data never fails a render - the corresponding
// line is simply left out. The only failure mode is a report that violates
// its own invariants, which means an aggregation bug upstream.
//
// Rust concepts:
// - String building with push_str and format!
// - Option combinators: map, and_then, filter
// - Slices and windows() for pairwise invariant checks
// =============================================================================

use std::cmp::Ordering;

use crate::error::Error;
use crate::github::{Profile, Repository};
use crate::report::aggregate::{ActivityEntry, AggregatedReport, LanguageStat, ReportConfig};

/// Longest description shown in the top-repositories table
const MAX_DESCRIPTION_LEN: usize = 80;

/// Placeholder line when the user has no displayable recent events
const NO_ACTIVITY_PLACEHOLDER: &str = "_No recent public activity._";

// Renders the complete README text
//
// Sections that would be empty (no repos, no languages) are dropped from
// the document; the activity section is the exception and always renders,
// with a placeholder when the feed is empty.
pub fn render_readme(
    profile: &Profile,
    report: &AggregatedReport,
    config: &ReportConfig,
) -> Result<String, Error> {
    validate_report(report)?;

    let mut sections = vec![section_header(profile), section_stats(report)];
    if let Some(section) = section_top_repos(&report.top_repos) {
        sections.push(section);
    }
    if let Some(section) = section_languages(&report.languages, config.bar_width) {
        sections.push(section);
    }
    sections.push(section_activity(&report.activity));
    sections.push(section_connect(profile));

    let mut readme = sections.join("\n---\n\n");
    readme.push_str(
        "\n---\n\n<p align=\"center\"><i>Generated with \
         <a href=\"https://github.com\">readme-forge</a></i></p>\n",
    );
    Ok(readme)
}

// Checks the report invariants before formatting anything
//
// These can only fail if the aggregation code has a bug, so the error is a
// contract violation rather than a user-facing condition.
fn validate_report(report: &AggregatedReport) -> Result<(), Error> {
    let total_weight: u64 = report.languages.iter().map(|l| l.weight).sum();
    for stat in &report.languages {
        if stat.weight == 0 {
            return Err(Error::MalformedReport(format!(
                "language {} has zero weight",
                stat.name
            )));
        }
        let expected = stat.weight as f64 / total_weight as f64;
        if (stat.share - expected).abs() > 1e-9 {
            return Err(Error::MalformedReport(format!(
                "language {} share {} does not match weight {}/{}",
                stat.name, stat.share, stat.weight, total_weight
            )));
        }
    }

    for pair in report.activity.windows(2) {
        if pair[0].timestamp < pair[1].timestamp {
            return Err(Error::MalformedReport(
                "activity feed is not ordered newest-first".to_string(),
            ));
        }
    }

    for pair in report.top_repos.windows(2) {
        let ordered = match pair[0].stargazers_count.cmp(&pair[1].stargazers_count) {
            Ordering::Greater => true,
            Ordering::Equal => pair[0].name <= pair[1].name,
            Ordering::Less => false,
        };
        if !ordered {
            return Err(Error::MalformedReport(
                "top repositories are not ordered by stars".to_string(),
            ));
        }
    }

    Ok(())
}

// The greeting, avatar, bio, and metadata line
//
// Every optional field that's absent is omitted outright - no empty
// placeholders.
fn section_header(profile: &Profile) -> String {
    let mut lines = Vec::new();
    lines.push(format!("# Hi there! I'm {} 👋\n", profile.display_name()));
    lines.push(format!(
        "<img src=\"{}\" width=\"200\" align=\"right\" />\n",
        profile.avatar_url
    ));
    if let Some(bio) = &profile.bio {
        lines.push(format!("**{}**\n", bio));
    }

    let mut meta = Vec::new();
    if let Some(location) = &profile.location {
        meta.push(format!("📍 {}", location));
    }
    if let Some(company) = &profile.company {
        meta.push(format!("🏢 {}", company));
    }
    if let (Some(blog), Some(url)) = (&profile.blog, profile.blog_url()) {
        meta.push(format!("🔗 [{}]({})", blog, url));
    }
    if !meta.is_empty() {
        lines.push(format!("{}\n", meta.join(" | ")));
    }

    lines.join("\n")
}

// The stats table: one header row, one data row
fn section_stats(report: &AggregatedReport) -> String {
    let stats = &report.stats;
    [
        "## 📊 GitHub Stats\n".to_string(),
        "| Followers | Following | Public Repos | Total Stars |".to_string(),
        "|-----------|-----------|--------------|-------------|".to_string(),
        format!(
            "| {} | {} | {} | {} |\n",
            stats.followers, stats.following, stats.public_repos, stats.total_stars
        ),
    ]
    .join("\n")
}

// The top repositories table, or None when there's nothing to rank
fn section_top_repos(top_repos: &[Repository]) -> Option<String> {
    if top_repos.is_empty() {
        return None;
    }

    let mut lines = vec![
        "## 🏆 Top Repositories\n".to_string(),
        "| Repository | Description | Language | ⭐ | 🍴 |".to_string(),
        "|------------|-------------|----------|---:|---:|".to_string(),
    ];
    for repo in top_repos {
        let description = repo
            .description
            .as_deref()
            .map(table_description)
            .unwrap_or_default();
        let language = repo.language.as_deref().unwrap_or("—");
        lines.push(format!(
            "| [{}]({}) | {} | {} | {} | {} |",
            repo.name, repo.html_url, description, language, repo.stargazers_count, repo.forks_count
        ));
    }
    lines.push(String::new());
    Some(lines.join("\n"))
}

// Truncates and escapes a description so it can't break the table
fn table_description(description: &str) -> String {
    let truncated: String = if description.chars().count() > MAX_DESCRIPTION_LEN {
        let head: String = description.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    };
    truncated.replace('|', "\\|")
}

// The language bar chart, or None when no repo has a language
//
// Each bar fills floor(share * bar_width) characters out of a fixed budget,
// so the chart lines up and the output stays reproducible.
fn section_languages(languages: &[LanguageStat], bar_width: usize) -> Option<String> {
    if languages.is_empty() {
        return None;
    }

    let mut lines = vec!["## 💻 Language Breakdown\n".to_string()];
    for stat in languages {
        let filled = (stat.share * bar_width as f64).floor() as usize;
        let bar = "█".repeat(filled);
        lines.push(format!(
            "- **{}** {} {:.1}%",
            stat.name,
            bar,
            stat.share * 100.0
        ));
    }
    lines.push(String::new());
    Some(lines.join("\n"))
}

// The recent activity list
//
// Always present. An empty feed renders the placeholder line so a reader
// can tell "no activity" apart from "section missing".
fn section_activity(activity: &[ActivityEntry]) -> String {
    let mut lines = vec!["## ⚡ Recent Activity\n".to_string()];
    if activity.is_empty() {
        lines.push(NO_ACTIVITY_PLACEHOLDER.to_string());
    } else {
        for entry in activity {
            lines.push(format!("- {}", activity_line(entry)));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

// One feed line: icon, verb, linked repo, optional suffix, date
fn activity_line(entry: &ActivityEntry) -> String {
    format!(
        "{} {} [{}](https://github.com/{}){} ({})",
        entry.kind.icon(),
        entry.kind.verb(),
        entry.repo,
        entry.repo,
        entry.kind.suffix().unwrap_or_default(),
        entry.timestamp.format("%b %d")
    )
}

// The contact links footer
//
// The GitHub profile link is always there; everything else only when the
// profile carries it.
fn section_connect(profile: &Profile) -> String {
    let mut links = Vec::new();
    if let (Some(blog), Some(url)) = (&profile.blog, profile.blog_url()) {
        links.push(format!("- 🌐 [{}]({})", blog, url));
    }
    if let Some(twitter) = &profile.twitter_username {
        links.push(format!("- 🐦 [@{}](https://twitter.com/{})", twitter, twitter));
    }
    if let Some(email) = &profile.email {
        links.push(format!("- 📧 [{}](mailto:{})", email, email));
    }
    links.push(format!(
        "- 🐙 [{}](https://github.com/{})",
        profile.login, profile.login
    ));

    format!("## 🤝 Connect With Me\n\n{}\n", links.join("\n"))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does render_readme return Result when it can't do I/O?
//    - The invariant checks can fail, and a failure means a bug upstream
//    - Returning the error (instead of panicking) lets main.rs decide how
//      to report it
//
// 2. What does windows(2) do?
//    - Yields overlapping pairs of neighbors: [a,b], [b,c], ...
//    - Perfect for "is this slice sorted?" style checks
//
// 3. Why build sections as Vec<String> and join at the end?
//    - Optional sections can simply not be pushed
//    - The separator logic lives in exactly one place
// -----------------------------------------------------------------------------
