// src/report/aggregate.rs
// =============================================================================
// This module turns raw fetched records into an AggregatedReport.
//
// What gets derived:
// - Headline stats (follower counts plus the total star sum)
// - The top repositories, ranked by stars
// - A language histogram over the repos that have a primary language
// - A normalized, time-ordered activity feed from the raw event stream
//
// Everything in here is a pure function over immutable inputs: same records
// in, byte-identical report out. No clocks, no randomness, no I/O.
//
// Ranking policies (deterministic on purpose):
// - The star total counts every fetched repo, forks and archived included
// - The top list excludes forks unless configured otherwise, and breaks
//   star-count ties by repository name so reruns can't reshuffle rows
//
// Rust concepts:
// - BTreeMap: A map with deterministic (sorted) iteration order
// - sort_by with Ordering::then_with: Multi-key comparisons
// - filter_map: Transform and drop elements in one pass
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::github::{Event, Profile, Repository};

// Tunable knobs for aggregation and rendering
//
// One immutable value built from the CLI flags and threaded through the
// report functions - there is no global configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// How many repositories the top list may hold
    pub top_repo_limit: usize,
    /// How many activity entries the feed may hold
    pub activity_limit: usize,
    /// Character budget for a full-width language bar
    pub bar_width: usize,
    /// Whether forks may appear in the top repositories list
    pub include_forks_in_top: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top_repo_limit: 6,
            activity_limit: 10,
            bar_width: 20,
            include_forks_in_top: false,
        }
    }
}

// The derived summary everything downstream renders from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReport {
    pub stats: ProfileStats,
    pub top_repos: Vec<Repository>,
    pub languages: Vec<LanguageStat>,
    pub activity: Vec<ActivityEntry>,
}

/// The numbers for the stats table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub total_stars: u64,
}

/// One language's weight in the histogram
///
/// `weight` is a repository count (the repo listing carries no byte-level
/// stats). `share` is weight divided by the summed weight of all languages
/// that made it into the histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageStat {
    pub name: String,
    pub weight: u64,
    pub share: f64,
}

/// One normalized entry in the activity feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub kind: EventKind,
    /// The repository the event happened in, as "owner/name"
    pub repo: String,
    pub timestamp: DateTime<Utc>,
}

// The closed set of event kinds we know how to display
//
// Raw events carry a free-form type string; normalization maps the ones we
// recognize onto this enum and silently skips the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Push { commits: u32 },
    PullRequest { action: String, title: String },
    Issue { action: String, title: String },
    Starred,
    Fork { forkee: Option<String> },
    Create { ref_type: String, ref_name: Option<String> },
    IssueComment { title: String },
}

impl EventKind {
    /// A small icon for the feed line
    pub fn icon(&self) -> &'static str {
        match self {
            EventKind::Push { .. } => "📤",
            EventKind::PullRequest { .. } => "🔀",
            EventKind::Issue { .. } => "❗",
            EventKind::Starred => "⭐",
            EventKind::Fork { .. } => "🍴",
            EventKind::Create { .. } => "🎉",
            EventKind::IssueComment { .. } => "💬",
        }
    }

    /// The display phrase that goes before the repository link
    pub fn verb(&self) -> String {
        match self {
            EventKind::Push { commits } => {
                let unit = if *commits == 1 { "commit" } else { "commits" };
                format!("Pushed {} {} to", commits, unit)
            }
            EventKind::PullRequest { action, title } => {
                format!("{} PR \"{}\" in", capitalize(action), title)
            }
            EventKind::Issue { action, title } => {
                format!("{} issue \"{}\" in", capitalize(action), title)
            }
            EventKind::Starred => "Starred".to_string(),
            EventKind::Fork { .. } => "Forked".to_string(),
            EventKind::Create { ref_type, ref_name } => match ref_name {
                None => "Created repository".to_string(),
                Some(name) => format!("Created {} `{}` in", ref_type, name),
            },
            EventKind::IssueComment { title } => {
                format!("Commented on \"{}\" in", title)
            }
        }
    }

    /// Extra text after the repository link, if the kind has any
    pub fn suffix(&self) -> Option<String> {
        match self {
            EventKind::Fork { forkee: Some(name) } => Some(format!(" to `{}`", name)),
            _ => None,
        }
    }
}

// Builds the full report from fetched records
//
// This is the single entry point the CLI calls between fetching and
// rendering.
pub fn build_report(
    profile: &Profile,
    repos: &[Repository],
    events: &[Event],
    config: &ReportConfig,
) -> AggregatedReport {
    AggregatedReport {
        stats: ProfileStats {
            followers: profile.followers,
            following: profile.following,
            public_repos: profile.public_repos,
            total_stars: total_stars(repos),
        },
        top_repos: top_repositories(repos, config),
        languages: language_histogram(repos),
        activity: recent_activity(events, config.activity_limit),
    }
}

/// Sums stars over every fetched repository
///
/// Forks and archived repos count toward the total; only the top list
/// filters forks out.
pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| u64::from(r.stargazers_count)).sum()
}

/// Ranks repositories by star count and keeps the best
///
/// Sort key is (stars descending, name ascending). The name tie-break keeps
/// the output stable across runs even when the API shuffles equal-star
/// repos between pages.
pub fn top_repositories(repos: &[Repository], config: &ReportConfig) -> Vec<Repository> {
    let mut candidates: Vec<Repository> = repos
        .iter()
        .filter(|r| config.include_forks_in_top || !r.fork)
        .cloned()
        .collect();

    candidates.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates.truncate(config.top_repo_limit);
    candidates
}

/// Counts primary languages across the repository list
///
/// Repos without a primary language are excluded entirely - they neither
/// add a bucket nor dilute the shares. The result is sorted by weight
/// descending, ties alphabetical.
pub fn language_histogram(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref() {
            *counts.entry(language).or_insert(0) += 1;
        }
    }

    let total: u64 = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut stats: Vec<LanguageStat> = counts
        .into_iter()
        .map(|(name, weight)| LanguageStat {
            name: name.to_string(),
            weight,
            share: weight as f64 / total as f64,
        })
        .collect();

    stats.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Normalizes, orders, and caps the raw event stream
///
/// Events the normalizer doesn't recognize are dropped before the cap is
/// applied, so the feed holds up to `limit` displayable entries. The API
/// usually returns newest-first already, but that ordering is not trusted -
/// we sort explicitly.
pub fn recent_activity(events: &[Event], limit: usize) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = events.iter().filter_map(normalize_event).collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);
    entries
}

// Maps one raw event onto a displayable entry, or None to skip it
fn normalize_event(event: &Event) -> Option<ActivityEntry> {
    let payload = &event.payload;
    let kind = match event.kind.as_str() {
        "PushEvent" => {
            // Prefer the actual commit list; fall back on the payload's
            // counters for truncated pushes, and on 1 as a last resort
            let mut commits = payload.commits.len() as u32;
            if commits == 0 {
                commits = payload.size.unwrap_or(0);
            }
            if commits == 0 {
                commits = payload.distinct_size.unwrap_or(1);
            }
            EventKind::Push { commits }
        }
        "PullRequestEvent" => EventKind::PullRequest {
            action: payload.action.clone().unwrap_or_default(),
            title: payload
                .pull_request
                .as_ref()
                .map(|pr| pr.title.clone())
                .unwrap_or_default(),
        },
        "IssuesEvent" => EventKind::Issue {
            action: payload.action.clone().unwrap_or_default(),
            title: payload
                .issue
                .as_ref()
                .map(|issue| issue.title.clone())
                .unwrap_or_default(),
        },
        "WatchEvent" => EventKind::Starred,
        "ForkEvent" => EventKind::Fork {
            forkee: payload.forkee.as_ref().map(|f| f.full_name.clone()),
        },
        "CreateEvent" => {
            let ref_type = payload.ref_type.as_deref().unwrap_or_default();
            if ref_type == "repository" {
                EventKind::Create {
                    ref_type: ref_type.to_string(),
                    ref_name: None,
                }
            } else if let Some(ref_name) = payload.ref_name.clone() {
                EventKind::Create {
                    ref_type: ref_type.to_string(),
                    ref_name: Some(ref_name),
                }
            } else {
                // A create event for a branch/tag we can't name - skip it
                return None;
            }
        }
        "IssueCommentEvent" => EventKind::IssueComment {
            title: payload
                .issue
                .as_ref()
                .map(|issue| issue.title.clone())
                .unwrap_or_default(),
        },
        _ => return None,
    };

    Some(ActivityEntry {
        kind,
        repo: event.repo.name.clone(),
        timestamp: event.created_at,
    })
}

// Uppercases the first character ("opened" -> "Opened")
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
