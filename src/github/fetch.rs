// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Strategy:
// - One ApiClient holding a reqwest Client and an optional token
// - Every request sends the v3 Accept header and a fixed User-Agent
// - Repository listing paginates sequentially, 100 per page, until a short
//   or empty page comes back
// - Events are a single page of the most recent public activity (the API
//   only retains recent events anyway)
//
// Error mapping happens here too: 404 becomes NotFound, 403 becomes
// RateLimited (with the reset time from the X-RateLimit-Reset header when
// present), and anything else non-2xx becomes ApiStatus.
//
// Rust concepts:
// - async functions: For network I/O
// - Generics with trait bounds: get_json works for any Deserialize target
// - Result: For error handling with the ? operator
// =============================================================================

use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::Error;
use crate::github::models::{Event, Profile, Repository};

/// Base URL of the GitHub REST API
const API_BASE: &str = "https://api.github.com";

/// User-Agent sent with every request (GitHub rejects requests without one)
const USER_AGENT: &str = "readme-forge";

/// Repositories fetched per page; the API maximum
const REPOS_PER_PAGE: usize = 100;

/// Events fetched in the single activity request
const EVENTS_PER_PAGE: usize = 30;

// A thin client over the GitHub REST API
//
// Holds the HTTP client (reused across requests for connection pooling)
// and the optional personal access token.
pub struct ApiClient {
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client with a 30 second per-request timeout
    pub fn new(token: Option<String>) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(ApiClient { client, token })
    }

    /// Fetches and validates the user's profile
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, Error> {
        let profile: Profile = self.get_json(&profile_url(username)).await?;
        profile.validate()?;
        Ok(profile)
    }

    /// Fetches all public repos, paginating if necessary
    ///
    /// Pages are requested one after another - the order the report layer
    /// sees matches the order the API returned them in.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>, Error> {
        let mut repos = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<Repository> = self.get_json(&repos_page_url(username, page)).await?;
            let batch_len = batch.len();
            if batch_len == 0 {
                break;
            }
            repos.extend(batch);
            // A short page means we just read the last one
            if batch_len < REPOS_PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(repos)
    }

    /// Fetches the user's recent public events
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<Event>, Error> {
        self.get_json(&events_url(username)).await
    }

    // Performs a GET request and decodes the JSON response
    //
    // All the header plumbing and status-code mapping lives here so the
    // fetch functions above stay one-liners.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::USER_AGENT, USER_AGENT);

        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }
        if status == StatusCode::FORBIDDEN {
            // Unauthenticated requests hit this after 60 requests/hour.
            // The reset header tells us when the quota refills.
            let resets_at = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|value| value.to_str().ok())
                .and_then(parse_reset_header);
            return Err(Error::RateLimited { resets_at });
        }
        if !status.is_success() {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Decode from the body text ourselves so a shape mismatch surfaces
        // as our Decode error (upstream data error), not a transport error
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// URL for a user's profile
fn profile_url(username: &str) -> String {
    format!("{}/users/{}", API_BASE, username)
}

/// URL for one page of a user's repositories
fn repos_page_url(username: &str, page: usize) -> String {
    format!(
        "{}/users/{}/repos?sort=stars&direction=desc&per_page={}&page={}",
        API_BASE, username, REPOS_PER_PAGE, page
    )
}

/// URL for a user's recent public events
fn events_url(username: &str) -> String {
    format!(
        "{}/users/{}/events/public?per_page={}",
        API_BASE, username, EVENTS_PER_PAGE
    )
}

// Parses the X-RateLimit-Reset header (unix seconds) into a timestamp
fn parse_reset_header(value: &str) -> Option<DateTime<Utc>> {
    let seconds: i64 = value.trim().parse().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is DeserializeOwned?
//    - A trait bound meaning "can be deserialized without borrowing from
//      the input"
//    - get_json decodes from a body String that's dropped when it returns,
//      so the decoded value must own all its data
//
// 2. Why a loop instead of fetching pages concurrently?
//    - The next page only matters if the previous one was full
//    - Sequential paging keeps ordering simple and stays polite to the API
//
// 3. Why build URLs in tiny helper functions?
//    - Pure functions of their inputs, so they're trivially testable
//    - The async client code stays free of string-formatting noise
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url() {
        assert_eq!(profile_url("ada"), "https://api.github.com/users/ada");
    }

    #[test]
    fn test_repos_page_url() {
        assert_eq!(
            repos_page_url("ada", 2),
            "https://api.github.com/users/ada/repos?sort=stars&direction=desc&per_page=100&page=2"
        );
    }

    #[test]
    fn test_events_url() {
        assert_eq!(
            events_url("ada"),
            "https://api.github.com/users/ada/events/public?per_page=30"
        );
    }

    #[test]
    fn test_parse_reset_header() {
        let parsed = parse_reset_header("1700000000").unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
        assert!(parse_reset_header("not-a-number").is_none());
        assert!(parse_reset_header("").is_none());
    }
}
