// src/error.rs
// =============================================================================
// This file defines the error type shared by the fetch and report layers.
//
// We distinguish three families of failures:
// - API/network problems (user not found, rate limit, HTTP errors)
// - Upstream data problems (responses that don't decode, invalid profiles)
// - Internal contract violations (a malformed report handed to the renderer)
//
// The CLI layer in main.rs decides how each family maps to a message and an
// exit code - this module only names the failures.
//
// Rust concepts:
// - Enums with data: Each variant carries the details of that failure
// - thiserror: Derives std::error::Error and Display for us
// - #[from]: Automatic conversion so the ? operator works on foreign errors
// =============================================================================

use chrono::{DateTime, Utc};
use thiserror::Error;

// The error type for everything below the CLI layer
//
// #[derive(Error)] generates the std::error::Error impl
// #[error("...")] on each variant generates its Display message
#[derive(Error, Debug)]
pub enum Error {
    /// The API returned 404 for a resource (usually an unknown username)
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The API returned 403 because the rate limit was exhausted
    ///
    /// If the X-RateLimit-Reset header was present, we carry the instant the
    /// quota comes back so the message can include it.
    #[error(
        "GitHub API rate limit exceeded.{} Use --token to authenticate for higher limits",
        .resets_at
            .map(|t| format!(" Resets at {}.", t.format("%Y-%m-%d %H:%M:%S UTC")))
            .unwrap_or_default()
    )]
    RateLimited { resets_at: Option<DateTime<Utc>> },

    /// The API returned some other non-success status code
    #[error("GitHub API returned HTTP {status} for {url}")]
    ApiStatus { status: u16, url: String },

    /// The request itself failed (DNS, timeout, TLS, ...)
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected
    ///
    /// This is an upstream data error: a required field was missing or had
    /// the wrong type, and we refuse to aggregate over it.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded profile was missing a required value
    #[error("profile is missing required field: {0}")]
    InvalidProfile(&'static str),

    /// An aggregated report failed its own invariants
    ///
    /// Reaching this means a bug in the aggregation code, not bad user input,
    /// so the renderer fails fast instead of emitting a broken document.
    #[error("malformed report: {0}")]
    MalformedReport(String),
}

impl Error {
    /// True for failures a user can cause or fix themselves
    ///
    /// The CLI prints these as friendly messages and exits with code 1.
    /// Everything else is treated as unexpected and exits with code 2.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::RateLimited { .. }
                | Error::ApiStatus { .. }
                | Error::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_without_reset() {
        let err = Error::RateLimited { resets_at: None };
        let msg = err.to_string();
        assert!(msg.contains("rate limit exceeded"));
        assert!(msg.contains("--token"));
        assert!(!msg.contains("Resets at"));
    }

    #[test]
    fn test_rate_limit_message_with_reset() {
        let resets_at = DateTime::from_timestamp(1_700_000_000, 0);
        let err = Error::RateLimited { resets_at };
        assert!(err.to_string().contains("Resets at 2023-11-14 22:13:20 UTC"));
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(Error::NotFound("https://api.github.com/users/nobody".to_string()).is_user_facing());
        assert!(Error::RateLimited { resets_at: None }.is_user_facing());
        assert!(!Error::InvalidProfile("login").is_user_facing());
        assert!(!Error::MalformedReport("bad shares".to_string()).is_user_facing());
    }
}
