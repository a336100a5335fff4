// src/github/models.rs
// =============================================================================
// This module defines the typed shapes of GitHub API responses.
//
// The API returns loosely-shaped JSON; we decode it into explicit structs at
// the fetch boundary so the rest of the program never touches raw JSON.
// A missing required field fails decoding right here instead of turning into
// a confusing null somewhere deep in aggregation.
//
// One quirk we smooth over: GitHub returns "" (empty string) for many unset
// optional fields like bio and blog. We normalize those to None during
// deserialization so "field absent" and "field empty" look the same.
//
// Rust concepts:
// - serde derive: Automatic JSON (de)serialization for our structs
// - Option<T>: Fields that may legitimately be absent
// - deserialize_with: Custom per-field decoding logic
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::Error;

// A user's profile from GET /users/{username}
//
// Required fields (login, avatar_url, counts) are plain types - if the API
// omits them the decode fails, which is exactly what we want.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub blog: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub twitter_username: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

impl Profile {
    /// Checks the invariants decoding alone can't express
    ///
    /// serde guarantees `login` exists, but not that it's non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.login.trim().is_empty() {
            return Err(Error::InvalidProfile("login"));
        }
        Ok(())
    }

    /// The name to greet the user with: display name, or login as fallback
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }

    /// The blog field as a clickable URL
    ///
    /// People put all sorts of things in this field ("example.com",
    /// "https://example.com", sometimes stranger). We keep values that parse
    /// as real http(s) URLs and prefix everything else with https://.
    pub fn blog_url(&self) -> Option<String> {
        let blog = self.blog.as_deref()?;
        match Url::parse(blog) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                Some(blog.to_string())
            }
            _ => Some(format!("https://{}", blog)),
        }
    }
}

// A repository from GET /users/{username}/repos
//
// The API's sort order is not trusted anywhere - the report layer re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    /// Primary language, or None for repos GitHub couldn't classify
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub updated_at: DateTime<Utc>,
}

// A raw public event from GET /users/{username}/events/public
//
// `type` is a free-form string ("PushEvent", "WatchEvent", ...) and the
// payload shape depends on it. We decode the union of the payload fields we
// care about; the report layer turns this into a closed enum and skips
// anything it doesn't recognize.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: EventPayload,
    pub created_at: DateTime<Utc>,
}

/// The repository an event happened in ("owner/name")
#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

// The union of event payload fields across the kinds we display
//
// Every field is optional because each event kind fills in a different
// subset. Commits stay as raw JSON values - we only ever count them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub action: Option<String>,
    pub size: Option<u32>,
    pub distinct_size: Option<u32>,
    #[serde(default)]
    pub commits: Vec<serde_json::Value>,
    pub pull_request: Option<TitledItem>,
    pub issue: Option<TitledItem>,
    pub ref_type: Option<String>,
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub forkee: Option<Forkee>,
}

/// A pull request or issue - we only display its title
#[derive(Debug, Clone, Deserialize)]
pub struct TitledItem {
    #[serde(default)]
    pub title: String,
}

/// The new repository created by a ForkEvent
#[derive(Debug, Clone, Deserialize)]
pub struct Forkee {
    pub full_name: String,
}

// Deserializes an optional string, treating "" and whitespace as None
//
// Used for the profile/repo fields where GitHub reports "unset" as an
// empty string rather than null.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<String> instead of String for bio, blog, etc.?
//    - These fields genuinely may not exist for a user
//    - Option forces every caller to handle the missing case
//    - Forgetting to handle it is a compile error, not a runtime surprise
//
// 2. What does #[serde(default)] do?
//    - If the field is absent from the JSON, use the type's default value
//    - Combined with deserialize_with, it also covers explicit nulls
//
// 3. Why rename "type" and "ref"?
//    - Both are reserved words in Rust, so they can't be field names
//    - #[serde(rename = "...")] maps the JSON name onto a legal one
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_profile() {
        let json = r#"{
            "login": "ada",
            "name": "Ada Lovelace",
            "bio": "First programmer",
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/ada",
            "location": "London",
            "company": "Analytical Engines Ltd",
            "blog": "https://ada.dev",
            "email": "ada@example.com",
            "twitter_username": "ada",
            "public_repos": 3,
            "followers": 100,
            "following": 10
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "ada");
        assert_eq!(profile.display_name(), "Ada Lovelace");
        assert_eq!(profile.followers, 100);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_optional_fields_become_none() {
        let json = r#"{
            "login": "ada",
            "name": null,
            "bio": "",
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/ada",
            "location": "   ",
            "company": null,
            "blog": "",
            "public_repos": 0,
            "followers": 0,
            "following": 0
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.bio, None);
        assert_eq!(profile.location, None);
        assert_eq!(profile.blog, None);
        assert_eq!(profile.blog_url(), None);
        // With no display name we fall back to the login
        assert_eq!(profile.display_name(), "ada");
    }

    #[test]
    fn test_missing_required_field_fails_decode() {
        // No "login" at all - this must be a decode error, not a default
        let json = r#"{
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/ada",
            "public_repos": 0,
            "followers": 0,
            "following": 0
        }"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn test_blank_login_fails_validation() {
        let json = r#"{
            "login": "  ",
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/x",
            "public_repos": 0,
            "followers": 0,
            "following": 0
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_blog_url_normalization() {
        let mut profile: Profile = serde_json::from_str(
            r#"{
                "login": "ada",
                "avatar_url": "a",
                "html_url": "h",
                "blog": "ada.dev",
                "public_repos": 0,
                "followers": 0,
                "following": 0
            }"#,
        )
        .unwrap();
        // Scheme-less values get an https:// prefix
        assert_eq!(profile.blog_url().as_deref(), Some("https://ada.dev"));

        profile.blog = Some("http://ada.dev".to_string());
        assert_eq!(profile.blog_url().as_deref(), Some("http://ada.dev"));

        profile.blog = Some("https://ada.dev/blog".to_string());
        assert_eq!(profile.blog_url().as_deref(), Some("https://ada.dev/blog"));
    }

    #[test]
    fn test_decode_repository_with_null_language() {
        let json = r#"{
            "name": "dotfiles",
            "html_url": "https://github.com/ada/dotfiles",
            "description": "",
            "language": null,
            "stargazers_count": 4,
            "forks_count": 1,
            "fork": false,
            "archived": false,
            "updated_at": "2024-03-05T12:00:00Z"
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.language, None);
        assert_eq!(repo.description, None);
        assert_eq!(repo.stargazers_count, 4);
    }

    #[test]
    fn test_decode_push_event() {
        let json = r#"{
            "type": "PushEvent",
            "repo": { "name": "ada/engine" },
            "payload": {
                "size": 3,
                "distinct_size": 3,
                "commits": [{"sha": "abc"}, {"sha": "def"}, {"sha": "123"}]
            },
            "created_at": "2024-03-05T12:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, "PushEvent");
        assert_eq!(event.repo.name, "ada/engine");
        assert_eq!(event.payload.commits.len(), 3);
    }

    #[test]
    fn test_decode_event_with_missing_payload() {
        // Some event kinds arrive with payloads we don't model; the fields we
        // do model should all default instead of failing the decode.
        let json = r#"{
            "type": "WatchEvent",
            "repo": { "name": "rust-lang/rust" },
            "payload": { "action": "started" },
            "created_at": "2024-03-05T12:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.payload.action.as_deref(), Some("started"));
        assert!(event.payload.commits.is_empty());
        assert!(event.payload.pull_request.is_none());
    }
}
