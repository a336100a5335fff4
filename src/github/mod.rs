// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub-specific: the typed shapes of API
// responses and the client that fetches them.
//
// Submodules:
// - models: Typed structs the API JSON decodes into
// - fetch: The ApiClient and its pagination logic
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the application can write `github::ApiClient` without knowing
// about our internal file layout.
//
// Rust concepts:
// - Modules: Organizing related functionality
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod fetch;
mod models;

pub use fetch::ApiClient;
pub use models::{Event, EventPayload, EventRepo, Forkee, Profile, Repository, TitledItem};
