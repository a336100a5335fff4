// src/report/mod.rs
// =============================================================================
// This module contains the report core: aggregation and rendering.
//
// Submodules:
// - aggregate: Derives the AggregatedReport from fetched records
// - render: Turns a report into the final Markdown document
//
// Data flows one way through here: fetched records come in, an
// AggregatedReport is derived, Markdown comes out. Both halves are pure
// functions, so they're also where almost all of the tests live.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod aggregate;
mod render;

pub use aggregate::{
    build_report, ActivityEntry, AggregatedReport, EventKind, LanguageStat, ProfileStats,
    ReportConfig,
};
pub use render::render_readme;
