//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and endpoint fragments so the rest
//! of the codebase stays free of inline literals.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Name of the sentinel phase covering the whole season.
/// It spans every gameweek and must never take part in phase-boundary logic.
pub const OVERALL_PHASE_NAME: &str = "Overall";

/// Fixed offset applied to deadlines before they are shown to the user,
/// in seconds east of UTC (+05:30, Indian Standard Time).
pub const DISPLAY_UTC_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// TTL for a cached bootstrap snapshot (5 minutes). Deadlines move on a
    /// weekly cadence, so staleness only matters around deadline day.
    pub const SNAPSHOT_SECONDS: u64 = 300;
}

/// API endpoint path fragments, joined onto the configured base URL
pub mod endpoints {
    /// Full-season snapshot: gameweeks (`events`) and phases
    pub const BOOTSTRAP: &str = "bootstrap-static/";

    /// Per-manager gameweek history; the entry id goes between
    /// `ENTRY_PREFIX` and `HISTORY_SUFFIX`
    pub const ENTRY_PREFIX: &str = "entry/";
    pub const HISTORY_SUFFIX: &str = "/history/";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_BASE_URL: &str = "FPL_API_BASE_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "FPL_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "FPL_HTTP_TIMEOUT";
}
