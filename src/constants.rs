//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size (256 KB)
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Audience claim carried by dashboard session tokens
pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

// =============================================================================
// CURATOR ROTATION
// =============================================================================

/// Days between the assignment (notification) date and the start of the window
pub const WINDOW_START_OFFSET_DAYS: i64 = 3;

/// Days between the assignment date and the (exclusive) end of the window
pub const WINDOW_END_OFFSET_DAYS: i64 = 10;

/// Key for the transaction-scoped advisory lock serializing auto-assignments
pub const AUTO_ASSIGN_LOCK_KEY: i64 = 0x6375_7261_746f_72;

/// Default number of assignments returned by the overview
pub const DEFAULT_ASSIGNMENT_LIMIT: i64 = 50;

/// Maximum number of assignments returned by the overview
pub const MAX_ASSIGNMENT_LIMIT: i64 = 500;

/// Maximum curator name length
pub const MAX_CURATOR_NAME_LENGTH: u64 = 128;

// =============================================================================
// PLAYLISTS
// =============================================================================

/// Default number of playlists listed
pub const DEFAULT_PLAYLIST_LIMIT: i64 = 100;

/// Maximum number of playlists listed
pub const MAX_PLAYLIST_LIMIT: i64 = 500;

// =============================================================================
// CALENDAR SYNC
// =============================================================================

/// Default sync horizon in days (from now)
pub const DEFAULT_SYNC_WINDOW_DAYS: i64 = 30;

/// Default maximum events fetched per calendar during a sync
pub const DEFAULT_SYNC_MAX_RESULTS: u32 = 250;

/// Google caps `maxResults` per page at this value
pub const GOOGLE_MAX_PAGE_SIZE: u32 = 2500;

/// Summary used for remote events without a title
pub const UNTITLED_EVENT_SUMMARY: &str = "No Title";

/// Google Calendar REST base URL
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google OAuth2 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Read-only calendar scope requested by the service account
pub const GOOGLE_CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// Lifetime of a service account assertion in seconds
pub const GOOGLE_ASSERTION_TTL_SECS: i64 = 3600;

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Slack Web API base URL
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Timeout for outbound notification requests in seconds
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// USER ROLES
// =============================================================================

/// Base role identifiers
pub mod roles {
    pub const USER: &str = "user";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const LEADER: &str = "leader";
    pub const ADMIN: &str = "admin";

    /// All base roles
    pub const ALL: &[&str] = &[USER, CONTRIBUTOR, LEADER, ADMIN];
}

/// Special access grants layered on top of the base role
pub mod special_access {
    pub const CURATOR: &str = "curator";
    pub const BEAST_BABE: &str = "beast_babe";
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum manual event title length
pub const MAX_EVENT_TITLE_LENGTH: u64 = 256;

/// Maximum free text length (descriptions)
pub const MAX_DESCRIPTION_LENGTH: u64 = 10_000;

/// Maximum URL length accepted for playlist links
pub const MAX_URL_LENGTH: u64 = 2048;
