//! Utility functions

pub mod hash;
pub mod retry;
pub mod time;
pub mod validation;

pub use hash::hash_fields;
pub use retry::{FallbackChain, Retryable};
pub use time::{now_utc, parse_range_bound, resolve_range, today_utc};
pub use validation::{non_blank, require_fields, validate_hex_color};
