//! Manual event request DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_DESCRIPTION_LENGTH, MAX_EVENT_TITLE_LENGTH};
use crate::utils::validation::validate_hex_color;

/// Manual events query parameters (start date range)
#[derive(Debug, Default, Deserialize)]
pub struct ManualEventsQuery {
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub time_min: Option<String>,
    pub time_max: Option<String>,
}

/// Create or update a manual event.
///
/// `title` and `start_date` are checked by the service so that missing
/// fields are reported together.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ManualEventRequest {
    #[validate(length(max = MAX_EVENT_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,

    /// Defaults to `start_date`
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,

    pub location: Option<String>,

    #[serde(default)]
    pub is_all_day: bool,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}
