//! Curator rotation request DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_CURATOR_NAME_LENGTH;

/// Assignment overview query parameters
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentsQuery {
    pub limit: Option<i64>,
    /// Earliest window start date (inclusive)
    pub from: Option<NaiveDate>,
    /// Latest window start date (inclusive)
    pub to: Option<NaiveDate>,
}

/// Window preview query parameters
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    /// Assignment date, defaults to today
    pub date: Option<NaiveDate>,
}

/// Auto-assign request (the body is optional)
#[derive(Debug, Default, Deserialize)]
pub struct AutoAssignRequest {
    /// Overrides the derived assignment date
    pub assignment_date: Option<NaiveDate>,
}

/// Manual assignment request.
///
/// Required fields are optional here so that every missing one can be
/// reported at once.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ManualAssignRequest {
    pub assignment_date: Option<NaiveDate>,

    #[validate(length(max = MAX_CURATOR_NAME_LENGTH))]
    pub curator_name: Option<String>,

    pub curator_profile_id: Option<Uuid>,
}
