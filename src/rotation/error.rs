//! Error types for the rotation engine

use chrono::NaiveDate;
use uuid::Uuid;

use super::window::CurationWindow;

/// Result type for rotation decisions
pub type RotationResult<T> = Result<T, RotationError>;

/// Normal control-flow outcomes that prevent an automatic assignment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    /// Nobody in the pool can take the window
    #[error("No eligible curators for assignment date {date}")]
    NoEligibleCurators { date: NaiveDate },

    /// The requested window would double-book an existing assignment
    #[error("Window {window} overlaps assignment {existing_id} held by {existing_curator}")]
    Overlap {
        existing_id: Uuid,
        existing_curator: String,
        window: CurationWindow,
    },
}
