//! Calendar provider abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::CalendarError;
use super::event::RemoteEvent;
use super::reconcile::{ReconcilePlan, reconcile, reconcile_partial};
use crate::models::StoredEventDigest;

/// One calendar fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub max_results: u32,
    /// Strip the approval prefix from summaries
    pub out_of_office: bool,
}

/// Events of one calendar within a window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedCalendar {
    pub calendar_name: Option<String>,
    pub events: Vec<RemoteEvent>,
    /// The result cap was reached while the provider still had more pages
    pub truncated: bool,
}

impl FetchedCalendar {
    /// Diff this fetch against the stored digests of its window.
    ///
    /// A truncated fetch never soft-deletes: stored events it did not return
    /// may lie past the cut.
    pub fn plan(&self, existing: &[StoredEventDigest]) -> ReconcilePlan {
        if self.truncated {
            reconcile_partial(existing, &self.events)
        } else {
            reconcile(existing, &self.events)
        }
    }
}

/// A remote calendar provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch the expanded (single) events of a calendar in a window
    async fn fetch_events(&self, query: &EventQuery) -> Result<FetchedCalendar, CalendarError>;

    /// Identity calendars must be shared with, for error messages
    fn principal(&self) -> Option<String>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Stand-in used when no calendar credentials are configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredCalendarSource;

#[async_trait]
impl CalendarSource for UnconfiguredCalendarSource {
    async fn fetch_events(&self, _query: &EventQuery) -> Result<FetchedCalendar, CalendarError> {
        Err(CalendarError::NotConfigured)
    }

    fn principal(&self) -> Option<String> {
        None
    }

    fn is_configured(&self) -> bool {
        false
    }
}
