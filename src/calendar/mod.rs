//! Remote calendar mirroring
//!
//! The provider client fetches events; [`reconcile`] decides which stored rows
//! to insert, update, touch or soft-delete.

pub mod error;
pub mod event;
pub mod google;
pub mod reconcile;
pub mod source;

pub use error::CalendarError;
pub use event::{RemoteEvent, normalize_summary};
pub use google::{GoogleCalendarClient, GoogleCredential};
pub use reconcile::{ReconcileCounts, ReconcilePlan, reconcile, reconcile_partial};
pub use source::{CalendarSource, EventQuery, FetchedCalendar, UnconfiguredCalendarSource};
