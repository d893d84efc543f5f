//! Curator notifications
//!
//! After an assignment is committed the selected curator is told about it.
//! Delivery is best effort: a failure is reported back to the caller but
//! never undoes the assignment.

pub mod slack;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::rotation::CurationWindow;
use crate::utils::retry::Retryable;

pub use slack::SlackNotifier;

/// What the newly assigned curator is told
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratorNotice {
    pub curator_name: String,
    pub email: Option<String>,
    pub slack_user_id: Option<String>,
    pub assignment_date: NaiveDate,
    pub window: CurationWindow,
}

impl CuratorNotice {
    /// Message body sent to the curator
    pub fn message(&self) -> String {
        // The stored end is exclusive; people read the last day
        let last_day = self.window.end_date - Duration::days(1);
        format!(
            "Hi {}! You're up as playlist curator. Your curation window runs from {} through {}. \
             Please publish your playlist before it starts.",
            self.curator_name.trim(),
            self.window.start_date.format("%A, %B %-d"),
            last_day.format("%A, %B %-d"),
        )
    }
}

/// Notification delivery errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("Notifications are not configured")]
    NotConfigured,

    #[error("No Slack user found for {0}")]
    RecipientNotFound(String),

    #[error("Slack rejected the credential: {0}")]
    Auth(String),

    #[error("Slack rate limit reached")]
    RateLimited,

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Retryable for NotifyError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::RateLimited | Self::Transport(_))
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.to_string())
    }
}

/// Delivery report attached to an auto-assign response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl NotificationOutcome {
    pub fn delivered() -> Self {
        Self {
            delivered: true,
            warning: None,
        }
    }

    pub fn failed(err: &NotifyError) -> Self {
        Self {
            delivered: false,
            warning: Some(format!("Assignment saved but the curator was not notified: {err}")),
        }
    }
}

/// Delivers curator notices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_curator(&self, notice: &CuratorNotice) -> Result<(), NotifyError>;
}

/// Notifier used when Slack is not configured; only logs the notice
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_curator(&self, notice: &CuratorNotice) -> Result<(), NotifyError> {
        tracing::info!(
            curator = %notice.curator_name,
            assignment_date = %notice.assignment_date,
            window = %notice.window,
            "Curator notice (Slack not configured)"
        );
        Ok(())
    }
}
