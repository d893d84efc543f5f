//! Calendar provider errors

use crate::utils::retry::Retryable;

/// Failure talking to a remote calendar provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("No calendar credentials configured")]
    NotConfigured,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Calendar API returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed calendar response: {0}")]
    Decode(String),
}

impl CalendarError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Auth(body),
            429 => Self::Quota(body),
            403 if body.contains("rateLimitExceeded") || body.contains("quotaExceeded") => {
                Self::Quota(body)
            }
            _ => Self::Http {
                status,
                message: body,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Actionable explanation for an admin looking at a failed sync.
    ///
    /// `principal` is the identity calendars must be shared with, when known.
    pub fn describe(&self, calendar_id: &str, principal: Option<&str>) -> String {
        let principal = principal.unwrap_or("the configured service account");
        match self {
            Self::Http { status: 403, message }
                if message.contains("has not been used") || message.contains("disabled") =>
            {
                "Google Calendar API is not enabled. Enable it in Google Cloud Console.".to_string()
            }
            Self::Http { status: 403, .. } if is_public_calendar(calendar_id) => format!(
                "Permission denied: this is a public calendar the service account cannot read. \
                 Ask the calendar owner to share it with {principal}"
            ),
            Self::Http { status: 403, .. } => format!(
                "Permission denied: share the calendar with {principal}"
            ),
            Self::Http { status: 404, .. } => "Calendar not found: verify the calendar ID and \
                 that it has been shared with the service account"
                .to_string(),
            Self::Auth(_) | Self::NotConfigured => "Authentication failed: check the Google \
                 service account or OAuth credentials"
                .to_string(),
            other => other.to_string(),
        }
    }
}

impl Retryable for CalendarError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Quota(_) | Self::Transport(_))
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

fn is_public_calendar(calendar_id: &str) -> bool {
    calendar_id.contains("holiday") || calendar_id.contains("@group.v.calendar.google.com")
}
