//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{calendar::CalendarSource, config::Config, notify::Notifier};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Config,

    /// Curator notification channel
    pub notifier: Arc<dyn Notifier>,

    /// Remote calendar provider
    pub calendar: Arc<dyn CalendarSource>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        config: Config,
        notifier: Arc<dyn Notifier>,
        calendar: Arc<dyn CalendarSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                config,
                notifier,
                calendar,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the notifier
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    /// Get a reference to the calendar provider
    pub fn calendar(&self) -> &dyn CalendarSource {
        self.inner.calendar.as_ref()
    }
}
