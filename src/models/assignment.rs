//! Curator assignment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::TeamMember;
use crate::rotation::{CurationWindow, normalize_name};

/// Curator assignment database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CuratorAssignment {
    pub id: Uuid,
    /// Date the curator is selected and notified
    pub assignment_date: NaiveDate,
    /// Display name, kept even if the profile is later removed
    pub curator_name: String,
    pub curator_profile_id: Option<Uuid>,
    pub start_date: NaiveDate,
    /// Exclusive end of the curation window
    pub end_date: NaiveDate,
    pub is_manual_override: bool,
    pub skipped: bool,
    pub assigned_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CuratorAssignment {
    /// The curation window of this assignment
    pub fn window(&self) -> CurationWindow {
        CurationWindow {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Skipped assignments neither count toward fairness nor block the rotation
    pub fn is_active(&self) -> bool {
        !self.skipped
    }

    /// Whether this assignment belongs to `member`.
    ///
    /// Rows linked to a profile match by id only; unlinked rows fall back to
    /// the trimmed, case-insensitive name.
    pub fn is_attributed_to(&self, member: &TeamMember) -> bool {
        match self.curator_profile_id {
            Some(profile_id) => profile_id == member.id,
            None => normalize_name(&self.curator_name) == normalize_name(&member.full_name),
        }
    }

    /// Copy of this assignment with `skipped` flipped
    pub fn toggled_skip(&self) -> Self {
        Self {
            skipped: !self.skipped,
            ..self.clone()
        }
    }
}

/// Insert payload for a new assignment
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub assignment_date: NaiveDate,
    pub curator_name: String,
    pub curator_profile_id: Option<Uuid>,
    pub window: CurationWindow,
    pub is_manual_override: bool,
    pub assigned_by: Option<Uuid>,
}

/// Assignment joined with the playlist published for it (if any)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentWithPlaylist {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assignment: CuratorAssignment,
    pub playlist_id: Option<Uuid>,
    pub playlist_title: Option<String>,
    pub playlist_spotify_url: Option<String>,
}
