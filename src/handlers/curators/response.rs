//! Curator rotation response DTOs

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{AssignmentWithPlaylist, CuratorAssignment, TeamMember},
    notify::NotificationOutcome,
    rotation::CurationWindow,
};

/// Assignment response
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub assignment_date: NaiveDate,
    pub curator_name: String,
    pub curator_profile_id: Option<Uuid>,
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
    pub is_manual_override: bool,
    pub skipped: bool,
    pub assigned_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<LinkedPlaylist>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist published for an assignment
#[derive(Debug, Serialize)]
pub struct LinkedPlaylist {
    pub id: Uuid,
    pub title: Option<String>,
    pub spotify_url: Option<String>,
}

impl From<CuratorAssignment> for AssignmentResponse {
    fn from(a: CuratorAssignment) -> Self {
        Self {
            id: a.id,
            assignment_date: a.assignment_date,
            curator_name: a.curator_name,
            curator_profile_id: a.curator_profile_id,
            start_date: a.start_date,
            end_date: a.end_date,
            is_manual_override: a.is_manual_override,
            skipped: a.skipped,
            assigned_by: a.assigned_by,
            playlist: None,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<AssignmentWithPlaylist> for AssignmentResponse {
    fn from(row: AssignmentWithPlaylist) -> Self {
        let playlist = row.playlist_id.map(|id| LinkedPlaylist {
            id,
            title: row.playlist_title,
            spotify_url: row.playlist_spotify_url,
        });

        Self {
            playlist,
            ..row.assignment.into()
        }
    }
}

/// Roster entry with its fairness count
#[derive(Debug, Serialize)]
pub struct TeamMemberResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub discipline: Option<String>,
    pub is_active: bool,
    pub rotation_excluded: bool,
    pub in_rotation_pool: bool,
    pub assignment_count: usize,
}

impl TeamMemberResponse {
    pub fn new(member: TeamMember, assignment_count: usize) -> Self {
        Self {
            in_rotation_pool: member.in_rotation_pool(),
            id: member.id,
            full_name: member.full_name,
            email: member.email,
            discipline: member.discipline,
            is_active: member.is_active,
            rotation_excluded: member.rotation_excluded,
            assignment_count,
        }
    }
}

/// Rotation overview
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub assignments: Vec<AssignmentResponse>,
    /// Non-skipped assignments linked to each profile
    pub counts_by_profile: HashMap<Uuid, usize>,
    /// Non-skipped assignments by normalized curator name
    pub counts_by_name: HashMap<String, usize>,
    pub team_members: Vec<TeamMemberResponse>,
}

/// Window preview
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    pub assignment_date: NaiveDate,
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
    pub days: i64,
}

impl WindowResponse {
    pub fn new(assignment_date: NaiveDate, window: CurationWindow) -> Self {
        Self {
            assignment_date,
            start_date: window.start_date,
            end_date: window.end_date,
            days: window.len_days(),
        }
    }
}

/// Auto-assign result
#[derive(Debug, Serialize)]
pub struct AutoAssignResponse {
    pub assignment: AssignmentResponse,
    /// Assignments the curator held before this one
    pub fairness_count: usize,
    pub notification: NotificationOutcome,
}

/// Existing assignment sharing days with a manual one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapWarning {
    pub assignment_id: Uuid,
    pub curator_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&CuratorAssignment> for OverlapWarning {
    fn from(a: &CuratorAssignment) -> Self {
        Self {
            assignment_id: a.id,
            curator_name: a.curator_name.clone(),
            start_date: a.start_date,
            end_date: a.end_date,
        }
    }
}

/// Manual assignment result
#[derive(Debug, Serialize)]
pub struct ManualAssignResponse {
    pub assignment: AssignmentResponse,
    pub overlap_warnings: Vec<OverlapWarning>,
}

/// Pool removal result
#[derive(Debug, Serialize)]
pub struct PoolRemovalResponse {
    pub profile_id: Uuid,
    pub rotation_excluded: bool,
    /// Not-yet-started assignments deleted
    pub cancelled_assignments: u64,
    /// Profile update plus cancelled assignments
    pub affected_records: u64,
}

/// Pool restore result
#[derive(Debug, Serialize)]
pub struct PoolRestoreResponse {
    pub profile_id: Uuid,
    pub rotation_excluded: bool,
}

/// History purge result
#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub profile_id: Uuid,
    pub deleted_assignments: u64,
}
