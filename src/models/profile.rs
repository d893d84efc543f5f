//! Profile model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Permissions;

/// Profile database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub discipline: Option<String>,
    pub avatar_url: Option<String>,
    pub slack_user_id: Option<String>,
    /// Base role: user, contributor, leader, admin
    pub base_role: String,
    /// Special access grants: curator, beast_babe
    pub special_access: Vec<String>,
    pub is_active: bool,
    /// Set when an admin removes the member from the curator pool
    pub rotation_excluded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Resolved permissions for this profile
    pub fn permissions(&self) -> Permissions {
        Permissions::resolve(&self.base_role, &self.special_access)
    }
}

/// Roster entry used by the rotation engine
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub discipline: Option<String>,
    pub slack_user_id: Option<String>,
    pub is_active: bool,
    pub rotation_excluded: bool,
}

impl TeamMember {
    /// Active and not excluded from the rotation pool
    pub fn in_rotation_pool(&self) -> bool {
        self.is_active && !self.rotation_excluded
    }
}
