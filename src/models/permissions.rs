//! Role-based permissions
//!
//! Base roles (`user`, `contributor`, `leader`, `admin`) grant a fixed set of
//! capabilities; special access grants (`curator`, `beast_babe`) add to them.

use serde::Serialize;

use crate::constants::{roles, special_access};

/// Capabilities of a dashboard user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub can_view_admin: bool,
    pub can_manage_playlists: bool,
    pub can_manage_content: bool,
    pub can_manage_users: bool,
    pub can_manage_curators: bool,
    pub can_manage_calendar: bool,
    pub can_pass_beast_babe: bool,
}

impl Permissions {
    /// Resolve permissions from a base role and special access grants.
    ///
    /// Unknown roles resolve to the plain `user` set.
    pub fn resolve(base_role: &str, special: &[String]) -> Self {
        let mut permissions = match base_role {
            roles::ADMIN => Self {
                can_view_admin: true,
                can_manage_playlists: true,
                can_manage_content: true,
                can_manage_users: true,
                can_manage_curators: true,
                can_manage_calendar: true,
                can_pass_beast_babe: true,
            },
            roles::LEADER => Self {
                can_view_admin: true,
                can_manage_playlists: true,
                can_manage_content: true,
                ..Self::default()
            },
            roles::CONTRIBUTOR => Self {
                can_view_admin: true,
                ..Self::default()
            },
            _ => Self::default(),
        };

        let has = |grant: &str| special.iter().any(|s| s == grant);

        if has(special_access::CURATOR) {
            permissions.can_manage_playlists = true;
            permissions.can_manage_content = true;
        }

        if has(special_access::BEAST_BABE) {
            permissions.can_pass_beast_babe = true;
        }

        permissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        let p = Permissions::resolve("admin", &[]);
        assert!(p.can_manage_curators);
        assert!(p.can_manage_calendar);
        assert!(p.can_pass_beast_babe);
    }

    #[test]
    fn test_leader_manages_playlists_not_curators() {
        let p = Permissions::resolve("leader", &[]);
        assert!(p.can_manage_playlists);
        assert!(!p.can_manage_curators);
        assert!(!p.can_manage_users);
    }

    #[test]
    fn test_curator_access_adds_playlists() {
        let plain = Permissions::resolve("user", &[]);
        assert!(!plain.can_manage_playlists);

        let curator = Permissions::resolve("user", &["curator".to_string()]);
        assert!(curator.can_manage_playlists);
        assert!(curator.can_manage_content);
        assert!(!curator.can_view_admin);
    }

    #[test]
    fn test_beast_babe_can_pass_the_torch() {
        let p = Permissions::resolve("contributor", &["beast_babe".to_string()]);
        assert!(p.can_pass_beast_babe);
        assert!(p.can_view_admin);
    }

    #[test]
    fn test_unknown_role_is_plain_user() {
        assert_eq!(Permissions::resolve("wizard", &[]), Permissions::default());
    }
}
