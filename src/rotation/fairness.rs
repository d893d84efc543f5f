//! Fairness counting over assignment history

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CuratorAssignment, TeamMember};

/// Canonical form of a curator name: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Non-skipped assignment counts.
///
/// Rows linked to a profile count under the profile id. Rows without a
/// profile id only count for a member through the normalized name, so a
/// linked row is never counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FairnessCounts {
    /// Counts of linked rows by profile id
    pub by_profile: HashMap<Uuid, usize>,
    /// Counts of every non-skipped row by normalized name
    pub by_name: HashMap<String, usize>,
    #[serde(skip)]
    unlinked_by_name: HashMap<String, usize>,
    #[serde(skip)]
    last_assigned_by_profile: HashMap<Uuid, NaiveDate>,
    #[serde(skip)]
    last_assigned_by_name: HashMap<String, NaiveDate>,
}

impl FairnessCounts {
    pub fn from_history(history: &[CuratorAssignment]) -> Self {
        let mut counts = Self::default();

        for assignment in history.iter().filter(|a| a.is_active()) {
            let name = normalize_name(&assignment.curator_name);
            *counts.by_name.entry(name.clone()).or_default() += 1;

            match assignment.curator_profile_id {
                Some(profile_id) => {
                    *counts.by_profile.entry(profile_id).or_default() += 1;
                    bump_latest(
                        &mut counts.last_assigned_by_profile,
                        profile_id,
                        assignment.assignment_date,
                    );
                }
                None => {
                    *counts.unlinked_by_name.entry(name.clone()).or_default() += 1;
                    bump_latest(
                        &mut counts.last_assigned_by_name,
                        name,
                        assignment.assignment_date,
                    );
                }
            }
        }

        counts
    }

    /// Number of non-skipped assignments attributed to `member`
    pub fn count_for(&self, member: &TeamMember) -> usize {
        let linked = self.by_profile.get(&member.id).copied().unwrap_or(0);
        let unlinked = self
            .unlinked_by_name
            .get(&normalize_name(&member.full_name))
            .copied()
            .unwrap_or(0);
        linked + unlinked
    }

    /// Most recent non-skipped assignment date of `member`, if any
    pub fn last_assigned(&self, member: &TeamMember) -> Option<NaiveDate> {
        let linked = self.last_assigned_by_profile.get(&member.id).copied();
        let unlinked = self
            .last_assigned_by_name
            .get(&normalize_name(&member.full_name))
            .copied();
        linked.max(unlinked)
    }
}

fn bump_latest<K: std::hash::Hash + Eq>(map: &mut HashMap<K, NaiveDate>, key: K, date: NaiveDate) {
    map.entry(key)
        .and_modify(|latest| *latest = (*latest).max(date))
        .or_insert(date);
}

/// Fairness counts for a roster, keyed the way the overview reports them
pub fn fairness_counts(members: &[TeamMember], history: &[CuratorAssignment]) -> Vec<(Uuid, usize)> {
    let counts = FairnessCounts::from_history(history);
    members
        .iter()
        .map(|member| (member.id, counts.count_for(member)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignment::fixtures::assignment;
    use crate::models::profile::fixtures::member;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Ada Lovelace\t"), "ada lovelace");
        assert_eq!(normalize_name("ADA"), normalize_name("ada"));
    }

    #[test]
    fn test_skipped_rows_do_not_count() {
        let ada = member("Ada");
        let mut skipped = assignment("Ada", Some(ada.id), date(2024, 1, 1));
        skipped.skipped = true;
        let history = vec![skipped, assignment("Ada", Some(ada.id), date(2024, 1, 8))];

        let counts = FairnessCounts::from_history(&history);
        assert_eq!(counts.count_for(&ada), 1);
        assert_eq!(counts.by_name.get("ada"), Some(&1));
    }

    #[test]
    fn test_linked_and_unlinked_rows_add_up() {
        let ada = member("Ada Lovelace");
        let history = vec![
            assignment("Ada Lovelace", Some(ada.id), date(2024, 1, 1)),
            assignment("ada lovelace ", None, date(2024, 1, 8)),
        ];

        let counts = FairnessCounts::from_history(&history);
        assert_eq!(counts.count_for(&ada), 2);
        assert_eq!(counts.by_profile.get(&ada.id), Some(&1));
        assert_eq!(counts.by_name.get("ada lovelace"), Some(&2));
    }

    #[test]
    fn test_linked_row_does_not_leak_to_namesake() {
        let ada = member("Ada");
        let namesake = member("Ada");
        let history = vec![assignment("Ada", Some(ada.id), date(2024, 1, 1))];

        let counts = FairnessCounts::from_history(&history);
        assert_eq!(counts.count_for(&ada), 1);
        assert_eq!(counts.count_for(&namesake), 0);
    }

    #[test]
    fn test_last_assigned_takes_latest() {
        let ada = member("Ada");
        let history = vec![
            assignment("Ada", Some(ada.id), date(2024, 2, 1)),
            assignment("Ada", None, date(2024, 3, 1)),
            assignment("Ada", Some(ada.id), date(2024, 1, 1)),
        ];

        let counts = FairnessCounts::from_history(&history);
        assert_eq!(counts.last_assigned(&ada), Some(date(2024, 3, 1)));
        assert_eq!(counts.last_assigned(&member("Grace")), None);
    }

    #[test]
    fn test_fairness_counts_per_member() {
        let ada = member("Ada");
        let grace = member("Grace");
        let history = vec![assignment("Ada", Some(ada.id), date(2024, 1, 1))];

        let counts = fairness_counts(&[ada.clone(), grace.clone()], &history);
        assert_eq!(counts, vec![(ada.id, 1), (grace.id, 0)]);
    }
}
