//! Eligibility and fair selection of the next curator

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::error::{RotationError, RotationResult};
use super::fairness::{FairnessCounts, normalize_name};
use crate::models::{CuratorAssignment, TeamMember};

/// How to choose among members sharing the minimum count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Uniformly at random
    #[default]
    Random,
    /// Never-assigned members first, then the earliest last assignment
    LongestIdle,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "longest_idle" | "longest-idle" => Ok(Self::LongestIdle),
            other => Err(format!("unknown tie break: {other}")),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::LongestIdle => f.write_str("longest_idle"),
        }
    }
}

/// Members who may be auto-selected for `assignment_date`.
///
/// A member is eligible when active, not excluded from the pool, and not
/// holding a non-skipped assignment whose window ends after the date.
pub fn eligible_pool(
    members: &[TeamMember],
    history: &[CuratorAssignment],
    assignment_date: NaiveDate,
) -> Vec<TeamMember> {
    members
        .iter()
        .filter(|member| member.in_rotation_pool())
        .filter(|member| {
            !history.iter().any(|a| {
                a.is_active() && a.end_date > assignment_date && a.is_attributed_to(member)
            })
        })
        .cloned()
        .collect()
}

/// Pick the pool member with the fewest non-skipped assignments.
///
/// `date` is only used to describe an empty pool.
pub fn select_next_curator<'a, R: Rng + ?Sized>(
    pool: &'a [TeamMember],
    history: &[CuratorAssignment],
    tie_break: TieBreak,
    rng: &mut R,
    date: NaiveDate,
) -> RotationResult<&'a TeamMember> {
    let counts = FairnessCounts::from_history(history);

    let min = pool
        .iter()
        .map(|member| counts.count_for(member))
        .min()
        .ok_or(RotationError::NoEligibleCurators { date })?;

    let candidates: Vec<&TeamMember> = pool
        .iter()
        .filter(|member| counts.count_for(member) == min)
        .collect();

    let chosen = match tie_break {
        TieBreak::Random => candidates.choose(rng).copied(),
        TieBreak::LongestIdle => candidates.into_iter().min_by(|a, b| {
            counts
                .last_assigned(a)
                .cmp(&counts.last_assigned(b))
                .then_with(|| normalize_name(&a.full_name).cmp(&normalize_name(&b.full_name)))
                .then_with(|| a.id.cmp(&b.id))
        }),
    };

    chosen.ok_or(RotationError::NoEligibleCurators { date })
}
