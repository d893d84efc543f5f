//! Auto-assign planning
//!
//! Derives the assignment date, guards against double-booking and runs the
//! selection. The result is a plan the curator service persists as is.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::Serialize;

use super::error::{RotationError, RotationResult};
use super::fairness::FairnessCounts;
use super::selection::{TieBreak, eligible_pool, select_next_curator};
use super::window::{CurationWindow, compute_window};
use crate::constants::WINDOW_START_OFFSET_DAYS;
use crate::models::{CuratorAssignment, TeamMember};

/// Outcome of a successful auto-assign decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoAssignPlan {
    pub assignment_date: NaiveDate,
    pub window: CurationWindow,
    pub curator: TeamMember,
    /// Non-skipped assignments the curator held before this one
    pub fairness_count: usize,
}

/// Date of the next automatic assignment.
///
/// The next window chains onto the non-skipped window running now (or
/// starting before today's default window would), otherwise it starts at the
/// default offset from today. While that slot collides with a booked window it
/// moves to the end of the booking, so the first free slot is taken and later
/// bookings never leave a gap behind the current window.
pub fn next_assignment_date(today: NaiveDate, history: &[CuratorAssignment]) -> NaiveDate {
    let offset = Duration::days(WINDOW_START_OFFSET_DAYS);
    let default_start = today + offset;
    let active = || history.iter().filter(|a| a.is_active());

    let mut start = active()
        .filter(|a| a.end_date > today && a.start_date <= default_start)
        .map(|a| a.end_date)
        .max()
        .unwrap_or(default_start);

    loop {
        let slot = compute_window(start - offset);
        match active()
            .filter(|a| a.window().overlaps(&slot))
            .map(|a| a.end_date)
            .max()
        {
            Some(end) => start = end,
            None => return start - offset,
        }
    }
}

/// Non-skipped assignments whose window shares a day with `window`
pub fn find_overlaps<'a>(
    window: &CurationWindow,
    history: &'a [CuratorAssignment],
) -> Vec<&'a CuratorAssignment> {
    history
        .iter()
        .filter(|a| a.is_active() && a.window().overlaps(window))
        .collect()
}

/// First non-skipped assignment overlapping `window`, if any
pub fn find_overlap<'a>(
    window: &CurationWindow,
    history: &'a [CuratorAssignment],
) -> Option<&'a CuratorAssignment> {
    history
        .iter()
        .find(|a| a.is_active() && a.window().overlaps(window))
}

/// Decide who curates next and when.
///
/// `requested` overrides the derived date. The window is checked against
/// existing non-skipped assignments before anyone is selected.
pub fn plan_auto_assignment<R: Rng + ?Sized>(
    requested: Option<NaiveDate>,
    today: NaiveDate,
    members: &[TeamMember],
    history: &[CuratorAssignment],
    tie_break: TieBreak,
    rng: &mut R,
) -> RotationResult<AutoAssignPlan> {
    let assignment_date = requested.unwrap_or_else(|| next_assignment_date(today, history));
    let window = compute_window(assignment_date);

    if let Some(existing) = find_overlap(&window, history) {
        return Err(RotationError::Overlap {
            existing_id: existing.id,
            existing_curator: existing.curator_name.clone(),
            window,
        });
    }

    let pool = eligible_pool(members, history, assignment_date);
    let curator = select_next_curator(&pool, history, tie_break, rng, assignment_date)?;
    let fairness_count = FairnessCounts::from_history(history).count_for(curator);

    Ok(AutoAssignPlan {
        assignment_date,
        window,
        curator: curator.clone(),
        fairness_count,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::assignment::fixtures::assignment;
    use crate::models::profile::fixtures::member;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_date_without_running_window_is_today() {
        let history = vec![assignment("A", None, date(2023, 12, 1))];
        assert_eq!(next_assignment_date(date(2024, 1, 1), &history), date(2024, 1, 1));
        assert_eq!(next_assignment_date(date(2024, 1, 1), &[]), date(2024, 1, 1));
    }

    #[test]
    fn test_next_date_chains_onto_latest_window() {
        // Window [2024-01-04, 2024-01-11)
        let history = vec![assignment("A", None, date(2024, 1, 1))];
        let next = next_assignment_date(date(2024, 1, 2), &history);
        assert_eq!(next, date(2024, 1, 8));
        assert_eq!(compute_window(next).start_date, date(2024, 1, 11));
    }

    #[test]
    fn test_next_date_fills_gap_before_later_booking() {
        // Current window [2024-01-04, 2024-01-11), manual booking [2024-02-04, 2024-02-11)
        let history = vec![
            assignment("A", None, date(2024, 1, 1)),
            assignment("B", None, date(2024, 2, 1)),
        ];
        let next = next_assignment_date(date(2024, 1, 2), &history);
        assert_eq!(compute_window(next).start_date, date(2024, 1, 11));
    }

    #[test]
    fn test_next_date_skips_booking_that_leaves_no_room() {
        // Booking [2024-01-14, 2024-01-21) cuts into the slot after the current window
        let history = vec![
            assignment("A", None, date(2024, 1, 1)),
            assignment("B", None, date(2024, 1, 11)),
        ];
        let next = next_assignment_date(date(2024, 1, 2), &history);
        assert_eq!(compute_window(next).start_date, date(2024, 1, 21));
    }

    #[test]
    fn test_next_date_chains_onto_window_ending_before_default_start() {
        // Window [2023-12-28, 2024-01-04) still runs on 2024-01-02
        let history = vec![assignment("A", None, date(2023, 12, 25))];
        let next = next_assignment_date(date(2024, 1, 2), &history);
        assert_eq!(next, date(2024, 1, 1));
        assert_eq!(compute_window(next).start_date, date(2024, 1, 4));
    }

    #[test]
    fn test_next_date_ignores_skipped_window() {
        let mut row = assignment("A", None, date(2024, 1, 1));
        row.skipped = true;
        assert_eq!(next_assignment_date(date(2024, 1, 2), &[row]), date(2024, 1, 2));
    }

    #[test]
    fn test_find_overlaps_skips_skipped_rows() {
        let first = assignment("A", None, date(2024, 1, 1));
        let mut skipped = assignment("B", None, date(2024, 1, 2));
        skipped.skipped = true;
        let history = vec![first.clone(), skipped];

        let window = compute_window(date(2024, 1, 3));
        assert_eq!(find_overlaps(&window, &history), vec![&first]);
        assert_eq!(find_overlap(&window, &history), Some(&first));
        assert_eq!(find_overlap(&compute_window(date(2024, 1, 8)), &history), None);
    }

    #[test]
    fn test_requested_date_overlapping_is_rejected() {
        let pool = vec![member("A"), member("B")];
        let existing = assignment("A", Some(pool[0].id), date(2024, 1, 1));
        let mut rng = StdRng::seed_from_u64(3);

        let result = plan_auto_assignment(
            Some(date(2024, 1, 5)),
            date(2024, 1, 1),
            &pool,
            std::slice::from_ref(&existing),
            TieBreak::Random,
            &mut rng,
        );

        assert_eq!(
            result,
            Err(RotationError::Overlap {
                existing_id: existing.id,
                existing_curator: "A".to_string(),
                window: compute_window(date(2024, 1, 5)),
            })
        );
    }

    #[test]
    fn test_everyone_excluded_is_no_eligible_curators() {
        let mut a = member("A");
        a.rotation_excluded = true;
        let mut rng = StdRng::seed_from_u64(3);

        let result = plan_auto_assignment(
            None,
            date(2024, 1, 1),
            &[a],
            &[],
            TieBreak::Random,
            &mut rng,
        );
        assert_eq!(
            result,
            Err(RotationError::NoEligibleCurators { date: date(2024, 1, 1) })
        );
    }

    #[test]
    fn test_plan_reports_prior_count() {
        let pool = vec![member("A"), member("B")];
        let history = vec![
            assignment("A", Some(pool[0].id), date(2023, 11, 1)),
            assignment("B", Some(pool[1].id), date(2023, 11, 8)),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        let plan = plan_auto_assignment(
            None,
            date(2024, 1, 1),
            &pool,
            &history,
            TieBreak::LongestIdle,
            &mut rng,
        )
        .unwrap();

        assert_eq!(plan.curator.full_name, "A");
        assert_eq!(plan.fairness_count, 1);
        assert_eq!(plan.window, compute_window(date(2024, 1, 1)));
    }
}
