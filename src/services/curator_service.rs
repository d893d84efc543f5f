//! Curator rotation service
//!
//! Persists the rotation engine's decisions. The engine itself never touches
//! the database; this service loads its inputs and stores its plans.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_ASSIGNMENT_LIMIT, MAX_ASSIGNMENT_LIMIT},
    db::repositories::{AssignmentRepository, ProfileRepository},
    error::{AppError, AppResult},
    handlers::curators::{
        request::{AssignmentsQuery, ManualAssignRequest},
        response::{
            AssignmentResponse, AutoAssignResponse, ManualAssignResponse, OverlapWarning,
            OverviewResponse, PoolRemovalResponse, PoolRestoreResponse, PurgeResponse,
            TeamMemberResponse, WindowResponse,
        },
    },
    models::{AssignmentWithPlaylist, CuratorAssignment, NewAssignment, TeamMember},
    notify::{CuratorNotice, NotificationOutcome, Notifier},
    rotation::{AutoAssignPlan, FairnessCounts, compute_window, find_overlaps, plan_auto_assignment},
    state::AppState,
    utils::validation::{non_blank, require_fields},
};

/// Curator rotation service for business logic
pub struct CuratorService;

impl CuratorService {
    /// Assignment history with playlists, fairness counts and the roster
    pub async fn overview(pool: &PgPool, query: AssignmentsQuery) -> AppResult<OverviewResponse> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_ASSIGNMENT_LIMIT)
            .clamp(1, MAX_ASSIGNMENT_LIMIT);

        let rows = AssignmentRepository::list_with_playlists(pool, limit, query.from, query.to).await?;
        let history = AssignmentRepository::list_history(pool).await?;
        let members = ProfileRepository::list_team_members(pool).await?;

        Ok(build_overview(rows, &history, members))
    }

    /// Preview the window for an assignment date
    pub fn window(assignment_date: NaiveDate) -> WindowResponse {
        WindowResponse::new(assignment_date, compute_window(assignment_date))
    }

    /// Pick and record the next curator, then notify them.
    ///
    /// Reading the history, checking overlaps and inserting happen in one
    /// transaction holding the auto-assign advisory lock.
    pub async fn auto_assign(
        state: &AppState,
        requested: Option<NaiveDate>,
        today: NaiveDate,
        triggered_by: Option<Uuid>,
    ) -> AppResult<AutoAssignResponse> {
        let mut tx = state.db().begin().await?;
        AssignmentRepository::lock_auto_assign(&mut *tx).await?;

        let history = AssignmentRepository::list_history(&mut *tx).await?;
        let members = ProfileRepository::list_team_members(&mut *tx).await?;

        let plan = {
            let mut rng = StdRng::from_os_rng();
            plan_auto_assignment(
                requested,
                today,
                &members,
                &history,
                state.config().rotation.tie_break,
                &mut rng,
            )
        };

        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                tracing::info!(error = %e, "Auto-assign declined");
                return Err(e.into());
            }
        };

        let assignment = AssignmentRepository::create(
            &mut *tx,
            &NewAssignment {
                assignment_date: plan.assignment_date,
                curator_name: plan.curator.full_name.clone(),
                curator_profile_id: Some(plan.curator.id),
                window: plan.window,
                is_manual_override: false,
                assigned_by: triggered_by,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            assignment_id = %assignment.id,
            curator = %assignment.curator_name,
            assignment_date = %assignment.assignment_date,
            window = %plan.window,
            fairness_count = plan.fairness_count,
            "Curator auto-assigned"
        );

        let notification = deliver_notice(state.notifier(), &notice_for(&plan)).await;

        Ok(AutoAssignResponse {
            assignment: assignment.into(),
            fairness_count: plan.fairness_count,
            notification,
        })
    }

    /// Record an admin's choice of curator.
    ///
    /// Overlapping assignments do not block; they come back as warnings.
    pub async fn manual_assign(
        pool: &PgPool,
        payload: ManualAssignRequest,
        assigned_by: &Uuid,
    ) -> AppResult<ManualAssignResponse> {
        let curator_name = non_blank(payload.curator_name.as_deref()).map(str::to_string);
        require_fields(&[
            ("assignment_date", payload.assignment_date.is_some()),
            ("curator_name", curator_name.is_some()),
        ])?;
        let (Some(assignment_date), Some(curator_name)) = (payload.assignment_date, curator_name)
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        if let Some(profile_id) = payload.curator_profile_id {
            ProfileRepository::find_by_id(pool, &profile_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        }

        let window = compute_window(assignment_date);
        let history = AssignmentRepository::list_history(pool).await?;
        let overlap_warnings = overlap_warnings(&window, &history);

        let assignment = AssignmentRepository::create(
            pool,
            &NewAssignment {
                assignment_date,
                curator_name,
                curator_profile_id: payload.curator_profile_id,
                window,
                is_manual_override: true,
                assigned_by: Some(*assigned_by),
            },
        )
        .await?;

        if overlap_warnings.is_empty() {
            tracing::info!(
                assignment_id = %assignment.id,
                curator = %assignment.curator_name,
                "Manual curator assignment recorded"
            );
        } else {
            tracing::warn!(
                assignment_id = %assignment.id,
                curator = %assignment.curator_name,
                overlaps = overlap_warnings.len(),
                "Manual curator assignment double-books a window"
            );
        }

        Ok(ManualAssignResponse {
            assignment: assignment.into(),
            overlap_warnings,
        })
    }

    /// Flip the skipped flag of an assignment
    pub async fn toggle_skip(pool: &PgPool, id: &Uuid) -> AppResult<AssignmentResponse> {
        let assignment = AssignmentRepository::toggle_skip(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

        tracing::info!(
            assignment_id = %assignment.id,
            skipped = assignment.skipped,
            "Assignment skip toggled"
        );

        Ok(assignment.into())
    }

    /// Exclude a member from the pool and cancel their upcoming windows.
    ///
    /// Windows that already started stay in the history.
    pub async fn remove_from_pool(
        pool: &PgPool,
        profile_id: &Uuid,
        today: NaiveDate,
    ) -> AppResult<PoolRemovalResponse> {
        let mut tx = pool.begin().await?;

        let profile = ProfileRepository::set_rotation_excluded(&mut *tx, profile_id, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        let cancelled =
            AssignmentRepository::delete_upcoming_for_profile(&mut *tx, profile_id, today).await?;

        tx.commit().await?;

        tracing::info!(
            profile_id = %profile.id,
            cancelled_assignments = cancelled,
            "Member removed from curator pool"
        );

        Ok(PoolRemovalResponse {
            profile_id: profile.id,
            rotation_excluded: profile.rotation_excluded,
            cancelled_assignments: cancelled,
            affected_records: 1 + cancelled,
        })
    }

    /// Put a member back into the pool
    pub async fn restore_to_pool(pool: &PgPool, profile_id: &Uuid) -> AppResult<PoolRestoreResponse> {
        let profile = ProfileRepository::set_rotation_excluded(pool, profile_id, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        tracing::info!(profile_id = %profile.id, "Member restored to curator pool");

        Ok(PoolRestoreResponse {
            profile_id: profile.id,
            rotation_excluded: profile.rotation_excluded,
        })
    }

    /// Delete every assignment of a profile
    pub async fn purge_assignments(pool: &PgPool, profile_id: &Uuid) -> AppResult<PurgeResponse> {
        ProfileRepository::find_by_id(pool, profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let deleted = AssignmentRepository::delete_all_for_profile(pool, profile_id).await?;

        tracing::warn!(
            profile_id = %profile_id,
            deleted_assignments = deleted,
            "Curator history purged"
        );

        Ok(PurgeResponse {
            profile_id: *profile_id,
            deleted_assignments: deleted,
        })
    }
}

fn build_overview(
    rows: Vec<AssignmentWithPlaylist>,
    history: &[CuratorAssignment],
    members: Vec<TeamMember>,
) -> OverviewResponse {
    let counts = FairnessCounts::from_history(history);

    let team_members = members
        .into_iter()
        .map(|member| {
            let count = counts.count_for(&member);
            TeamMemberResponse::new(member, count)
        })
        .collect();

    OverviewResponse {
        assignments: rows.into_iter().map(Into::into).collect(),
        counts_by_profile: counts.by_profile,
        counts_by_name: counts.by_name,
        team_members,
    }
}

fn overlap_warnings(
    window: &crate::rotation::CurationWindow,
    history: &[CuratorAssignment],
) -> Vec<OverlapWarning> {
    find_overlaps(window, history)
        .into_iter()
        .map(OverlapWarning::from)
        .collect()
}

fn notice_for(plan: &AutoAssignPlan) -> CuratorNotice {
    CuratorNotice {
        curator_name: plan.curator.full_name.clone(),
        email: plan.curator.email.clone(),
        slack_user_id: plan.curator.slack_user_id.clone(),
        assignment_date: plan.assignment_date,
        window: plan.window,
    }
}

/// Send the notice; failures become a warning, never an error
async fn deliver_notice(notifier: &dyn Notifier, notice: &CuratorNotice) -> NotificationOutcome {
    match notifier.notify_curator(notice).await {
        Ok(()) => NotificationOutcome::delivered(),
        Err(e) => {
            tracing::warn!(
                curator = %notice.curator_name,
                error = %e,
                "Curator notification failed"
            );
            NotificationOutcome::failed(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignment::fixtures::assignment;
    use crate::models::profile::fixtures::member;
    use crate::notify::{MockNotifier, NotifyError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> AutoAssignPlan {
        let mut ada = member("Ada");
        ada.slack_user_id = Some("U42".into());
        AutoAssignPlan {
            assignment_date: date(2024, 1, 1),
            window: compute_window(date(2024, 1, 1)),
            curator: ada,
            fairness_count: 0,
        }
    }

    #[tokio::test]
    async fn test_delivered_notification() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_curator()
            .withf(|notice| notice.slack_user_id.as_deref() == Some("U42"))
            .times(1)
            .returning(|_| Ok(()));

        let outcome = deliver_notice(&notifier, &notice_for(&plan())).await;
        assert_eq!(outcome, NotificationOutcome::delivered());
    }

    #[tokio::test]
    async fn test_failed_notification_becomes_warning() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_curator()
            .times(1)
            .returning(|_| Err(NotifyError::RecipientNotFound("ada@example.com".into())));

        let outcome = deliver_notice(&notifier, &notice_for(&plan())).await;
        assert!(!outcome.delivered);
        assert!(outcome.warning.unwrap().contains("ada@example.com"));
    }

    #[test]
    fn test_notice_carries_window() {
        let notice = notice_for(&plan());
        assert_eq!(notice.window.start_date, date(2024, 1, 4));
        assert_eq!(notice.window.end_date, date(2024, 1, 11));
        assert_eq!(notice.curator_name, "Ada");
    }

    #[test]
    fn test_overlap_warnings_list_blocking_rows() {
        let first = assignment("Ada", None, date(2024, 1, 1));
        let mut skipped = assignment("Grace", None, date(2024, 1, 2));
        skipped.skipped = true;
        let history = vec![first.clone(), skipped];

        let warnings = overlap_warnings(&compute_window(date(2024, 1, 5)), &history);
        assert_eq!(warnings, vec![OverlapWarning::from(&first)]);
        assert!(overlap_warnings(&compute_window(date(2024, 1, 8)), &history).is_empty());
    }

    #[test]
    fn test_overview_counts_members_through_profile_and_name() {
        let ada = member("Ada Lovelace");
        let grace = member("Grace Hopper");
        let history = vec![
            assignment("Ada Lovelace", Some(ada.id), date(2024, 1, 1)),
            assignment("ada lovelace", None, date(2024, 1, 8)),
        ];

        let overview = build_overview(vec![], &history, vec![ada.clone(), grace]);
        assert_eq!(overview.counts_by_profile.get(&ada.id), Some(&1));
        assert_eq!(overview.counts_by_name.get("ada lovelace"), Some(&2));
        assert_eq!(overview.team_members[0].assignment_count, 2);
        assert_eq!(overview.team_members[1].assignment_count, 0);
        assert!(overview.team_members[1].in_rotation_pool);
    }

    #[test]
    fn test_window_preview() {
        let window = CuratorService::window(date(2024, 2, 26));
        assert_eq!(window.start_date, date(2024, 2, 29));
        assert_eq!(window.end_date, date(2024, 3, 7));
        assert_eq!(window.days, 7);
    }

    mod persistence {
        use std::sync::Arc;

        use super::*;
        use crate::calendar::UnconfiguredCalendarSource;
        use crate::constants::roles;
        use crate::test_utils::{
            containers::fresh_pool,
            test_app::{insert_profile, state_with},
        };

        async fn seed(
            pool: &PgPool,
            curator_name: &str,
            curator_profile_id: Option<Uuid>,
            assignment_date: NaiveDate,
        ) -> CuratorAssignment {
            AssignmentRepository::create(
                pool,
                &NewAssignment {
                    assignment_date,
                    curator_name: curator_name.to_string(),
                    curator_profile_id,
                    window: compute_window(assignment_date),
                    is_manual_override: false,
                    assigned_by: None,
                },
            )
            .await
            .unwrap()
        }

        fn notifier(calls: usize) -> Arc<MockNotifier> {
            let mut notifier = MockNotifier::new();
            notifier.expect_notify_curator().times(calls).returning(|_| Ok(()));
            Arc::new(notifier)
        }

        #[tokio::test]
        async fn test_auto_assign_persists_and_chains() {
            let pool = fresh_pool().await;
            let ada = insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            let grace = insert_profile(&pool, "Grace Hopper", roles::USER).await;
            seed(&pool, "Ada Lovelace", Some(ada.id), date(2023, 10, 1)).await;

            let state = state_with(pool.clone(), notifier(2), Arc::new(UnconfiguredCalendarSource));

            let first = CuratorService::auto_assign(&state, None, date(2024, 1, 1), None)
                .await
                .unwrap();
            assert_eq!(first.assignment.curator_profile_id, Some(grace.id));
            assert_eq!(first.assignment.start_date, date(2024, 1, 4));
            assert!(!first.assignment.is_manual_override);
            assert_eq!(first.fairness_count, 0);
            assert!(first.notification.delivered);

            // Grace still holds the running window, so Ada follows right after it
            let second = CuratorService::auto_assign(&state, None, date(2024, 1, 1), None)
                .await
                .unwrap();
            assert_eq!(second.assignment.curator_profile_id, Some(ada.id));
            assert_eq!(second.assignment.start_date, first.assignment.end_date);

            let history = AssignmentRepository::list_history(&pool).await.unwrap();
            assert_eq!(history.len(), 3);
        }

        #[tokio::test]
        async fn test_concurrent_auto_assigns_never_double_book() {
            let pool = fresh_pool().await;
            insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            insert_profile(&pool, "Grace Hopper", roles::USER).await;

            let state = state_with(pool.clone(), notifier(2), Arc::new(UnconfiguredCalendarSource));
            let today = date(2024, 1, 1);

            let (a, b) = tokio::join!(
                CuratorService::auto_assign(&state, None, today, None),
                CuratorService::auto_assign(&state, None, today, None),
            );
            let (a, b) = (a.unwrap().assignment, b.unwrap().assignment);

            assert_ne!(a.curator_profile_id, b.curator_profile_id);
            let (earlier, later) = if a.start_date < b.start_date { (a, b) } else { (b, a) };
            assert_eq!(earlier.start_date, date(2024, 1, 4));
            assert_eq!(later.start_date, earlier.end_date);
        }

        #[tokio::test]
        async fn test_auto_assign_with_empty_pool_records_nothing() {
            let pool = fresh_pool().await;
            let ada = insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            ProfileRepository::set_rotation_excluded(&pool, &ada.id, true)
                .await
                .unwrap();

            let state = state_with(pool.clone(), notifier(0), Arc::new(UnconfiguredCalendarSource));
            let result = CuratorService::auto_assign(&state, None, date(2024, 1, 1), None).await;

            assert!(matches!(result, Err(AppError::NoEligibleCurators { .. })));
            assert!(AssignmentRepository::list_history(&pool).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_manual_assign_persists_override_and_warns() {
            let pool = fresh_pool().await;
            let admin = insert_profile(&pool, "Margaret Hamilton", roles::ADMIN).await;
            let ada = insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            let grace = insert_profile(&pool, "Grace Hopper", roles::USER).await;
            let existing = seed(&pool, "Grace Hopper", Some(grace.id), date(2024, 1, 1)).await;

            let response = CuratorService::manual_assign(
                &pool,
                ManualAssignRequest {
                    assignment_date: Some(date(2024, 1, 3)),
                    curator_name: Some("  Ada Lovelace ".into()),
                    curator_profile_id: Some(ada.id),
                },
                &admin.id,
            )
            .await
            .unwrap();

            assert_eq!(response.overlap_warnings.len(), 1);
            assert_eq!(response.overlap_warnings[0].assignment_id, existing.id);

            let history = AssignmentRepository::list_history(&pool).await.unwrap();
            let stored = history
                .iter()
                .find(|a| a.id == response.assignment.id)
                .unwrap();
            assert!(stored.is_manual_override);
            assert_eq!(stored.curator_name, "Ada Lovelace");
            assert_eq!(stored.assigned_by, Some(admin.id));
            assert_eq!(stored.start_date, date(2024, 1, 6));
        }

        #[tokio::test]
        async fn test_manual_assign_rejects_incomplete_and_unknown() {
            let pool = fresh_pool().await;
            let admin = insert_profile(&pool, "Margaret Hamilton", roles::ADMIN).await;

            let missing = CuratorService::manual_assign(
                &pool,
                ManualAssignRequest {
                    curator_name: Some("   ".into()),
                    ..Default::default()
                },
                &admin.id,
            )
            .await;
            match missing {
                Err(AppError::MissingFields(fields)) => {
                    assert_eq!(fields, vec!["assignment_date", "curator_name"])
                }
                other => panic!("unexpected: {other:?}"),
            }

            let unknown = CuratorService::manual_assign(
                &pool,
                ManualAssignRequest {
                    assignment_date: Some(date(2024, 1, 3)),
                    curator_name: Some("Nobody".into()),
                    curator_profile_id: Some(Uuid::new_v4()),
                },
                &admin.id,
            )
            .await;
            assert!(matches!(unknown, Err(AppError::NotFound(_))));
            assert!(AssignmentRepository::list_history(&pool).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_toggle_skip_round_trip() {
            let pool = fresh_pool().await;
            let row = seed(&pool, "Ada Lovelace", None, date(2024, 1, 1)).await;

            let skipped = CuratorService::toggle_skip(&pool, &row.id).await.unwrap();
            assert!(skipped.skipped);
            let restored = CuratorService::toggle_skip(&pool, &row.id).await.unwrap();
            assert!(!restored.skipped);

            let missing = CuratorService::toggle_skip(&pool, &Uuid::new_v4()).await;
            assert!(matches!(missing, Err(AppError::NotFound(_))));
        }

        #[tokio::test]
        async fn test_pool_removal_cancels_only_unstarted_windows() {
            let pool = fresh_pool().await;
            let ada = insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            let today = date(2024, 1, 10);

            // Windows starting 2024-01-04, 2024-01-10 (today) and 2024-01-23
            let past = seed(&pool, "Ada Lovelace", Some(ada.id), date(2024, 1, 1)).await;
            let current = seed(&pool, "Ada Lovelace", Some(ada.id), date(2024, 1, 7)).await;
            seed(&pool, "Ada Lovelace", Some(ada.id), date(2024, 1, 20)).await;

            let removal = CuratorService::remove_from_pool(&pool, &ada.id, today)
                .await
                .unwrap();
            assert!(removal.rotation_excluded);
            assert_eq!(removal.cancelled_assignments, 1);
            assert_eq!(removal.affected_records, 2);

            let kept: Vec<Uuid> = AssignmentRepository::list_history(&pool)
                .await
                .unwrap()
                .into_iter()
                .map(|a| a.id)
                .collect();
            assert_eq!(kept, vec![past.id, current.id]);

            let members = ProfileRepository::list_team_members(&pool).await.unwrap();
            assert!(!members[0].in_rotation_pool());

            let restored = CuratorService::restore_to_pool(&pool, &ada.id).await.unwrap();
            assert!(!restored.rotation_excluded);

            let unknown = CuratorService::remove_from_pool(&pool, &Uuid::new_v4(), today).await;
            assert!(matches!(unknown, Err(AppError::NotFound(_))));
        }

        #[tokio::test]
        async fn test_purge_deletes_whole_history() {
            let pool = fresh_pool().await;
            let ada = insert_profile(&pool, "Ada Lovelace", roles::USER).await;
            seed(&pool, "Ada Lovelace", Some(ada.id), date(2023, 1, 1)).await;
            seed(&pool, "Ada Lovelace", Some(ada.id), date(2024, 6, 1)).await;
            seed(&pool, "Grace Hopper", None, date(2024, 1, 1)).await;

            let purge = CuratorService::purge_assignments(&pool, &ada.id).await.unwrap();
            assert_eq!(purge.deleted_assignments, 2);
            assert_eq!(AssignmentRepository::list_history(&pool).await.unwrap().len(), 1);
        }
    }
}
