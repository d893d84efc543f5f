//! Calendar sync service

use chrono::{DateTime, Utc};
use futures::future::join_all;
use sqlx::PgPool;

use crate::{
    calendar::{CalendarSource, EventQuery, FetchedCalendar, ReconcileCounts},
    config::{CalendarConfig, split_list},
    db::repositories::CalendarEventRepository,
    error::{AppError, AppResult},
    handlers::calendar::{
        request::{EventsQuery, SyncQuery},
        response::{CalendarEventsResponse, CalendarSyncReport, FailedCalendar, SyncResponse},
    },
    state::AppState,
    utils::time::{parse_range_bound, resolve_range},
};

/// Calendar service for business logic
pub struct CalendarService;

impl CalendarService {
    /// Mirror the remote calendars into the database.
    ///
    /// Calendars are fetched concurrently; each successful fetch is applied in
    /// its own transaction. A calendar that fails to fetch is reported and the
    /// rest carry on.
    pub async fn sync(state: &AppState, query: SyncQuery) -> AppResult<SyncResponse> {
        let source = state.calendar();
        if !source.is_configured() {
            return Err(AppError::Configuration(
                "Google Calendar credentials are not configured".to_string(),
            ));
        }

        let config = &state.config().calendar;
        let (time_min, time_max) = parse_range(
            query.time_min.as_deref(),
            query.time_max.as_deref(),
            config.sync_window_days,
        )?;
        let queries = build_queries(config, query.calendar_ids.as_deref(), time_min, time_max, query.max_results);
        if queries.is_empty() {
            return Err(AppError::Validation("No calendars to sync".to_string()));
        }

        tracing::info!(
            calendars = queries.len(),
            time_min = %time_min,
            time_max = %time_max,
            "Starting calendar sync"
        );

        let (fetched, mut failed_calendars) = fetch_all(source, &queries).await;

        let mut calendars = Vec::with_capacity(fetched.len());
        for (query, calendar) in fetched {
            let calendar_name = calendar.calendar_name.clone();
            let truncated = calendar.truncated;
            match apply(state.db(), query, calendar).await {
                Ok(counts) => {
                    tracing::info!(
                        calendar_id = %query.calendar_id,
                        added = counts.added,
                        updated = counts.updated,
                        unchanged = counts.unchanged,
                        deleted = counts.deleted,
                        "Calendar synced"
                    );
                    calendars.push(CalendarSyncReport {
                        calendar_id: query.calendar_id.clone(),
                        calendar_name,
                        counts,
                        truncated,
                    });
                }
                Err(e) => {
                    tracing::error!(calendar_id = %query.calendar_id, error = %e, "Calendar sync failed");
                    failed_calendars.push(FailedCalendar {
                        calendar_id: query.calendar_id.clone(),
                        reason: "Failed to store events".to_string(),
                    });
                }
            }
        }

        Ok(SyncResponse::new(time_min, time_max, calendars, failed_calendars))
    }

    /// Stored, non-deleted events overlapping a range
    pub async fn list_events(
        pool: &PgPool,
        config: &CalendarConfig,
        query: EventsQuery,
    ) -> AppResult<CalendarEventsResponse> {
        let (time_min, time_max) = parse_range(
            query.time_min.as_deref(),
            query.time_max.as_deref(),
            config.sync_window_days,
        )?;
        let calendar_ids = query
            .calendar_ids
            .as_deref()
            .map(split_list)
            .unwrap_or_default();

        let events = CalendarEventRepository::list_live(pool, &calendar_ids, time_min, time_max).await?;

        Ok(CalendarEventsResponse {
            events: events.into_iter().map(Into::into).collect(),
            time_min,
            time_max,
        })
    }
}

fn parse_range(
    time_min: Option<&str>,
    time_max: Option<&str>,
    default_days: i64,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let parse = |name: &str, raw: Option<&str>| match raw {
        Some(raw) => parse_range_bound(raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid {name}: {raw}"))),
        None => Ok(None),
    };

    let (min, max) = resolve_range(
        parse("time_min", time_min)?,
        parse("time_max", time_max)?,
        default_days,
    );
    if max <= min {
        return Err(AppError::Validation("time_max must be after time_min".to_string()));
    }

    Ok((min, max))
}

fn build_queries(
    config: &CalendarConfig,
    requested: Option<&str>,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    max_results: Option<u32>,
) -> Vec<EventQuery> {
    let calendar_ids = match requested.map(split_list) {
        Some(ids) if !ids.is_empty() => ids,
        _ => config.calendar_ids.clone(),
    };
    let max_results = max_results.unwrap_or(config.max_results).max(1);

    calendar_ids
        .into_iter()
        .map(|calendar_id| EventQuery {
            out_of_office: config.ooo_calendar_ids.contains(&calendar_id),
            calendar_id,
            time_min,
            time_max,
            max_results,
        })
        .collect()
}

/// Fetch every calendar, splitting successes from readable failures
async fn fetch_all<'q>(
    source: &dyn CalendarSource,
    queries: &'q [EventQuery],
) -> (Vec<(&'q EventQuery, FetchedCalendar)>, Vec<FailedCalendar>) {
    let results = join_all(queries.iter().map(|query| source.fetch_events(query))).await;
    let principal = source.principal();

    let mut fetched = Vec::new();
    let mut failed = Vec::new();
    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(calendar) => fetched.push((query, calendar)),
            Err(e) => {
                tracing::warn!(calendar_id = %query.calendar_id, error = %e, "Calendar fetch failed");
                failed.push(FailedCalendar {
                    calendar_id: query.calendar_id.clone(),
                    reason: e.describe(&query.calendar_id, principal.as_deref()),
                });
            }
        }
    }

    (fetched, failed)
}

async fn apply(pool: &PgPool, query: &EventQuery, calendar: FetchedCalendar) -> AppResult<ReconcileCounts> {
    let fetched_ids: Vec<String> = calendar
        .events
        .iter()
        .map(|event| event.google_event_id.clone())
        .collect();

    let mut tx = pool.begin().await?;

    let digests = CalendarEventRepository::digests_for_sync(
        &mut *tx,
        &query.calendar_id,
        query.time_min,
        query.time_max,
        &fetched_ids,
    )
    .await?;
    let plan = calendar.plan(&digests);
    if plan.is_noop() {
        tracing::debug!(calendar_id = %query.calendar_id, "Calendar unchanged");
    }

    for event in plan.inserts.iter().chain(plan.updates.iter()) {
        CalendarEventRepository::upsert(&mut *tx, event).await?;
    }
    if !plan.touches.is_empty() {
        CalendarEventRepository::touch(&mut *tx, &query.calendar_id, &plan.touches).await?;
    }
    if !plan.soft_deletes.is_empty() {
        CalendarEventRepository::soft_delete(&mut *tx, &query.calendar_id, &plan.soft_deletes).await?;
    }

    tx.commit().await?;

    Ok(plan.counts())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::calendar::event::fixtures::remote_event;
    use crate::calendar::{CalendarError, source::MockCalendarSource};
    use crate::config::Config;

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_queries_default_to_configured_calendars() {
        let config = Config::for_tests().calendar;
        let (min, max) = range();

        let queries = build_queries(&config, None, min, max, None);
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].calendar_id, "team@group.calendar.google.com");
        assert_eq!(queries[0].max_results, config.max_results);
        assert!(!queries[0].out_of_office);

        let blank = build_queries(&config, Some(" , "), min, max, None);
        assert_eq!(blank.len(), 1);
    }

    #[test]
    fn test_queries_flag_out_of_office_calendars() {
        let config = Config::for_tests().calendar;
        let (min, max) = range();

        let queries = build_queries(
            &config,
            Some("ooo@group.calendar.google.com,holidays"),
            min,
            max,
            Some(0),
        );
        assert_eq!(queries.len(), 2);
        assert!(queries[0].out_of_office);
        assert!(!queries[1].out_of_office);
        assert_eq!(queries[1].max_results, 1);
    }

    #[test]
    fn test_parse_range() {
        let (min, max) = parse_range(Some("2024-01-01"), Some("2024-01-31T00:00:00Z"), 30).unwrap();
        assert_eq!((min, max), range());

        let (min, max) = parse_range(Some("2024-01-01"), None, 7).unwrap();
        assert_eq!(max - min, chrono::Duration::days(7));

        assert!(parse_range(Some("yesterday"), None, 7).is_err());
        assert!(parse_range(Some("2024-01-31"), Some("2024-01-01"), 7).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_reports_failures_and_continues() {
        let config = Config::for_tests().calendar;
        let (min, max) = range();
        let queries = build_queries(&config, Some("team,missing"), min, max, None);

        let mut source = MockCalendarSource::new();
        source.expect_fetch_events().times(2).returning(|query| {
            if query.calendar_id == "missing" {
                Err(CalendarError::Http {
                    status: 404,
                    message: "Not Found".into(),
                })
            } else {
                Ok(FetchedCalendar {
                    calendar_name: Some("Team".into()),
                    events: vec![remote_event("evt-1", "Standup")],
                    truncated: false,
                })
            }
        });
        source
            .expect_principal()
            .returning(|| Some("sync@project.iam.gserviceaccount.com".into()));

        let (fetched, failed) = fetch_all(&source, &queries).await;

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].0.calendar_id, "team");
        assert_eq!(fetched[0].1.events.len(), 1);

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].calendar_id, "missing");
        assert!(failed[0].reason.starts_with("Calendar not found"));
    }

    #[test]
    fn test_sync_response_totals() {
        let (min, max) = range();
        let report = |id: &str, added, deleted| CalendarSyncReport {
            calendar_id: id.to_string(),
            calendar_name: None,
            counts: ReconcileCounts {
                added,
                updated: 0,
                unchanged: 1,
                deleted,
            },
            truncated: false,
        };

        let response = SyncResponse::new(
            min,
            max,
            vec![report("a", 2, 0), report("b", 1, 3)],
            vec![FailedCalendar {
                calendar_id: "c".into(),
                reason: "nope".into(),
            }],
        );

        assert_eq!(response.synced, 2);
        assert_eq!(response.failed, 1);
        assert_eq!(response.totals.added, 3);
        assert_eq!(response.totals.unchanged, 2);
        assert_eq!(response.totals.deleted, 3);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["added"], 3);
        assert_eq!(json["calendars"][1]["deleted"], 3);
    }

    #[tokio::test]
    async fn test_sync_with_every_calendar_failing_still_reports() {
        use std::sync::Arc;

        use crate::notify::LogNotifier;
        use crate::test_utils::test_app::{lazy_state, state_with};

        let mut source = MockCalendarSource::new();
        source.expect_is_configured().return_const(true);
        source.expect_principal().returning(|| None);
        source
            .expect_fetch_events()
            .times(2)
            .returning(|_| Err(CalendarError::Auth("invalid_grant".into())));

        // Nothing is fetched, so nothing reaches the database
        let state = state_with(lazy_state().db().clone(), Arc::new(LogNotifier), Arc::new(source));
        let response = CalendarService::sync(
            &state,
            SyncQuery {
                calendar_ids: Some("team,ooo".into()),
                time_min: Some("2024-01-01".into()),
                time_max: Some("2024-01-31".into()),
                max_results: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.synced, 0);
        assert_eq!(response.failed, 2);
        assert!(response.failed_calendars[0].reason.starts_with("Authentication failed"));
    }

    mod persistence {
        use super::*;
        use crate::calendar::RemoteEvent;
        use crate::test_utils::containers::fresh_pool;

        fn team_query() -> EventQuery {
            let (time_min, time_max) = range();
            EventQuery {
                calendar_id: "team@group.calendar.google.com".into(),
                time_min,
                time_max,
                max_results: 250,
                out_of_office: false,
            }
        }

        fn fetched(events: &[&RemoteEvent], truncated: bool) -> FetchedCalendar {
            FetchedCalendar {
                calendar_name: Some("Team".into()),
                events: events.iter().map(|e| (*e).clone()).collect(),
                truncated,
            }
        }

        async fn live_ids(pool: &PgPool) -> Vec<String> {
            let (min, max) = range();
            let mut ids: Vec<String> = CalendarEventRepository::list_live(pool, &[], min, max)
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.google_event_id)
                .collect();
            ids.sort();
            ids
        }

        #[tokio::test]
        async fn test_apply_twice_changes_nothing() {
            let pool = fresh_pool().await;
            let query = team_query();
            let (standup, retro) = (remote_event("evt-1", "Standup"), remote_event("evt-2", "Retro"));

            let first = apply(&pool, &query, fetched(&[&standup, &retro], false)).await.unwrap();
            assert_eq!(
                first,
                ReconcileCounts {
                    added: 2,
                    ..Default::default()
                }
            );

            let second = apply(&pool, &query, fetched(&[&standup, &retro], false)).await.unwrap();
            assert_eq!(
                second,
                ReconcileCounts {
                    unchanged: 2,
                    ..Default::default()
                }
            );
            assert_eq!(live_ids(&pool).await, vec!["evt-1", "evt-2"]);
        }

        #[tokio::test]
        async fn test_vanished_event_is_soft_deleted_then_restored() {
            let pool = fresh_pool().await;
            let query = team_query();
            let (standup, retro) = (remote_event("evt-1", "Standup"), remote_event("evt-2", "Retro"));

            apply(&pool, &query, fetched(&[&standup, &retro], false)).await.unwrap();

            let gone = apply(&pool, &query, fetched(&[&standup], false)).await.unwrap();
            assert_eq!(gone.deleted, 1);
            assert_eq!(live_ids(&pool).await, vec!["evt-1"]);

            let still_gone = apply(&pool, &query, fetched(&[&standup], false)).await.unwrap();
            assert_eq!(still_gone.deleted, 0);
            assert_eq!(still_gone.unchanged, 1);

            let back = apply(&pool, &query, fetched(&[&standup, &retro], false)).await.unwrap();
            assert_eq!(back.updated, 1);
            assert_eq!(back.unchanged, 1);
            assert_eq!(live_ids(&pool).await, vec!["evt-1", "evt-2"]);
        }

        #[tokio::test]
        async fn test_truncated_fetch_keeps_stored_events() {
            let pool = fresh_pool().await;
            let query = team_query();
            let (standup, retro) = (remote_event("evt-1", "Standup"), remote_event("evt-2", "Retro"));

            apply(&pool, &query, fetched(&[&standup, &retro], false)).await.unwrap();

            let capped = apply(&pool, &query, fetched(&[&standup], true)).await.unwrap();
            assert_eq!(capped.deleted, 0);
            assert_eq!(capped.unchanged, 1);
            assert_eq!(live_ids(&pool).await, vec!["evt-1", "evt-2"]);
        }
    }
}
