// ABOUTME: Integration tests for the SQLite adapter
// ABOUTME: Covers range bounds, bulk updates, row tolerance, and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainsched Project

mod common;

use chrono::{Datelike, NaiveDate};
use trainsched::models::{CreateSessionRequest, SessionStatus, WeeklySchedule};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session_request(client: Uuid, scheduled_date: NaiveDate) -> CreateSessionRequest {
    CreateSessionRequest {
        client_id: client,
        trainer_id: Uuid::new_v4(),
        template_id: None,
        plan_id: None,
        scheduled_date,
        scheduled_time: Some("06:00".to_owned()),
        duration_minutes: Some(45),
        session_type: Some("conditioning".to_owned()),
        location: Some("Main gym".to_owned()),
        notes: None,
    }
}

#[tokio::test]
async fn test_session_round_trip() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    let created = db
        .insert_session(&session_request(client, date(2025, 3, 12)))
        .await
        .unwrap();

    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
    let session = &fetched[0];
    assert_eq!(session.id, created.id);
    assert_eq!(session.status, SessionStatus::Scheduled);
    assert_eq!(session.scheduled_time.as_deref(), Some("06:00"));
    assert_eq!(session.duration_minutes, Some(45));
    assert_eq!(session.location.as_deref(), Some("Main gym"));
}

#[tokio::test]
async fn test_range_fetch_bounds_are_inclusive() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    for day in [9, 10, 13, 16, 17] {
        db.insert_session(&session_request(client, date(2025, 3, day)))
            .await
            .unwrap();
    }

    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    let days: Vec<u32> = fetched.iter().map(|s| s.scheduled_date.day()).collect();
    assert_eq!(days, vec![10, 13, 16]);
}

#[tokio::test]
async fn test_range_fetch_scopes_to_client() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    db.insert_session(&session_request(client, date(2025, 3, 12)))
        .await
        .unwrap();
    db.insert_session(&session_request(Uuid::new_v4(), date(2025, 3, 12)))
        .await
        .unwrap();

    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].client_id, client);
}

#[tokio::test]
async fn test_stale_select_and_bulk_no_show() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    let today = date(2025, 3, 12);
    let stale_a = db
        .insert_session(&session_request(client, date(2025, 3, 10)))
        .await
        .unwrap();
    let stale_b = db
        .insert_session(&session_request(client, date(2025, 3, 11)))
        .await
        .unwrap();
    let upcoming = db
        .insert_session(&session_request(client, today))
        .await
        .unwrap();

    let stale = db.stale_scheduled_sessions(client, today).await.unwrap();
    let stale_ids: Vec<Uuid> = stale.iter().map(|s| s.id).collect();
    assert_eq!(stale_ids.len(), 2);
    assert!(stale_ids.contains(&stale_a.id));
    assert!(stale_ids.contains(&stale_b.id));

    let updated = db.mark_sessions_no_show(&stale_ids).await.unwrap();
    assert_eq!(updated, 2);

    // Repeating the update touches nothing: the rows are no longer scheduled
    let updated_again = db.mark_sessions_no_show(&stale_ids).await.unwrap();
    assert_eq!(updated_again, 0);

    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    for session in &fetched {
        if session.id == upcoming.id {
            assert_eq!(session.status, SessionStatus::Scheduled);
        } else {
            assert_eq!(session.status, SessionStatus::NoShow);
        }
    }
}

#[tokio::test]
async fn test_bulk_no_show_is_a_no_op_on_empty_input() {
    let db = common::create_test_database().await;
    let updated = db.mark_sessions_no_show(&[]).await.unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn test_no_show_update_stamps_updated_at() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    let created = db
        .insert_session(&session_request(client, date(2025, 3, 10)))
        .await
        .unwrap();

    db.mark_sessions_no_show(&[created.id]).await.unwrap();

    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 10))
        .await
        .unwrap();
    assert!(fetched[0].updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_malformed_session_row_is_skipped_not_fatal() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    db.insert_session(&session_request(client, date(2025, 3, 12)))
        .await
        .unwrap();

    // A row with an unparseable date, written behind the adapter's back
    sqlx::query(
        r"
        INSERT INTO training_sessions (
            id, client_id, trainer_id, scheduled_date, status, created_at, updated_at
        ) VALUES ($1, $2, $3, 'not-a-date', 'scheduled', $4, $4)
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(client.to_string())
    .bind(Uuid::new_v4().to_string())
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(db.pool())
    .await
    .unwrap();

    let fetched = db
        .sessions_in_range(client, date(2025, 1, 1), date(2025, 12, 31))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
}

#[tokio::test]
async fn test_plan_round_trip_and_active_selection() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();
    let trainer = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let first_schedule = WeeklySchedule::default();
    let second_schedule = WeeklySchedule {
        monday: Some(template_id.to_string()),
        ..WeeklySchedule::default()
    };
    db.create_plan(client, trainer, "Base block", &first_schedule)
        .await
        .unwrap();
    // Later-updated plan becomes the active one
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = db
        .create_plan(client, trainer, "Strength block", &second_schedule)
        .await
        .unwrap();

    let active = db.active_plan_for_client(client).await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
    assert_eq!(active.name, "Strength block");
    assert_eq!(active.schedule_data, second_schedule);
}

#[tokio::test]
async fn test_malformed_schedule_data_reads_as_empty_schedule() {
    let db = common::create_test_database().await;
    let client = Uuid::new_v4();

    sqlx::query(
        r"
        INSERT INTO workout_plans (
            id, client_id, trainer_id, name, schedule_data, created_at, updated_at
        ) VALUES ($1, $2, $3, 'Legacy plan', '{broken json', $4, $4)
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(client.to_string())
    .bind(Uuid::new_v4().to_string())
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(db.pool())
    .await
    .unwrap();

    let plan = db.active_plan_for_client(client).await.unwrap().unwrap();
    assert!(plan.schedule_data.is_empty());
}

#[tokio::test]
async fn test_missing_plan_is_none() {
    let db = common::create_test_database().await;
    let plan = db.active_plan_for_client(Uuid::new_v4()).await.unwrap();
    assert!(plan.is_none());
}

#[tokio::test]
async fn test_template_round_trip_and_unknown_lookup() {
    let db = common::create_test_database().await;
    let exercises = vec![
        "Back squat".to_owned(),
        "Romanian deadlift".to_owned(),
        "Split squat".to_owned(),
    ];
    let created = db
        .create_template("Lower body", &exercises, 50)
        .await
        .unwrap();

    let fetched = db.get_template(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Lower body");
    assert_eq!(fetched.exercise_count, 3);
    assert_eq!(fetched.estimated_duration_minutes, 50);

    let missing = db.get_template(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_session_repository_trait_create_and_fetch() {
    use trainsched::database::SqliteSessionRepository;
    use trainsched::repositories::SessionRepository;

    let db = common::create_test_database().await;
    let repo = SqliteSessionRepository::new(db);
    let client = Uuid::new_v4();

    let created = repo
        .create_session(&session_request(client, date(2025, 3, 14)))
        .await
        .unwrap();
    assert_eq!(created.status, SessionStatus::Scheduled);

    let fetched = repo
        .fetch_sessions(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, created.id);
}

#[tokio::test]
async fn test_file_backed_database_persists_across_connections() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/trainsched-test.db", dir.path().display());
    let client = Uuid::new_v4();

    {
        let db = trainsched::database::Database::new(&url).await.unwrap();
        db.insert_session(&session_request(client, date(2025, 3, 12)))
            .await
            .unwrap();
    }

    let db = trainsched::database::Database::new(&url).await.unwrap();
    let fetched = db
        .sessions_in_range(client, date(2025, 3, 10), date(2025, 3, 16))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
}
