//! Integration tests for the access log repository and operator accounts.

use biogate_db::models::access_event::CreateAccessEvent;
use biogate_db::models::admin::CreateAdmin;
use biogate_db::models::user::CreateUser;
use biogate_db::repositories::{AccessEventRepo, AdminRepo, UserRepo};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scan(finger_id: i64, authorized: bool, prediction: &str, at: DateTime<Utc>) -> CreateAccessEvent {
    CreateAccessEvent {
        finger_id,
        confidence: 90,
        is_authorized: authorized,
        prediction: prediction.to_string(),
        recorded_at: at,
    }
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn insert_returns_the_stored_event(pool: SqlitePool) {
    let event = AccessEventRepo::insert(&pool, &scan(4, true, "Normal", at(8, 0)))
        .await
        .unwrap();

    assert!(event.id > 0);
    assert_eq!(event.finger_id, 4);
    assert_eq!(event.confidence, 90);
    assert!(event.is_authorized);
    assert_eq!(event.prediction, "Normal");
    assert_eq!(event.recorded_at, at(8, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn recent_events_are_newest_first_with_names(pool: SqlitePool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            id: 1,
            name: "Alice".into(),
            role: "Employee".into(),
        },
    )
    .await
    .unwrap();

    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(8, 0))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(9, false, "Unknown", at(8, 5))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(8, 10))).await.unwrap();

    let recent = AccessEventRepo::recent_with_users(&pool, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].event.recorded_at, at(8, 10));
    assert_eq!(recent[0].user_name.as_deref(), Some("Alice"));
    assert_eq!(recent[1].event.finger_id, 9);
    assert_eq!(recent[1].user_name, None);

    let all = AccessEventRepo::all_with_users(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].event.recorded_at, at(8, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_between_is_half_open(pool: SqlitePool) {
    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(7, 0))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(9, 0))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(10, 0))).await.unwrap();

    let window = AccessEventRepo::list_between(&pool, at(9, 0), at(10, 0))
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].recorded_at, at(9, 0));

    let day = AccessEventRepo::list_between(&pool, at(0, 0), at(0, 0) + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(day.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_between_keeps_sub_millisecond_boundaries(pool: SqlitePool) {
    // One local day in UTC+1.
    let from = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();
    let to = from + Duration::days(1);
    let one_ns = Duration::nanoseconds(1);

    for (finger_id, when) in [(1, from - one_ns), (2, from), (3, to - one_ns), (4, to)] {
        AccessEventRepo::insert(&pool, &scan(finger_id, true, "Normal", when))
            .await
            .unwrap();
    }

    let day = AccessEventRepo::list_between(&pool, from, to).await.unwrap();
    let ids: Vec<i64> = day.iter().map(|e| e.finger_id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(day[1].recorded_at, to - one_ns);

    let next_day: Vec<i64> = AccessEventRepo::list_between(&pool, to, to + Duration::days(1))
        .await
        .unwrap()
        .iter()
        .map(|e| e.finger_id)
        .collect();
    assert_eq!(next_day, vec![4]);
}

#[sqlx::test(migrations = "./migrations")]
async fn totals_and_prediction_counts(pool: SqlitePool) {
    let empty = AccessEventRepo::totals(&pool).await.unwrap();
    assert_eq!((empty.total, empty.authorized), (0, 0));

    AccessEventRepo::insert(&pool, &scan(1, true, "Normal", at(8, 0))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(2, false, "Unknown", at(8, 1))).await.unwrap();
    AccessEventRepo::insert(&pool, &scan(3, false, "Unknown", at(8, 2))).await.unwrap();

    let totals = AccessEventRepo::totals(&pool).await.unwrap();
    assert_eq!(totals.total, 3);
    assert_eq!(totals.authorized, 1);

    let counts = AccessEventRepo::counts_by_prediction(&pool).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].prediction, "Unknown");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].prediction, "Normal");
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_accounts(pool: SqlitePool) {
    assert_eq!(AdminRepo::count(&pool).await.unwrap(), 0);

    let admin = AdminRepo::create(
        &pool,
        &CreateAdmin {
            username: "admin".into(),
            password_hash: "$argon2id$stub".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(admin.username, "admin");
    assert_eq!(AdminRepo::count(&pool).await.unwrap(), 1);

    let found = AdminRepo::find_by_username(&pool, "admin").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(admin.id));
    assert!(AdminRepo::find_by_username(&pool, "Admin").await.unwrap().is_none());
}
