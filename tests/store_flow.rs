//! Store-level integration tests against an in-memory SQLite database, plus
//! the full store -> engine balance flow.

use chrono::{Duration, Local, NaiveDate};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use saldo::auth;
use saldo::database::db::{migrate, queries};
use saldo::engine::{self, BalanceInput, HealthStatus};

// A single connection keeps every query on the same :memory: database.
async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    migrate::run_migrations(&pool).await.expect("run migrations");
    pool
}

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

#[tokio::test]
async fn find_or_create_user_is_idempotent() {
    let pool = test_pool().await;

    let first = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();
    let second = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();
    assert_eq!(first.user_id, second.user_id);
    assert_eq!(second.email, "ana@example.com");

    let other = queries::find_or_create_user(&pool, "bruno@example.com").await.unwrap();
    assert_ne!(other.user_id, first.user_id);
}

#[tokio::test]
async fn income_upsert_creates_then_updates() {
    let pool = test_pool().await;
    let user = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();

    assert!(queries::get_income(&pool, user.user_id).await.unwrap().is_none());

    let (income, created) = queries::upsert_income(&pool, user.user_id, 3000.0).await.unwrap();
    assert!(created);
    assert_eq!(income.monthly_income, 3000.0);

    let (updated, created) = queries::upsert_income(&pool, user.user_id, 3500.0).await.unwrap();
    assert!(!created);
    assert_eq!(updated.monthly_income, 3500.0);
    // Same row, not a second one.
    assert_eq!(updated.income_id, income.income_id);

    let fetched = queries::get_income(&pool, user.user_id).await.unwrap().unwrap();
    assert_eq!(fetched.monthly_income, 3500.0);
}

#[tokio::test]
async fn fixed_expenses_are_replaced_as_a_set() {
    let pool = test_pool().await;
    let user = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();

    let saved = queries::replace_fixed_expenses(
        &pool,
        user.user_id,
        &[("rent".to_string(), 900.0), ("internet".to_string(), 100.0)],
    )
    .await
    .unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(queries::sum_fixed_expenses(&pool, user.user_id).await.unwrap(), 1000.0);

    // A second save replaces, never appends.
    let saved = queries::replace_fixed_expenses(&pool, user.user_id, &[("rent".to_string(), 950.0)])
        .await
        .unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(queries::sum_fixed_expenses(&pool, user.user_id).await.unwrap(), 950.0);

    // Clearing out is legal.
    queries::replace_fixed_expenses(&pool, user.user_id, &[]).await.unwrap();
    assert_eq!(queries::sum_fixed_expenses(&pool, user.user_id).await.unwrap(), 0.0);
}

#[tokio::test]
async fn variable_expense_sum_respects_the_month_window() {
    let pool = test_pool().await;
    let user = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();

    // Inside the window.
    queries::create_variable_expense(&pool, user.user_id, 50.0, "mercado", None, june(1))
        .await
        .unwrap();
    queries::create_variable_expense(&pool, user.user_id, 30.0, "transporte", Some("bus pass"), june(10))
        .await
        .unwrap();
    // Outside: previous month and later in the same month.
    queries::create_variable_expense(&pool, user.user_id, 99.0, "mercado", None, june(1) - Duration::days(1))
        .await
        .unwrap();
    queries::create_variable_expense(&pool, user.user_id, 77.0, "lazer", None, june(11))
        .await
        .unwrap();

    // Both window ends are inclusive.
    let total = queries::sum_variable_expenses(&pool, user.user_id, june(1), june(10))
        .await
        .unwrap();
    assert_eq!(total, 80.0);

    // No rows in range sums to zero, not an error.
    let empty = queries::sum_variable_expenses(&pool, user.user_id, june(20), june(25))
        .await
        .unwrap();
    assert_eq!(empty, 0.0);
}

#[tokio::test]
async fn variable_expense_delete_is_owner_scoped() {
    let pool = test_pool().await;
    let ana = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();
    let bruno = queries::find_or_create_user(&pool, "bruno@example.com").await.unwrap();

    let expense = queries::create_variable_expense(&pool, ana.user_id, 25.0, "mercado", None, june(5))
        .await
        .unwrap();

    // Someone else's row looks like it does not exist.
    assert!(!queries::delete_variable_expense(&pool, bruno.user_id, expense.expense_id)
        .await
        .unwrap());
    assert_eq!(
        queries::sum_variable_expenses(&pool, ana.user_id, june(1), june(30)).await.unwrap(),
        25.0
    );

    assert!(queries::delete_variable_expense(&pool, ana.user_id, expense.expense_id)
        .await
        .unwrap());
    assert_eq!(
        queries::sum_variable_expenses(&pool, ana.user_id, june(1), june(30)).await.unwrap(),
        0.0
    );
}

#[tokio::test]
async fn newest_auth_code_wins_and_verifies() {
    let pool = test_pool().await;
    let expires = Local::now().naive_local() + Duration::minutes(5);

    let old_hash = auth::hash_code("AAAAAA").unwrap();
    queries::create_auth_code(&pool, "ana@example.com", &old_hash, expires).await.unwrap();

    let new_code = auth::generate_code();
    let new_hash = auth::hash_code(&new_code).unwrap();
    queries::create_auth_code(&pool, "ana@example.com", &new_hash, expires).await.unwrap();

    let entry = queries::latest_auth_code(&pool, "ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(auth::verify_code(&new_code, &entry.code_hash));
    assert!(!auth::verify_code("AAAAAA", &entry.code_hash) || new_code == "AAAAAA");

    // Unknown address has no codes at all.
    assert!(queries::latest_auth_code(&pool, "carla@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn expired_code_is_detectable_from_the_stored_row() {
    let pool = test_pool().await;
    let hash = auth::hash_code("BBBBBB").unwrap();
    let expired_at = Local::now().naive_local() - Duration::minutes(1);
    queries::create_auth_code(&pool, "ana@example.com", &hash, expired_at).await.unwrap();

    let entry = queries::latest_auth_code(&pool, "ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(Local::now().naive_local() > entry.expires_at);
}

#[tokio::test]
async fn balance_flow_from_store_to_engine() {
    let pool = test_pool().await;
    let user = queries::find_or_create_user(&pool, "ana@example.com").await.unwrap();

    queries::upsert_income(&pool, user.user_id, 3000.0).await.unwrap();
    queries::replace_fixed_expenses(
        &pool,
        user.user_id,
        &[("rent".to_string(), 600.0), ("utilities".to_string(), 400.0)],
    )
    .await
    .unwrap();

    queries::create_variable_expense(&pool, user.user_id, 120.0, "mercado", None, june(2))
        .await
        .unwrap();
    queries::create_variable_expense(&pool, user.user_id, 80.0, "transporte", None, june(6))
        .await
        .unwrap();
    queries::create_variable_expense(&pool, user.user_id, 100.0, "lazer", None, june(9))
        .await
        .unwrap();

    // As-of June 10: the same aggregation the balance endpoint performs.
    let today = june(10);
    let total_fixed = queries::sum_fixed_expenses(&pool, user.user_id).await.unwrap();
    let total_variable = queries::sum_variable_expenses(&pool, user.user_id, june(1), today)
        .await
        .unwrap();

    let income = queries::get_income(&pool, user.user_id).await.unwrap().unwrap();
    let snapshot = engine::evaluate(&BalanceInput {
        total_income: income.monthly_income,
        total_fixed_expenses: total_fixed,
        total_variable_expenses_month: total_variable,
        today,
    });

    assert_eq!(snapshot.current_balance, 1700.0);
    assert_eq!(snapshot.total_fixed_expenses, 1000.0);
    assert_eq!(snapshot.total_variable_expenses, 300.0);
    assert_eq!(snapshot.financial_health_status, HealthStatus::Yellow);

    let projection = snapshot.projection.expect("day 10 projects");
    assert_eq!(projection.gmd_variable_expenses, 30.0);
    assert_eq!(projection.projected_variable_expenses, 900.0);
    assert_eq!(projection.projected_total_expenses, 1900.0);
    assert_eq!(projection.end_of_month_balance, 1100.0);
}
