use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Pool, Sqlite};

use crate::database::models::{AuthCode, FixedExpense, Income, User, VariableExpense};

/*
All SQL lives here. Handlers never touch the pool directly; they call these
functions and map the results onto HTTP responses.
*/

/* ========== Auth code queries ========== */

// Store a hashed one-time code for an email address.
pub async fn create_auth_code(
    pool: &Pool<Sqlite>,
    email: &str,
    code_hash: &str,
    expires_at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO auth_codes (email, code_hash, expires_at)
        VALUES (?, ?, ?)
        RETURNING auth_code_id
        "#,
    )
    .bind(email)
    .bind(code_hash)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

// Newest code wins; the id tiebreak covers two requests inside one second.
pub async fn latest_auth_code(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<AuthCode>, sqlx::Error> {
    sqlx::query_as::<_, AuthCode>(
        r#"
        SELECT auth_code_id, email, code_hash, expires_at, created_at
        FROM auth_codes
        WHERE email = ?
        ORDER BY created_at DESC, auth_code_id DESC
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/* ========== User queries ========== */

pub async fn find_or_create_user(pool: &Pool<Sqlite>, email: &str) -> Result<User, sqlx::Error> {
    let existing = sqlx::query_as::<_, User>(
        "SELECT user_id, email, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    if let Some(user) = existing {
        return Ok(user);
    }

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email)
        VALUES (?)
        RETURNING user_id, email, created_at
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT user_id, email, created_at FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/* ========== Income queries ========== */

// One income row per user. Returns the stored row plus whether it was created
// (as opposed to updated), so the handler can pick 201 vs 200.
pub async fn upsert_income(
    pool: &Pool<Sqlite>,
    user_id: i64,
    monthly_income: f64,
) -> Result<(Income, bool), sqlx::Error> {
    let existing = get_income(pool, user_id).await?;

    if existing.is_some() {
        let income = sqlx::query_as::<_, Income>(
            r#"
            UPDATE incomes
            SET monthly_income = ?, updated_at = datetime('now')
            WHERE user_id = ?
            RETURNING income_id, user_id, monthly_income, created_at, updated_at
            "#,
        )
        .bind(monthly_income)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok((income, false))
    } else {
        let income = sqlx::query_as::<_, Income>(
            r#"
            INSERT INTO incomes (user_id, monthly_income)
            VALUES (?, ?)
            RETURNING income_id, user_id, monthly_income, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(monthly_income)
        .fetch_one(pool)
        .await?;
        Ok((income, true))
    }
}

pub async fn get_income(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<Income>, sqlx::Error> {
    sqlx::query_as::<_, Income>(
        r#"
        SELECT income_id, user_id, monthly_income, created_at, updated_at
        FROM incomes
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/* ========== Fixed expense queries ========== */

// Replace the whole fixed-expense set in one transaction: delete the old rows,
// insert the new ones. Either everything lands or nothing does.
pub async fn replace_fixed_expenses(
    pool: &Pool<Sqlite>,
    user_id: i64,
    expenses: &[(String, f64)],
) -> Result<Vec<FixedExpense>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM fixed_expenses WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let mut inserted = Vec::with_capacity(expenses.len());
    for (name, amount) in expenses {
        let row = sqlx::query_as::<_, FixedExpense>(
            r#"
            INSERT INTO fixed_expenses (user_id, name, amount)
            VALUES (?, ?, ?)
            RETURNING expense_id, user_id, name, amount, created_at
            "#,
        )
        .bind(user_id)
        .bind(name.as_str())
        .bind(*amount)
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(row);
    }

    tx.commit().await?;

    Ok(inserted)
}

pub async fn sum_fixed_expenses(pool: &Pool<Sqlite>, user_id: i64) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0.0) FROM fixed_expenses WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/* ========== Variable expense queries ========== */

pub async fn create_variable_expense(
    pool: &Pool<Sqlite>,
    user_id: i64,
    amount: f64,
    category: &str,
    description: Option<&str>,
    spent_on: NaiveDate,
) -> Result<VariableExpense, sqlx::Error> {
    sqlx::query_as::<_, VariableExpense>(
        r#"
        INSERT INTO variable_expenses (user_id, amount, category, description, spent_on)
        VALUES (?, ?, ?, ?, ?)
        RETURNING expense_id, user_id, amount, category, description, spent_on, created_at
        "#,
    )
    .bind(user_id)
    .bind(amount)
    .bind(category)
    .bind(description)
    .bind(spent_on)
    .fetch_one(pool)
    .await
}

// Scoped to the owner: a row belonging to someone else is treated as missing.
pub async fn delete_variable_expense(
    pool: &Pool<Sqlite>,
    user_id: i64,
    expense_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM variable_expenses WHERE expense_id = ? AND user_id = ?")
        .bind(expense_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Sum of variable spend inside [from, to], both ends inclusive.
pub async fn sum_variable_expenses(
    pool: &Pool<Sqlite>,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount), 0.0)
        FROM variable_expenses
        WHERE user_id = ? AND spent_on >= ? AND spent_on <= ?
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await
}
