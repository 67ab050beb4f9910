//! Balance & Projection Engine
//!
//! Pure computation over caller-supplied totals: no I/O, no clock access,
//! identical inputs always produce identical output. The storage layer feeds
//! it the three sums and the as-of date; it returns the snapshot the balance
//! endpoint serializes as-is.

mod projection;

pub use projection::Projection;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Three-tier financial health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "verde")]
    Green,
    #[serde(rename = "amarelo")]
    Yellow,
    #[serde(rename = "vermelho")]
    Red,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "verde",
            Self::Yellow => "amarelo",
            Self::Red => "vermelho",
        }
    }
}

/// Aggregated inputs for one evaluation. `total_variable_expenses_month` is
/// the sum of variable spend dated within [first of month, `today`].
#[derive(Debug, Clone, Copy)]
pub struct BalanceInput {
    pub total_income: f64,
    pub total_fixed_expenses: f64,
    pub total_variable_expenses_month: f64,
    pub today: NaiveDate,
}

/// Computed fresh on every balance query, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub current_balance: f64,
    pub total_income: f64,
    pub total_fixed_expenses: f64,
    #[serde(rename = "totalVariableExpensesMonth")]
    pub total_variable_expenses: f64,
    pub financial_health_status: HealthStatus,
    pub health_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_month_for_projection: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month_for_projection: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

/// Percentage of income left after all expenses so far this month.
/// Unclamped: can go negative or past 100. Zero income short-circuits to 0
/// instead of dividing by zero.
fn health_percentage(input: &BalanceInput) -> f64 {
    if input.total_income > 0.0 {
        let net_flow = input.total_income
            - input.total_fixed_expenses
            - input.total_variable_expenses_month;
        (net_flow / input.total_income) * 100.0
    } else {
        0.0
    }
}

/// Classification boundaries: green above 60, yellow from 25 to 60 inclusive,
/// red below 25. The projection simulator uses strict-less-than cutoffs
/// instead; the two are intentionally not unified.
fn classify(percentage: f64) -> HealthStatus {
    if percentage > 60.0 {
        HealthStatus::Green
    } else if percentage >= 25.0 {
        HealthStatus::Yellow
    } else {
        HealthStatus::Red
    }
}

/// Evaluate the full snapshot: aggregation, classification, and (from day 8
/// of the month onward) the month-end projection with alert days.
pub fn evaluate(input: &BalanceInput) -> BalanceSnapshot {
    let current_balance = input.total_income
        - input.total_fixed_expenses
        - input.total_variable_expenses_month;

    let percentage = health_percentage(input);
    let status = classify(percentage);

    let projection = projection::project(input);
    let (days_in_month, day_of_month) = if projection.is_some() {
        (
            Some(projection::days_in_month(input.today)),
            Some(input.today.day()),
        )
    } else {
        (None, None)
    };

    BalanceSnapshot {
        current_balance,
        total_income: input.total_income,
        total_fixed_expenses: input.total_fixed_expenses,
        total_variable_expenses: input.total_variable_expenses_month,
        financial_health_status: status,
        health_percentage: percentage,
        days_in_month_for_projection: days_in_month,
        day_of_month_for_projection: day_of_month,
        projection,
    }
}
