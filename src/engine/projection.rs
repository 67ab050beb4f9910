//! Month-end projection: average daily variable spend extrapolated over the
//! whole month, plus a day-by-day simulation that finds when the projected
//! balance first crosses the yellow and red thresholds.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::BalanceInput;

// Projection only activates from day 8 onward; fewer days of data make the
// daily average too noisy to extrapolate.
const MIN_DAY_FOR_PROJECTION: u32 = 7;

// Simulation cutoffs. Strict less-than on both, unlike the classification
// boundaries in the aggregator. Keep them apart.
const SIM_YELLOW_BELOW: f64 = 60.0;
const SIM_RED_BELOW: f64 = 25.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub end_of_month_balance: f64,
    pub projected_variable_expenses: f64,
    pub projected_total_expenses: f64,
    #[serde(rename = "gmdVariableExpenses")]
    pub gmd_variable_expenses: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yellow_alert_day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_alert_day: Option<NaiveDate>,
}

/// Number of calendar days in `date`'s month, derived from one day before the
/// first day of the next month.
pub(super) fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("first of month is a valid date");
    (first_of_next - Duration::days(1)).day()
}

/// Build the projection, or `None` before day 8.
pub(super) fn project(input: &BalanceInput) -> Option<Projection> {
    let day_of_month = input.today.day();
    if day_of_month <= MIN_DAY_FOR_PROJECTION {
        return None;
    }

    let days = days_in_month(input.today);

    // Average daily variable spend over the days observed so far. Both guards
    // short-circuit to 0 rather than dividing by zero.
    let gmd = if day_of_month > 0 && input.total_variable_expenses_month > 0.0 {
        input.total_variable_expenses_month / day_of_month as f64
    } else {
        0.0
    };

    // The full-month extrapolation already contains the spend to date: the
    // average reflects days-so-far, multiplied back out over every day.
    let projected_variable_expenses = gmd * days as f64;
    let projected_total_expenses = projected_variable_expenses + input.total_fixed_expenses;
    let end_of_month_balance = input.total_income - projected_total_expenses;

    let mut yellow_alert_day = None;
    let mut red_alert_day = None;

    if gmd > 0.0 {
        let mut running = input.total_income
            - input.total_fixed_expenses
            - input.total_variable_expenses_month;

        for d in (day_of_month + 1)..=days {
            running -= gmd;

            let pct = if input.total_income > 0.0 {
                (running / input.total_income) * 100.0
            } else {
                0.0
            };

            // d never exceeds days_in_month, so the date always exists.
            let sim_date = input
                .today
                .with_day(d)
                .expect("simulated day is inside the month");

            if yellow_alert_day.is_none() && pct < SIM_YELLOW_BELOW {
                yellow_alert_day = Some(sim_date);
            }
            if red_alert_day.is_none() && pct < SIM_RED_BELOW {
                red_alert_day = Some(sim_date);
            }
            if yellow_alert_day.is_some() && red_alert_day.is_some() {
                break;
            }
        }
    }

    Some(Projection {
        end_of_month_balance,
        projected_variable_expenses,
        projected_total_expenses,
        gmd_variable_expenses: gmd,
        yellow_alert_day,
        red_alert_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(income: f64, fixed: f64, variable: f64, today: NaiveDate) -> BalanceInput {
        BalanceInput {
            total_income: income,
            total_fixed_expenses: fixed,
            total_variable_expenses_month: variable,
            today,
        }
    }

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(june(10)), 30);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 29);
        // December rolls the year over.
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()), 31);
    }

    #[test]
    fn test_no_projection_through_day_seven() {
        assert!(project(&input(3000.0, 1000.0, 300.0, june(7))).is_none());
        assert!(project(&input(3000.0, 1000.0, 300.0, june(8))).is_some());
    }

    #[test]
    fn test_worked_example() {
        // income 3000, fixed 1000, variable 300 by day 10 of a 30-day month.
        let p = project(&input(3000.0, 1000.0, 300.0, june(10))).unwrap();
        assert_eq!(p.gmd_variable_expenses, 30.0);
        assert_eq!(p.projected_variable_expenses, 900.0);
        assert_eq!(p.projected_total_expenses, 1900.0);
        assert_eq!(p.end_of_month_balance, 1100.0);
    }

    #[test]
    fn test_zero_gmd_still_projects() {
        // No variable spend yet: projection exists, nothing to simulate.
        let p = project(&input(3000.0, 1000.0, 0.0, june(10))).unwrap();
        assert_eq!(p.gmd_variable_expenses, 0.0);
        assert_eq!(p.projected_variable_expenses, 0.0);
        assert_eq!(p.projected_total_expenses, 1000.0);
        assert_eq!(p.end_of_month_balance, 2000.0);
        assert!(p.yellow_alert_day.is_none());
        assert!(p.red_alert_day.is_none());
    }

    #[test]
    fn test_alert_days_cross_together() {
        // income 1000, fixed 900, variable 50 on day 10: running balance 50
        // (5%), GMD 5. Day 11 lands at 45 (4.5%), under both cutoffs at once.
        let p = project(&input(1000.0, 900.0, 50.0, june(10))).unwrap();
        assert_eq!(p.gmd_variable_expenses, 5.0);
        assert_eq!(p.yellow_alert_day, Some(june(11)));
        assert_eq!(p.red_alert_day, Some(june(11)));
    }

    #[test]
    fn test_alert_days_cross_apart() {
        // income 1000, fixed 0, variable 450 on day 10: running 550, GMD 45.
        // Day 11: 505 (50.5%) -> yellow. Balance first drops under 250 on
        // day 17 (235, 23.5%) -> red.
        let p = project(&input(1000.0, 0.0, 450.0, june(10))).unwrap();
        assert_eq!(p.yellow_alert_day, Some(june(11)));
        assert_eq!(p.red_alert_day, Some(june(17)));
    }

    #[test]
    fn test_simulation_cutoff_is_strict() {
        // income 1000, fixed 300, variable 80 on day 8: running 620, GMD 10.
        // Day 10 sits at exactly 600 (60%), which does NOT trigger yellow;
        // day 11 at 590 (59%) does. Red (under 250) is never reached.
        let p = project(&input(1000.0, 300.0, 80.0, june(8))).unwrap();
        assert_eq!(p.yellow_alert_day, Some(june(11)));
        assert!(p.red_alert_day.is_none());
    }

    #[test]
    fn test_no_alerts_when_trajectory_stays_green() {
        let p = project(&input(10_000.0, 0.0, 800.0, june(10))).unwrap();
        assert!(p.yellow_alert_day.is_none());
        assert!(p.red_alert_day.is_none());
    }

    #[test]
    fn test_zero_income_alerts_on_first_simulated_day() {
        // With zero income every simulated percentage collapses to 0, so both
        // alerts land on the first simulated day.
        let p = project(&input(0.0, 0.0, 100.0, june(10))).unwrap();
        assert_eq!(p.yellow_alert_day, Some(june(11)));
        assert_eq!(p.red_alert_day, Some(june(11)));
    }
}
