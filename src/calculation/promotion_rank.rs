//! Starting rank for a promoted employee.

use chrono::{Datelike, NaiveDate};

use crate::models::Position;

/// Computes the rank an employee enters a new position at.
///
/// An employee who reached the top of their previous scale is credited one
/// point per full calendar year spent there, capped at the new scale's top.
/// A difference of zero or less starts at rank 1, as does an employee who
/// never reached the top.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::promotion_rank;
/// use payroll_engine::models::Position;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let senior = Position::new("Other", "Senior Lecturer", vec![Decimal::ONE; 5]).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let top = NaiveDate::from_ymd_opt(2022, 10, 25).unwrap();
///
/// assert_eq!(promotion_rank(Some(top), today, &senior), 3);
/// assert_eq!(promotion_rank(None, today, &senior), 1);
/// ```
pub fn promotion_rank(
    reached_top_of_scale: Option<NaiveDate>,
    today: NaiveDate,
    new_position: &Position,
) -> u32 {
    let Some(reached_top) = reached_top_of_scale else {
        return 1;
    };

    let years_at_top = today.year() - reached_top.year();
    if years_at_top <= 0 {
        return 1;
    }

    (years_at_top as u32).min(new_position.max_rank())
}
