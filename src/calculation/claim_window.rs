//! Part-time claim window detection.
//!
//! Part-time hours claims are due by the second Friday of each month. A
//! claim counts for the current cycle when it falls strictly between the
//! previous month's second Friday and this month's.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Finds the second Friday of the month containing `date`.
///
/// Days are scanned forward from the 1st, counting Fridays.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::second_friday;
/// use chrono::NaiveDate;
///
/// // 2024-03-01 is a Friday
/// let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
/// assert_eq!(second_friday(date), NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
/// ```
pub fn second_friday(date: NaiveDate) -> NaiveDate {
    let mut day = date - Days::new(u64::from(date.day0()));
    let mut fridays = 0;
    loop {
        if day.weekday() == Weekday::Fri {
            fridays += 1;
            if fridays == 2 {
                return day;
            }
        }
        day = day + Days::new(1);
    }
}

/// Checks whether a claim falls inside the window ending this month.
///
/// The window is `(second_friday(current - 1 month), second_friday(current))`
/// with both bounds excluded. A missing claim date is never on time.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_claim_on_time;
/// use chrono::NaiveDate;
///
/// let current = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
/// let claim = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert!(is_claim_on_time(Some(claim), current));
/// assert!(!is_claim_on_time(None, current));
/// ```
pub fn is_claim_on_time(last_claim_date: Option<NaiveDate>, current: NaiveDate) -> bool {
    let Some(claimed) = last_claim_date else {
        return false;
    };

    let window_end = second_friday(current);
    let window_start = match current.checked_sub_months(Months::new(1)) {
        Some(previous) => second_friday(previous),
        None => NaiveDate::MIN,
    };

    claimed > window_start && claimed < window_end
}
