//! Simulated calendar.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The payroll's notion of "now".
///
/// The clock only moves when told to: by whole months during normal
/// operation, or by an explicit reset during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedClock {
    today: NaiveDate,
}

impl SimulatedClock {
    /// Starts the clock on the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The current simulated date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the clock to an arbitrary date.
    pub fn set(&mut self, date: NaiveDate) {
        self.today = date;
    }

    /// Advances one calendar month and returns the new date.
    ///
    /// The day of month is clamped to the length of the target month, so
    /// 31 January advances to the last day of February.
    pub fn advance_month(&mut self) -> PayrollResult<NaiveDate> {
        self.today = self
            .today
            .checked_add_months(Months::new(1))
            .ok_or(PayrollError::CalendarOverflow { date: self.today })?;
        Ok(self.today)
    }
}
