//! Payslip snapshot model.
//!
//! A [`Payslip`] freezes everything needed to reproduce one pay event:
//! the pay date, position, rank, gross pay and the insurance deduction in
//! force. Deductions are recomputed from those fields on demand, so the net
//! pay of a payslip never drifts.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::Deductions;
use crate::error::PayrollResult;

use super::{Employee, EmployeeId};

/// Day of the month on which every payslip is dated.
pub const PAY_DAY: u32 = 25;

/// Returns the pay date (the 25th) of the month containing `date`.
///
/// ```
/// use payroll_engine::models::pay_date_for;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
/// assert_eq!(pay_date_for(date), NaiveDate::from_ymd_opt(2025, 2, 25).unwrap());
/// ```
pub fn pay_date_for(date: NaiveDate) -> NaiveDate {
    let first = date - Days::new(u64::from(date.day0()));
    first + Days::new(u64::from(PAY_DAY - 1))
}

/// Hours and rate captured on a part-time payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTimeHours {
    /// Hours billed on this payslip, including carried-over hours.
    pub hours_worked: Decimal,
    /// Hourly rate at the time of billing.
    pub hourly_rate: Decimal,
}

/// An immutable record of one pay event for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee paid.
    pub employee_id: EmployeeId,
    /// The employee's name when paid.
    pub employee_name: String,
    /// Always the 25th of the simulated month.
    pub pay_date: NaiveDate,
    /// Position title when paid.
    pub position: String,
    /// Rank when paid.
    pub rank: u32,
    /// Gross pay for the cycle.
    pub base_pay: Decimal,
    /// Monthly health insurance deduction in force.
    pub insurance: Decimal,
    /// Hours and rate, for part-time employees only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_time: Option<PartTimeHours>,
}

impl Payslip {
    /// Snapshots an employee's current pay for the given pay date.
    pub fn for_employee(employee: &Employee, pay_date: NaiveDate) -> PayrollResult<Self> {
        let part_time = match employee.part_time_claim() {
            Some(claim) => Some(PartTimeHours {
                hours_worked: claim.hours_worked,
                hourly_rate: employee.hourly_rate()?,
            }),
            None => None,
        };

        Ok(Self {
            employee_id: employee.id(),
            employee_name: employee.name().to_string(),
            pay_date,
            position: employee.position().title().to_string(),
            rank: employee.rank(),
            base_pay: employee.base_pay()?,
            insurance: employee.insurance_tier().monthly_amount(),
            part_time,
        })
    }

    /// The statutory deduction breakdown for this payslip.
    pub fn deductions(&self) -> Deductions {
        Deductions::calculate(self.base_pay, self.insurance)
    }

    /// Gross pay less all deductions.
    pub fn net_pay(&self) -> Decimal {
        self.deductions().net_pay
    }
}
