//! Part-time hour claims.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::calculation::is_claim_on_time;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeId, Payslip, pay_date_for};

use super::PayrollState;

/// How a submitted claim was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// The claim was inside the window and paid immediately.
    Paid {
        /// Pay date of the payslip issued.
        pay_date: NaiveDate,
        /// Hours billed.
        hours: Decimal,
    },
    /// The claim missed the window; its hours wait for the next cycle.
    CarriedOver {
        /// Total hours now awaiting payment.
        unpaid_hours: Decimal,
    },
}

impl PayrollState {
    /// Records a part-time employee's hours for the current month.
    ///
    /// A claim filed before this month's second Friday is paid at once.
    /// Anything later is carried over and billed by the next pay cycle. If
    /// this month already has a payslip the hours are carried over too.
    pub fn submit_claim(
        &mut self,
        id: EmployeeId,
        hours: Decimal,
    ) -> PayrollResult<ClaimOutcome> {
        let today = self.today();
        let mut employee = self.find_employee(id)?.clone();
        let claim = employee
            .part_time_claim_mut()
            .ok_or(PayrollError::NotPartTime { employee_id: id })?;
        if hours.is_sign_negative() {
            return Err(PayrollError::InvalidHours { hours });
        }

        claim.hours_worked = hours;
        claim.last_claim_date = Some(today);

        let pay_date = pay_date_for(today);
        let already_paid = employee.payslips().iter().any(|p| p.pay_date == pay_date);
        let outcome = if is_claim_on_time(Some(today), today) && !already_paid {
            let payslip = Payslip::for_employee(&employee, pay_date)?;
            employee.add_payslip(payslip);
            ClaimOutcome::Paid { pay_date, hours }
        } else {
            let claim = employee
                .part_time_claim_mut()
                .ok_or(PayrollError::NotPartTime { employee_id: id })?;
            claim.carry_over(hours);
            ClaimOutcome::CarriedOver {
                unpaid_hours: claim.unpaid_hours,
            }
        };

        if let Some(claim) = employee.part_time_claim_mut() {
            claim.hours_worked = Decimal::ZERO;
        }
        *self.find_employee_mut(id)? = employee;

        info!(employee_id = id, %hours, outcome = ?outcome, "Claim submitted");
        Ok(outcome)
    }
}
