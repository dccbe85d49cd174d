//! Monthly pay-cycle scheduler.
//!
//! Each call to [`PayrollState::advance_month`] moves the simulated clock one
//! month forward, applies the October pay-scale progression and issues the
//! month's payslips. The cycle runs against a copy of the state and is only
//! committed once every employee has been processed.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::calculation::is_claim_on_time;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, EmployeeId, EmploymentKind, PAY_DAY, Payslip, pay_date_for};

use super::PayrollState;

/// Month in which annual pay-scale progression is applied.
pub const PROGRESSION_MONTH: u32 = 10;

/// Months replayed backwards from the real date during bootstrap.
pub const BOOTSTRAP_LOOKBACK_MONTHS: u32 = 5;

/// What one monthly cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// The simulated date after the advance.
    pub date: NaiveDate,
    /// The pay date stamped on this cycle's payslips.
    pub pay_date: NaiveDate,
    /// Employees who received a new payslip.
    pub payslips_issued: Vec<EmployeeId>,
    /// Employees who moved one point up their scale.
    pub ranks_advanced: Vec<EmployeeId>,
}

impl PayrollState {
    /// Advances the clock one month and runs the pay cycle.
    ///
    /// On error the state is left exactly as it was before the call.
    pub fn advance_month(&mut self) -> PayrollResult<CycleReport> {
        let mut next = self.clone();
        let report = next.run_cycle()?;
        *self = next;

        info!(
            date = %report.date,
            payslips = report.payslips_issued.len(),
            ranks_advanced = report.ranks_advanced.len(),
            "Pay cycle complete"
        );
        Ok(report)
    }

    /// Runs twelve monthly cycles in order.
    ///
    /// Each month commits on its own; a failure stops the run with the
    /// earlier months already applied.
    pub fn advance_year(&mut self) -> PayrollResult<Vec<CycleReport>> {
        (0..12).map(|_| self.advance_month()).collect()
    }

    /// Backfills payslips for the months leading up to `today`.
    ///
    /// The clock is wound back five months and the cycle replayed, five
    /// times if this month's pay day has already passed and four times
    /// otherwise. The clock finishes on `today` either way.
    pub fn bootstrap(&mut self, today: NaiveDate) -> PayrollResult<Vec<CycleReport>> {
        let start = today
            .checked_sub_months(Months::new(BOOTSTRAP_LOOKBACK_MONTHS))
            .ok_or(PayrollError::CalendarOverflow { date: today })?;
        let cycles = if today.day() >= PAY_DAY {
            BOOTSTRAP_LOOKBACK_MONTHS
        } else {
            BOOTSTRAP_LOOKBACK_MONTHS - 1
        };

        let mut next = self.clone();
        next.clock.set(start);
        let reports = (0..cycles)
            .map(|_| next.run_cycle())
            .collect::<PayrollResult<Vec<_>>>()?;
        next.clock.set(today);
        *self = next;

        info!(%today, cycles, "Payroll history backfilled");
        Ok(reports)
    }

    fn run_cycle(&mut self) -> PayrollResult<CycleReport> {
        let date = self.clock.advance_month()?;
        let pay_date = pay_date_for(date);

        let ranks_advanced = if date.month() == PROGRESSION_MONTH {
            self.progress_pay_scales(date)
        } else {
            Vec::new()
        };

        let mut payslips_issued = Vec::new();
        for employee in &mut self.employees {
            if pay_employee(employee, date, pay_date)? {
                payslips_issued.push(employee.id());
            }
        }

        Ok(CycleReport {
            date,
            pay_date,
            payslips_issued,
            ranks_advanced,
        })
    }

    /// Moves every employee not promoted this calendar year one point up
    /// their scale.
    fn progress_pay_scales(&mut self, today: NaiveDate) -> Vec<EmployeeId> {
        let mut advanced = Vec::new();
        for employee in &mut self.employees {
            if employee.last_promotion_date().year() >= today.year() {
                continue;
            }
            if employee.increment_rank(today) {
                debug!(
                    employee_id = employee.id(),
                    rank = employee.rank(),
                    "Pay scale point awarded"
                );
                advanced.push(employee.id());
            }
        }
        advanced
    }
}

/// Issues this cycle's payslip for one employee, if one is due.
fn pay_employee(
    employee: &mut Employee,
    today: NaiveDate,
    pay_date: NaiveDate,
) -> PayrollResult<bool> {
    let claim = match employee.kind() {
        EmploymentKind::FullTime => {
            let payslip = Payslip::for_employee(employee, pay_date)?;
            return Ok(employee.add_payslip(payslip));
        }
        EmploymentKind::PartTime(claim) => claim.clone(),
    };

    let on_time = is_claim_on_time(claim.last_claim_date, today);
    let carried_over = !claim.unpaid_hours.is_zero()
        && claim.last_claim_date.is_some_and(|claimed| claimed < today);
    if !on_time && !carried_over {
        return Ok(false);
    }

    if let Some(claim) = employee.part_time_claim_mut() {
        claim.hours_worked += claim.unpaid_hours;
    }
    let payslip = Payslip::for_employee(employee, pay_date)?;
    let issued = employee.add_payslip(payslip);
    if let Some(current) = employee.part_time_claim_mut() {
        if issued {
            current.hours_worked = Decimal::ZERO;
            current.unpaid_hours = Decimal::ZERO;
        } else {
            // Duplicate pay date: keep the hours for a later cycle.
            *current = claim;
        }
    }
    Ok(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PositionCatalog;
    use crate::models::{InsuranceTier, Position, RosterRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> PositionCatalog {
        PositionCatalog::new(vec![
            Position::new(
                "Other",
                "Lecturer",
                vec![
                    Decimal::new(36000, 0),
                    Decimal::new(38400, 0),
                    Decimal::new(40800, 0),
                ],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    fn record(name: &str, rank: u32, promoted: NaiveDate, part_time: bool) -> RosterRecord {
        RosterRecord {
            name: name.to_string(),
            phone: "0870000000".to_string(),
            position_title: "Lecturer".to_string(),
            rank,
            last_promotion_date: promoted,
            insurance_tier: InsuranceTier::Basic,
            part_time,
        }
    }

    fn state_on(today: NaiveDate, records: &[RosterRecord]) -> PayrollState {
        PayrollState::from_roster(catalog(), records, today, "ul.ie").unwrap()
    }

    #[test]
    fn test_full_time_paid_every_month() {
        let mut state = state_on(
            date(2024, 1, 10),
            &[record("Aoife Ryan", 1, date(2023, 1, 1), false)],
        );

        let report = state.advance_month().unwrap();

        assert_eq!(report.date, date(2024, 2, 10));
        assert_eq!(report.pay_date, date(2024, 2, 25));
        assert_eq!(report.payslips_issued, vec![1000]);
        let payslips = state.find_employee(1000).unwrap().payslips();
        assert_eq!(payslips.len(), 1);
        assert_eq!(payslips[0].base_pay, Decimal::new(3000, 0));
    }

    #[test]
    fn test_part_time_without_claim_is_not_paid() {
        let mut state = state_on(
            date(2024, 1, 10),
            &[record("Pat Moore", 1, date(2023, 1, 1), true)],
        );

        let report = state.advance_month().unwrap();

        assert!(report.payslips_issued.is_empty());
        assert!(state.find_employee(1000).unwrap().payslips().is_empty());
    }

    #[test]
    fn test_october_progression_skips_recent_promotions() {
        let mut state = state_on(
            date(2024, 9, 18),
            &[
                record("Aoife Ryan", 1, date(2023, 3, 1), false),
                record("Brian Daly", 1, date(2024, 2, 1), false),
            ],
        );

        let report = state.advance_month().unwrap();

        assert_eq!(report.ranks_advanced, vec![1000]);
        assert_eq!(state.find_employee(1000).unwrap().rank(), 2);
        assert_eq!(state.find_employee(1001).unwrap().rank(), 1);
        // the October payslip reflects the new rank
        assert_eq!(
            state.find_employee(1000).unwrap().payslips()[0].base_pay,
            Decimal::new(3200, 0)
        );
    }

    #[test]
    fn test_progression_only_happens_in_october() {
        let mut state = state_on(
            date(2024, 10, 18),
            &[record("Aoife Ryan", 1, date(2020, 3, 1), false)],
        );

        let report = state.advance_month().unwrap();

        assert!(report.ranks_advanced.is_empty());
        assert_eq!(state.find_employee(1000).unwrap().rank(), 1);
    }

    #[test]
    fn test_progression_stamps_top_of_scale() {
        let mut state = state_on(
            date(2024, 9, 18),
            &[record("Aoife Ryan", 2, date(2022, 3, 1), false)],
        );

        state.advance_month().unwrap();

        let employee = state.find_employee(1000).unwrap();
        assert_eq!(employee.rank(), 3);
        assert_eq!(employee.reached_top_of_scale_date(), Some(date(2024, 10, 18)));
    }

    #[test]
    fn test_advance_year_progresses_once() {
        let mut state = state_on(
            date(2024, 1, 5),
            &[record("Aoife Ryan", 1, date(2022, 3, 1), false)],
        );

        let reports = state.advance_year().unwrap();

        assert_eq!(reports.len(), 12);
        let advanced: usize = reports.iter().map(|r| r.ranks_advanced.len()).sum();
        assert_eq!(advanced, 1);
        assert_eq!(state.today(), date(2025, 1, 5));
        assert_eq!(state.find_employee(1000).unwrap().payslips().len(), 12);
    }

    #[test]
    fn test_duplicate_pay_date_keeps_carried_hours() {
        let mut state = state_on(
            date(2024, 3, 20),
            &[record("Pat Moore", 1, date(2023, 1, 1), true)],
        );
        let employee = state.find_employee_mut(1000).unwrap();
        {
            let claim = employee.part_time_claim_mut().unwrap();
            claim.last_claim_date = Some(date(2024, 3, 1));
            claim.unpaid_hours = Decimal::new(6, 0);
        }
        let pay_date = date(2024, 4, 25);
        let earlier = Payslip::for_employee(employee, pay_date).unwrap();
        assert!(employee.add_payslip(earlier));
        let before = employee.part_time_claim().cloned();

        let issued = pay_employee(employee, date(2024, 4, 20), pay_date).unwrap();

        assert!(!issued);
        assert_eq!(employee.payslips().len(), 1);
        assert_eq!(employee.part_time_claim().cloned(), before);
        assert_eq!(
            employee.part_time_claim().unwrap().unpaid_hours,
            Decimal::new(6, 0)
        );
    }

    #[test]
    fn test_carried_over_hours_paid_next_cycle() {
        let mut state = state_on(
            date(2024, 3, 20),
            &[record("Pat Moore", 1, date(2023, 1, 1), true)],
        );
        {
            let employee = state.find_employee_mut(1000).unwrap();
            let claim = employee.part_time_claim_mut().unwrap();
            claim.last_claim_date = Some(date(2024, 2, 2));
            claim.unpaid_hours = Decimal::new(12, 0);
        }

        let report = state.advance_month().unwrap();

        assert_eq!(report.payslips_issued, vec![1000]);
        let employee = state.find_employee(1000).unwrap();
        let payslip = employee.latest_payslip().unwrap();
        assert_eq!(payslip.part_time.as_ref().unwrap().hours_worked, Decimal::new(12, 0));
        // 36000 / 1440 = 25 per hour
        assert_eq!(payslip.base_pay, Decimal::new(300, 0));
        let claim = employee.part_time_claim().unwrap();
        assert_eq!(claim.unpaid_hours, Decimal::ZERO);
        assert_eq!(claim.hours_worked, Decimal::ZERO);
    }

    #[test]
    fn test_bootstrap_after_pay_day_replays_five_cycles() {
        let mut state = state_on(
            date(2024, 6, 26),
            &[record("Aoife Ryan", 1, date(2023, 1, 1), false)],
        );

        let reports = state.bootstrap(date(2024, 6, 26)).unwrap();

        assert_eq!(reports.len(), 5);
        assert_eq!(state.today(), date(2024, 6, 26));
        let dates: Vec<NaiveDate> = state
            .find_employee(1000)
            .unwrap()
            .payslips()
            .iter()
            .map(|p| p.pay_date)
            .collect();
        assert_eq!(dates.first(), Some(&date(2024, 2, 25)));
        assert_eq!(dates.last(), Some(&date(2024, 6, 25)));
    }

    #[test]
    fn test_bootstrap_before_pay_day_replays_four_cycles() {
        let mut state = state_on(
            date(2024, 6, 10),
            &[record("Aoife Ryan", 1, date(2023, 1, 1), false)],
        );

        let reports = state.bootstrap(date(2024, 6, 10)).unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(state.today(), date(2024, 6, 10));
        let latest = state.find_employee(1000).unwrap().latest_payslip().unwrap();
        assert_eq!(latest.pay_date, date(2024, 5, 25));
    }

    #[test]
    fn test_failed_cycle_leaves_state_untouched() {
        let mut state = state_on(
            NaiveDate::MAX,
            &[record("Aoife Ryan", 1, date(2023, 1, 1), false)],
        );
        let snapshot = state.clone();

        let result = state.advance_month();

        assert!(matches!(result, Err(PayrollError::CalendarOverflow { .. })));
        assert_eq!(state, snapshot);
    }
}
