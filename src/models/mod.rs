//! Core data models for the payroll engine.
//!
//! This module contains the domain models used throughout the engine:
//! positions, employees, payslips and the roster record shape.

mod employee;
mod payslip;
mod position;
mod roster_record;

pub use employee::{
    Employee, EmployeeId, EmploymentKind, InsuranceTier, NewEmployee, PAY_CYCLES_PER_YEAR,
    PART_TIME_ANNUAL_HOURS, PartTimeClaim, default_credential, derive_email,
};
pub use payslip::{PAY_DAY, PartTimeHours, Payslip, pay_date_for};
pub use position::{Position, PositionCategory};
pub use roster_record::{PART_TIME_MARKER, ROSTER_DATE_FORMAT, RosterRecord};
