//! Plain-text renderings of payslips, employees and positions.
//!
//! All money is shown to two decimal places, rounded half away from zero.
//! Roster dates print as `dd/mm/yy`.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Employee, Payslip, Position, ROSTER_DATE_FORMAT};

const BANNER: &str = "********************PAYSLIP********************";
const RULE: &str = "----------------------------------------------";
const FOOTER: &str = "***********************************************";

/// Formats an amount to exactly two decimal places.
///
/// ```
/// use payroll_engine::presentation::money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(money(Decimal::new(3397695, 3)), "3397.70");
/// assert_eq!(money(Decimal::new(-5, 3)), "-0.01");
/// assert_eq!(money(Decimal::new(40, 0)), "40.00");
/// ```
pub fn money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Renders a payslip as the printed payslip text.
pub fn render_payslip(payslip: &Payslip, company_name: &str) -> String {
    let d = payslip.deductions();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "Company Name: {}", company_name);
    let _ = writeln!(out, "Employee ID: {}", payslip.employee_id);
    let _ = writeln!(out, "Employee Name: {}", payslip.employee_name);
    let _ = writeln!(out, "Employee Position: {}", payslip.position);
    let _ = writeln!(out, "Employee Rank: {}", payslip.rank);
    let _ = writeln!(
        out,
        "Payment Date: {}",
        payslip.pay_date.format(ROSTER_DATE_FORMAT)
    );
    let _ = writeln!(out, "{}", RULE);

    let _ = writeln!(out, "Deductions");
    let _ = writeln!(out, "Health Insurance: €{}", money(d.insurance));
    let _ = writeln!(out, "USC: €{}", money(d.usc));
    let _ = writeln!(out, "Income Tax: €{}", money(d.paye));
    let _ = writeln!(out, "PRSI: €{}", money(d.prsi));
    let _ = writeln!(out, "Union Fees: €{}", money(d.union_fee));
    let _ = writeln!(out, "Total Deductions: €{}", money(d.total));
    let _ = writeln!(out, "{}", RULE);

    let _ = writeln!(out, "Summary");
    if let Some(hours) = &payslip.part_time {
        let _ = writeln!(out, "Hours worked : {}", money(hours.hours_worked));
        let _ = writeln!(out, "Pay Rate : €{}", money(hours.hourly_rate));
    }
    let _ = writeln!(out, "Gross Pay : €{}", money(d.gross_pay));
    let _ = writeln!(out, "Net Pay : €{}", money(d.net_pay));
    let _ = writeln!(out, "Pay method : Bank Transfer");
    let _ = writeln!(out, "{}", FOOTER);
    out
}

/// Renders an employee's details.
///
/// Part-time employees also show their claim state and hourly rate. A
/// rate that cannot be resolved prints as zero.
pub fn render_employee(employee: &Employee) -> String {
    let mut out = format!(
        "Employee ID: {}\nName: {}\nEmail: {}\nRank: {}\nCategory: {}\nPosition: {}\nLast Promotion Date: {}\nHealth Insurance: {}",
        employee.id(),
        employee.name(),
        employee.email(),
        employee.rank(),
        employee.position().category(),
        employee.position().title(),
        employee.last_promotion_date().format(ROSTER_DATE_FORMAT),
        money(employee.insurance_tier().monthly_amount()),
    );

    if let Some(claim) = employee.part_time_claim() {
        let _ = write!(out, "\nHours Worked: {}", money(claim.hours_worked));
        if let Some(claimed) = claim.last_claim_date {
            let _ = write!(out, "\nLast Claim Date: {}", claimed.format("%d/%m/%Y"));
        }
        let rate = employee.hourly_rate().unwrap_or_default();
        let _ = write!(out, "\nHourly Rate: €{}", money(rate));
    }
    out
}

/// Renders a catalog position with its pay grades.
pub fn render_position(position: &Position) -> String {
    let grades: Vec<String> = position
        .pay_scale()
        .iter()
        .map(|p| format!("€{}", money(*p)))
        .collect();
    format!(
        "Category: {} Title: {}\nMax Rank: {}\nPay Grades: {}",
        position.category(),
        position.title(),
        position.max_rank(),
        grades.join(", ")
    )
}

/// Renders the roster as a two-column id, name and role listing.
pub fn render_directory(employees: &[Employee]) -> String {
    let mut out = format!(
        "{:<5}: {:<20}: {:<30}\t\t{:<5}: {:<20}: {:<30}\n",
        "ID", "Name", "Role", "ID", "Name", "Role"
    );
    for pair in employees.chunks(2) {
        let mut line = directory_entry(&pair[0]);
        if let Some(second) = pair.get(1) {
            line.push_str("\t\t");
            line.push_str(&directory_entry(second));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn directory_entry(employee: &Employee) -> String {
    format!(
        "{:<5}: {:<20}: {:<30}",
        employee.id(),
        employee.name(),
        employee.role()
    )
}
