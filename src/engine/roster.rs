//! Roster administration: admitting, hiring and dismissing employees.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Employee, EmployeeId, InsuranceTier, NewEmployee, RosterRecord, default_credential,
};

use super::PayrollState;

/// Details of a new hire, supplied by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHire {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Title of the position being filled.
    pub position_title: String,
    /// Starting rank; clamped to the position's scale.
    pub rank: u32,
    /// Health insurance tier.
    pub insurance_tier: InsuranceTier,
    /// Whether the hire is part-time.
    #[serde(default)]
    pub part_time: bool,
}

impl PayrollState {
    /// Admits a roster record, issuing an id and a default credential.
    pub(super) fn admit(&mut self, record: &RosterRecord) -> PayrollResult<EmployeeId> {
        let position = self.catalog.lookup(&record.position_title)?;
        let id = self.allocate_id(position.category_kind());

        let employee = Employee::new(NewEmployee {
            id,
            name: record.name.clone(),
            phone: record.phone.clone(),
            email_domain: self.email_domain.clone(),
            position,
            rank: record.rank,
            last_promotion_date: record.last_promotion_date,
            insurance_tier: record.insurance_tier,
            part_time: record.part_time,
        });

        self.credentials.push(default_credential(employee.name()));
        self.employees.push(employee);
        Ok(id)
    }

    /// Hires a new employee, dated today on the simulated clock.
    ///
    /// Fails with `InvalidRecord` if the name or phone would not survive
    /// a roster write, and with `UnknownPosition` if the position title
    /// does not resolve. Either way the roster is untouched.
    pub fn hire(&mut self, hire: NewHire) -> PayrollResult<EmployeeId> {
        check_record_field("name", &hire.name)?;
        check_record_field("phone", &hire.phone)?;
        let record = RosterRecord {
            name: hire.name,
            phone: hire.phone,
            position_title: hire.position_title,
            rank: hire.rank,
            last_promotion_date: self.today(),
            insurance_tier: hire.insurance_tier,
            part_time: hire.part_time,
        };
        let id = self.admit(&record)?;
        info!(employee_id = id, name = %record.name, "Employee added to the system");
        Ok(id)
    }

    /// Removes an employee and their default credential.
    ///
    /// Returns the removed employee, payslip history included.
    pub fn dismiss(&mut self, id: EmployeeId) -> PayrollResult<Employee> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id() == id)
            .ok_or(PayrollError::EmployeeNotFound { id })?;
        let employee = self.employees.remove(index);

        let credential = default_credential(employee.name());
        if let Some(slot) = self.credentials.iter().position(|c| *c == credential) {
            self.credentials.remove(slot);
        }

        info!(employee_id = id, name = %employee.name(), "Employee removed from the system");
        Ok(employee)
    }
}

/// Rejects values that would split or break a roster line.
fn check_record_field(field: &str, value: &str) -> PayrollResult<()> {
    if value.contains([',', '\r', '\n']) {
        return Err(PayrollError::InvalidRecord {
            line: value.to_string(),
            message: format!("{} must not contain commas or line breaks", field),
        });
    }
    Ok(())
}
