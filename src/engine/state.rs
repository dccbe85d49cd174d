//! The explicit payroll state value.
//!
//! [`PayrollState`] owns everything the engine reads and writes: the
//! position catalog, the roster, the simulated clock, the id sequence and
//! the credential list. Operations live in sibling modules as `impl` blocks
//! on this type. The state is `Clone`, so callers can snapshot it before an
//! operation and compare afterwards.

use chrono::NaiveDate;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, EmployeeId, PositionCategory, RosterRecord};

use super::{PositionCatalog, SimulatedClock};

/// Email domain used when none is configured.
pub const DEFAULT_EMAIL_DOMAIN: &str = "ul.ie";

/// The complete mutable state of a payroll simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollState {
    pub(super) catalog: PositionCatalog,
    pub(super) employees: Vec<Employee>,
    pub(super) clock: SimulatedClock,
    pub(super) next_sequence: u32,
    pub(super) credentials: Vec<String>,
    pub(super) email_domain: String,
}

impl PayrollState {
    /// Creates an empty roster over a catalog, with the clock on `today`.
    pub fn new(catalog: PositionCatalog, today: NaiveDate) -> Self {
        Self {
            catalog,
            employees: Vec::new(),
            clock: SimulatedClock::new(today),
            next_sequence: 0,
            credentials: Vec::new(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
        }
    }

    /// Sets the domain used to derive email addresses for new employees.
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    /// Creates a state and admits every roster record in order.
    ///
    /// Fails on the first record naming an unknown position.
    pub fn from_roster(
        catalog: PositionCatalog,
        records: &[RosterRecord],
        today: NaiveDate,
        email_domain: impl Into<String>,
    ) -> PayrollResult<Self> {
        let mut state = Self::new(catalog, today).with_email_domain(email_domain);
        for record in records {
            state.admit(record)?;
        }
        Ok(state)
    }

    /// The position catalog.
    pub fn catalog(&self) -> &PositionCatalog {
        &self.catalog
    }

    /// All employees in roster order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// The simulated clock.
    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    /// The current simulated date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Issued credentials, in roster order.
    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    /// The email domain for new employees.
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    /// Finds an employee by id.
    pub fn find_employee(&self, id: EmployeeId) -> PayrollResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id() == id)
            .ok_or(PayrollError::EmployeeNotFound { id })
    }

    /// Finds an employee by id for mutation.
    pub fn find_employee_mut(&mut self, id: EmployeeId) -> PayrollResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(PayrollError::EmployeeNotFound { id })
    }

    /// The roster in its durable record shape.
    pub fn roster_records(&self) -> Vec<RosterRecord> {
        self.employees.iter().map(RosterRecord::from).collect()
    }

    /// Allocates the next id in a category's band.
    ///
    /// The sequence is shared across bands and never reused.
    pub(super) fn allocate_id(&mut self, category: PositionCategory) -> EmployeeId {
        let id = category.id_band() + self.next_sequence;
        self.next_sequence += 1;
        id
    }
}
