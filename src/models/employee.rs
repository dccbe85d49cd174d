//! Employee model and related types.
//!
//! An [`Employee`] is a shared record of identity, position, rank and
//! promotion state, plus an [`EmploymentKind`] payload that carries the
//! variant-specific data. Pay computation dispatches on the variant tag.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PayrollResult;

use super::{Payslip, Position};

/// Numeric employee identifier (category band plus sequence).
pub type EmployeeId = u32;

/// Hours in a part-time working year, used to derive the hourly rate.
pub const PART_TIME_ANNUAL_HOURS: u32 = 1440;

/// Pay cycles per year for full-time salaries.
pub const PAY_CYCLES_PER_YEAR: u32 = 12;

/// Health insurance tier with a fixed monthly deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceTier {
    /// €40 per month.
    Basic,
    /// €60 per month.
    Standard,
    /// €100 per month.
    Enhanced,
    /// €140 per month.
    Premium,
}

impl InsuranceTier {
    /// Parses a tier name, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use payroll_engine::models::InsuranceTier;
    ///
    /// assert_eq!(InsuranceTier::parse(" PREMIUM "), Some(InsuranceTier::Premium));
    /// assert_eq!(InsuranceTier::parse("gold"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "basic" => Some(InsuranceTier::Basic),
            "standard" => Some(InsuranceTier::Standard),
            "enhanced" => Some(InsuranceTier::Enhanced),
            "premium" => Some(InsuranceTier::Premium),
            _ => None,
        }
    }

    /// The monthly deduction for this tier.
    pub fn monthly_amount(self) -> Decimal {
        match self {
            InsuranceTier::Basic => Decimal::new(40, 0),
            InsuranceTier::Standard => Decimal::new(60, 0),
            InsuranceTier::Enhanced => Decimal::new(100, 0),
            InsuranceTier::Premium => Decimal::new(140, 0),
        }
    }
}

impl fmt::Display for InsuranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceTier::Basic => write!(f, "Basic"),
            InsuranceTier::Standard => write!(f, "Standard"),
            InsuranceTier::Enhanced => write!(f, "Enhanced"),
            InsuranceTier::Premium => write!(f, "Premium"),
        }
    }
}

/// Claim state carried by part-time employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTimeClaim {
    /// Hours accrued for the current cycle; reset to zero once billed.
    pub hours_worked: Decimal,
    /// Simulated date of the most recent claim submission.
    pub last_claim_date: Option<NaiveDate>,
    /// Hours from late claims awaiting a qualifying cycle.
    pub unpaid_hours: Decimal,
}

impl PartTimeClaim {
    /// Adds late hours to the carried-over balance.
    pub fn carry_over(&mut self, hours: Decimal) {
        self.unpaid_hours += hours;
    }
}

/// Variant-specific employee data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmploymentKind {
    /// Salaried; paid a twelfth of the annual salary every cycle.
    FullTime,
    /// Hourly; paid only for claimed hours.
    PartTime(PartTimeClaim),
}

/// Everything needed to put a new employee on the roster.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Assigned employee id.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Domain used to derive the email address.
    pub email_domain: String,
    /// Current position.
    pub position: Arc<Position>,
    /// Requested rank; clamped to the position's scale.
    pub rank: u32,
    /// Date of the last promotion (or hire).
    pub last_promotion_date: NaiveDate,
    /// Health insurance tier.
    pub insurance_tier: InsuranceTier,
    /// Whether the employee is part-time.
    pub part_time: bool,
}

/// An employee on the payroll.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    phone: String,
    email: String,
    position: Arc<Position>,
    rank: u32,
    last_promotion_date: NaiveDate,
    reached_top_of_scale_date: Option<NaiveDate>,
    insurance_tier: InsuranceTier,
    pending_promotion: Option<Arc<Position>>,
    payslips: Vec<Payslip>,
    kind: EmploymentKind,
}

impl Employee {
    /// Builds an employee from a [`NewEmployee`] description.
    ///
    /// An employee who already sits at the top of their scale is recorded
    /// as having reached it on their last promotion date.
    pub fn new(new: NewEmployee) -> Self {
        let rank = new.position.clamp_rank(new.rank);
        let reached_top_of_scale_date =
            (rank == new.position.max_rank()).then_some(new.last_promotion_date);
        let kind = if new.part_time {
            EmploymentKind::PartTime(PartTimeClaim::default())
        } else {
            EmploymentKind::FullTime
        };

        Self {
            id: new.id,
            email: derive_email(&new.name, &new.email_domain),
            name: new.name,
            phone: new.phone,
            position: new.position,
            rank,
            last_promotion_date: new.last_promotion_date,
            reached_top_of_scale_date,
            insurance_tier: new.insurance_tier,
            pending_promotion: None,
            payslips: Vec::new(),
            kind,
        }
    }

    /// The employee id.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// The full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The derived email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The current position.
    pub fn position(&self) -> &Arc<Position> {
        &self.position
    }

    /// The current rank on the position's scale.
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// The date of the last promotion.
    pub fn last_promotion_date(&self) -> NaiveDate {
        self.last_promotion_date
    }

    /// When the employee first reached the top of a scale, if ever.
    pub fn reached_top_of_scale_date(&self) -> Option<NaiveDate> {
        self.reached_top_of_scale_date
    }

    /// The health insurance tier.
    pub fn insurance_tier(&self) -> InsuranceTier {
        self.insurance_tier
    }

    /// The variant payload.
    pub fn kind(&self) -> &EmploymentKind {
        &self.kind
    }

    /// Returns true for part-time employees.
    pub fn is_part_time(&self) -> bool {
        matches!(self.kind, EmploymentKind::PartTime(_))
    }

    /// The claim state, for part-time employees.
    pub fn part_time_claim(&self) -> Option<&PartTimeClaim> {
        match &self.kind {
            EmploymentKind::PartTime(claim) => Some(claim),
            EmploymentKind::FullTime => None,
        }
    }

    /// Mutable claim state, for part-time employees.
    pub fn part_time_claim_mut(&mut self) -> Option<&mut PartTimeClaim> {
        match &mut self.kind {
            EmploymentKind::PartTime(claim) => Some(claim),
            EmploymentKind::FullTime => None,
        }
    }

    /// Employment type plus category, e.g. "Full-Time Administrator".
    pub fn role(&self) -> String {
        let employment = if self.is_part_time() {
            "Part-Time"
        } else {
            "Full-Time"
        };
        format!("{} {}", employment, self.position.category_kind().role_name())
    }

    /// Returns true while a promotion offer is outstanding.
    pub fn promotion_due(&self) -> bool {
        self.pending_promotion.is_some()
    }

    /// The position offered in the outstanding promotion.
    pub fn pending_promotion(&self) -> Option<&Arc<Position>> {
        self.pending_promotion.as_ref()
    }

    pub(crate) fn set_pending_promotion(&mut self, position: Option<Arc<Position>>) {
        self.pending_promotion = position;
    }

    /// Sets the rank, clamped to the current scale.
    pub fn set_rank(&mut self, rank: u32) {
        self.rank = self.position.clamp_rank(rank);
    }

    pub(crate) fn set_position(&mut self, position: Arc<Position>) {
        self.position = position;
    }

    pub(crate) fn set_last_promotion_date(&mut self, date: NaiveDate) {
        self.last_promotion_date = date;
    }

    /// The annual salary for the current rank.
    pub fn annual_salary(&self) -> PayrollResult<Decimal> {
        self.position.annual_salary(self.rank)
    }

    /// The hourly rate derived from the current annual salary.
    pub fn hourly_rate(&self) -> PayrollResult<Decimal> {
        Ok(self.annual_salary()? / Decimal::from(PART_TIME_ANNUAL_HOURS))
    }

    /// Gross pay for the current cycle.
    ///
    /// Full-time employees earn a twelfth of their annual salary; part-time
    /// employees earn their hourly rate times the hours accrued this cycle.
    pub fn base_pay(&self) -> PayrollResult<Decimal> {
        match &self.kind {
            EmploymentKind::FullTime => {
                Ok(self.annual_salary()? / Decimal::from(PAY_CYCLES_PER_YEAR))
            }
            EmploymentKind::PartTime(claim) => Ok(self.hourly_rate()? * claim.hours_worked),
        }
    }

    /// Moves the employee one point up their scale.
    ///
    /// Records `today` as the top-of-scale date on the step that lands on
    /// the top rank. Returns whether the rank changed.
    pub fn increment_rank(&mut self, today: NaiveDate) -> bool {
        let top = self.position.max_rank();
        if self.rank >= top {
            return false;
        }

        self.set_rank(self.rank + 1);
        if self.rank == top {
            self.reached_top_of_scale_date = Some(today);
        }
        true
    }

    /// The payslip history, oldest first.
    pub fn payslips(&self) -> &[Payslip] {
        &self.payslips
    }

    /// The most recent payslip.
    pub fn latest_payslip(&self) -> Option<&Payslip> {
        self.payslips.last()
    }

    /// Appends a payslip unless one with the same pay date already exists.
    ///
    /// Returns whether the payslip was added.
    pub fn add_payslip(&mut self, payslip: Payslip) -> bool {
        if self
            .payslips
            .iter()
            .any(|existing| existing.pay_date == payslip.pay_date)
        {
            debug!(
                employee_id = self.id,
                pay_date = %payslip.pay_date,
                "Duplicate payslip suppressed"
            );
            return false;
        }

        self.payslips.push(payslip);
        true
    }
}

/// Lower-cased name with spaces turned into dots, at the given domain.
pub fn derive_email(name: &str, domain: &str) -> String {
    format!("{}@{}", name.to_lowercase().replace(' ', "."), domain)
}

/// The initial credential issued to a new employee.
///
/// ```
/// use payroll_engine::models::default_credential;
///
/// assert_eq!(default_credential("Seán O'Brien"), "SeánOBrien123");
/// ```
pub fn default_credential(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'')
        .collect();
    format!("{}123", stripped)
}
