//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies and query strings accepted
//! by the payroll endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::NewHire;
use crate::models::{EmployeeId, InsuranceTier};

/// How far to move the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePeriod {
    /// One pay cycle.
    Month,
    /// Twelve pay cycles.
    Year,
}

/// Request body for `POST /clock/advance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceRequest {
    /// The period to advance by.
    pub period: AdvancePeriod,
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireRequest {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Title of the position being filled.
    pub position: String,
    /// Starting rank; defaults to 1.
    #[serde(default = "default_rank")]
    pub rank: u32,
    /// Health insurance tier.
    pub insurance_tier: InsuranceTier,
    /// Whether the hire is part-time.
    #[serde(default)]
    pub part_time: bool,
}

fn default_rank() -> u32 {
    1
}

impl From<HireRequest> for NewHire {
    fn from(req: HireRequest) -> Self {
        NewHire {
            name: req.name,
            phone: req.phone,
            position_title: req.position,
            rank: req.rank,
            insurance_tier: req.insurance_tier,
            part_time: req.part_time,
        }
    }
}

/// Request body for `POST /employees/:id/claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Hours worked this month.
    pub hours: Decimal,
}

/// Request body for `POST /promotions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionRequest {
    /// The employee being offered the promotion.
    pub employee_id: EmployeeId,
    /// Title of the offered position.
    pub position: String,
    /// The employee making the offer, if any.
    #[serde(default)]
    pub offered_by: Option<EmployeeId>,
}

/// A decision on an outstanding promotion offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Take the offered position.
    Accept,
    /// Decline the offer.
    Reject,
}

/// Request body for `POST /employees/:id/promotion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Accept or reject.
    pub decision: Decision,
}

/// Query string for `GET /employees/:id/payslips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayslipQuery {
    /// Maximum number of payslips to return, newest first.
    #[serde(default)]
    pub limit: Option<usize>,
}
