//! Response types for the payroll API.
//!
//! This module defines the JSON response bodies, the error response
//! structure and the mapping from [`PayrollError`] to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::Deductions;
use crate::engine::{CycleReport, PromotionOffer};
use crate::error::PayrollError;
use crate::models::{Employee, EmployeeId, InsuranceTier, PartTimeClaim, Payslip, Position};
use crate::presentation::{render_employee, render_payslip, render_position};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            PayrollError::UnknownPosition { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_POSITION"),
            PayrollError::InvalidRank { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_RANK")
            }
            PayrollError::IneligiblePromotionTarget { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INELIGIBLE_PROMOTION_TARGET")
            }
            PayrollError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            PayrollError::NoPendingPromotion { .. } => {
                (StatusCode::CONFLICT, "NO_PENDING_PROMOTION")
            }
            PayrollError::NotPartTime { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "NOT_PART_TIME"),
            PayrollError::InvalidHours { .. } => (StatusCode::BAD_REQUEST, "INVALID_HOURS"),
            PayrollError::InvalidRecord { .. } => (StatusCode::BAD_REQUEST, "INVALID_RECORD"),
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            PayrollError::CalendarOverflow { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CALENDAR_OVERFLOW")
            }
            PayrollError::Persistence { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR")
            }
        };

        let error = match error {
            PayrollError::IneligiblePromotionTarget { reason, .. } => {
                ApiError::with_details(code, message, reason)
            }
            PayrollError::InvalidRecord { line, .. } => ApiError::with_details(code, message, line),
            _ => ApiError::new(code, message),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    /// The simulated date.
    pub today: NaiveDate,
}

/// Body of `POST /clock/advance`.
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceResponse {
    /// The simulated date after advancing.
    pub today: NaiveDate,
    /// One report per cycle run.
    pub cycles: Vec<CycleReport>,
}

/// One row of the employee directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Employee id.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Employment type plus category.
    pub role: String,
}

impl From<&Employee> for DirectoryEntry {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name().to_string(),
            role: employee.role(),
        }
    }
}

/// Body of `GET /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResponse {
    /// Employees in roster order.
    pub employees: Vec<DirectoryEntry>,
    /// The two-column text listing.
    pub rendered: String,
}

/// Full details of one employee.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    /// Employee id.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Derived email address.
    pub email: String,
    /// Employment type plus category.
    pub role: String,
    /// Position title.
    pub position: String,
    /// Position category.
    pub category: String,
    /// Current rank.
    pub rank: u32,
    /// Current annual salary.
    pub annual_salary: Option<Decimal>,
    /// Date of the last promotion.
    pub last_promotion_date: NaiveDate,
    /// When the top of a scale was first reached.
    pub reached_top_of_scale_date: Option<NaiveDate>,
    /// Health insurance tier.
    pub insurance_tier: InsuranceTier,
    /// Whether a promotion offer is outstanding.
    pub promotion_due: bool,
    /// Claim state, for part-time employees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_time: Option<PartTimeClaim>,
    /// Number of payslips on file.
    pub payslip_count: usize,
    /// The plain-text details block.
    pub rendered: String,
    /// The plain-text description of the current position.
    pub rendered_position: String,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name().to_string(),
            phone: employee.phone().to_string(),
            email: employee.email().to_string(),
            role: employee.role(),
            position: employee.position().title().to_string(),
            category: employee.position().category().to_string(),
            rank: employee.rank(),
            annual_salary: employee.annual_salary().ok(),
            last_promotion_date: employee.last_promotion_date(),
            reached_top_of_scale_date: employee.reached_top_of_scale_date(),
            insurance_tier: employee.insurance_tier(),
            promotion_due: employee.promotion_due(),
            part_time: employee.part_time_claim().cloned(),
            payslip_count: employee.payslips().len(),
            rendered: render_employee(employee),
            rendered_position: render_position(employee.position()),
        }
    }
}

/// One catalog position.
#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    /// Position title.
    pub title: String,
    /// Category name.
    pub category: String,
    /// Highest rank on the scale.
    pub max_rank: u32,
    /// Annual salary per rank, rank 1 first.
    pub pay_scale: Vec<Decimal>,
    /// The plain-text position description.
    pub rendered: String,
}

impl From<&Position> for PositionResponse {
    fn from(position: &Position) -> Self {
        Self {
            title: position.title().to_string(),
            category: position.category().to_string(),
            max_rank: position.max_rank(),
            pay_scale: position.pay_scale().to_vec(),
            rendered: render_position(position),
        }
    }
}

/// Body of `GET /positions`.
#[derive(Debug, Clone, Serialize)]
pub struct PositionsResponse {
    /// Positions in catalog order.
    pub positions: Vec<PositionResponse>,
}

/// A payslip with its deduction breakdown and printed form.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipView {
    /// The stored snapshot.
    #[serde(flatten)]
    pub payslip: Payslip,
    /// Deductions computed from the snapshot.
    pub deductions: Deductions,
    /// The printed payslip.
    pub rendered: String,
}

impl PayslipView {
    /// Builds the view of a payslip for a company.
    pub fn new(payslip: &Payslip, company_name: &str) -> Self {
        Self {
            payslip: payslip.clone(),
            deductions: payslip.deductions(),
            rendered: render_payslip(payslip, company_name),
        }
    }
}

/// Body of `GET /employees/:id/payslips`.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipsResponse {
    /// Employee id.
    pub employee_id: EmployeeId,
    /// Payslips, newest first.
    pub payslips: Vec<PayslipView>,
}

/// A promotion offer as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OfferResponse {
    /// The employee the offer is for.
    pub employee_id: EmployeeId,
    /// Offered position title.
    pub position: String,
    /// Proposed starting rank.
    pub rank: u32,
    /// The plain-text position description.
    pub rendered_position: String,
}

impl From<PromotionOffer> for OfferResponse {
    fn from(offer: PromotionOffer) -> Self {
        Self {
            employee_id: offer.employee_id,
            position: offer.position.title().to_string(),
            rank: offer.rank,
            rendered_position: render_position(&offer.position),
        }
    }
}

/// Body of `GET /employees/:id/promotion`.
#[derive(Debug, Clone, Serialize)]
pub struct PendingOfferResponse {
    /// The outstanding offer, if any.
    pub offer: Option<OfferResponse>,
}

/// Body of `POST /employees/:id/promotion`.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    /// "accepted" or "rejected".
    pub outcome: &'static str,
    /// The employee after the decision.
    pub employee: EmployeeResponse,
}
