//! HTTP API module for the payroll engine.
//!
//! This module exposes the simulated clock, the roster, payslips, part-time
//! claims and the promotion workflow as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdvancePeriod, AdvanceRequest, ClaimRequest, Decision, DecisionRequest, HireRequest,
    PayslipQuery, PromotionRequest,
};
pub use response::{
    AdvanceResponse, ApiError, ApiErrorResponse, ClockResponse, DecisionResponse, DirectoryEntry,
    DirectoryResponse, EmployeeResponse, OfferResponse, PayslipView, PayslipsResponse,
    PendingOfferResponse, PositionResponse, PositionsResponse,
};
pub use state::AppState;
