//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler does its locked work in a plain function, so the engine lock is
//! never held across an `.await`.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::ClaimOutcome;
use crate::error::{PayrollError, PayrollResult};
use crate::models::EmployeeId;
use crate::presentation::render_directory;

use super::request::{
    AdvancePeriod, AdvanceRequest, ClaimRequest, Decision, DecisionRequest, HireRequest,
    PayslipQuery, PromotionRequest,
};
use super::response::{
    AdvanceResponse, ApiError, ApiErrorResponse, ClockResponse, DecisionResponse, DirectoryEntry,
    DirectoryResponse, EmployeeResponse, OfferResponse, PayslipView, PayslipsResponse,
    PendingOfferResponse, PositionResponse, PositionsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clock", get(clock_handler))
        .route("/clock/advance", post(advance_handler))
        .route("/employees", get(directory_handler).post(hire_handler))
        .route(
            "/employees/:id",
            get(employee_handler).delete(dismiss_handler),
        )
        .route("/employees/:id/payslips", get(payslips_handler))
        .route("/employees/:id/claims", post(claim_handler))
        .route(
            "/employees/:id/promotion",
            get(pending_promotion_handler).post(decision_handler),
        )
        .route("/promotions", post(offer_handler))
        .route("/positions", get(positions_handler))
        .route("/positions/:title", get(position_handler))
        .with_state(state)
}

/// Handler for GET /clock.
async fn clock_handler(State(state): State<AppState>) -> Response {
    let today = state.engine().state().today();
    json_response(StatusCode::OK, ClockResponse { today })
}

/// Handler for POST /clock/advance.
///
/// Runs one or twelve pay cycles and returns a report per cycle.
async fn advance_handler(
    State(state): State<AppState>,
    payload: Result<Json<AdvanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock advance");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match advance_clock(&state, request.period) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                today = %body.today,
                cycles = body.cycles.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Clock advanced"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn advance_clock(state: &AppState, period: AdvancePeriod) -> PayrollResult<AdvanceResponse> {
    let mut engine = state.engine();
    let cycles = match period {
        AdvancePeriod::Month => vec![engine.advance_month()?],
        AdvancePeriod::Year => engine.advance_year()?,
    };
    Ok(AdvanceResponse {
        today: engine.state().today(),
        cycles,
    })
}

/// Handler for GET /employees.
async fn directory_handler(State(state): State<AppState>) -> Response {
    let engine = state.engine();
    let employees = engine.state().employees();
    let body = DirectoryResponse {
        employees: employees.iter().map(DirectoryEntry::from).collect(),
        rendered: render_directory(employees),
    };
    drop(engine);
    json_response(StatusCode::OK, body)
}

/// Handler for POST /employees.
async fn hire_handler(
    State(state): State<AppState>,
    payload: Result<Json<HireRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hire request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match hire(&state, request) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = body.id,
                position = %body.position,
                "Employee hired"
            );
            json_response(StatusCode::CREATED, body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn hire(state: &AppState, request: HireRequest) -> PayrollResult<EmployeeResponse> {
    let mut engine = state.engine();
    let id = engine.hire(request.into())?;
    Ok(EmployeeResponse::from(engine.state().find_employee(id)?))
}

/// Handler for GET /employees/:id.
async fn employee_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };

    let result = state
        .engine()
        .state()
        .find_employee(id)
        .map(EmployeeResponse::from);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for DELETE /employees/:id.
async fn dismiss_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, employee_id = id, "Processing dismissal");

    let result = state
        .engine()
        .dismiss(id)
        .map(|employee| EmployeeResponse::from(&employee));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /employees/:id/payslips.
///
/// Returns payslips newest first, optionally limited by `?limit=n`.
async fn payslips_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    query: Result<Query<PayslipQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let result = payslips(&state, id, query.limit);
    respond(correlation_id, StatusCode::OK, result)
}

fn payslips(
    state: &AppState,
    id: EmployeeId,
    limit: Option<usize>,
) -> PayrollResult<PayslipsResponse> {
    let engine = state.engine();
    let employee = engine.state().find_employee(id)?;
    let payslips = employee
        .payslips()
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(|payslip| PayslipView::new(payslip, state.company_name()))
        .collect();
    Ok(PayslipsResponse {
        employee_id: id,
        payslips,
    })
}

/// Handler for GET /positions.
async fn positions_handler(State(state): State<AppState>) -> Response {
    let engine = state.engine();
    let body = PositionsResponse {
        positions: engine
            .state()
            .catalog()
            .positions()
            .iter()
            .map(|position| PositionResponse::from(position.as_ref()))
            .collect(),
    };
    drop(engine);
    json_response(StatusCode::OK, body)
}

/// Handler for GET /positions/:title.
///
/// The title is matched case-insensitively.
async fn position_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state
        .engine()
        .state()
        .catalog()
        .lookup(&title)
        .map(|position| PositionResponse::from(position.as_ref()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /employees/:id/claims.
async fn claim_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    payload: Result<Json<ClaimRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        hours = %request.hours,
        "Processing pay claim"
    );

    let result = submit_claim(&state, id, request.hours);
    respond(correlation_id, StatusCode::OK, result)
}

fn submit_claim(
    state: &AppState,
    id: EmployeeId,
    hours: Decimal,
) -> PayrollResult<ClaimOutcome> {
    state.engine().submit_claim(id, hours)
}

/// Handler for POST /promotions.
async fn offer_handler(
    State(state): State<AppState>,
    payload: Result<Json<PromotionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        position = %request.position,
        "Processing promotion offer"
    );

    let result = state
        .engine()
        .offer_promotion(request.offered_by, request.employee_id, &request.position)
        .map(OfferResponse::from);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /employees/:id/promotion.
async fn pending_promotion_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };

    let result = state
        .engine()
        .state()
        .pending_offer(id)
        .map(|offer| PendingOfferResponse {
            offer: offer.map(OfferResponse::from),
        });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /employees/:id/promotion.
async fn decision_handler(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        decision = ?request.decision,
        "Processing promotion decision"
    );

    let result = decide(&state, id, request.decision);
    respond(correlation_id, StatusCode::OK, result)
}

fn decide(
    state: &AppState,
    id: EmployeeId,
    decision: Decision,
) -> PayrollResult<DecisionResponse> {
    let mut engine = state.engine();
    let outcome = match decision {
        Decision::Accept => {
            engine.accept_promotion(id)?;
            "accepted"
        }
        Decision::Reject => {
            engine.reject_promotion(id)?;
            "rejected"
        }
    };
    Ok(DecisionResponse {
        outcome,
        employee: EmployeeResponse::from(engine.state().find_employee(id)?),
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: Result<T, PayrollError>,
) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => error_response(correlation_id, err),
    }
}

fn error_response(correlation_id: Uuid, err: PayrollError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

fn path_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid path parameter"
    );
    ApiErrorResponse::new(
        StatusCode::BAD_REQUEST,
        ApiError::with_details("INVALID_ID", "Employee ids are numeric", body_text),
    )
    .into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::new(
        StatusCode::BAD_REQUEST,
        ApiError::with_details(
            "INVALID_QUERY",
            "Query parameters could not be parsed",
            body_text,
        ),
    )
    .into_response()
}
