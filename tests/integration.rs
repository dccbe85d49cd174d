//! HTTP integration tests for the payroll API.
//!
//! This test suite drives the router end to end:
//! - Clock queries and monthly/yearly advances
//! - Hiring, listing and dismissing employees
//! - Payslip retrieval with deductions and printed text
//! - Part-time claims
//! - The promotion offer/accept/reject workflow
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::persistence::MemorySink;

// =============================================================================
// Test Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn create_test_state() -> (AppState, MemorySink) {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    let state = config.build_state(today()).expect("Failed to build state");
    let sink = MemorySink::default();
    let engine = PayrollEngine::new(state, Box::new(sink.clone()));
    (AppState::new(engine), sink)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state().0)
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

async fn hire(router: &Router, name: &str, position: &str, part_time: bool) -> u64 {
    let (status, body) = post(
        router,
        "/employees",
        json!({
            "name": name,
            "phone": "0851239876",
            "position": position,
            "rank": 1,
            "insurance_tier": "standard",
            "part_time": part_time
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "hire failed: {}", body);
    body["id"].as_u64().unwrap()
}

// =============================================================================
// Clock
// =============================================================================

#[tokio::test]
async fn test_clock_reports_simulated_date() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/clock").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2025-03-03");
}

#[tokio::test]
async fn test_advance_month_pays_full_time_staff() {
    let router = create_router_for_test();

    let (status, body) = post(&router, "/clock/advance", json!({"period": "month"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2025-04-03");
    let cycles = body["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0]["pay_date"], "2025-04-25");
    // eight full-time employees in the shipped roster
    assert_eq!(cycles[0]["payslips_issued"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_advance_year_runs_twelve_cycles() {
    let router = create_router_for_test();

    let (status, body) = post(&router, "/clock/advance", json!({"period": "year"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2026-03-03");
    let cycles = body["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 12);
    let progressed: usize = cycles
        .iter()
        .map(|c| c["ranks_advanced"].as_array().unwrap().len())
        .sum();
    assert!(progressed > 0);
}

#[tokio::test]
async fn test_advance_with_unknown_period_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/clock/advance", json!({"period": "week"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

// =============================================================================
// Roster
// =============================================================================

#[tokio::test]
async fn test_directory_lists_roster() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees").await;

    assert_eq!(status, StatusCode::OK);
    let employees = body["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 10);
    assert_eq!(employees[0]["id"], 1000);
    assert_eq!(employees[0]["name"], "Aoife Ryan");
    assert_eq!(employees[0]["role"], "Full-Time Basic Employee");
    assert!(body["rendered"].as_str().unwrap().starts_with("ID   : Name"));
}

#[tokio::test]
async fn test_hire_then_fetch_employee() {
    let (state, sink) = create_test_state();
    let router = create_router(state);

    let id = hire(&router, "Sinead Burke", "hr officer", false).await;
    assert_eq!(id, 3010);

    let (status, body) = get(&router, &format!("/employees/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "sinead.burke@ul.ie");
    assert_eq!(body["position"], "HR Officer");
    assert_eq!(body["last_promotion_date"], "2025-03-03");
    assert!(body["rendered"]
        .as_str()
        .unwrap()
        .contains("Category: Human Resources"));

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.rosters.len(), 1);
    assert_eq!(snapshots.rosters[0].len(), 11);
    assert!(snapshots.credentials[0].contains(&"SineadBurke123".to_string()));
}

#[tokio::test]
async fn test_hire_unknown_position_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/employees",
        json!({
            "name": "Tadhg Lynch",
            "phone": "0851239876",
            "position": "Chancellor",
            "insurance_tier": "basic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_POSITION");
    assert_eq!(body["message"], "Chancellor, no such position exists");
}

#[tokio::test]
async fn test_hire_name_with_comma_is_rejected() {
    let (state, sink) = create_test_state();
    let router = create_router(state);

    let (status, body) = post(
        &router,
        "/employees",
        json!({
            "name": "Burke, Sinead",
            "phone": "0851239876",
            "position": "Lecturer",
            "insurance_tier": "basic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RECORD");
    assert!(sink.snapshots().rosters.is_empty());

    let (_, body) = get(&router, "/employees").await;
    assert_eq!(body["employees"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_hire_missing_field_is_validation_error() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/employees", json!({"name": "Tadhg Lynch"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_dismiss_removes_employee() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "DELETE", "/employees/2002", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ciara Walsh");

    let (status, body) = get(&router, "/employees/2002").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "ID Number does not exist: 2002");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ID");
}

// =============================================================================
// Payslips
// =============================================================================

#[tokio::test]
async fn test_payslips_newest_first_with_limit() {
    let router = create_router_for_test();
    for _ in 0..3 {
        post(&router, "/clock/advance", json!({"period": "month"})).await;
    }

    let (status, body) = get(&router, "/employees/1000/payslips?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let payslips = body["payslips"].as_array().unwrap();
    assert_eq!(payslips.len(), 2);
    assert_eq!(payslips[0]["pay_date"], "2025-06-25");
    assert_eq!(payslips[1]["pay_date"], "2025-05-25");
}

#[tokio::test]
async fn test_payslip_carries_deductions_and_text() {
    let router = create_router_for_test();
    post(&router, "/clock/advance", json!({"period": "month"})).await;

    let (_, body) = get(&router, "/employees/1000/payslips").await;
    let payslip = &body["payslips"][0];

    // Aoife Ryan: Lecturer rank 3, 47000 a year
    assert_eq!(decimal(&payslip["base_pay"]).round_dp(2), Decimal::new(391667, 2));
    let deductions = &payslip["deductions"];
    assert_eq!(
        decimal(&deductions["net_pay"]),
        decimal(&deductions["gross_pay"]) - decimal(&deductions["total"])
    );
    assert_eq!(decimal(&deductions["insurance"]), Decimal::new(60, 0));

    let rendered = payslip["rendered"].as_str().unwrap();
    assert!(rendered.starts_with("********************PAYSLIP********************\n"));
    assert!(rendered.contains("Company Name: UL Payroll System\n"));
    assert!(rendered.contains("Payment Date: 25/04/25\n"));
    assert!(rendered.contains("Gross Pay : €3916.67\n"));
}

#[tokio::test]
async fn test_non_numeric_limit_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees/1000/payslips?limit=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_payslips_for_unknown_employee() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees/9999/payslips").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

// =============================================================================
// Claims
// =============================================================================

#[tokio::test]
async fn test_on_time_claim_is_paid() {
    let router = create_router_for_test();

    // Grainne Kelly, part-time teaching assistant; 3 March is before the
    // second Friday (14 March 2025)
    let (status, body) = post(&router, "/employees/1006/claims", json!({"hours": 12})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paid");
    assert_eq!(body["pay_date"], "2025-03-25");

    let (_, body) = get(&router, "/employees/1006/payslips").await;
    let payslip = &body["payslips"][0];
    // 24000 / 1440 * 12
    assert_eq!(decimal(&payslip["base_pay"]).round_dp(2), Decimal::new(200, 0));
    assert!(payslip["rendered"]
        .as_str()
        .unwrap()
        .contains("Hours worked : 12.00\nPay Rate : €16.67\n"));
}

#[tokio::test]
async fn test_full_time_claim_is_unprocessable() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/employees/1000/claims", json!({"hours": 5})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NOT_PART_TIME");
}

#[tokio::test]
async fn test_negative_claim_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/employees/1006/claims", json!({"hours": -2})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_HOURS");
}

// =============================================================================
// Promotions
// =============================================================================

#[tokio::test]
async fn test_promotion_offer_and_accept() {
    let (state, sink) = create_test_state();
    let router = create_router(state);

    // Brian Daly: top of the Senior Lecturer scale since February 2019
    let (status, body) = post(
        &router,
        "/promotions",
        json!({"employee_id": 1001, "position": "Professor", "offered_by": 3005}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["position"], "Professor");
    assert_eq!(body["rank"], 4);

    let (status, body) = get(&router, "/employees/1001/promotion").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["offer"]["position"], "Professor");

    let (status, body) = post(
        &router,
        "/employees/1001/promotion",
        json!({"decision": "accept"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "accepted");
    assert_eq!(body["employee"]["position"], "Professor");
    assert_eq!(body["employee"]["rank"], 4);
    assert_eq!(body["employee"]["promotion_due"], false);

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.rosters.len(), 1);
    assert_eq!(snapshots.rosters[0][1].position_title, "Professor");
}

#[tokio::test]
async fn test_promotion_reject_keeps_position() {
    let router = create_router_for_test();
    post(
        &router,
        "/promotions",
        json!({"employee_id": 1000, "position": "Senior Lecturer"}),
    )
    .await;

    let (status, body) = post(
        &router,
        "/employees/1000/promotion",
        json!({"decision": "reject"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "rejected");
    assert_eq!(body["employee"]["position"], "Lecturer");

    let (_, body) = get(&router, "/employees/1000/promotion").await;
    assert!(body["offer"].is_null());
}

#[tokio::test]
async fn test_part_time_cannot_be_offered_promotion() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/promotions",
        json!({"employee_id": 1007, "position": "Senior Lecturer"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INELIGIBLE_PROMOTION_TARGET");
    assert_eq!(body["details"], "Only full-time employees can be promoted.");
}

#[tokio::test]
async fn test_self_promotion_is_refused() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/promotions",
        json!({"employee_id": 3005, "position": "HR Manager", "offered_by": 3005}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INELIGIBLE_PROMOTION_TARGET");
}

#[tokio::test]
async fn test_decision_without_offer_conflicts() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/employees/1000/promotion",
        json!({"decision": "accept"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_PENDING_PROMOTION");
}

// =============================================================================
// Positions
// =============================================================================

#[tokio::test]
async fn test_employee_shows_current_position() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees/1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["rendered_position"],
        "Category: Other Title: Lecturer\nMax Rank: 7\nPay Grades: €40200.00, €43600.00, \
         €47000.00, €50400.00, €53800.00, €57200.00, €60600.00"
    );
}

#[tokio::test]
async fn test_positions_lists_catalog() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/positions").await;

    assert_eq!(status, StatusCode::OK);
    let positions = body["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 9);
    assert_eq!(positions[0]["title"], "Administrative Assistant");
    assert_eq!(positions[0]["max_rank"], 5);
    assert!(positions[0]["rendered"]
        .as_str()
        .unwrap()
        .contains("Pay Grades: €28800.00, €30240.00"));
}

#[tokio::test]
async fn test_position_lookup_by_title() {
    let router = create_router_for_test();

    let (status, body) = get(&router, "/positions/hr%20manager").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "HR Manager");
    assert_eq!(body["category"], "Human Resources");
    assert_eq!(body["pay_scale"][0], "58200");

    let (status, body) = get(&router, "/positions/Dean").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_POSITION");
}
