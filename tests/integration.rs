//! Comprehensive integration tests for the payroll computation engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Monthly/daily/hourly wage proration
//! - Half-day leave accounting
//! - The layered deduction pipeline over a configured rule catalog
//! - Idempotent payslip persistence
//! - Bulk generation with per-employee failure isolation
//! - Error cases (missing contract, invalid period, malformed JSON)

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{
    CompanyCalendar, CompanyCalendarConfig, ConfigLoader, Holiday, RuleCatalog,
};
use payroll_engine::models::{
    AllowanceRule, AmountMode, CompensationTarget, DeductionCategory, DeductionRule, PayComponent,
    RuleScope,
};
use uuid::Uuid;

// =============================================================================
// Test Helpers
// =============================================================================

fn calendar(weekly_offs: Vec<&str>, holidays: Vec<Holiday>) -> CompanyCalendar {
    CompanyCalendar::from_config(
        CompanyCalendarConfig {
            company: "Peppermint Software".to_string(),
            weekly_off_days: weekly_offs.into_iter().map(String::from).collect(),
            holidays,
            company_leave_dates: vec![],
        },
        "test",
    )
    .unwrap()
}

fn state_with(calendar: CompanyCalendar, catalog: RuleCatalog) -> AppState {
    AppState::new(ConfigLoader::from_parts(calendar, catalog))
}

/// A router over an always-working calendar (no offs, no holidays) and an
/// empty rule catalog.
fn plain_router() -> Router {
    create_router(state_with(calendar(vec![], vec![]), RuleCatalog::empty()))
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Asserts a JSON string field holds the expected decimal value, ignoring
/// trailing-zero representation differences.
fn assert_decimal_field(value: &Value, pointer: &str, expected: &str) {
    let raw = value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing decimal field {pointer} in {value}"));
    assert_eq!(
        dec(raw),
        dec(expected),
        "expected {pointer} = {expected}, got {raw}"
    );
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn employee_json(badge_id: &str, department: Option<&str>) -> Value {
    let mut employee = json!({
        "id": Uuid::new_v4().to_string(),
        "badge_id": badge_id,
        "name": "Adam Luis",
        "is_active": true
    });
    if let Some(department) = department {
        employee["department"] = json!(department);
    }
    employee
}

fn monthly_contract_json(wage: &str, deduct_leave_from_basic_pay: bool) -> Value {
    json!({
        "wage": wage,
        "wage_type": "monthly",
        "status": "active",
        "start_date": "2025-01-01",
        "leave_penalty": "daily_wage",
        "deduct_leave_from_basic_pay": deduct_leave_from_basic_pay
    })
}

fn june_request(employee: Value, contract: Option<Value>) -> Value {
    let mut request = json!({
        "employee": employee,
        "period": {"start_date": "2026-06-01", "end_date": "2026-06-30"}
    });
    if let Some(contract) = contract {
        request["contract"] = contract;
    }
    request
}

fn everyone_scope() -> RuleScope {
    RuleScope {
        include_active_employees: true,
        ..RuleScope::default()
    }
}

// =============================================================================
// Proration scenarios
// =============================================================================

/// IT-001: a monthly wage over exactly one full month pays the full wage
#[tokio::test]
async fn test_full_month_pays_full_wage() {
    let request = june_request(
        employee_json("PEP0001", None),
        Some(monthly_contract_json("3000", false)),
    );
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "3000");
    assert_decimal_field(&body, "/gross_pay", "3000");
    assert_decimal_field(&body, "/net_pay", "3000");
    assert_decimal_field(&body, "/breakdown/paid_days", "30");
    assert_decimal_field(&body, "/breakdown/unpaid_days", "0");
    assert_eq!(body["status"], "draft");
}

/// IT-002: wage 3000 over a 30-day month with 2 unpaid leaves, per-day
/// penalty, netting enabled
#[tokio::test]
async fn test_unpaid_leave_netting_scenario() {
    let mut request = june_request(
        employee_json("PEP0002", None),
        Some(monthly_contract_json("3000", true)),
    );
    request["leaves"] = json!([
        {
            "start_date": "2026-06-10",
            "end_date": "2026-06-11",
            "payment": "unpaid"
        }
    ]);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    // per_day = 3000 / 30 = 100; LOP = 200; netted into basic pay.
    assert_decimal_field(&body, "/breakdown/loss_of_pay", "200");
    assert_decimal_field(&body, "/basic_pay", "2800");
    assert_decimal_field(&body, "/net_pay", "2800");
    assert_decimal_field(&body, "/breakdown/unpaid_days", "2");
    assert_decimal_field(&body, "/breakdown/paid_days", "28");
    assert_eq!(body["breakdown"]["lop_folded_into_basic"], json!(true));
}

/// IT-003: with netting off, loss of pay is subtracted from net pay instead
#[tokio::test]
async fn test_unpaid_leave_without_netting() {
    let mut request = june_request(
        employee_json("PEP0003", None),
        Some(monthly_contract_json("3000", false)),
    );
    request["leaves"] = json!([
        {
            "start_date": "2026-06-10",
            "end_date": "2026-06-11",
            "payment": "unpaid"
        }
    ]);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "3000");
    assert_decimal_field(&body, "/breakdown/loss_of_pay", "200");
    assert_decimal_field(&body, "/net_pay", "2800");
    assert_decimal_field(&body, "/total_deduction", "200");
}

/// IT-004: a single half-day unpaid leave moves exactly half a day
#[tokio::test]
async fn test_half_day_leave() {
    let mut request = june_request(
        employee_json("PEP0004", None),
        Some(monthly_contract_json("3000", false)),
    );
    request["leaves"] = json!([
        {
            "start_date": "2026-06-10",
            "end_date": "2026-06-10",
            "payment": "unpaid",
            "start_breakdown": "first_half"
        }
    ]);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/breakdown/unpaid_days", "0.5");
    assert_decimal_field(&body, "/breakdown/paid_days", "29.5");
    assert_decimal_field(&body, "/breakdown/loss_of_pay", "50");
}

/// IT-005: a period where every day is a holiday computes zeros, not errors
#[tokio::test]
async fn test_all_holiday_period() {
    let router = create_router(state_with(
        calendar(
            vec![],
            vec![Holiday {
                name: "Shutdown".to_string(),
                start_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 30),
            }],
        ),
        RuleCatalog::empty(),
    ));
    let request = june_request(
        employee_json("PEP0005", None),
        Some(monthly_contract_json("3000", false)),
    );
    let (status, body) = post_json(router, "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "0");
    assert_decimal_field(&body, "/net_pay", "0");
    assert_decimal_field(&body, "/breakdown/paid_days", "0");
}

/// IT-006: hourly wage follows worked seconds and excludes overtime
#[tokio::test]
async fn test_hourly_wage() {
    let mut request = june_request(employee_json("PEP0006", None), None);
    request["contract"] = json!({
        "wage": "20",
        "wage_type": "hourly",
        "status": "active",
        "start_date": "2025-01-01",
        "leave_penalty": "daily_wage",
        "deduct_leave_from_basic_pay": false
    });
    request["attendance"] = json!([
        {"date": "2026-06-01", "worked_seconds": 28800},
        {"date": "2026-06-02", "worked_seconds": 32400, "overtime_seconds": 3600}
    ]);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    // 16 paid hours at 20/h.
    assert_decimal_field(&body, "/basic_pay", "320");
    assert_decimal_field(&body, "/breakdown/overtime_hours", "1");
    assert_decimal_field(&body, "/breakdown/loss_of_pay", "0");
    assert_decimal_field(&body, "/breakdown/paid_days", "2");
}

/// IT-007: daily wage with an unaccounted absence charges loss of pay
#[tokio::test]
async fn test_daily_wage_with_absence() {
    let mut request = june_request(employee_json("PEP0007", None), None);
    request["contract"] = json!({
        "wage": "100",
        "wage_type": "daily",
        "status": "active",
        "start_date": "2025-01-01",
        "leave_penalty": "daily_wage",
        "deduct_leave_from_basic_pay": false
    });
    // Present every day except June 15th.
    let attendance: Vec<Value> = (1..=30)
        .filter(|day| *day != 15)
        .map(|day| json!({"date": format!("2026-06-{day:02}"), "worked_seconds": 28800}))
        .collect();
    request["attendance"] = json!(attendance);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "3000");
    assert_decimal_field(&body, "/breakdown/loss_of_pay", "100");
    assert_decimal_field(&body, "/breakdown/unpaid_days", "1");
    assert_decimal_field(&body, "/net_pay", "2900");
}

/// IT-008: a wage without any contract falls back to monthly proration
#[tokio::test]
async fn test_wage_without_contract() {
    let mut request = june_request(employee_json("PEP0008", None), None);
    request["wage"] = json!("3000");
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "3000");
}

// =============================================================================
// Deduction pipeline scenarios
// =============================================================================

fn deduction(
    title: &str,
    mode: AmountMode,
    affects: Option<CompensationTarget>,
    category: DeductionCategory,
) -> DeductionRule {
    DeductionRule {
        id: Uuid::new_v4(),
        title: title.to_string(),
        mode,
        affects,
        based_on: PayComponent::BasicPay,
        category,
        employer_rate: None,
        scope: everyone_scope(),
        conditions: vec![],
        one_time_date: None,
    }
}

/// IT-009: a 10% gross-pay deduction on gross 2800 removes 280
#[tokio::test]
async fn test_gross_deduction_scenario() {
    let catalog = RuleCatalog::new(
        vec![],
        vec![deduction(
            "Gross Levy",
            AmountMode::Rate(dec("10")),
            Some(CompensationTarget::GrossPay),
            DeductionCategory::PostTax,
        )],
    );
    let router = create_router(state_with(calendar(vec![], vec![]), catalog));

    let mut request = june_request(
        employee_json("PEP0009", None),
        Some(monthly_contract_json("3000", true)),
    );
    request["leaves"] = json!([
        {"start_date": "2026-06-10", "end_date": "2026-06-11", "payment": "unpaid"}
    ]);
    let (status, body) = post_json(router, "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "2800");
    assert_decimal_field(&body, "/breakdown/gross_pay_deductions/0/amount", "280");
    assert_decimal_field(&body, "/gross_pay", "2520");
    assert_decimal_field(&body, "/net_pay", "2520");
}

/// IT-010: all four tiers applied in order, identities hold
#[tokio::test]
async fn test_four_tier_pipeline() {
    let allowance = AllowanceRule {
        id: Uuid::new_v4(),
        title: "Travel Allowance".to_string(),
        mode: AmountMode::Fixed(dec("200")),
        scope: everyone_scope(),
        conditions: vec![],
        gate: None,
        one_time_date: None,
    };
    let catalog = RuleCatalog::new(
        vec![allowance],
        vec![
            deduction(
                "Equipment Charge",
                AmountMode::Rate(dec("10")),
                Some(CompensationTarget::BasicPay),
                DeductionCategory::PostTax,
            ),
            deduction(
                "Gross Levy",
                AmountMode::Rate(dec("10")),
                Some(CompensationTarget::GrossPay),
                DeductionCategory::PostTax,
            ),
            deduction(
                "Provident Fund",
                AmountMode::Rate(dec("10")),
                None,
                DeductionCategory::Pretax,
            ),
            deduction(
                "Loan Recovery",
                AmountMode::Rate(dec("10")),
                Some(CompensationTarget::NetPay),
                DeductionCategory::PostTax,
            ),
        ],
    );
    let router = create_router(state_with(calendar(vec![], vec![]), catalog));

    let request = june_request(
        employee_json("PEP0010", None),
        Some(monthly_contract_json("3000", false)),
    );
    let (status, body) = post_json(router, "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    // Tier 1: 10% of 3000 = 300 -> basic 2700.
    assert_decimal_field(&body, "/basic_pay", "2700");
    // Gross assembly: 2700 + 200 = 2900; tier 2: 10% -> 290 -> gross 2610.
    assert_decimal_field(&body, "/gross_pay", "2610");
    // Tier 3: 10% of basic 2700 = 270 -> intermediate net 2340.
    // Tier 4: 10% of 2340 = 234 -> net 2106.
    assert_decimal_field(&body, "/net_pay", "2106");
    assert_decimal_field(&body, "/total_deduction", "504");

    // Net identity: net = gross - total_deduction.
    let gross = dec(body["gross_pay"].as_str().unwrap());
    let net = dec(body["net_pay"].as_str().unwrap());
    let total = dec(body["total_deduction"].as_str().unwrap());
    assert_eq!(net, gross - total);

    // Every tier retained its line.
    assert_eq!(body["breakdown"]["basic_pay_deductions"].as_array().unwrap().len(), 1);
    assert_eq!(body["breakdown"]["gross_pay_deductions"].as_array().unwrap().len(), 1);
    assert_eq!(body["breakdown"]["pretax_deductions"].as_array().unwrap().len(), 1);
    assert_eq!(body["breakdown"]["net_pay_deductions"].as_array().unwrap().len(), 1);
}

/// IT-011: condition-based rules follow employee attributes
#[tokio::test]
async fn test_condition_based_rule() {
    let mut rule = deduction(
        "Sales Levy",
        AmountMode::Fixed(dec("50")),
        None,
        DeductionCategory::PostTax,
    );
    rule.scope = RuleScope {
        is_condition_based: true,
        ..RuleScope::default()
    };
    rule.conditions = vec![payroll_engine::models::Condition {
        field: "department".to_string(),
        operator: payroll_engine::models::ComparisonOp::Equal,
        value: "Sales Dept".to_string(),
    }];
    let catalog = RuleCatalog::new(vec![], vec![rule]);

    // Sales employee pays the levy.
    let router = create_router(state_with(calendar(vec![], vec![]), catalog.clone()));
    let request = june_request(
        employee_json("PEP0011", Some("Sales Dept")),
        Some(monthly_contract_json("3000", false)),
    );
    let (_, body) = post_json(router, "/payslips", request).await;
    assert_decimal_field(&body, "/net_pay", "2950");

    // An HR employee does not.
    let router = create_router(state_with(calendar(vec![], vec![]), catalog));
    let request = june_request(
        employee_json("PEP0012", Some("HR Dept")),
        Some(monthly_contract_json("3000", false)),
    );
    let (_, body) = post_json(router, "/payslips", request).await;
    assert_decimal_field(&body, "/net_pay", "3000");
}

/// IT-012: the shipped default configuration wires a full catalog
#[tokio::test]
async fn test_default_config_catalog() {
    let config = ConfigLoader::load("./config/default").unwrap();
    assert!(config.warnings().is_empty());
    let router = create_router(AppState::new(config));

    // June 2026 under sat/sun offs has 22 working days; wage 2200 gives a
    // per-day amount of 100.
    let request = june_request(
        employee_json("PEP0013", Some("Sales Dept")),
        Some(monthly_contract_json("2200", false)),
    );
    let (status, body) = post_json(router, "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "/basic_pay", "2200");
    // Travel Allowance 120 + Sales Incentive 5% of 2200 = 110.
    assert_eq!(body["breakdown"]["allowances"].as_array().unwrap().len(), 2);
    assert_decimal_field(&body, "/gross_pay", "2430");
    // Provident Fund 8% of basic = 176, Income Tax 5% of gross = 121.50,
    // Staff Welfare Fund fixed 10.
    assert_decimal_field(&body, "/breakdown/pretax_deductions/0/amount", "176");
    assert_decimal_field(&body, "/breakdown/tax_deductions/0/amount", "121.50");
    assert_decimal_field(&body, "/net_pay", "2122.50");
    // Employer PF contribution 12% of basic, reported but not subtracted.
    assert_decimal_field(&body, "/breakdown/employer_contributions/0/amount", "264");
}

// =============================================================================
// Persistence semantics
// =============================================================================

/// IT-013: generating twice for the same key returns the same record id
#[tokio::test]
async fn test_idempotent_generation() {
    let state = state_with(calendar(vec![], vec![]), RuleCatalog::empty());
    let router = create_router(state.clone());

    let request = june_request(
        employee_json("PEP0014", None),
        Some(monthly_contract_json("3000", false)),
    );
    let (_, first) = post_json(router, "/payslips", request.clone()).await;
    let router = create_router(state.clone());
    let (_, second) = post_json(router, "/payslips", request).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(state.store().lock().unwrap().len(), 1);
}

/// IT-014: the period start is clamped to the contract start date
#[tokio::test]
async fn test_contract_start_clamping() {
    let mut contract = monthly_contract_json("3000", false);
    contract["start_date"] = json!("2026-06-16");
    let request = june_request(employee_json("PEP0015", None), Some(contract));
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_date"], "2026-06-16");
    // 15 of 30 working days.
    assert_decimal_field(&body, "/basic_pay", "1500");
}

// =============================================================================
// Bulk generation
// =============================================================================

/// IT-015: bulk runs isolate failures and report counts
#[tokio::test]
async fn test_bulk_generation_isolation() {
    let body = json!({
        "group_name": "june-run",
        "requests": [
            june_request(
                employee_json("PEP0016", None),
                Some(monthly_contract_json("3000", false))
            ),
            june_request(employee_json("PEP0017", None), None),
            june_request(
                employee_json("PEP0018", None),
                Some(monthly_contract_json("2000", false))
            )
        ]
    });
    let (status, response) = post_json(plain_router(), "/payslips/bulk", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["generated"], 2);
    assert_eq!(response["skipped"], 1);
    assert_eq!(response["skipped_employees"][0]["badge_id"], "PEP0017");
    assert!(
        response["skipped_employees"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("No active contract")
    );
}

// =============================================================================
// Error cases
// =============================================================================

/// IT-016: no contract and no wage is a structured 422
#[tokio::test]
async fn test_missing_contract_error() {
    let request = june_request(employee_json("PEP0019", None), None);
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "MISSING_CONTRACT");
    assert!(body["message"].as_str().unwrap().contains("PEP0019"));
}

/// IT-017: an inverted period is a structured 400
#[tokio::test]
async fn test_invalid_period_error() {
    let mut request = june_request(
        employee_json("PEP0020", None),
        Some(monthly_contract_json("3000", false)),
    );
    request["period"] = json!({"start_date": "2026-06-30", "end_date": "2026-06-01"});
    let (status, body) = post_json(plain_router(), "/payslips", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");
}

/// IT-018: malformed JSON is rejected with a clear error
#[tokio::test]
async fn test_malformed_json() {
    let response = plain_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payslips")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// IT-019: missing required fields report a validation error
#[tokio::test]
async fn test_missing_field_error() {
    let (status, body) = post_json(plain_router(), "/payslips", json!({"wage": "10"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
