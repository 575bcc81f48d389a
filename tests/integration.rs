//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - The worked 2,000.00 × 2 extra payments example over HTTP
//! - Personal complement reconciliation and clamping
//! - Extra hours and family situation
//! - Zero and low income edge cases
//! - Error cases
//! - Pipeline properties checked with proptest

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use nomina_engine::api::{AppState, create_router};
use nomina_engine::calculation::{
    generate_payroll_output, personal_and_family_minimum, progressive_tax,
};
use nomina_engine::config::{FiscalParameters, PERSONAL_MINIMUMS_2025};
use nomina_engine::models::{
    MAX_AMOUNT_CENTS, MAX_EXTRA_HOURS, MAX_SALARY_COMPLEMENTS, PayrollInput, warning_codes,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new(FiscalParameters::spain_2025()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_payroll(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll")
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

fn create_request(base_salary: i64, extra_payments: u32) -> Value {
    json!({
        "employee_id": "emp_001",
        "salary": {
            "base_salary": base_salary,
            "extra_payments": extra_payments
        }
    })
}

fn assert_payslip_decimal(result: &Value, field: &str, expected: &str) {
    let actual = decimal(result["payslip"][field].as_str().unwrap());
    assert_eq!(
        actual,
        decimal(expected),
        "Expected payslip.{} = {}, got {}",
        field,
        expected,
        actual
    );
}

fn assert_has_warning(result: &Value, code: &str) {
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(
        warnings.iter().any(|w| w["code"] == code),
        "Expected warning {} in {:?}",
        code,
        warnings
    );
}

// =============================================================================
// SECTION 1: Worked Example
// =============================================================================

#[tokio::test]
async fn test_reference_scenario_2000_with_two_extra_payments() {
    let (status, result) = post_payroll(create_router_for_test(), create_request(200_000, 2)).await;

    assert_eq!(status, StatusCode::OK);
    let payroll = &result["payroll"];
    assert_eq!(payroll["monthly_gross_salary"], 200_000);
    assert_eq!(payroll["monthly_prorated_extra_pay"], 33_333);
    assert_eq!(payroll["monthly_gross_with_extras"], 233_333);
    assert_eq!(payroll["base_bccc"], 233_333);
    assert_eq!(payroll["base_bccp"], 233_333);
    assert_eq!(payroll["ss_contributions"]["worker_cc"], 10_966);
    assert_eq!(payroll["ss_contributions"]["total_worker"], 14_815);
    assert_eq!(payroll["ss_contributions"]["total_employer"], 73_263);
    assert_eq!(payroll["irpf_amount"], 35_837);
    assert_eq!(payroll["irpf_effective_rate"], 2_102);
    assert_eq!(payroll["net_salary"], 182_681);

    assert_payslip_decimal(&result, "gross_pay", "2333.33");
    assert_payslip_decimal(&result, "irpf_withholding", "358.37");
    assert_payslip_decimal(&result, "irpf_rate_percent", "21.02");
    assert_payslip_decimal(&result, "net_pay", "1826.81");
}

#[tokio::test]
async fn test_reference_scenario_audit_trace() {
    let (_, result) = post_payroll(create_router_for_test(), create_request(200_000, 2)).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["rule_id"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec![
            "salary_resolution",
            "contribution_bases",
            "work_income_reduction",
            "personal_family_minimum",
            "progressive_tax",
            "social_security",
            "net_salary",
        ]
    );

    let tax_step = steps.iter().find(|s| s["rule_id"] == "progressive_tax").unwrap();
    assert_eq!(tax_step["input"]["taxable_base"], 2_045_000);
    assert_eq!(tax_step["output"]["annual_tax"], 430_050);

    let reduction_step = steps.iter().find(|s| s["rule_id"] == "work_income_reduction").unwrap();
    assert_eq!(reduction_step["input"]["annual_income"], 2_800_000);
    assert_eq!(reduction_step["output"]["reduction"], 200_000);

    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_response_envelope_metadata() {
    let (_, result) = post_payroll(create_router_for_test(), create_request(200_000, 2)).await;

    assert_eq!(result["employee_id"], "emp_001");
    assert_eq!(result["fiscal_year"], 2025);
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert!(result["calculation_id"].as_str().is_some());
    assert!(result["timestamp"].as_str().is_some());
    assert!(result["duration_us"].as_u64().is_some());
}

// =============================================================================
// SECTION 2: Personal Complement
// =============================================================================

#[tokio::test]
async fn test_personal_complement_reconciled_from_target_gross() {
    let body = json!({
        "employee_id": "emp_002",
        "salary": {
            "base_salary": 150_000,
            "complements": [10_000],
            "gross_salary": 2_800_000,
            "extra_payments": 2
        }
    });

    let (status, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    // (2,800,000 - 150,000 × 12 - 10,000 × 14) / 12
    assert_eq!(result["payroll"]["personal_complement"], 71_666);
    assert_eq!(result["payroll"]["monthly_gross_salary"], 231_666);
}

#[tokio::test]
async fn test_explicit_personal_complement_wins_over_target_gross() {
    let body = json!({
        "employee_id": "emp_003",
        "salary": {
            "base_salary": 150_000,
            "personal_complement": 20_000,
            "gross_salary": 9_000_000,
            "extra_payments": 0
        }
    });

    let (_, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(result["payroll"]["personal_complement"], 20_000);
    assert_eq!(result["payroll"]["monthly_gross_salary"], 170_000);
    assert_eq!(result["payroll"]["monthly_prorated_extra_pay"], 0);
}

#[tokio::test]
async fn test_target_gross_below_contract_pay_is_clamped() {
    let body = json!({
        "employee_id": "emp_004",
        "salary": {
            "base_salary": 200_000,
            "gross_salary": 1_000_000,
            "extra_payments": 2
        }
    });

    let (status, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["payroll"]["personal_complement"], 0);
    assert_eq!(result["payroll"]["net_salary"], 182_681);
    assert_has_warning(&result, warning_codes::PERSONAL_COMPLEMENT_CLAMPED);
}

// =============================================================================
// SECTION 3: Extra Hours and Family
// =============================================================================

#[tokio::test]
async fn test_extra_hours_with_explicit_rate() {
    let mut body = create_request(200_000, 2);
    body["overtime"] = json!({ "hours": 6, "rate": 1_850 });

    let (_, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(result["payroll"]["extra_hours_pay"], 11_100);
    assert_eq!(result["payroll"]["monthly_gross_with_extras"], 244_433);
    assert_eq!(result["payroll"]["base_bccc"], 233_333);
    assert_eq!(result["payroll"]["base_bccp"], 244_433);
    assert_eq!(result["payroll"]["net_salary"], 182_681 + 11_100);
}

#[tokio::test]
async fn test_extra_hours_derived_from_monthly_hours() {
    let mut body = create_request(200_000, 2);
    body["overtime"] = json!({ "hours": 10, "monthly_hours": 200 });

    let (_, result) = post_payroll(create_router_for_test(), body).await;

    // 200,000 / 200 hours = 1,000 per hour
    assert_eq!(result["payroll"]["extra_hours_pay"], 10_000);
}

#[tokio::test]
async fn test_family_situation_lowers_withholding() {
    let mut body = create_request(200_000, 2);
    body["family"] = json!({
        "children": 2,
        "disability": { "severe": false },
        "ascendants_over_65": true
    });

    let (_, result) = post_payroll(create_router_for_test(), body).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let minimum_step = steps
        .iter()
        .find(|s| s["rule_id"] == "personal_family_minimum")
        .unwrap();
    // 555,000 + 240,000 + 270,000 + 300,000 + 115,000
    assert_eq!(minimum_step["output"]["minimum"], 1_480_000);

    let irpf = result["payroll"]["irpf_amount"].as_i64().unwrap();
    assert!(irpf < 35_837);
    assert_eq!(result["payroll"]["ss_contributions"]["total_worker"], 14_815);
}

// =============================================================================
// SECTION 4: Low and Zero Income
// =============================================================================

#[tokio::test]
async fn test_low_income_in_first_bracket() {
    let (_, result) = post_payroll(create_router_for_test(), create_request(100_000, 2)).await;

    // 1,400,000 - 556,500 - 555,000 = 288,500 taxed at 19%
    assert_eq!(result["payroll"]["irpf_effective_rate"], 1_900);
    assert_eq!(result["payroll"]["irpf_amount"], 4_567);
    assert_eq!(result["payroll"]["base_bccc"], 116_666);
    assert_eq!(result["payroll"]["ss_contributions"]["total_worker"], 7_407);
    assert_eq!(result["payroll"]["net_salary"], 104_692);
}

#[tokio::test]
async fn test_income_below_minimums_pays_no_irpf() {
    let (_, result) = post_payroll(create_router_for_test(), create_request(50_000, 2)).await;

    assert_eq!(result["payroll"]["irpf_amount"], 0);
    assert_eq!(result["payroll"]["irpf_effective_rate"], 0);
    assert_has_warning(&result, warning_codes::TAXABLE_BASE_FLOORED);
}

#[tokio::test]
async fn test_zero_base_salary_gives_zero_payslip() {
    let body = json!({
        "employee_id": "emp_005",
        "salary": { "base_salary": 0, "complements": [10_000], "extra_payments": 2 },
        "overtime": { "hours": 5, "rate": 2_000 }
    });

    let (status, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["payroll"]["monthly_gross_with_extras"], 0);
    assert_eq!(result["payroll"]["extra_hours_pay"], 0);
    assert_eq!(result["payroll"]["ss_contributions"]["total"], 0);
    assert_eq!(result["payroll"]["net_salary"], 0);
    assert_payslip_decimal(&result, "net_pay", "0");
    assert_has_warning(&result, warning_codes::NON_POSITIVE_BASE_SALARY);
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_base_salary() {
    let body = json!({
        "employee_id": "emp_001",
        "salary": { "extra_payments": 2 }
    });

    let (status, error) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_negative_extra_payments() {
    let body = create_request(200_000, 0);
    let mut body = body;
    body["salary"]["extra_payments"] = json!(-1);

    let (status, error) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_too_many_extra_payments() {
    let (status, error) = post_payroll(create_router_for_test(), create_request(200_000, 13)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("number_of_extra_payments")
    );
}

#[tokio::test]
async fn test_error_complement_out_of_range() {
    let body = json!({
        "employee_id": "emp_001",
        "salary": {
            "base_salary": 200_000,
            "complements": [5_000, 1_000_000_000_000_i64]
        }
    });

    let (status, error) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("salary_complements[1]")
    );
}

#[tokio::test]
async fn test_largest_accepted_request_returns_exact_payslip() {
    let body = json!({
        "employee_id": "emp_max",
        "salary": {
            "base_salary": MAX_AMOUNT_CENTS,
            "personal_complement": MAX_AMOUNT_CENTS,
            "complements": vec![MAX_AMOUNT_CENTS; MAX_SALARY_COMPLEMENTS],
            "extra_payments": 12
        },
        "overtime": { "hours": MAX_EXTRA_HOURS, "monthly_hours": 1 }
    });

    let (status, result) = post_payroll(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    let payroll = &result["payroll"];
    assert_eq!(payroll["base_bccp"], 66_013_200_000_000_000_i64);
    assert_eq!(
        payroll["ss_contributions"]["employer_accidents"],
        990_198_000_000_000_i64
    );
    let gross = payroll["monthly_gross_with_extras"].as_i64().unwrap();
    let irpf = payroll["irpf_amount"].as_i64().unwrap();
    let worker = payroll["ss_contributions"]["total_worker"].as_i64().unwrap();
    assert_eq!(payroll["net_salary"].as_i64().unwrap(), gross - irpf - worker);
}

// =============================================================================
// SECTION 6: Properties
// =============================================================================

fn payroll_input_strategy() -> impl Strategy<Value = PayrollInput> {
    (
        (
            -50_000_i64..1_000_000,
            prop::collection::vec(0_i64..50_000, 0..3),
            0_i64..3_000_000,
            0_u32..=4,
        ),
        (0_u32..40, 0_i64..3_000, 0_u32..=6),
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
    )
        .prop_map(
            |(
                (base_salary, salary_complements, gross_salary, number_of_extra_payments),
                (number_of_extra_hours, extra_hour_rate, number_of_children),
                (
                    has_disability,
                    has_severe_disability,
                    needs_assistance,
                    has_ascendants_over_65,
                    has_disabled_ascendants,
                ),
            )| PayrollInput {
                base_salary,
                salary_complements,
                gross_salary,
                number_of_extra_payments,
                number_of_extra_hours,
                extra_hour_rate,
                number_of_children,
                has_disability,
                has_severe_disability: has_disability && has_severe_disability,
                needs_assistance: has_disability && needs_assistance,
                has_ascendants_over_65,
                has_disabled_ascendants,
                ..Default::default()
            },
        )
}

proptest! {
    #[test]
    fn prop_contribution_totals_add_up(input in payroll_input_strategy()) {
        let output = generate_payroll_output(&input, &FiscalParameters::spain_2025());
        let ss = &output.ss_contributions;

        prop_assert_eq!(
            ss.total_worker,
            ss.worker_cc + ss.worker_unemployment + ss.worker_training
        );
        prop_assert_eq!(
            ss.total_employer,
            ss.employer_cc
                + ss.employer_unemployment
                + ss.employer_training
                + ss.employer_fogasa
                + ss.employer_accidents
        );
        prop_assert_eq!(ss.total, ss.total_worker + ss.total_employer);
    }

    #[test]
    fn prop_net_salary_identity(input in payroll_input_strategy()) {
        let output = generate_payroll_output(&input, &FiscalParameters::spain_2025());

        prop_assert_eq!(
            output.net_salary,
            output.monthly_gross_with_extras
                - output.irpf_amount
                - output.ss_contributions.total_worker
        );
        prop_assert!(output.irpf_amount >= 0);
        prop_assert!(output.monthly_gross_with_extras >= 0);
    }

    #[test]
    fn prop_more_children_never_raise_withholding(input in payroll_input_strategy()) {
        let params = FiscalParameters::spain_2025();
        let with_one_more = PayrollInput {
            number_of_children: input.number_of_children + 1,
            ..input.clone()
        };

        let fewer = generate_payroll_output(&input, &params);
        let more = generate_payroll_output(&with_one_more, &params);

        prop_assert!(more.irpf_amount <= fewer.irpf_amount);
    }

    #[test]
    fn prop_more_children_raise_personal_and_family_minimum(
        input in payroll_input_strategy(),
    ) {
        let with_one_more = PayrollInput {
            number_of_children: input.number_of_children + 1,
            ..input.clone()
        };

        let fewer = personal_and_family_minimum(&input, &PERSONAL_MINIMUMS_2025);
        let more = personal_and_family_minimum(&with_one_more, &PERSONAL_MINIMUMS_2025);

        prop_assert!(more > fewer);
    }

    #[test]
    fn prop_reconciled_complement_is_stable(input in payroll_input_strategy()) {
        let params = FiscalParameters::spain_2025();
        let reconciled = generate_payroll_output(&input, &params);

        let explicit = PayrollInput {
            personal_complement: reconciled.personal_complement,
            ..input.clone()
        };
        let again = generate_payroll_output(&explicit, &params);

        prop_assert_eq!(again, reconciled);
    }

    #[test]
    fn prop_non_positive_base_salary_gives_zero_payslip(
        base_salary in -1_000_000_i64..=0,
        input in payroll_input_strategy(),
    ) {
        let input = PayrollInput { base_salary, ..input };
        let output = generate_payroll_output(&input, &FiscalParameters::spain_2025());

        prop_assert_eq!(output.monthly_gross_with_extras, 0);
        prop_assert_eq!(output.irpf_amount, 0);
        prop_assert_eq!(output.ss_contributions.total, 0);
        prop_assert_eq!(output.net_salary, 0);
    }

    #[test]
    fn prop_progressive_tax_is_continuous(base in 0_i64..40_000_000) {
        let scale = FiscalParameters::spain_2025().tax_scale;
        let step = progressive_tax(base + 1, &scale) - progressive_tax(base, &scale);

        prop_assert!((0..=1).contains(&step));
    }
}

#[test]
fn test_bracket_boundary_tax() {
    let scale = FiscalParameters::spain_2025().tax_scale;

    assert_eq!(progressive_tax(1_245_000, &scale), 236_550);
    // 236,550 + 775,000 × 24%
    assert_eq!(progressive_tax(2_020_000, &scale), 422_550);
    assert_eq!(progressive_tax(2_045_000, &scale), 430_050);
}
