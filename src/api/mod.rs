use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::core::{
    FireEngine, FireInputs, FireVariant, IncomeImpact, InputError, InvestmentSnapshot, Profile,
    RequiredChange, SavingsImpact, SpendingCategory, SpendingSnapshot,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliVariant {
    Lean,
    Regular,
    Fat,
    Coast,
}

impl From<CliVariant> for FireVariant {
    fn from(value: CliVariant) -> Self {
        match value {
            CliVariant::Lean => FireVariant::Lean,
            CliVariant::Regular => FireVariant::Regular,
            CliVariant::Fat => FireVariant::Fat,
            CliVariant::Coast => FireVariant::Coast,
        }
    }
}

impl From<FireVariant> for CliVariant {
    fn from(value: FireVariant) -> Self {
        match value {
            FireVariant::Lean => CliVariant::Lean,
            FireVariant::Regular => CliVariant::Regular,
            FireVariant::Fat => CliVariant::Fat,
            FireVariant::Coast => CliVariant::Coast,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliReport {
    Simulate,
    Gameplan,
    Impact,
    Solve,
}

#[derive(Parser, Debug)]
#[command(
    name = "fireplan",
    about = "FIRE projection and gameplan engine (outside + mandatory buckets)"
)]
struct Cli {
    #[arg(long, help = "Date of birth, YYYY-MM-DD")]
    date_of_birth: NaiveDate,
    #[arg(long, help = "Valuation date, defaults to today")]
    as_of: Option<NaiveDate>,
    #[arg(long, help = "Desired retirement age; omit to retire as soon as possible")]
    target_retirement_age: Option<u32>,

    #[arg(long, help = "Take-home income in cents per month")]
    monthly_income: i64,
    #[arg(long, help = "Total spending in cents per month")]
    monthly_total_spend: i64,
    #[arg(long, help = "Essential spending in cents per month")]
    monthly_essentials: i64,
    #[arg(
        long,
        help = "Savings rate in percent, defaults to (income - spend) / income"
    )]
    savings_rate: Option<f64>,
    #[arg(
        long = "top-category",
        value_parser = parse_category,
        help = "Ranked spending category as NAME=CENTS; repeat for more"
    )]
    top_categories: Vec<SpendingCategory>,

    #[arg(long, default_value_t = 0, help = "Outside bucket balance in cents")]
    outside_balance: i64,
    #[arg(
        long,
        default_value_t = 0,
        help = "Synced mandatory bucket balance in cents"
    )]
    mandatory_balance: i64,
    #[arg(
        long,
        default_value_t = 0,
        help = "Manually tracked mandatory balance, used when the synced balance is zero"
    )]
    profile_mandatory_balance: i64,

    #[arg(
        long,
        default_value_t = 11.5,
        help = "Mandatory contribution rate in percent of income"
    )]
    contribution_rate: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_hyphen_values = true,
        help = "Expected annual return in percent"
    )]
    expected_return: f64,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Outside bucket return in percent, defaults to expected-return"
    )]
    outside_return: Option<f64>,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    income_growth: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    spending_growth: f64,
    #[arg(long, value_enum, default_value_t = CliVariant::Regular)]
    variant: CliVariant,
    #[arg(long, help = "Annual expenses in cents for the active variant")]
    annual_expense_override: Option<i64>,

    #[arg(long, value_enum, default_value_t = CliReport::Gameplan)]
    report: CliReport,
    #[arg(
        long,
        default_value_t = 50_000,
        help = "Monthly amount in cents for the impact report"
    )]
    extra_monthly_cents: i64,
    #[arg(long, help = "Target age for the solve report")]
    solve_target_age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiPayload {
    date_of_birth: Option<NaiveDate>,
    as_of: Option<NaiveDate>,
    target_retirement_age: Option<u32>,

    monthly_income: Option<i64>,
    monthly_total_spend: Option<i64>,
    monthly_essentials: Option<i64>,
    savings_rate: Option<f64>,
    top_categories: Option<Vec<SpendingCategory>>,

    outside_balance: Option<i64>,
    mandatory_balance: Option<i64>,
    profile_mandatory_balance: Option<i64>,

    contribution_rate: Option<f64>,
    expected_return: Option<f64>,
    outside_return: Option<f64>,
    income_growth: Option<f64>,
    spending_growth: Option<f64>,
    variant: Option<FireVariant>,
    annual_expense_override: Option<i64>,

    extra_monthly_cents: Option<i64>,
    solve_target_age: Option<u32>,
}

#[derive(Debug)]
struct ApiRequest {
    inputs: FireInputs,
    extra_monthly_cents: i64,
    solve_target_age: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImpactResponse {
    savings: SavingsImpact,
    income: IncomeImpact,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveResponse {
    target_age: u32,
    income: RequiredChange,
    savings: RequiredChange,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn parse_category(raw: &str) -> Result<SpendingCategory, String> {
    let (name, cents) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=CENTS, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{raw}'"));
    }
    let monthly_cents = cents
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid cents in '{raw}': {e}"))?;
    Ok(SpendingCategory {
        name: name.to_string(),
        monthly_cents,
    })
}

fn derived_savings_rate(monthly_income: i64, monthly_total_spend: i64) -> f64 {
    if monthly_income <= 0 {
        return 0.0;
    }
    (monthly_income as f64 - monthly_total_spend as f64) / monthly_income as f64 * 100.0
}

fn build_inputs(cli: &Cli) -> Result<FireInputs, InputError> {
    let inputs = FireInputs {
        profile: Profile {
            date_of_birth: cli.date_of_birth,
            target_retirement_age: cli.target_retirement_age,
            mandatory_balance: cli.profile_mandatory_balance,
            contribution_rate: cli.contribution_rate,
            expected_return: cli.expected_return,
            outside_return: cli.outside_return,
            income_growth: cli.income_growth,
            spending_growth: cli.spending_growth,
            variant: cli.variant.into(),
            annual_expense_override: cli.annual_expense_override,
        },
        spending: SpendingSnapshot {
            monthly_essentials: cli.monthly_essentials,
            monthly_total_spend: cli.monthly_total_spend,
            monthly_income: cli.monthly_income,
            savings_rate: cli.savings_rate.unwrap_or_else(|| {
                derived_savings_rate(cli.monthly_income, cli.monthly_total_spend)
            }),
            top_categories: cli.top_categories.clone(),
        },
        investments: InvestmentSnapshot {
            outside_balance: cli.outside_balance,
            mandatory_balance: cli.mandatory_balance,
        },
        as_of: cli.as_of.unwrap_or_else(|| Local::now().date_naive()),
    };

    inputs.validate(FireEngine::default().config())?;
    Ok(inputs)
}

fn impact_report(engine: &FireEngine, inputs: &FireInputs, extra_monthly: i64) -> ImpactResponse {
    ImpactResponse {
        savings: engine.savings_impact(inputs, extra_monthly),
        income: engine.income_impact(inputs, extra_monthly),
    }
}

fn solve_report(
    engine: &FireEngine,
    inputs: &FireInputs,
    solve_target_age: Option<u32>,
) -> SolveResponse {
    let target_age = solve_target_age
        .or(inputs.profile.target_retirement_age)
        .unwrap_or_else(|| engine.effective_target_age(&engine.simulate(inputs), None));
    SolveResponse {
        target_age,
        income: engine.required_extra_income(inputs, target_age),
        savings: engine.required_extra_savings(inputs, target_age),
    }
}

pub fn run_cli<I, T>(args: I) -> Result<String, InputError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let inputs = build_inputs(&cli)?;
    let engine = FireEngine::default();

    let json = match cli.report {
        CliReport::Simulate => serde_json::to_string_pretty(&engine.simulate(&inputs))?,
        CliReport::Gameplan => serde_json::to_string_pretty(&engine.gameplan(&inputs))?,
        CliReport::Impact => serde_json::to_string_pretty(&impact_report(
            &engine,
            &inputs,
            cli.extra_monthly_cents,
        ))?,
        CliReport::Solve => serde_json::to_string_pretty(&solve_report(
            &engine,
            &inputs,
            cli.solve_target_age,
        ))?,
    };
    Ok(json)
}

pub async fn run_http_server(port: u16, engine: FireEngine) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route(
            "/api/gameplan",
            get(gameplan_get_handler).post(gameplan_post_handler),
        )
        .route("/api/impact", post(impact_handler))
        .route("/api/solve", post(solve_handler))
        .fallback(not_found_handler)
        .with_state(engine);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "fireplan HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/gameplan");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(
    State(engine): State<FireEngine>,
    payload: Result<Query<ApiPayload>, QueryRejection>,
) -> Response {
    simulate_handler_impl(engine, payload_from_query(payload))
}

async fn simulate_post_handler(
    State(engine): State<FireEngine>,
    payload: Result<Json<ApiPayload>, JsonRejection>,
) -> Response {
    simulate_handler_impl(engine, payload_from_json(payload))
}

fn simulate_handler_impl(engine: FireEngine, payload: Result<ApiPayload, InputError>) -> Response {
    match payload.and_then(api_request_from_payload) {
        Ok(request) => json_response(StatusCode::OK, engine.simulate(&request.inputs)),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn gameplan_get_handler(
    State(engine): State<FireEngine>,
    payload: Result<Query<ApiPayload>, QueryRejection>,
) -> Response {
    gameplan_handler_impl(engine, payload_from_query(payload))
}

async fn gameplan_post_handler(
    State(engine): State<FireEngine>,
    payload: Result<Json<ApiPayload>, JsonRejection>,
) -> Response {
    gameplan_handler_impl(engine, payload_from_json(payload))
}

fn gameplan_handler_impl(engine: FireEngine, payload: Result<ApiPayload, InputError>) -> Response {
    match payload.and_then(api_request_from_payload) {
        Ok(request) => json_response(StatusCode::OK, engine.gameplan(&request.inputs)),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn impact_handler(
    State(engine): State<FireEngine>,
    payload: Result<Json<ApiPayload>, JsonRejection>,
) -> Response {
    match payload_from_json(payload).and_then(api_request_from_payload) {
        Ok(request) => json_response(
            StatusCode::OK,
            impact_report(&engine, &request.inputs, request.extra_monthly_cents),
        ),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn solve_handler(
    State(engine): State<FireEngine>,
    payload: Result<Json<ApiPayload>, JsonRejection>,
) -> Response {
    match payload_from_json(payload).and_then(api_request_from_payload) {
        Ok(request) => json_response(
            StatusCode::OK,
            solve_report(&engine, &request.inputs, request.solve_target_age),
        ),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

// Malformed bodies and query strings get the same `{"error": ...}` shape as
// validation failures instead of axum's plain-text rejection.
fn payload_from_json(
    payload: Result<Json<ApiPayload>, JsonRejection>,
) -> Result<ApiPayload, InputError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|e| InputError::InvalidPayload(e.body_text()))
}

fn payload_from_query(
    payload: Result<Query<ApiPayload>, QueryRejection>,
) -> Result<ApiPayload, InputError> {
    payload
        .map(|Query(payload)| payload)
        .map_err(|e| InputError::InvalidPayload(e.body_text()))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, InputError> {
    payload_from_json(Json::from_bytes(json.as_bytes())).and_then(api_request_from_payload)
}

fn api_request_from_payload(payload: ApiPayload) -> Result<ApiRequest, InputError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.date_of_birth {
        cli.date_of_birth = v;
    }
    if payload.as_of.is_some() {
        cli.as_of = payload.as_of;
    }
    if payload.target_retirement_age.is_some() {
        cli.target_retirement_age = payload.target_retirement_age;
    }

    if let Some(v) = payload.monthly_income {
        cli.monthly_income = v;
    }
    if let Some(v) = payload.monthly_total_spend {
        cli.monthly_total_spend = v;
    }
    if let Some(v) = payload.monthly_essentials {
        cli.monthly_essentials = v;
    }
    if payload.savings_rate.is_some() {
        cli.savings_rate = payload.savings_rate;
    }
    if let Some(v) = payload.top_categories {
        cli.top_categories = v;
    }

    if let Some(v) = payload.outside_balance {
        cli.outside_balance = v;
    }
    if let Some(v) = payload.mandatory_balance {
        cli.mandatory_balance = v;
    }
    if let Some(v) = payload.profile_mandatory_balance {
        cli.profile_mandatory_balance = v;
    }

    if let Some(v) = payload.contribution_rate {
        cli.contribution_rate = v;
    }
    if let Some(v) = payload.expected_return {
        cli.expected_return = v;
    }
    if payload.outside_return.is_some() {
        cli.outside_return = payload.outside_return;
    }
    if let Some(v) = payload.income_growth {
        cli.income_growth = v;
    }
    if let Some(v) = payload.spending_growth {
        cli.spending_growth = v;
    }
    if let Some(v) = payload.variant {
        cli.variant = v.into();
    }
    if payload.annual_expense_override.is_some() {
        cli.annual_expense_override = payload.annual_expense_override;
    }

    if let Some(v) = payload.extra_monthly_cents {
        cli.extra_monthly_cents = v;
    }
    if payload.solve_target_age.is_some() {
        cli.solve_target_age = payload.solve_target_age;
    }

    let inputs = build_inputs(&cli)?;
    Ok(ApiRequest {
        inputs,
        extra_monthly_cents: cli.extra_monthly_cents,
        solve_target_age: cli.solve_target_age,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        as_of: None,
        target_retirement_age: None,
        monthly_income: 1_000_000,
        monthly_total_spend: 500_000,
        monthly_essentials: 300_000,
        savings_rate: None,
        top_categories: Vec::new(),
        outside_balance: 5_000_000,
        mandatory_balance: 10_000_000,
        profile_mandatory_balance: 0,
        contribution_rate: 11.5,
        expected_return: 7.0,
        outside_return: None,
        income_growth: 0.0,
        spending_growth: 0.0,
        variant: CliVariant::Regular,
        annual_expense_override: None,
        report: CliReport::Gameplan,
        extra_monthly_cents: 50_000,
        solve_target_age: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        let mut cli = default_cli_for_api();
        cli.as_of = NaiveDate::from_ymd_opt(2026, 10, 15);
        cli
    }

    #[test]
    fn build_inputs_derives_savings_rate_when_missing() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        assert_approx(inputs.spending.savings_rate, 50.0);
        assert_eq!(inputs.total_portfolio(), 15_000_000);
    }

    #[test]
    fn build_inputs_keeps_explicit_savings_rate() {
        let mut cli = sample_cli();
        cli.savings_rate = Some(42.0);
        let inputs = build_inputs(&cli).expect("valid inputs");
        assert_approx(inputs.spending.savings_rate, 42.0);
    }

    #[test]
    fn build_inputs_rejects_essentials_above_total() {
        let mut cli = sample_cli();
        cli.monthly_essentials = 600_000;
        let err = build_inputs(&cli).expect_err("must reject essentials above total");
        assert!(err.to_string().contains("essentials"));
    }

    #[test]
    fn build_inputs_rejects_negative_balance() {
        let mut cli = sample_cli();
        cli.outside_balance = -1;
        let err = build_inputs(&cli).expect_err("must reject negative balance");
        assert!(err.to_string().contains("outside balance"));
    }

    #[test]
    fn parse_category_splits_on_last_equals() {
        let category = parse_category("Eating out = fun=45000").expect("valid category");
        assert_eq!(category.name, "Eating out = fun");
        assert_eq!(category.monthly_cents, 45_000);
        assert!(parse_category("Rent").is_err());
        assert!(parse_category("=100").is_err());
        assert!(parse_category("Rent=abc").is_err());
    }

    #[test]
    fn cli_parses_flags_and_categories() {
        let cli = Cli::parse_from([
            "fireplan",
            "--date-of-birth",
            "1988-04-02",
            "--as-of",
            "2026-10-15",
            "--monthly-income",
            "1200000",
            "--monthly-total-spend",
            "600000",
            "--monthly-essentials",
            "350000",
            "--top-category",
            "Rent=250000",
            "--top-category",
            "Dining=60000",
            "--variant",
            "lean",
            "--income-growth",
            "-1.5",
            "--report",
            "solve",
        ]);
        assert_eq!(cli.variant, CliVariant::Lean);
        assert_eq!(cli.report, CliReport::Solve);
        assert_eq!(cli.top_categories.len(), 2);
        assert_eq!(cli.top_categories[1].name, "Dining");
        assert_approx(cli.income_growth, -1.5);
        assert_approx(cli.contribution_rate, 11.5);
    }

    #[test]
    fn api_request_from_json_parses_camel_case_keys() {
        let json = r#"{
            "dateOfBirth": "1985-05-20",
            "asOf": "2026-01-01",
            "targetRetirementAge": 55,
            "monthlyIncome": 1200000,
            "monthlyTotalSpend": 450000,
            "monthlyEssentials": 250000,
            "topCategories": [{"name": "Rent", "monthlyCents": 200000}],
            "outsideBalance": 20000000,
            "mandatoryBalance": 0,
            "profileMandatoryBalance": 7500000,
            "contributionRate": 12,
            "expectedReturn": 6.5,
            "outsideReturn": 5,
            "variant": "fat",
            "annualExpenseOverride": 9000000,
            "extraMonthlyCents": 25000,
            "solveTargetAge": 50
        }"#;

        let request = api_request_from_json(json).expect("json should parse");
        let inputs = &request.inputs;
        assert_eq!(
            inputs.profile.date_of_birth,
            NaiveDate::from_ymd_opt(1985, 5, 20).expect("valid date")
        );
        assert_eq!(inputs.as_of, NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"));
        assert_eq!(inputs.profile.target_retirement_age, Some(55));
        assert_eq!(inputs.profile.variant, FireVariant::Fat);
        assert_eq!(inputs.profile.annual_expense_override, Some(9_000_000));
        assert_eq!(inputs.profile.outside_return, Some(5.0));
        assert_eq!(inputs.spending.top_categories[0].name, "Rent");
        assert_eq!(inputs.mandatory_balance(), 7_500_000);
        assert_eq!(request.extra_monthly_cents, 25_000);
        assert_eq!(request.solve_target_age, Some(50));
    }

    #[test]
    fn api_request_from_json_uses_defaults_for_missing_keys() {
        let request = api_request_from_json("{}").expect("empty payload is valid");
        let defaults = default_cli_for_api();
        assert_eq!(request.inputs.spending.monthly_income, defaults.monthly_income);
        assert_eq!(request.inputs.profile.variant, FireVariant::Regular);
        assert_eq!(request.extra_monthly_cents, 50_000);
        assert_eq!(request.solve_target_age, None);
    }

    #[test]
    fn api_request_from_json_rejects_unknown_variant() {
        let err = api_request_from_json(r#"{"variant":"obese"}"#)
            .expect_err("must reject unknown variant");
        assert!(matches!(err, InputError::InvalidPayload(_)));
    }

    #[test]
    fn api_request_from_json_rejects_target_before_current_age() {
        let err = api_request_from_json(r#"{"asOf":"2026-01-01","targetRetirementAge":20}"#)
            .expect_err("must reject past target");
        assert!(matches!(err, InputError::TargetAgeOutOfRange { .. }));
    }

    #[test]
    fn malformed_query_string_becomes_invalid_payload() {
        let uri: axum::http::Uri = "/api/simulate?monthlyIncome=abc"
            .parse()
            .expect("uri should parse");
        let err = payload_from_query(Query::<ApiPayload>::try_from_uri(&uri))
            .expect_err("non-numeric income must be rejected");
        assert!(matches!(err, InputError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn malformed_body_returns_json_error() {
        let response = impact_handler(
            State(FireEngine::default()),
            Json::<ApiPayload>::from_bytes(b"{oops"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        let message = json["error"].as_str().expect("error message");
        assert!(message.starts_with("invalid API payload"), "{message}");
    }

    #[test]
    fn simulate_response_uses_camel_case_fields() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let result = FireEngine::default().simulate(&inputs);
        let json = serde_json::to_value(&result).expect("result should serialize");
        for key in [
            "currentAge",
            "fireNumber",
            "projectedAge",
            "projectedDate",
            "progressPercent",
            "totalPortfolio",
            "twoBucket",
            "variants",
            "projection",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["variant"], "regular");
        assert!(json["twoBucket"].get("yearsBeforePreservation").is_some());
        assert!(json["projection"][0].get("fireTarget").is_some());
    }

    #[test]
    fn gameplan_response_uses_wire_names() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let plan = FireEngine::default().gameplan(&inputs);
        let json = serde_json::to_value(&plan).expect("gameplan should serialize");
        assert!(json["actions"][0].get("type").is_some());
        assert!(json.get("savingsRateCurve").is_some());
        assert!(json.get("withdrawalRates").is_some());
        assert!(json.get("coastFire").is_some());
        assert_eq!(json["milestones"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn solve_report_prefers_explicit_then_profile_target() {
        let engine = FireEngine::default();
        let mut inputs = build_inputs(&sample_cli()).expect("valid inputs");

        let effective = engine.effective_target_age(&engine.simulate(&inputs), None);
        assert_eq!(solve_report(&engine, &inputs, None).target_age, effective);
        assert_eq!(solve_report(&engine, &inputs, Some(48)).target_age, 48);

        inputs.profile.target_retirement_age = Some(52);
        let report = solve_report(&engine, &inputs, None);
        assert_eq!(report.target_age, 52);
        assert_eq!(report.income.target_age, 52);
        assert_eq!(report.savings.target_age, 52);
    }

    #[test]
    fn impact_report_serializes_both_sides() {
        let engine = FireEngine::default();
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let report = impact_report(&engine, &inputs, 100_000);
        let json = serde_json::to_value(&report).expect("impact should serialize");
        assert_eq!(json["savings"]["extraMonthlyCents"], 100_000);
        assert_eq!(json["income"]["extraContributionMonthlyCents"], 11_500);
        assert!(json["income"].get("yearsSaved").is_some());
    }

    #[test]
    fn run_cli_prints_requested_report() {
        let out = run_cli([
            "fireplan",
            "--date-of-birth",
            "1991-03-10",
            "--as-of",
            "2026-10-15",
            "--monthly-income",
            "1000000",
            "--monthly-total-spend",
            "500000",
            "--monthly-essentials",
            "300000",
            "--contribution-rate",
            "0",
            "--expected-return",
            "0",
            "--report",
            "simulate",
        ])
        .expect("report should build");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(json["projectedAge"], 60);
        assert_eq!(json["fireNumber"], 150_000_000);
    }

    #[test]
    fn run_cli_surfaces_validation_errors() {
        let err = run_cli([
            "fireplan",
            "--date-of-birth",
            "1991-03-10",
            "--monthly-income=-5",
            "--monthly-total-spend",
            "500000",
            "--monthly-essentials",
            "300000",
        ])
        .expect_err("negative income must fail");
        assert!(matches!(err, InputError::NegativeAmount { .. }));
    }
}
