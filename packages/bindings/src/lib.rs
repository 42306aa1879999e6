use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use housing_budget_core::housing::{self, HousingInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_input(input_json: &str) -> NapiResult<HousingInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Core cost
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_cost(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_cost(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_one_time_costs(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_one_time_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Derived analyses
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sensitivity(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_forecast(input_json: String, years: Option<Vec<u32>>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output =
        housing::calculate_forecast(&input, years.as_deref()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_down_payment_options(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_down_payment_options(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly rent estimate. Decimal amounts are passed as strings.
#[napi]
pub fn estimate_rent_equivalent(
    price: String,
    living_area_sqm: Option<String>,
) -> NapiResult<String> {
    let price: Decimal = price.trim().parse().map_err(to_napi_error)?;
    let area = living_area_sqm
        .map(|a| a.trim().parse::<Decimal>())
        .transpose()
        .map_err(to_napi_error)?;
    Ok(housing::estimate_rent_equivalent(price, area).to_string())
}

#[napi]
pub fn calculate_first_year(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_first_year(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_savings(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::calculate_savings(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_housing(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = housing::analyze_housing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
