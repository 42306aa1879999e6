use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{compute_cost, cost_warnings, CostResult, HousingInput, HousingType};
use super::down_payment::{compute_down_payment_options, option_warnings, DownPaymentOption};
use super::first_year::{compute_first_year_summary, FirstYearSummary};
use super::forecast::{compute_forecast, forecast_warnings, ForecastPoint};
use super::one_time::{compute_one_time_costs, OneTimeCosts};
use super::rent::estimate_rent_equivalent;
use super::savings::{assess_savings, SavingsAssessment};
use super::sensitivity::{compute_sensitivity, SensitivityResult};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HousingBudgetResult;

/// Smallest down payment lenders accept, as a share of the price.
pub const MINIMUM_DOWN_PAYMENT_RATIO: Rate = dec!(0.15);

/// Every derived figure for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingAnalysis {
    pub housing_type: HousingType,
    pub cost: CostResult,
    pub one_time_costs: OneTimeCosts,
    pub sensitivity: SensitivityResult,
    pub forecast: Vec<ForecastPoint>,
    pub down_payment_options: Vec<DownPaymentOption>,
    /// Estimated monthly rent for a comparable rental
    pub rent_equivalent: Money,
    pub first_year: FirstYearSummary,
    pub savings: SavingsAssessment,
}

/// Run the cost calculation and, only when it succeeds, every dependent
/// analysis.
pub fn analyze_housing(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<HousingAnalysis>> {
    let start = Instant::now();
    log::debug!(
        "analysing {} scenario at price {}",
        input.housing_type.label(),
        input.price
    );

    let cost = compute_cost(input)?;
    let one_time_costs = compute_one_time_costs(input)?;
    let sensitivity = compute_sensitivity(input, &cost)?;
    let forecast = compute_forecast(input, &cost)?;
    let down_payment_options = compute_down_payment_options(input)?;
    let rent_equivalent = estimate_rent_equivalent(input.price, input.living_area_sqm);
    let first_year = compute_first_year_summary(input, &cost, &one_time_costs);
    let savings = assess_savings(input, &one_time_costs);

    let analysis = HousingAnalysis {
        housing_type: input.housing_type,
        cost,
        one_time_costs,
        sensitivity,
        forecast,
        down_payment_options,
        rent_equivalent,
        first_year,
        savings,
    };

    let warnings = analysis_warnings(input, &analysis);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Housing Purchase Analysis (amortization requirement, costs, stress test, forecast)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

fn analysis_warnings(input: &HousingInput, analysis: &HousingAnalysis) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.down_payment < input.price * MINIMUM_DOWN_PAYMENT_RATIO {
        warnings.push(format!(
            "Down payment is below {}% of the price — exceeds the mortgage cap",
            (MINIMUM_DOWN_PAYMENT_RATIO * dec!(100)).normalize()
        ));
    }

    warnings.extend(cost_warnings(input, &analysis.cost));
    warnings.extend(forecast_warnings(&analysis.cost, &analysis.forecast));
    warnings.extend(option_warnings(&analysis.down_payment_options));

    let savings = &analysis.savings;
    if !savings.has_sufficient_savings {
        warnings.push(format!(
            "Savings fall {} short of the cash needed on purchase day",
            savings.surplus_or_shortfall.abs().round_dp(0)
        ));
    }

    warnings
}
