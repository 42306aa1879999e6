use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{compute_cost, CostResult, HousingInput};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HousingBudgetResult;

/// Interest rate shock of one percentage point.
pub const RATE_SHOCK_SMALL: Rate = dec!(0.01);

/// Interest rate shock of two percentage points.
pub const RATE_SHOCK_LARGE: Rate = dec!(0.02);

/// Multiplier applied to the electricity cost in the energy shock.
pub const ELECTRICITY_SHOCK_MULTIPLIER: Decimal = dec!(2);

/// Total monthly cost under each stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    /// Total monthly cost of the unperturbed scenario
    pub base_total_monthly_cost: Money,
    /// Interest rate +1 percentage point
    pub rate_plus_one_point: Money,
    /// Interest rate +2 percentage points
    pub rate_plus_two_points: Money,
    /// Electricity cost doubled
    pub electricity_doubled: Money,
}

/// Re-run the cost calculation with the rate raised by 1 and 2 percentage
/// points and with electricity doubled. Each run works on its own copy of
/// the input.
pub fn compute_sensitivity(
    input: &HousingInput,
    base: &CostResult,
) -> HousingBudgetResult<SensitivityResult> {
    let rate_plus_one =
        compute_cost(&input.with_interest_rate(input.annual_interest_rate + RATE_SHOCK_SMALL))?;
    let rate_plus_two =
        compute_cost(&input.with_interest_rate(input.annual_interest_rate + RATE_SHOCK_LARGE))?;
    let electricity = compute_cost(&input.with_electricity_cost(
        input.monthly_electricity_cost * ELECTRICITY_SHOCK_MULTIPLIER,
    ))?;

    Ok(SensitivityResult {
        base_total_monthly_cost: base.total_monthly_cost,
        rate_plus_one_point: rate_plus_one.total_monthly_cost,
        rate_plus_two_points: rate_plus_two.total_monthly_cost,
        electricity_doubled: electricity.total_monthly_cost,
    })
}

/// Enveloped variant: computes the base result itself, then the shocks.
pub fn calculate_sensitivity(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<SensitivityResult>> {
    let start = Instant::now();
    let base = compute_cost(input)?;
    let result = compute_sensitivity(input, &base)?;

    let mut warnings = Vec::new();
    let increase = result.rate_plus_two_points - result.base_total_monthly_cost;
    if !base.total_monthly_cost.is_zero() && increase / base.total_monthly_cost > dec!(0.25) {
        warnings.push(format!(
            "A 2 percentage point rate rise lifts monthly cost by {} (over 25%)",
            increase.round_dp(0)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rate and Energy Stress Test",
        input,
        warnings,
        elapsed,
        result,
    ))
}
