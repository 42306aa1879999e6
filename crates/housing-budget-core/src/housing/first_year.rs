use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{compute_cost, CostResult, HousingInput, MONTHS_PER_YEAR};
use super::one_time::{compute_one_time_costs, OneTimeCosts};
use super::rent::estimate_rent_equivalent;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::HousingBudgetResult;

/// Everything paid during the first year of ownership, purchase day
/// included, set against renting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstYearSummary {
    /// Down payment and fees due at purchase
    pub payment_at_purchase: Money,
    /// Twelve months of running costs
    pub ongoing_first_year: Money,
    pub total_first_year: Money,
    /// First-year total spread over twelve months
    pub average_monthly_first_year: Money,
    /// Twelve months of the rent estimate
    pub estimated_annual_rent: Money,
    /// Positive when owning costs more than renting in year one
    pub difference_versus_rent: Money,
    /// Down payment plus the first year's amortization
    pub equity_after_first_year: Money,
}

pub fn compute_first_year_summary(
    input: &HousingInput,
    base: &CostResult,
    one_time: &OneTimeCosts,
) -> FirstYearSummary {
    let payment_at_purchase = one_time.total;
    let ongoing_first_year = base.total_annual_cost;
    let total_first_year = payment_at_purchase + ongoing_first_year;
    let estimated_annual_rent =
        estimate_rent_equivalent(input.price, input.living_area_sqm) * MONTHS_PER_YEAR;

    FirstYearSummary {
        payment_at_purchase,
        ongoing_first_year,
        total_first_year,
        average_monthly_first_year: total_first_year / MONTHS_PER_YEAR,
        estimated_annual_rent,
        difference_versus_rent: total_first_year - estimated_annual_rent,
        equity_after_first_year: input.down_payment + base.annual_amortization,
    }
}

/// Enveloped variant: computes the cost and one-time breakdown itself.
pub fn calculate_first_year(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<FirstYearSummary>> {
    let start = Instant::now();
    let base = compute_cost(input)?;
    let one_time = compute_one_time_costs(input)?;
    let summary = compute_first_year_summary(input, &base, &one_time);

    let mut warnings = Vec::new();
    if input.living_area_sqm.is_none() {
        warnings.push(
            "No living area given — rent comparison uses an area implied by the price".into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "First-Year Total Cost",
        input,
        warnings,
        elapsed,
        summary,
    ))
}
