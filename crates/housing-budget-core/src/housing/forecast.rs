use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{
    annual_renovation_reserve, compute_cost, CostResult, HousingInput,
    MAX_ANALYSIS_HORIZON_YEARS, MONTHS_PER_YEAR,
};
use crate::error::HousingBudgetError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::HousingBudgetResult;

/// Assumed yearly property value appreciation, compounded.
pub const APPRECIATION_RATE: Rate = dec!(0.02);

/// Horizons always reported, in years.
pub const STANDARD_HORIZONS: [Years; 3] = [1, 5, 10];

/// Projected position after a number of years of ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: Years,
    /// Loan balance after `year` annual amortizations, floored at zero
    pub remaining_loan: Money,
    /// `annual_amortization * year`
    pub cumulative_amortization: Money,
    /// Interest (on the declining balance) + amortization + running costs +
    /// renovation reserve paid up to this year
    pub cumulative_cost_to_date: Money,
    pub estimated_property_value: Money,
    /// Down payment + amortization + appreciation
    pub estimated_equity: Money,
}

/// Forecast at 1, 5 and 10 years, plus the analysis horizon when it lies
/// beyond 10 years.
pub fn compute_forecast(
    input: &HousingInput,
    base: &CostResult,
) -> HousingBudgetResult<Vec<ForecastPoint>> {
    let mut years = STANDARD_HORIZONS.to_vec();
    if input.analysis_horizon_years > 10 {
        years.push(input.analysis_horizon_years);
    }
    compute_forecast_for_years(input, base, &years)
}

/// Forecast at an arbitrary set of horizons. Horizons are sorted, repeats
/// dropped, year 0 ignored. Horizons past [`MAX_ANALYSIS_HORIZON_YEARS`]
/// are rejected.
pub fn compute_forecast_for_years(
    input: &HousingInput,
    base: &CostResult,
    years: &[Years],
) -> HousingBudgetResult<Vec<ForecastPoint>> {
    let mut horizons: Vec<Years> = years.iter().copied().filter(|y| *y > 0).collect();
    horizons.sort_unstable();
    horizons.dedup();

    if let Some(&longest) = horizons.last() {
        if longest > MAX_ANALYSIS_HORIZON_YEARS {
            return Err(HousingBudgetError::InvalidInput {
                field: "years".into(),
                reason: format!(
                    "Forecast horizon {longest} exceeds {MAX_ANALYSIS_HORIZON_YEARS} years"
                ),
            });
        }
    }

    horizons
        .into_iter()
        .map(|year| forecast_point(input, base, year))
        .collect()
}

/// Enveloped variant: computes the base result itself.
pub fn calculate_forecast(
    input: &HousingInput,
    years: Option<&[Years]>,
) -> HousingBudgetResult<ComputationOutput<Vec<ForecastPoint>>> {
    let start = Instant::now();
    let base = compute_cost(input)?;
    let points = match years {
        Some(years) => compute_forecast_for_years(input, &base, years)?,
        None => compute_forecast(input, &base)?,
    };

    let warnings = forecast_warnings(&base, &points);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-Year Forecast (linear amortization, 2% appreciation)",
        input,
        warnings,
        elapsed,
        points,
    ))
}

pub(crate) fn forecast_warnings(base: &CostResult, points: &[ForecastPoint]) -> Vec<String> {
    match points.iter().find(|p| p.remaining_loan.is_zero()) {
        Some(paid_off) if !base.loan_amount.is_zero() => vec![format!(
            "Loan is fully amortized by year {}; later amortization figures are not capped",
            paid_off.year
        )],
        _ => Vec::new(),
    }
}

fn forecast_point(
    input: &HousingInput,
    base: &CostResult,
    year: Years,
) -> HousingBudgetResult<ForecastPoint> {
    let years = Decimal::from(year);
    let cumulative_amortization = base.annual_amortization * years;
    let remaining_loan = balance_at(base, year);

    // Interest is charged on the balance at the start of each year.
    let cumulative_interest: Money = (0..year)
        .map(|i| balance_at(base, i) * input.annual_interest_rate)
        .sum();

    let running_costs =
        (input.monthly_operating_cost + input.monthly_electricity_cost) * MONTHS_PER_YEAR * years;
    let renovation = annual_renovation_reserve(input) * years;
    let cumulative_cost_to_date =
        cumulative_interest + cumulative_amortization + running_costs + renovation;

    let estimated_property_value = estimated_value(input.price, year)?;
    let estimated_equity =
        input.down_payment + cumulative_amortization + (estimated_property_value - input.price);

    Ok(ForecastPoint {
        year,
        remaining_loan,
        cumulative_amortization,
        cumulative_cost_to_date,
        estimated_property_value,
        estimated_equity,
    })
}

fn balance_at(base: &CostResult, year: Years) -> Money {
    (base.loan_amount - base.annual_amortization * Decimal::from(year)).max(Decimal::ZERO)
}

/// Property value after `year` years of compounding appreciation.
pub fn estimated_value(price: Money, year: Years) -> HousingBudgetResult<Money> {
    (Decimal::ONE + APPRECIATION_RATE)
        .checked_powu(u64::from(year))
        .and_then(|growth| price.checked_mul(growth))
        .ok_or_else(|| HousingBudgetError::InvalidInput {
            field: "price".into(),
            reason: format!("Projected value after {year} years is out of range"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::housing::cost::HousingType;
    use rust_decimal_macros::dec;

    fn sample_input() -> HousingInput {
        HousingInput {
            housing_type: HousingType::DetachedHouse,
            price: dec!(3_000_000),
            down_payment: dec!(450_000),
            cooperative_share: None,
            annual_income: Some(dec!(500_000)),
            annual_interest_rate: dec!(0.045),
            monthly_operating_cost: dec!(3_000),
            monthly_electricity_cost: dec!(800),
            renovation_cost: dec!(200_000),
            renovation_interval_years: 10,
            analysis_horizon_years: 10,
            living_area_sqm: None,
            registration_fee: Decimal::ZERO,
            lien_fee: Decimal::ZERO,
            broker_fee: Decimal::ZERO,
            other_one_time_costs: Decimal::ZERO,
            lien_already_exists: false,
        }
    }

    fn forecast(input: &HousingInput) -> Vec<ForecastPoint> {
        let base = compute_cost(input).unwrap();
        compute_forecast(input, &base).unwrap()
    }

    #[test]
    fn test_standard_horizons() {
        let points = forecast(&sample_input());
        let years: Vec<Years> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1, 5, 10]);
    }

    #[test]
    fn test_long_horizon_appended() {
        let mut input = sample_input();
        input.analysis_horizon_years = 25;
        let years: Vec<Years> = forecast(&input).iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1, 5, 10, 25]);
    }

    #[test]
    fn test_short_horizon_not_appended() {
        let mut input = sample_input();
        input.analysis_horizon_years = 7;
        assert_eq!(forecast(&input).len(), 3);
    }

    #[test]
    fn test_year_five_values() {
        let points = forecast(&sample_input());
        let p5 = points.iter().find(|p| p.year == 5).unwrap();

        // 2.55M - 76.5k * 5
        assert_eq!(p5.remaining_loan, dec!(2_167_500));
        assert_eq!(p5.cumulative_amortization, dec!(382_500));
        // 3M * 1.02^5
        assert_eq!(p5.estimated_property_value.round_dp(4), dec!(3_312_242.4096));
        assert_eq!(
            p5.estimated_equity.round_dp(4),
            dec!(450_000) + dec!(382_500) + dec!(312_242.4096)
        );
    }

    #[test]
    fn test_interest_summed_on_declining_balance() {
        let points = forecast(&sample_input());
        let p5 = points.iter().find(|p| p.year == 5).unwrap();

        // balances at year start: 2.55M, 2.4735M, 2.397M, 2.3205M, 2.244M
        let interest = (dec!(2_550_000)
            + dec!(2_473_500)
            + dec!(2_397_000)
            + dec!(2_320_500)
            + dec!(2_244_000))
            * dec!(0.045);
        let running = dec!(3_800) * dec!(12) * dec!(5);
        let renovation = dec!(20_000) * dec!(5);
        assert_eq!(
            p5.cumulative_cost_to_date,
            interest + dec!(382_500) + running + renovation
        );
    }

    #[test]
    fn test_year_one_interest_equals_flat_figure() {
        let input = sample_input();
        let base = compute_cost(&input).unwrap();
        let p1 = &compute_forecast(&input, &base).unwrap()[0];
        assert_eq!(
            p1.cumulative_cost_to_date,
            base.annual_interest + base.annual_amortization + dec!(45_600) + dec!(20_000)
        );
    }

    #[test]
    fn test_remaining_loan_floored_and_monotonic() {
        let mut input = sample_input();
        input.analysis_horizon_years = 40;
        let base = compute_cost(&input).unwrap();
        let points =
            compute_forecast_for_years(&input, &base, &[1, 5, 10, 20, 33, 34, 40]).unwrap();

        for pair in points.windows(2) {
            assert!(pair[1].remaining_loan <= pair[0].remaining_loan);
            assert!(pair[1].estimated_property_value > pair[0].estimated_property_value);
        }
        let last = points.last().unwrap();
        assert_eq!(last.remaining_loan, Decimal::ZERO);
    }

    #[test]
    fn test_custom_years_sorted_and_deduplicated() {
        let input = sample_input();
        let base = compute_cost(&input).unwrap();
        let points = compute_forecast_for_years(&input, &base, &[10, 0, 3, 10, 1]).unwrap();
        let years: Vec<Years> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1, 3, 10]);
    }

    #[test]
    fn test_no_amortization_keeps_balance() {
        let mut input = sample_input();
        input.down_payment = dec!(1_500_000);
        input.annual_income = None;
        let points = forecast(&input);
        assert!(points.iter().all(|p| p.remaining_loan == dec!(1_500_000)));
    }

    #[test]
    fn test_longest_accepted_horizon() {
        let mut input = sample_input();
        input.analysis_horizon_years = MAX_ANALYSIS_HORIZON_YEARS;
        let points = forecast(&input);
        assert_eq!(points.last().unwrap().year, MAX_ANALYSIS_HORIZON_YEARS);
    }

    #[test]
    fn test_excessive_analysis_horizon_rejected() {
        let mut input = sample_input();
        input.analysis_horizon_years = 3_000;
        match calculate_forecast(&input, None).unwrap_err() {
            HousingBudgetError::InvalidInput { field, .. } => {
                assert_eq!(field, "analysis_horizon_years")
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_excessive_requested_year_rejected() {
        let input = sample_input();
        let base = compute_cost(&input).unwrap();
        match compute_forecast_for_years(&input, &base, &[5, 3_000]).unwrap_err() {
            HousingBudgetError::InvalidInput { field, .. } => assert_eq!(field, "years"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        assert!(estimated_value(Decimal::MAX, 50).is_err());
        assert_eq!(estimated_value(dec!(1_000_000), 0).unwrap(), dec!(1_000_000));
    }
}
