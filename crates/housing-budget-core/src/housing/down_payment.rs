use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{compute_cost, HousingInput};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HousingBudgetResult;

/// Candidate down payments as a share of the price, in presentation order.
pub const CANDIDATE_RATIOS: [Rate; 4] = [dec!(0.15), dec!(0.20), dec!(0.30), dec!(0.50)];

/// One row of the down-payment comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentOption {
    pub ratio: Rate,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub loan_to_value_ratio: Rate,
    pub amortization_rate: Rate,
    pub total_monthly_cost: Money,
    /// False when down payment plus co-op share would exceed the price. The
    /// row is then costed with the whole financed price paid in cash.
    pub feasible: bool,
}

/// Recompute the scenario at 15%, 20%, 30% and 50% down payment.
///
/// Always yields one row per ratio for any input [`compute_cost`] accepts.
pub fn compute_down_payment_options(
    input: &HousingInput,
) -> HousingBudgetResult<Vec<DownPaymentOption>> {
    compute_cost(input)?;
    let financed_price = input.financed_price();

    CANDIDATE_RATIOS
        .iter()
        .map(|&ratio| -> HousingBudgetResult<DownPaymentOption> {
            let down_payment = input.price * ratio;
            let feasible = down_payment <= financed_price;
            let costed = if feasible { down_payment } else { financed_price };
            let result = compute_cost(&input.with_down_payment(costed))?;
            Ok(DownPaymentOption {
                ratio,
                down_payment,
                loan_amount: result.loan_amount,
                loan_to_value_ratio: result.loan_to_value_ratio,
                amortization_rate: result.amortization_rate,
                total_monthly_cost: result.total_monthly_cost,
                feasible,
            })
        })
        .collect()
}

/// Enveloped variant of [`compute_down_payment_options`].
pub fn calculate_down_payment_options(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<Vec<DownPaymentOption>>> {
    let start = Instant::now();
    let options = compute_down_payment_options(input)?;

    let warnings = option_warnings(&options);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Down Payment Comparison",
        input,
        warnings,
        elapsed,
        options,
    ))
}

pub(crate) fn option_warnings(options: &[DownPaymentOption]) -> Vec<String> {
    let infeasible: Vec<String> = options
        .iter()
        .filter(|o| !o.feasible)
        .map(|o| format!("{}%", (o.ratio * dec!(100)).normalize()))
        .collect();
    if infeasible.is_empty() {
        return Vec::new();
    }
    vec![format!(
        "Co-operative share leaves no room for a {} down payment — \
         costed as a debt-free purchase",
        infeasible.join(", ")
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::housing::cost::HousingType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_input() -> HousingInput {
        HousingInput {
            housing_type: HousingType::RowHouse,
            price: dec!(3_000_000),
            down_payment: dec!(900_000),
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

    #[test]
    fn test_rows_in_fixed_ratio_order() {
        let options = compute_down_payment_options(&sample_input()).unwrap();
        let ratios: Vec<Rate> = options.iter().map(|o| o.ratio).collect();
        assert_eq!(
            ratios,
            vec![dec!(0.15), dec!(0.20), dec!(0.30), dec!(0.50)]
        );
    }

    #[test]
    fn test_option_values() {
        let options = compute_down_payment_options(&sample_input()).unwrap();

        // 15%: loan 2.55M, LTV 0.85 -> 2% + tightened 1%
        assert_eq!(options[0].down_payment, dec!(450_000));
        assert_eq!(options[0].loan_amount, dec!(2_550_000));
        assert_eq!(options[0].amortization_rate, dec!(0.03));

        // 30%: loan 2.1M, LTV 0.70 -> 1%, below 4.5x income
        assert_eq!(options[2].loan_to_value_ratio, dec!(0.70));
        assert_eq!(options[2].amortization_rate, dec!(0.01));

        // 50%: LTV 0.50 -> 0%
        assert_eq!(options[3].amortization_rate, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_cost_falls_with_larger_down_payment() {
        let options = compute_down_payment_options(&sample_input()).unwrap();
        for pair in options.windows(2) {
            assert!(pair[1].total_monthly_cost < pair[0].total_monthly_cost);
        }
    }

    #[test]
    fn test_independent_of_current_down_payment() {
        let mut other = sample_input();
        other.down_payment = dec!(123_456);
        assert_eq!(
            compute_down_payment_options(&sample_input()).unwrap(),
            compute_down_payment_options(&other).unwrap()
        );
    }

    fn cooperative_with_large_share() -> HousingInput {
        HousingInput {
            housing_type: HousingType::Cooperative,
            price: dec!(2_000_000),
            down_payment: dec!(200_000),
            cooperative_share: Some(dec!(1_200_000)),
            annual_income: None,
            ..sample_input()
        }
    }

    #[test]
    fn test_large_cooperative_share_marks_row_infeasible() {
        let input = cooperative_with_large_share();
        assert_eq!(compute_cost(&input).unwrap().loan_amount, dec!(600_000));

        let options = compute_down_payment_options(&input).unwrap();
        assert_eq!(options.len(), CANDIDATE_RATIOS.len());
        assert!(options[..3].iter().all(|o| o.feasible));

        // 15%: 300k down on an 800k financed price
        assert_eq!(options[0].loan_amount, dec!(500_000));

        // 50%: 1M down + 1.2M share > 2M
        let half = &options[3];
        assert!(!half.feasible);
        assert_eq!(half.down_payment, dec!(1_000_000));
        assert_eq!(half.loan_amount, Decimal::ZERO);
        assert_eq!(half.amortization_rate, Decimal::ZERO);
    }

    #[test]
    fn test_infeasible_rows_warned() {
        let out = calculate_down_payment_options(&cooperative_with_large_share()).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("50%"));

        let clean = calculate_down_payment_options(&sample_input()).unwrap();
        assert!(clean.warnings.is_empty());
    }

    #[test]
    fn test_invalid_input_propagates() {
        let mut input = sample_input();
        input.renovation_interval_years = 0;
        assert!(compute_down_payment_options(&input).is_err());
    }
}
