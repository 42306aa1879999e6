use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{HousingInput, MONTHS_PER_YEAR};
use super::one_time::{compute_one_time_costs, OneTimeCosts};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HousingBudgetResult;

/// Recommended buffer for unforeseen purchase costs, as a share of the
/// day-one need.
pub const BUFFER_RATE: Rate = dec!(0.10);

/// Saving periods offered to close a shortfall, with the largest share of
/// monthly income each may take to count as realistic, and the verdict
/// used when income is unknown.
pub const SAVINGS_PLAN_TERMS: [(u32, Rate, bool); 3] = [
    (12, dec!(0.30), false),
    (24, dec!(0.25), true),
    (36, dec!(0.20), true),
];

/// A monthly saving target to close a shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub months: u32,
    pub monthly_amount: Money,
    pub realistic: bool,
}

/// Savings set against the cash needed on purchase day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAssessment {
    /// Cash the buyer has put aside (the down payment)
    pub savings: Money,
    /// Total one-time cost on purchase day
    pub required_at_purchase: Money,
    /// Savings minus requirement; negative is a shortfall
    pub surplus_or_shortfall: Money,
    pub has_sufficient_savings: bool,
    /// Savings as a share of the requirement, capped at 1
    pub coverage_ratio: Rate,
    /// 10% of the requirement, whole currency units
    pub recommended_buffer: Money,
    /// Empty when savings already cover the requirement
    pub savings_plans: Vec<SavingsPlan>,
}

pub fn assess_savings(input: &HousingInput, one_time: &OneTimeCosts) -> SavingsAssessment {
    let savings = input.down_payment;
    let required_at_purchase = one_time.total;
    let surplus_or_shortfall = savings - required_at_purchase;
    let has_sufficient_savings = surplus_or_shortfall >= Decimal::ZERO;

    let coverage_ratio = if required_at_purchase.is_zero() {
        Decimal::ONE
    } else {
        (savings / required_at_purchase).min(Decimal::ONE)
    };

    let savings_plans = if has_sufficient_savings {
        Vec::new()
    } else {
        let shortfall = surplus_or_shortfall.abs();
        let monthly_income = input.provided_income().map(|income| income / MONTHS_PER_YEAR);
        SAVINGS_PLAN_TERMS
            .iter()
            .map(|&(months, max_income_share, default_realistic)| {
                let monthly_amount = shortfall / Decimal::from(months);
                let realistic = match monthly_income {
                    Some(income) => monthly_amount < income * max_income_share,
                    None => default_realistic,
                };
                SavingsPlan {
                    months,
                    monthly_amount,
                    realistic,
                }
            })
            .collect()
    };

    SavingsAssessment {
        savings,
        required_at_purchase,
        surplus_or_shortfall,
        has_sufficient_savings,
        coverage_ratio,
        recommended_buffer: (required_at_purchase * BUFFER_RATE)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        savings_plans,
    }
}

/// Enveloped variant: computes the one-time costs itself.
pub fn calculate_savings(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<SavingsAssessment>> {
    let start = Instant::now();
    let one_time = compute_one_time_costs(input)?;
    let assessment = assess_savings(input, &one_time);

    let mut warnings = Vec::new();
    if !assessment.has_sufficient_savings {
        warnings.push(format!(
            "Savings fall {} short of the cash needed on purchase day",
            assessment.surplus_or_shortfall.abs().round_dp(0)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Purchase-Day Savings Check",
        input,
        warnings,
        elapsed,
        assessment,
    ))
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
            annual_income: None,
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
            other_one_time_costs: dec!(14_000),
            lien_already_exists: false,
        }
    }

    #[test]
    fn test_shortfall_from_fees() {
        let input = sample_input();
        let one_time = compute_one_time_costs(&input).unwrap();
        let a = assess_savings(&input, &one_time);

        // need = 450k + 45k + 51k + 14k = 560k
        assert_eq!(a.required_at_purchase, dec!(560_000));
        assert_eq!(a.surplus_or_shortfall, dec!(-110_000));
        assert!(!a.has_sufficient_savings);
        assert_eq!(a.recommended_buffer, dec!(56_000));
        assert_eq!(a.savings_plans.len(), 3);
        assert_eq!(a.savings_plans[1].monthly_amount.round_dp(2), dec!(4_583.33));
    }

    #[test]
    fn test_default_realism_without_income() {
        let input = sample_input();
        let one_time = compute_one_time_costs(&input).unwrap();
        let flags: Vec<bool> = assess_savings(&input, &one_time)
            .savings_plans
            .iter()
            .map(|p| p.realistic)
            .collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_realism_from_income() {
        let mut input = sample_input();
        // 30k/month income: 12m plan 9,167 > 9,000 (30%), 24m 4,583 < 7,500, 36m 3,056 < 6,000
        input.annual_income = Some(dec!(360_000));
        let one_time = compute_one_time_costs(&input).unwrap();
        let flags: Vec<bool> = assess_savings(&input, &one_time)
            .savings_plans
            .iter()
            .map(|p| p.realistic)
            .collect();
        assert_eq!(flags, vec![false, true, true]);

        input.annual_income = Some(dec!(1_200_000));
        let flags: Vec<bool> = assess_savings(&input, &one_time)
            .savings_plans
            .iter()
            .map(|p| p.realistic)
            .collect();
        assert_eq!(flags, vec![true, true, true]);
    }

    #[test]
    fn test_cooperative_buyer_with_enough_savings() {
        let mut input = sample_input();
        input.housing_type = HousingType::Cooperative;
        input.other_one_time_costs = Decimal::ZERO;
        let one_time = compute_one_time_costs(&input).unwrap();
        let a = assess_savings(&input, &one_time);

        assert!(a.has_sufficient_savings);
        assert_eq!(a.coverage_ratio, Decimal::ONE);
        assert!(a.savings_plans.is_empty());
    }

    #[test]
    fn test_envelope_warns_on_shortfall() {
        let out = calculate_savings(&sample_input()).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
