use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::cost::{validate_input, HousingInput, HousingType};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HousingBudgetResult;

/// Title registration fee as a share of the price.
pub const REGISTRATION_FEE_RATE: Rate = dec!(0.015);

/// Flat administrative floor of the registration fee.
pub const REGISTRATION_FEE_MINIMUM: Money = dec!(825);

/// Mortgage deed fee as a share of the newly secured loan.
pub const LIEN_FEE_RATE: Rate = dec!(0.02);

/// Upper bound applied to the mortgage deed fee.
pub const LIEN_FEE_CAP: Money = dec!(76_000);

/// Cash due on the day of purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeCosts {
    pub down_payment: Money,
    pub registration_fee: Money,
    pub lien_fee: Money,
    pub broker_fee: Money,
    pub other: Money,
    pub total: Money,
}

/// Break down the day-one cash outlay. Registration and mortgage deed fees
/// depend on the housing type.
pub fn compute_one_time_costs(input: &HousingInput) -> HousingBudgetResult<OneTimeCosts> {
    validate_input(input)?;

    let loan_amount = input.financed_price() - input.down_payment;
    let registration_fee = registration_fee(input.housing_type, input.price);
    let lien_fee = lien_fee(input.housing_type, loan_amount, input.lien_already_exists);

    let total = input.down_payment
        + registration_fee
        + lien_fee
        + input.broker_fee
        + input.other_one_time_costs;

    Ok(OneTimeCosts {
        down_payment: input.down_payment,
        registration_fee,
        lien_fee,
        broker_fee: input.broker_fee,
        other: input.other_one_time_costs,
        total,
    })
}

/// Enveloped variant of [`compute_one_time_costs`].
pub fn calculate_one_time_costs(
    input: &HousingInput,
) -> HousingBudgetResult<ComputationOutput<OneTimeCosts>> {
    let start = Instant::now();
    let result = compute_one_time_costs(input)?;

    let mut warnings = Vec::new();
    if input.registration_fee > Decimal::ZERO && input.registration_fee != result.registration_fee {
        warnings.push(format!(
            "Entered registration fee {} differs from the computed {}",
            input.registration_fee, result.registration_fee
        ));
    }
    if input.lien_fee > Decimal::ZERO && input.lien_fee != result.lien_fee {
        warnings.push(format!(
            "Entered mortgage deed fee {} differs from the computed {}",
            input.lien_fee, result.lien_fee
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-Time Purchase Costs",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Registration fee: co-ops carry none, other types pay 1.5% of the price
/// with a flat floor.
pub fn registration_fee(housing_type: HousingType, price: Money) -> Money {
    match housing_type {
        HousingType::Cooperative => Decimal::ZERO,
        HousingType::DetachedHouse | HousingType::RowHouse | HousingType::NewConstruction => {
            (price * REGISTRATION_FEE_RATE).max(REGISTRATION_FEE_MINIMUM)
        }
    }
}

/// Mortgage deed fee: co-ops carry none, and nothing is due when deeds
/// already cover the loan. Otherwise 2% of the loan, capped.
pub fn lien_fee(housing_type: HousingType, loan_amount: Money, lien_already_exists: bool) -> Money {
    match housing_type {
        HousingType::Cooperative => Decimal::ZERO,
        HousingType::DetachedHouse | HousingType::RowHouse | HousingType::NewConstruction => {
            if lien_already_exists {
                Decimal::ZERO
            } else {
                (loan_amount * LIEN_FEE_RATE).min(LIEN_FEE_CAP)
            }
        }
    }
}
