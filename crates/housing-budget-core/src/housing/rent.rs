use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Money;

/// Monthly rent per square metre used for the rental comparison.
pub const RENT_PER_SQM_MONTHLY: Money = dec!(150);

/// Reference pair used to infer a living area from the price when none is
/// given: a home of this price is assumed to have `REFERENCE_AREA_SQM`.
pub const REFERENCE_PRICE: Money = dec!(3_000_000);
pub const REFERENCE_AREA_SQM: Decimal = dec!(75);

/// Estimated monthly rent for a comparable rental apartment.
pub fn estimate_rent_equivalent(price: Money, living_area_sqm: Option<Decimal>) -> Money {
    estimated_area(price, living_area_sqm) * RENT_PER_SQM_MONTHLY
}

/// Living area if given and positive, otherwise implied by the price.
pub fn estimated_area(price: Money, living_area_sqm: Option<Decimal>) -> Decimal {
    match living_area_sqm {
        Some(area) if area > Decimal::ZERO => area,
        _ => price / REFERENCE_PRICE * REFERENCE_AREA_SQM,
    }
}
