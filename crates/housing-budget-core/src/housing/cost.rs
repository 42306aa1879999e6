use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HousingBudgetError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::HousingBudgetResult;

// ---------------------------------------------------------------------------
// Regulatory constants
// ---------------------------------------------------------------------------

/// Above this loan-to-value ratio the base requirement is 2% per year.
pub const HIGH_LTV_THRESHOLD: Rate = dec!(0.70);

/// Above this loan-to-value ratio (and up to the high threshold) the base
/// requirement is 1% per year. At or below it there is no requirement.
pub const LOW_LTV_THRESHOLD: Rate = dec!(0.50);

pub const HIGH_LTV_AMORTIZATION: Rate = dec!(0.02);
pub const LOW_LTV_AMORTIZATION: Rate = dec!(0.01);

/// Loan-to-income multiple above which the tightened requirement applies.
pub const TIGHTENED_INCOME_MULTIPLE: Decimal = dec!(4.5);

/// Extra annual amortization under the tightened requirement.
pub const TIGHTENED_AMORTIZATION: Rate = dec!(0.01);

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest analysis horizon accepted, in years.
pub const MAX_ANALYSIS_HORIZON_YEARS: Years = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Form of tenure being purchased. Governs which one-time fees apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    /// Tenant-owned co-operative apartment (bostadsrätt). No title
    /// registration and no mortgage deeds.
    Cooperative,
    /// Freehold detached house (villa)
    #[default]
    DetachedHouse,
    /// Row or semi-detached house (radhus/parhus)
    RowHouse,
    /// Newly built home bought from the developer
    NewConstruction,
}

impl HousingType {
    pub fn label(&self) -> &'static str {
        match self {
            HousingType::Cooperative => "Co-operative apartment",
            HousingType::DetachedHouse => "Detached house",
            HousingType::RowHouse => "Row house",
            HousingType::NewConstruction => "New construction",
        }
    }
}

fn default_analysis_horizon() -> Years {
    10
}

/// Complete parameter set for one purchase scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingInput {
    /// Form of tenure
    #[serde(default)]
    pub housing_type: HousingType,
    /// Purchase price
    pub price: Money,
    /// Cash put down at purchase
    pub down_payment: Money,
    /// Co-op share of the association's debt that reduces the financed price.
    /// Ignored for every other housing type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooperative_share: Option<Money>,
    /// Gross annual household income (drives the tightened requirement)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<Money>,
    /// Annual mortgage interest rate (e.g. 0.045 = 4.5%)
    pub annual_interest_rate: Rate,
    /// Monthly operating cost (association fee, water, insurance, ...)
    pub monthly_operating_cost: Money,
    /// Monthly electricity cost
    pub monthly_electricity_cost: Money,
    /// Cost of one recurring renovation
    pub renovation_cost: Money,
    /// Years between renovations
    pub renovation_interval_years: Years,
    /// Horizon the buyer wants to analyse, in years
    #[serde(default = "default_analysis_horizon")]
    pub analysis_horizon_years: Years,
    /// Living area in square metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_area_sqm: Option<Decimal>,
    /// Registration fee quoted by the buyer
    #[serde(default)]
    pub registration_fee: Money,
    /// Mortgage deed fee quoted by the buyer
    #[serde(default)]
    pub lien_fee: Money,
    /// Broker fee payable by the buyer
    #[serde(default)]
    pub broker_fee: Money,
    /// Inspection, moving and other one-off costs
    #[serde(default)]
    pub other_one_time_costs: Money,
    /// Whether sufficient mortgage deeds already exist on the property
    #[serde(default)]
    pub lien_already_exists: bool,
}

impl HousingInput {
    /// Copy of this input with a different interest rate.
    pub fn with_interest_rate(&self, annual_interest_rate: Rate) -> Self {
        Self {
            annual_interest_rate,
            ..self.clone()
        }
    }

    /// Copy of this input with a different monthly electricity cost.
    pub fn with_electricity_cost(&self, monthly_electricity_cost: Money) -> Self {
        Self {
            monthly_electricity_cost,
            ..self.clone()
        }
    }

    /// Copy of this input with a different down payment.
    pub fn with_down_payment(&self, down_payment: Money) -> Self {
        Self {
            down_payment,
            ..self.clone()
        }
    }

    /// Co-op share that actually reduces the financed price (zero for
    /// non-co-op housing or when not provided).
    pub fn effective_cooperative_share(&self) -> Money {
        match self.housing_type {
            HousingType::Cooperative => self.cooperative_share.unwrap_or(Decimal::ZERO),
            HousingType::DetachedHouse | HousingType::RowHouse | HousingType::NewConstruction => {
                Decimal::ZERO
            }
        }
    }

    /// Price less the co-op share; the amount that is split into down
    /// payment and loan.
    pub fn financed_price(&self) -> Money {
        self.price - self.effective_cooperative_share()
    }

    /// Annual income when one was given. Zero counts as not given.
    pub fn provided_income(&self) -> Option<Money> {
        self.annual_income.filter(|income| *income > Decimal::ZERO)
    }
}

/// Monthly and yearly cost breakdown for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Financed price less down payment
    pub loan_amount: Money,
    /// Loan amount over the full purchase price
    pub loan_to_value_ratio: Rate,
    /// Total required annual amortization (base + tightened)
    pub amortization_rate: Rate,
    /// Requirement from the loan-to-value tier (0%, 1% or 2%)
    pub base_amortization_requirement: Rate,
    /// Requirement from the loan-to-income rule (0% or 1%)
    pub tightened_amortization_requirement: Rate,
    /// Whether the loan exceeds 4.5x the annual income
    pub tightened_requirement_applies: bool,
    pub annual_interest: Money,
    pub annual_amortization: Money,
    /// (interest + amortization) / 12
    pub monthly_loan_payment: Money,
    /// Straight-line reserve for the recurring renovation
    pub monthly_renovation_reserve: Money,
    pub monthly_operating_and_electricity: Money,
    pub total_monthly_cost: Money,
    pub total_annual_cost: Money,
    /// Average monthly cost over the analysis horizon. Uses the flat
    /// first-year model, so it equals `total_monthly_cost`.
    pub average_monthly_cost: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the loan, amortization requirement and monthly/yearly costs for
/// one scenario. Rejects invalid input before any arithmetic.
pub fn compute_cost(input: &HousingInput) -> HousingBudgetResult<CostResult> {
    validate_input(input)?;

    let loan_amount = input.financed_price() - input.down_payment;
    let loan_to_value_ratio = loan_amount / input.price;

    let base_amortization_requirement = base_requirement(loan_to_value_ratio);
    let tightened_requirement_applies = tightened_requirement_applies(loan_amount, input);
    let tightened_amortization_requirement = if tightened_requirement_applies {
        TIGHTENED_AMORTIZATION
    } else {
        Decimal::ZERO
    };
    let amortization_rate = base_amortization_requirement + tightened_amortization_requirement;

    let annual_interest = loan_amount * input.annual_interest_rate;
    let annual_amortization = loan_amount * amortization_rate;
    let monthly_loan_payment = (annual_interest + annual_amortization) / MONTHS_PER_YEAR;

    let monthly_renovation_reserve = annual_renovation_reserve(input) / MONTHS_PER_YEAR;
    let monthly_operating_and_electricity =
        input.monthly_operating_cost + input.monthly_electricity_cost;

    let total_monthly_cost =
        monthly_loan_payment + monthly_renovation_reserve + monthly_operating_and_electricity;
    let total_annual_cost = total_monthly_cost * MONTHS_PER_YEAR;

    Ok(CostResult {
        loan_amount,
        loan_to_value_ratio,
        amortization_rate,
        base_amortization_requirement,
        tightened_amortization_requirement,
        tightened_requirement_applies,
        annual_interest,
        annual_amortization,
        monthly_loan_payment,
        monthly_renovation_reserve,
        monthly_operating_and_electricity,
        total_monthly_cost,
        total_annual_cost,
        average_monthly_cost: total_monthly_cost,
    })
}

/// Enveloped variant of [`compute_cost`] with warnings and metadata.
pub fn calculate_cost(input: &HousingInput) -> HousingBudgetResult<ComputationOutput<CostResult>> {
    let start = Instant::now();
    log::debug!("calculating housing cost for price {}", input.price);

    let result = compute_cost(input)?;
    let warnings = cost_warnings(input, &result);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Housing Cost (Amortization Requirement + Running Costs)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Base amortization requirement for a loan-to-value ratio. Each tier
/// boundary belongs to the lower tier.
pub fn base_requirement(loan_to_value_ratio: Rate) -> Rate {
    if loan_to_value_ratio > HIGH_LTV_THRESHOLD {
        HIGH_LTV_AMORTIZATION
    } else if loan_to_value_ratio > LOW_LTV_THRESHOLD {
        LOW_LTV_AMORTIZATION
    } else {
        Decimal::ZERO
    }
}

/// Renovation cost spread evenly over its interval, per year.
pub fn annual_renovation_reserve(input: &HousingInput) -> Money {
    input.renovation_cost / Decimal::from(input.renovation_interval_years)
}

fn tightened_requirement_applies(loan_amount: Money, input: &HousingInput) -> bool {
    match input.provided_income() {
        Some(income) => loan_amount > TIGHTENED_INCOME_MULTIPLE * income,
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject input that violates the scenario invariants.
pub fn validate_input(input: &HousingInput) -> HousingBudgetResult<()> {
    if input.price <= Decimal::ZERO {
        return Err(HousingBudgetError::InvalidInput {
            field: "price".into(),
            reason: "Price must be greater than 0".into(),
        });
    }

    if input.down_payment < Decimal::ZERO {
        return Err(HousingBudgetError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }

    if input.down_payment > input.price {
        return Err(HousingBudgetError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot exceed the price".into(),
        });
    }

    if input.renovation_interval_years == 0 {
        return Err(HousingBudgetError::InvalidInput {
            field: "renovation_interval_years".into(),
            reason: "Renovation interval must be at least 1 year".into(),
        });
    }

    if input.analysis_horizon_years > MAX_ANALYSIS_HORIZON_YEARS {
        return Err(HousingBudgetError::InvalidInput {
            field: "analysis_horizon_years".into(),
            reason: format!("Analysis horizon cannot exceed {MAX_ANALYSIS_HORIZON_YEARS} years"),
        });
    }

    let share = input.effective_cooperative_share();
    if share < Decimal::ZERO {
        return Err(HousingBudgetError::InvalidInput {
            field: "cooperative_share".into(),
            reason: "Co-operative share cannot be negative".into(),
        });
    }
    if input.down_payment + share > input.price {
        return Err(HousingBudgetError::InvalidInput {
            field: "cooperative_share".into(),
            reason: "Down payment plus co-operative share cannot exceed the price".into(),
        });
    }

    Ok(())
}

pub(crate) fn cost_warnings(input: &HousingInput, result: &CostResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.annual_interest_rate < Decimal::ZERO || input.annual_interest_rate > Decimal::ONE {
        warnings.push(format!(
            "Interest rate {} is outside 0-100% — verify it is a decimal fraction",
            input.annual_interest_rate
        ));
    }

    if result.tightened_requirement_applies {
        warnings.push(format!(
            "Loan exceeds {TIGHTENED_INCOME_MULTIPLE}x annual income — \
             tightened amortization requirement (+1%) applies"
        ));
    } else if input.provided_income().is_none() && result.loan_to_value_ratio > LOW_LTV_THRESHOLD {
        warnings.push(
            "No annual income given — the tightened amortization requirement was not assessed"
                .into(),
        );
    }

    if input.monthly_operating_cost < Decimal::ZERO
        || input.monthly_electricity_cost < Decimal::ZERO
        || input.renovation_cost < Decimal::ZERO
    {
        warnings.push("Negative running or renovation cost entered".into());
    }

    warnings
}
