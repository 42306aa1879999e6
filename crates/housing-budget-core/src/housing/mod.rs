pub mod analysis;
pub mod cost;
pub mod down_payment;
pub mod first_year;
pub mod forecast;
pub mod one_time;
pub mod rent;
pub mod savings;
pub mod sensitivity;

pub use analysis::{analyze_housing, HousingAnalysis};
pub use cost::{calculate_cost, compute_cost, CostResult, HousingInput, HousingType};
pub use down_payment::{
    calculate_down_payment_options, compute_down_payment_options, DownPaymentOption,
};
pub use first_year::{calculate_first_year, compute_first_year_summary, FirstYearSummary};
pub use forecast::{
    calculate_forecast, compute_forecast, compute_forecast_for_years, ForecastPoint,
};
pub use one_time::{calculate_one_time_costs, compute_one_time_costs, OneTimeCosts};
pub use rent::estimate_rent_equivalent;
pub use savings::{assess_savings, calculate_savings, SavingsAssessment, SavingsPlan};
pub use sensitivity::{calculate_sensitivity, compute_sensitivity, SensitivityResult};
