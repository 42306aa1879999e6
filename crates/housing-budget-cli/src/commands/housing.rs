use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use housing_budget_core::housing::{
    self, analysis, down_payment, first_year, forecast, one_time, savings, sensitivity,
    HousingInput,
};

use crate::input;

/// Arguments shared by every command that takes a full scenario
#[derive(Args)]
pub struct ScenarioInputArgs {
    /// Path to JSON or YAML scenario file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

impl ScenarioInputArgs {
    fn load(&self, what: &str) -> Result<HousingInput, Box<dyn std::error::Error>> {
        input::load(self.input.as_deref(), what)
    }
}

/// Arguments for the multi-year forecast
#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub scenario: ScenarioInputArgs,

    /// Comma-separated horizons in years (default: 1,5,10 and the analysis horizon)
    #[arg(long, value_delimiter = ',')]
    pub years: Option<Vec<u32>>,
}

/// Arguments for the rent comparison
#[derive(Args)]
pub struct RentArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Decimal,

    /// Living area in square metres (implied from the price when omitted)
    #[arg(long)]
    pub area: Option<Decimal>,
}

pub fn run_cost(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("cost calculation")?;
    let result = housing::calculate_cost(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_one_time_costs(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("one-time costs")?;
    let result = one_time::calculate_one_time_costs(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("sensitivity analysis")?;
    let result = sensitivity::calculate_sensitivity(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_forecast(args: ForecastArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.scenario.load("forecast")?;
    let result = forecast::calculate_forecast(&scenario, args.years.as_deref())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_down_payment(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("down payment comparison")?;
    let result = down_payment::calculate_down_payment_options(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rent(args: RentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.price <= Decimal::ZERO {
        return Err("--price must be greater than 0".into());
    }
    let area = housing::rent::estimated_area(args.price, args.area);
    let rent = housing::estimate_rent_equivalent(args.price, args.area);
    Ok(serde_json::json!({
        "price": args.price,
        "living_area_sqm": area,
        "rent_per_sqm_monthly": housing::rent::RENT_PER_SQM_MONTHLY,
        "monthly_rent_equivalent": rent,
    }))
}

pub fn run_first_year(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("first-year summary")?;
    let result = first_year::calculate_first_year(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("savings check")?;
    let result = savings::calculate_savings(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyze(args: ScenarioInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = args.load("full analysis")?;
    let result = analysis::analyze_housing(&scenario)?;
    Ok(serde_json::to_value(result)?)
}
