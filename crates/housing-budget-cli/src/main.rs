mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::housing::{ForecastArgs, RentArgs, ScenarioInputArgs};
use commands::scenario::ScenarioArgs;

/// Housing purchase budget calculations
#[derive(Parser)]
#[command(
    name = "hbudget",
    version,
    about = "Housing purchase budget calculations",
    long_about = "A CLI for working out what a housing purchase costs with decimal precision. \
                  Covers the amortization requirement, monthly and yearly costs, one-time \
                  purchase costs, rate and energy stress tests, multi-year forecasts, \
                  down payment comparisons and rent comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Loan, amortization requirement and monthly/yearly cost
    Cost(ScenarioInputArgs),
    /// Cash due on purchase day (down payment, registration, mortgage deeds, fees)
    OneTimeCosts(ScenarioInputArgs),
    /// Monthly cost with the rate +1/+2 points and electricity doubled
    Sensitivity(ScenarioInputArgs),
    /// Remaining loan, cost to date and equity over the years
    Forecast(ForecastArgs),
    /// Compare 15%, 20%, 30% and 50% down payment
    DownPayment(ScenarioInputArgs),
    /// Estimate the monthly rent of a comparable rental
    Rent(RentArgs),
    /// Everything paid in the first year, purchase day included
    FirstYear(ScenarioInputArgs),
    /// Check savings against the cash needed on purchase day
    Savings(ScenarioInputArgs),
    /// Run every analysis on one scenario
    Analyze(ScenarioInputArgs),
    /// Save, list, show and delete named scenarios
    Scenario(ScenarioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Cost(args) => commands::housing::run_cost(args),
        Commands::OneTimeCosts(args) => commands::housing::run_one_time_costs(args),
        Commands::Sensitivity(args) => commands::housing::run_sensitivity(args),
        Commands::Forecast(args) => commands::housing::run_forecast(args),
        Commands::DownPayment(args) => commands::housing::run_down_payment(args),
        Commands::Rent(args) => commands::housing::run_rent(args),
        Commands::FirstYear(args) => commands::housing::run_first_year(args),
        Commands::Savings(args) => commands::housing::run_savings(args),
        Commands::Analyze(args) => commands::housing::run_analyze(args),
        Commands::Scenario(args) => commands::scenario::run_scenario(args),
        Commands::Version => {
            println!("hbudget {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
