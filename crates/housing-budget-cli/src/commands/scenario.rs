use clap::{Args, Subcommand};
use serde_json::Value;

use housing_budget_core::housing::{compute_cost, HousingInput};
use housing_budget_core::scenarios::{JsonFileScenarioStore, ScenarioRepository};
use housing_budget_core::HousingBudgetError;

use crate::input;

/// Arguments for managing saved scenarios
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path of the JSON file holding saved scenarios
    #[arg(long, default_value = "scenarios.json", global = true)]
    pub store: String,

    #[command(subcommand)]
    pub action: ScenarioAction,
}

#[derive(Subcommand)]
pub enum ScenarioAction {
    /// Calculate a scenario and save it under a name
    Save {
        /// Display name for the scenario
        #[arg(long)]
        name: String,
        /// Path to JSON or YAML scenario file (reads stdin when omitted)
        #[arg(long)]
        input: Option<String>,
    },
    /// List saved scenarios
    List,
    /// Show one saved scenario
    Show {
        #[arg(long)]
        id: String,
    },
    /// Delete one saved scenario
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Delete every saved scenario
    Clear,
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut store = JsonFileScenarioStore::new(&args.store);

    match args.action {
        ScenarioAction::Save { name, input } => {
            let scenario: HousingInput = input::load(input.as_deref(), "saving a scenario")?;
            let result = compute_cost(&scenario)?;
            let saved = store.save(&name, scenario, result)?;
            Ok(serde_json::to_value(saved)?)
        }
        ScenarioAction::List => {
            let summaries: Vec<Value> = store
                .list_all()?
                .into_iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "timestamp": s.timestamp,
                        "price": s.input.price,
                        "total_monthly_cost": s.result.total_monthly_cost,
                    })
                })
                .collect();
            Ok(Value::Array(summaries))
        }
        ScenarioAction::Show { id } => match store.get(&id)? {
            Some(scenario) => Ok(serde_json::to_value(scenario)?),
            None => Err(HousingBudgetError::ScenarioNotFound(id).into()),
        },
        ScenarioAction::Delete { id } => {
            if store.delete(&id)? {
                Ok(serde_json::json!({ "deleted": id }))
            } else {
                Err(HousingBudgetError::ScenarioNotFound(id).into())
            }
        }
        ScenarioAction::Clear => {
            store.clear()?;
            Ok(serde_json::json!({ "cleared": store.path().display().to_string() }))
        }
    }
}
