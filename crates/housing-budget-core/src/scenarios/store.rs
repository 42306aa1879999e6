use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use super::repository::{new_scenario, SavedScenario, ScenarioRepository};
use crate::housing::cost::{CostResult, HousingInput};
use crate::HousingBudgetResult;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Scenario store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct InMemoryScenarioStore {
    scenarios: Vec<SavedScenario>,
}

impl InMemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioRepository for InMemoryScenarioStore {
    fn list_all(&self) -> HousingBudgetResult<Vec<SavedScenario>> {
        Ok(self.scenarios.clone())
    }

    fn save(
        &mut self,
        name: &str,
        input: HousingInput,
        result: CostResult,
    ) -> HousingBudgetResult<SavedScenario> {
        let scenario = new_scenario(&self.scenarios, name, input, result, Utc::now())?;
        self.scenarios.push(scenario.clone());
        Ok(scenario)
    }

    fn delete(&mut self, id: &str) -> HousingBudgetResult<bool> {
        let before = self.scenarios.len();
        self.scenarios.retain(|s| s.id != id);
        Ok(self.scenarios.len() != before)
    }

    fn clear(&mut self) -> HousingBudgetResult<()> {
        self.scenarios.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Scenario store persisted as a JSON array in a single file.
///
/// A missing file is an empty store. A file that cannot be read or parsed
/// is logged and treated as empty; the next save overwrites it.
#[derive(Debug, Clone)]
pub struct JsonFileScenarioStore {
    path: PathBuf,
}

impl JsonFileScenarioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Vec<SavedScenario> {
        if !self.path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("failed to read scenario store {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(scenarios) => scenarios,
            Err(e) => {
                log::warn!("failed to parse scenario store {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    fn write(&self, scenarios: &[SavedScenario]) -> HousingBudgetResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(scenarios)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScenarioRepository for JsonFileScenarioStore {
    fn list_all(&self) -> HousingBudgetResult<Vec<SavedScenario>> {
        Ok(self.load())
    }

    fn save(
        &mut self,
        name: &str,
        input: HousingInput,
        result: CostResult,
    ) -> HousingBudgetResult<SavedScenario> {
        let mut scenarios = self.load();
        let scenario = new_scenario(&scenarios, name, input, result, Utc::now())?;
        scenarios.push(scenario.clone());
        self.write(&scenarios)?;
        log::info!(
            "saved scenario '{}' as {} ({} stored)",
            scenario.name,
            scenario.id,
            scenarios.len()
        );
        Ok(scenario)
    }

    fn delete(&mut self, id: &str) -> HousingBudgetResult<bool> {
        let mut scenarios = self.load();
        let before = scenarios.len();
        scenarios.retain(|s| s.id != id);
        if scenarios.len() == before {
            return Ok(false);
        }
        self.write(&scenarios)?;
        log::info!("deleted scenario {id}");
        Ok(true)
    }

    fn clear(&mut self) -> HousingBudgetResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
