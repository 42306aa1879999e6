use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::HousingBudgetError;
use crate::housing::cost::{CostResult, HousingInput};
use crate::HousingBudgetResult;

/// Most scenarios a store keeps at once.
pub const MAX_SCENARIOS: usize = 5;

const ID_PREFIX: &str = "scenario_";

/// Newest id stamp handed out by this process.
static LAST_ISSUED_STAMP: AtomicI64 = AtomicI64::new(0);

/// A named input/result pair kept for later comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub id: String,
    pub name: String,
    pub input: HousingInput,
    pub result: CostResult,
    pub timestamp: DateTime<Utc>,
}

/// Keyed storage for saved scenarios. The calculation modules never use
/// this; callers inject a store where persistence is wanted.
pub trait ScenarioRepository {
    /// All scenarios in the order they were saved.
    fn list_all(&self) -> HousingBudgetResult<Vec<SavedScenario>>;

    fn get(&self, id: &str) -> HousingBudgetResult<Option<SavedScenario>> {
        Ok(self.list_all()?.into_iter().find(|s| s.id == id))
    }

    /// Store a new scenario. Fails on a blank name or when the store is
    /// full.
    fn save(
        &mut self,
        name: &str,
        input: HousingInput,
        result: CostResult,
    ) -> HousingBudgetResult<SavedScenario>;

    /// Remove a scenario. Returns whether anything was removed.
    fn delete(&mut self, id: &str) -> HousingBudgetResult<bool>;

    fn clear(&mut self) -> HousingBudgetResult<()>;
}

/// Apply the naming and capacity rules and build the record to append.
pub(crate) fn new_scenario(
    existing: &[SavedScenario],
    name: &str,
    input: HousingInput,
    result: CostResult,
    now: DateTime<Utc>,
) -> HousingBudgetResult<SavedScenario> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HousingBudgetError::InvalidScenarioName(
            "Scenario name cannot be empty".into(),
        ));
    }

    if existing.len() >= MAX_SCENARIOS {
        return Err(HousingBudgetError::ScenarioLimitReached { max: MAX_SCENARIOS });
    }

    Ok(SavedScenario {
        id: unique_id(existing, now),
        name: name.to_string(),
        input,
        result,
        timestamp: now,
    })
}

/// Ids are `scenario_<millis>`. The stamp is bumped past every stamp
/// already stored or issued, so an id is never handed out twice, even after
/// the scenario holding it was deleted.
fn unique_id(existing: &[SavedScenario], now: DateTime<Utc>) -> String {
    let newest_stored = existing
        .iter()
        .filter_map(|s| id_stamp(&s.id))
        .max()
        .unwrap_or(0);
    let floor = now.timestamp_millis().max(newest_stored.saturating_add(1));

    let next = |last: i64| floor.max(last.saturating_add(1));
    let previous = LAST_ISSUED_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
        .unwrap_or_else(|last| last);
    format!("{ID_PREFIX}{}", next(previous))
}

/// Millisecond stamp of an id, ignoring any `_n` suffix.
fn id_stamp(id: &str) -> Option<i64> {
    id.strip_prefix(ID_PREFIX)?.split('_').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_stamp_parsing() {
        assert_eq!(id_stamp("scenario_1700000000000"), Some(1_700_000_000_000));
        assert_eq!(id_stamp("scenario_1700000000000_2"), Some(1_700_000_000_000));
        assert_eq!(id_stamp("custom"), None);
    }
}
