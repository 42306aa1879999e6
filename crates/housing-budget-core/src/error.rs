use thiserror::Error;

#[derive(Debug, Error)]
pub enum HousingBudgetError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Scenario limit reached: at most {max} scenarios can be saved, delete one first")]
    ScenarioLimitReached { max: usize },

    #[error("Invalid scenario name: {0}")]
    InvalidScenarioName(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HousingBudgetError {
    fn from(e: serde_json::Error) -> Self {
        HousingBudgetError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for HousingBudgetError {
    fn from(e: std::io::Error) -> Self {
        HousingBudgetError::Storage(e.to_string())
    }
}
