pub mod repository;
pub mod store;

pub use repository::{SavedScenario, ScenarioRepository, MAX_SCENARIOS};
pub use store::{InMemoryScenarioStore, JsonFileScenarioStore};
