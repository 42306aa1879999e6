pub mod error;
pub mod types;

#[cfg(feature = "housing")]
pub mod housing;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::HousingBudgetError;
pub use types::*;

/// Standard result type for all housing-budget operations
pub type HousingBudgetResult<T> = Result<T, HousingBudgetError>;
