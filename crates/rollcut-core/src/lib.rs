//! Roll cutting calculation: how to slit a wide source roll into finished
//! rolls of a catalog width with the least waste, and how many source rolls
//! an order consumes.

pub mod catalog;
pub mod config;
pub mod form;
pub mod limits;
pub mod planner;
pub mod report;
pub mod types;

pub use catalog::{AllowedWidths, CatalogError};
pub use config::{CatalogPreset, CatalogSetting, ConfigError, PlannerConfig, RunBasis};
pub use form::CalculationForm;
pub use planner::CuttingPlanner;
pub use types::*;
