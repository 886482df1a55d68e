pub mod harvester;
pub mod plan_report;

pub use harvester::{HarvestSummary, Harvester};
pub use plan_report::{BatchStatus, PlanReport};
