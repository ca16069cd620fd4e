pub mod aggregate;

pub use aggregate::{PlanStatus, ProductionPlan, ProductionPlanId, ProductionPlanItem};
