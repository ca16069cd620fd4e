//! Common types shared by the quality and production aggregates

pub mod aggregate_id;
pub mod references;
pub mod serde_helpers;

// Re-exports
pub use aggregate_id::AggregateId;
pub use references::{OrderRef, PartnerRef, PlanItemRef, ProductRef};
