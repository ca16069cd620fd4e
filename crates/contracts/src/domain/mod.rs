pub mod common;

pub mod a025_quality_defect;
pub mod a026_production_plan;
