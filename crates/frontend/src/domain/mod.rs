pub mod a025_quality_defect;
