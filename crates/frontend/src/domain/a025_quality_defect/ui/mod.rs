pub mod details;
pub mod list;
pub mod registration;

pub use list::QualityDefectList;
