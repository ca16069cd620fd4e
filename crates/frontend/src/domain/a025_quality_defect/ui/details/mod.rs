//! Defect Details UI Module (MVVM Standard)
//!
//! Structure:
//! - view_model.rs: DefectForm, save intents and the PUT workflow
//! - view.rs: DefectDetails modal (edit, resolve, delete)

mod view;
pub mod view_model;

pub use view::DefectDetails;
