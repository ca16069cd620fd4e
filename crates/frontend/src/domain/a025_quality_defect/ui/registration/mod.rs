//! Defect Registration UI Module (MVVM Standard)
//!
//! Structure:
//! - view_model.rs: RegistrationWizard state machine, payload validation, submit
//! - view.rs: DefectRegistrationWizard modal (plan step, detail step)

mod view;
pub mod view_model;

pub use view::DefectRegistrationWizard;
