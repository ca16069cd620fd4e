//! a025 Quality defects: occurred/resolved lists, registration wizard and
//! the detail/resolution editor.

pub mod actions;
pub mod api;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
