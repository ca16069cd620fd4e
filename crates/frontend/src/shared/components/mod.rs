pub mod date_input;
pub mod ui;

pub use date_input::DateInput;
