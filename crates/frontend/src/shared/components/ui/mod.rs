pub mod badge;
pub mod input;
pub mod textarea;

pub use badge::{Badge, DefectStatusBadge};
pub use input::Input;
pub use textarea::Textarea;
