pub mod aggregate;
pub mod attachments;
pub mod dto;

pub use aggregate::{Defect, DefectId, DefectStatus};
pub use attachments::AttachmentFile;
