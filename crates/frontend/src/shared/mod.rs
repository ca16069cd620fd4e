pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod dialogs;
pub mod file_viewer;
pub mod icons;
pub mod modal_frame;
pub mod number_format;
