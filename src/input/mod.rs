//! Input processing module
//! Handles file detection, text extraction, and request payload parsing

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod payload;

pub use manager::InputManager;
pub use payload::{split_delimited, validate_pair, ReviewRequest, RESUME_DELIMITER};
