//! Output generation module
//! Recommendations, report assembly, and console/JSON/Markdown formatting

pub mod report;
pub mod formatter;

pub use formatter::ReportGenerator;
pub use report::{recommendations_for, ReviewReport, ScoreBand};
