//! Request payload parsing and validation

use crate::error::{Result, ReviewerError};
use serde::{Deserialize, Serialize};

/// Separates the job description from the resume in a single text payload.
pub const RESUME_DELIMITER: &str = "---RESUME---";

const INVALID_FORMAT: &str =
    "Invalid format. Use ---RESUME--- as delimiter between job description and resume.";
const MISSING_TEXT: &str = "Both job description and resume are required";

/// A job description and resume pair ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub job_description: String,
    pub resume: String,
}

impl ReviewRequest {
    /// Build from structured fields, rejecting blank texts.
    pub fn new(job_description: impl Into<String>, resume: impl Into<String>) -> Result<Self> {
        let request = Self {
            job_description: job_description.into(),
            resume: resume.into(),
        };
        validate_pair(&request.job_description, &request.resume)?;
        Ok(request)
    }

    /// Build from a single payload split on [`RESUME_DELIMITER`].
    pub fn from_delimited(payload: &str) -> Result<Self> {
        let (job_description, resume) = split_delimited(payload)?;
        Self::new(job_description, resume)
    }
}

/// Split a payload into trimmed (job description, resume) parts.
///
/// The delimiter must occur exactly once.
pub fn split_delimited(payload: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = payload.split(RESUME_DELIMITER).collect();
    match parts.as_slice() {
        [job, resume] => Ok((job.trim().to_string(), resume.trim().to_string())),
        _ => Err(ReviewerError::InvalidInput(INVALID_FORMAT.to_string())),
    }
}

/// Both texts must contain something other than whitespace.
pub fn validate_pair(job_description: &str, resume: &str) -> Result<()> {
    if job_description.trim().is_empty() || resume.trim().is_empty() {
        return Err(ReviewerError::InvalidInput(MISSING_TEXT.to_string()));
    }
    Ok(())
}
