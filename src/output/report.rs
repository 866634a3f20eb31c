//! Review report: match result plus score-banded recommendations

use crate::processing::analyzer::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall score below this is a weak match.
pub const MODERATE_THRESHOLD: f64 = 60.0;
/// Overall score at or above this is a strong match.
pub const STRONG_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    NeedsImprovement,
    Moderate,
    Strong,
}

impl ScoreBand {
    pub fn from_score(overall_match_score: f64) -> Self {
        if overall_match_score < MODERATE_THRESHOLD {
            ScoreBand::NeedsImprovement
        } else if overall_match_score < STRONG_THRESHOLD {
            ScoreBand::Moderate
        } else {
            ScoreBand::Strong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::NeedsImprovement => "NEEDS IMPROVEMENT",
            ScoreBand::Moderate => "MODERATE MATCH",
            ScoreBand::Strong => "STRONG MATCH",
        }
    }

    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            ScoreBand::NeedsImprovement => &[
                "Your resume needs significant improvement to match this job description.",
                "Focus on acquiring the missing skills listed above.",
            ],
            ScoreBand::Moderate => &[
                "Your resume is a moderate match for this position.",
                "Consider highlighting your relevant experience more prominently.",
                "Try to incorporate more keywords from the job description.",
            ],
            ScoreBand::Strong => &[
                "Your resume is a strong match for this position!",
                "Make sure your resume is well-formatted and error-free.",
                "Prepare to discuss your experience with the matching skills in interviews.",
            ],
        }
    }
}

/// Fixed recommendation messages for an overall score (0 to 100).
pub fn recommendations_for(overall_match_score: f64) -> Vec<String> {
    ScoreBand::from_score(overall_match_score)
        .messages()
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Where the inputs came from and when the report was produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub job_source: Option<String>,
    pub resume_source: Option<String>,
    pub processing_time_ms: u64,
}

/// Serialized response body: every match result field plus recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    #[serde(flatten)]
    pub result: MatchResult,
    pub recommendations: Vec<String>,
    #[serde(skip)]
    pub metadata: ReportMetadata,
}

impl ReviewReport {
    pub fn new(result: MatchResult) -> Self {
        let recommendations = recommendations_for(result.overall_match_score);
        Self {
            result,
            recommendations,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                ..ReportMetadata::default()
            },
        }
    }

    pub fn with_sources(mut self, job_source: impl Into<String>, resume_source: impl Into<String>) -> Self {
        self.metadata.job_source = Some(job_source.into());
        self.metadata.resume_source = Some(resume_source.into());
        self
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.metadata.processing_time_ms = processing_time_ms;
        self
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.result.overall_match_score)
    }
}
