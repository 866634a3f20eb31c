//! Output formatters for review reports

use crate::config::OutputFormat;
use crate::error::{Result, ReviewerError};
use crate::output::report::{ReviewReport, ScoreBand};
use crate::processing::taxonomy::CategoryMatch;
use colored::{Color, Colorize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Trait for formatting review reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ReviewReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors and category detail
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter producing the response body
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Strong => Color::Green,
        ScoreBand::Moderate => Color::Yellow,
        ScoreBand::NeedsImprovement => Color::Red,
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        if self.use_colors {
            format!("[{}]", band.label().color(band_color(band)).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_categories(&self, title: &str, categories: &BTreeMap<String, CategoryMatch>) -> String {
        let mut output = format!("  {}:\n", title);
        if categories.is_empty() {
            output.push_str("    (none)\n");
        }
        for (name, category) in categories {
            output.push_str(&format!(
                "    • {} ({}): {}\n",
                name,
                category.count,
                category.skills.join(", ")
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReviewReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Overall Match Score: {:.2}% {}\n",
            result.overall_match_score,
            self.format_score_badge(report.band())
        ));

        output.push_str(&self.format_header("Score Breakdown", 2));
        output.push_str(&format!("🧠 Text Similarity: {:.2}%\n", result.similarity_score));
        output.push_str(&format!("🎯 Skill Match: {:.2}%\n", result.skill_match.percentage));
        output.push_str(&format!("🎓 Education: {:.2}%\n", result.education_score));
        output.push_str(&format!("💼 Experience: {:.2}%\n", result.experience_score));

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "✅ Matching: {}\n",
            self.colorize(&join_or_none(&result.skill_match.matching_skills), Color::Green)
        ));
        output.push_str(&format!(
            "⚠️  Missing: {}\n",
            self.colorize(&join_or_none(&result.skill_match.missing_skills), Color::Red)
        ));

        if self.detailed {
            output.push_str(&self.format_header("Skill Categories", 3));
            output.push_str(&self.format_categories("Job description", &result.skill_categories.job));
            output.push_str(&self.format_categories("Resume", &result.skill_categories.resume));
            output.push_str(&self.format_categories("Matching", &result.skill_categories.matching));
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
        }

        if self.detailed && report.metadata.processing_time_ms > 0 {
            output.push_str(&format!("\n⚡ Processing time: {}ms\n", report.metadata.processing_time_ms));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReviewReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Strong => "🟢 Strong",
            ScoreBand::Moderate => "🟡 Moderate",
            ScoreBand::NeedsImprovement => "🔴 Needs improvement",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReviewReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            if let (Some(job), Some(resume)) = (&report.metadata.job_source, &report.metadata.resume_source) {
                output.push_str(&format!("**Job:** `{}` | **Resume:** `{}`\n", job, resume));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "**Overall Match Score:** {:.2}% ({})\n\n",
            result.overall_match_score,
            Self::markdown_badge(report.band())
        ));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Text Similarity | {:.2}% |\n", result.similarity_score));
        output.push_str(&format!("| Skill Match | {:.2}% |\n", result.skill_match.percentage));
        output.push_str(&format!("| Education | {:.2}% |\n", result.education_score));
        output.push_str(&format!("| Experience | {:.2}% |\n\n", result.experience_score));

        output.push_str("## Skills\n\n");
        output.push_str(&format!("- **Matching:** {}\n", join_or_none(&result.skill_match.matching_skills)));
        output.push_str(&format!("- **Missing:** {}\n\n", join_or_none(&result.skill_match.missing_skills)));

        if !result.skill_categories.job.is_empty() {
            output.push_str("### Categories\n\n");
            output.push_str("| Category | Job | Resume | Matching |\n");
            output.push_str("|----------|-----|--------|----------|\n");
            for (name, job) in &result.skill_categories.job {
                let count = |map: &BTreeMap<String, CategoryMatch>| map.get(name).map_or(0, |c| c.count);
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    name,
                    job.count,
                    count(&result.skill_categories.resume),
                    count(&result.skill_categories.matching)
                ));
            }
            output.push('\n');
        }

        output.push_str("## Recommendations\n\n");
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ReviewReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content).map_err(|e| {
        ReviewerError::OutputFormatting(format!("Failed to write report to {}: {}", file_path.display(), e))
    })
}

/// A directory target gets a generated file name inside it.
pub fn resolve_save_path(path: PathBuf, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, resume_name, true))
    } else {
        path
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::ResumeReviewer;

    fn sample_report() -> ReviewReport {
        let reviewer = ResumeReviewer::new().unwrap();
        let result = reviewer.analyze(
            "Python developer with Flask, SQL and Docker",
            "Python engineer using Flask and PostgreSQL",
        );
        ReviewReport::new(result).with_sources("job.txt", "resume.md")
    }

    #[test]
    fn test_json_contains_response_fields() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for field in [
            "overall_match_score",
            "similarity_score",
            "skill_match",
            "skill_categories",
            "education_score",
            "experience_score",
            "recommendations",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert!(value["skill_match"]["matching_skills"].is_array());
        assert!(value["skill_match"]["missing_skills"].is_array());
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("Overall Match Score"));
        assert!(output.contains("Matching: flask, python"));
        assert!(output.contains("Skill Categories"));
        assert!(output.contains(&report.recommendations[0]));
    }

    #[test]
    fn test_markdown_report() {
        let report = sample_report();
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(output.starts_with("# 📊 Resume Match Report"));
        assert!(output.contains("**Job:** `job.txt` | **Resume:** `resume.md`"));
        assert!(output.contains("| technology |"));
        assert!(output.contains("## Recommendations"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "cv/jane.md", false), "jane_match.json");
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "jane.txt", false), "jane_match.md");
    }

    #[test]
    fn test_save_into_directory() {
        let dir = tempfile::tempdir().unwrap();

        let resolved = resolve_save_path(dir.path().to_path_buf(), &OutputFormat::Json, "cv/jane.md");
        assert_eq!(resolved.parent(), Some(dir.path()));
        let name = resolved.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("jane_match_") && name.ends_with(".json"));

        let file = dir.path().join("report.md");
        assert_eq!(resolve_save_path(file.clone(), &OutputFormat::Markdown, "jane.md"), file);

        save_report_to_file("{}", &resolved).unwrap();
        assert_eq!(std::fs::read_to_string(&resolved).unwrap(), "{}");
    }
}
