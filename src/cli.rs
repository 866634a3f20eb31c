//! CLI interface for the resume reviewer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-reviewer")]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Compare a resume against a job description using TF-IDF text similarity, taxonomy skill overlap, and education/experience keyword signals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to job description file (TXT, MD)
        #[arg(short, long, requires = "resume", conflicts_with = "input")]
        job: Option<PathBuf>,

        /// Path to resume file (TXT, MD)
        #[arg(short, long, requires = "job", conflicts_with = "input")]
        resume: Option<PathBuf>,

        /// Single file (or "-" for stdin) with job and resume separated by ---RESUME---
        #[arg(short, long, required_unless_present = "job")]
        input: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include per-category breakdowns
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the skill taxonomy or extract skills from a file
    Skills {
        /// Show only one category
        #[arg(long)]
        category: Option<String>,

        /// Print the skills found in this file
        #[arg(short, long)]
        extract: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
