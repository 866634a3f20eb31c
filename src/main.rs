//! Resume reviewer: scores resume and job description alignment

use clap::Parser;
use log::{debug, error, info};
use resume_reviewer::cli::{self, Cli, Commands, ConfigAction};
use resume_reviewer::config::{Config, OutputFormat};
use resume_reviewer::input::manager::InputManager;
use resume_reviewer::input::ReviewRequest;
use resume_reviewer::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_reviewer::output::ReviewReport;
use resume_reviewer::{Result, ResumeReviewer, ReviewerError};
use std::path::Path;
use std::process;
use std::time::Instant;

const INPUT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            resume,
            input,
            output,
            detailed,
            save,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ReviewerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let start_time = Instant::now();
            let mut input_manager = InputManager::new();

            let (request, job_source, resume_source) = match (input, job, resume) {
                (Some(input), _, _) => {
                    check_extension(&input)?;
                    let payload = input_manager.extract_text(&input).await?;
                    let source = input.to_string_lossy().to_string();
                    (ReviewRequest::from_delimited(&payload)?, source.clone(), source)
                }
                (None, Some(job), Some(resume)) => {
                    check_extension(&job)?;
                    check_extension(&resume)?;
                    let job_text = input_manager.extract_text(&job).await?;
                    let resume_text = input_manager.extract_text(&resume).await?;
                    (
                        ReviewRequest::new(job_text, resume_text)?,
                        job.to_string_lossy().to_string(),
                        resume.to_string_lossy().to_string(),
                    )
                }
                _ => {
                    return Err(ReviewerError::InvalidInput(
                        "Provide --job and --resume, or --input".to_string(),
                    ))
                }
            };

            info!(
                "Analyzing resume ({} chars) against job description ({} chars)",
                request.resume.len(),
                request.job_description.len()
            );

            let reviewer = ResumeReviewer::from_config(&config)?;
            let result = reviewer.analyze(&request.job_description, &request.resume);
            let processing_time_ms = start_time.elapsed().as_millis() as u64;
            debug!("Analysis finished in {}ms", processing_time_ms);

            let save_path = save.map(|path| resolve_save_path(path, &output_format, &resume_source));

            let report = ReviewReport::new(result)
                .with_sources(job_source, resume_source)
                .with_processing_time(processing_time_ms);

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save_path {
                // Saved console output never carries color codes.
                let content = if output_format == OutputFormat::Console {
                    ReportGenerator::with_options(false, detailed, true, true).generate_report(&report, &output_format)?
                } else {
                    rendered
                };
                save_report_to_file(&content, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Skills { category, extract } => {
            let reviewer = ResumeReviewer::from_config(&config)?;

            if let Some(path) = extract {
                check_extension(&path)?;
                let mut input_manager = InputManager::new();
                let text = input_manager.extract_text(&path).await?;
                let skills = reviewer.extract_skills(&text);

                println!("🎯 Skills found in {} ({}):", path.display(), skills.len());
                for (name, category) in reviewer.identify_categories(&skills) {
                    println!("  • {} ({}): {}", name, category.count, category.skills.join(", "));
                }
                return Ok(());
            }

            let taxonomy = reviewer.taxonomy();
            match category {
                Some(name) => {
                    let category = taxonomy.category(&name).ok_or_else(|| {
                        ReviewerError::InvalidInput(format!("Unknown skill category: {}", name))
                    })?;
                    println!("📚 {} ({} skills)", category.name, category.skills.len());
                    for skill in &category.skills {
                        println!("  • {}", skill);
                    }
                }
                None => {
                    let stats = reviewer.get_stats();
                    println!(
                        "📚 Skill taxonomy: {} skills in {} categories ({} stopwords ignored)\n",
                        stats.skill_count, stats.category_count, stats.stop_word_count
                    );
                    for category in taxonomy.categories() {
                        println!("{} ({}): {}", category.name, category.skills.len(), category.skills.join(", "));
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", config.to_toml()?);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn check_extension(path: &Path) -> Result<()> {
    if path.as_os_str() == resume_reviewer::input::manager::STDIN_PATH {
        return Ok(());
    }
    cli::validate_file_extension(path, INPUT_EXTENSIONS).map_err(ReviewerError::UnsupportedFormat)
}
