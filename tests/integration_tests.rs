//! Integration tests for the resume reviewer

use resume_reviewer::config::{Config, OutputFormat};
use resume_reviewer::error::ReviewerError;
use resume_reviewer::input::manager::InputManager;
use resume_reviewer::input::{split_delimited, ReviewRequest};
use resume_reviewer::output::{ReportGenerator, ReviewReport};
use resume_reviewer::ResumeReviewer;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
    assert!(text.contains("State University"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains("https://example.edu"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ReviewerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_end_to_end_file_analysis() {
    let mut manager = InputManager::new();
    let job = manager.extract_text(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();
    let resume = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();

    let reviewer = ResumeReviewer::from_config(&Config::default()).unwrap();
    let result = reviewer.analyze(&job, &resume);

    assert_eq!(
        result.skill_match.matching_skills,
        vec!["aws", "django", "docker", "flask", "python"]
    );
    assert_eq!(result.skill_match.missing_skills, vec!["sql"]);
    assert_eq!(result.skill_match.percentage, 83.33);
    assert!(result.education_score > 0.0);
    assert!(result.experience_score > 0.0);
    assert!(result.overall_match_score > 0.0 && result.overall_match_score <= 100.0);
}

#[tokio::test]
async fn test_delimited_payload_analysis() {
    let mut manager = InputManager::new();
    let payload = manager.extract_text(Path::new("tests/fixtures/combined.txt")).await.unwrap();

    let request = ReviewRequest::from_delimited(&payload).unwrap();
    assert!(request.job_description.starts_with("We are looking for"));
    assert!(request.resume.starts_with("Experienced software developer"));

    let reviewer = ResumeReviewer::new().unwrap();
    let result = reviewer.analyze(&request.job_description, &request.resume);
    assert_eq!(result.skill_match.matching_skills, vec!["django", "flask", "python"]);
    assert_eq!(result.skill_match.missing_skills, vec!["aws", "docker", "sql"]);
    assert_eq!(result.skill_match.percentage, 50.0);
}

#[test]
fn test_invalid_payloads() {
    let err = split_delimited("This is an invalid input without delimiter").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: Invalid format. Use ---RESUME--- as delimiter between job description and resume."
    );

    let err = ReviewRequest::from_delimited("   ---RESUME---   ").unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: Both job description and resume are required");
}

#[test]
fn test_json_response_shape() {
    let reviewer = ResumeReviewer::new().unwrap();
    let result = reviewer.analyze(
        "Looking for a doctor with medical experience",
        "Software engineer with programming skills",
    );
    let report = ReviewReport::new(result);

    let json = ReportGenerator::new().generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["skill_match"]["missing_skills"], serde_json::json!(["medical"]));
    assert_eq!(value["skill_match"]["matching_skills"], serde_json::json!([]));
    assert_eq!(value["skill_categories"]["job"]["healthcare"]["count"], 1);
    assert_eq!(
        value["recommendations"][0],
        "Your resume needs significant improvement to match this job description."
    );

    let parsed: ReviewReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.result, report.result);
    assert_eq!(parsed.recommendations, report.recommendations);
}

#[test]
fn test_identical_texts_are_a_strong_similarity_match() {
    let reviewer = ResumeReviewer::new().unwrap();
    let text = "Python developer with Django, SQL and AWS. Led a team, managed projects.";
    let result = reviewer.analyze(text, text);

    assert_eq!(result.similarity_score, 100.0);
    assert_eq!(result.skill_match.percentage, 100.0);
    assert!(result.skill_match.missing_skills.is_empty());
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    // First load writes defaults.
    let config = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let mut modified = config.clone();
    modified.scoring.similarity_weight = 0.4;
    modified.scoring.skill_weight = 0.4;
    modified.output.format = OutputFormat::Markdown;
    modified.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded, modified);
    assert!(ResumeReviewer::from_config(&reloaded).is_ok());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.scoring.similarity_weight = 0.9;
    std::fs::write(&path, config.to_toml().unwrap()).unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ReviewerError::Configuration(_))));
}

#[test]
fn test_custom_taxonomy_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    std::fs::write(
        &taxonomy_path,
        "culinary = [\"baking\", \"pastry\", \"food safety\"]\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.taxonomy.path = Some(taxonomy_path);

    let reviewer = ResumeReviewer::from_config(&config).unwrap();
    let result = reviewer.analyze(
        "Pastry chef with food safety training and Python",
        "Ten years of baking and pastry work",
    );

    assert_eq!(result.skill_match.matching_skills, vec!["pastry"]);
    assert_eq!(result.skill_match.missing_skills, vec!["food safety"]);
    assert!(result.skill_categories.job.contains_key("culinary"));
}
