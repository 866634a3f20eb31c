//! Match aggregation: combines similarity, skill overlap and keyword signals

use crate::config::{Config, ScoringConfig, SignalConfig};
use crate::error::Result;
use crate::processing::resources::{LanguageResources, Lemmatizer};
use crate::processing::signals::KeywordSignal;
use crate::processing::similarity::tfidf_cosine;
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::taxonomy::{CategoryMatch, SkillTaxonomy};
use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Resume-to-job matching engine.
///
/// Built once from static resources and then shared read-only; every
/// [`analyze`](Self::analyze) call is independent of the others.
pub struct ResumeReviewer {
    processor: TextProcessor,
    extractor: SkillExtractor,
    education: KeywordSignal,
    experience: KeywordSignal,
    weights: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted overall score (0 to 100)
    pub overall_match_score: f64,

    /// Component scores (0 to 100)
    pub similarity_score: f64,
    pub skill_match: SkillMatch,
    pub skill_categories: SkillCategories,
    pub education_score: f64,
    pub experience_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub percentage: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategories {
    pub job: BTreeMap<String, CategoryMatch>,
    pub resume: BTreeMap<String, CategoryMatch>,
    pub matching: BTreeMap<String, CategoryMatch>,
}

#[derive(Debug, Clone)]
pub struct EngineStats {
    pub skill_count: usize,
    pub category_count: usize,
    pub stop_word_count: usize,
}

/// `round(value * 100, 2)`
pub fn to_percentage(value: f64) -> f64 {
    (value * 100.0 * 100.0).round() / 100.0
}

impl ResumeReviewer {
    /// Engine with the embedded taxonomy and default weights.
    pub fn new() -> Result<Self> {
        Self::with_components(
            LanguageResources::english(),
            SkillTaxonomy::embedded(),
            &SignalConfig::default(),
            &ScoringConfig::default(),
        )
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let taxonomy = match &config.taxonomy.path {
            Some(path) => {
                debug!("Loading skill taxonomy from {}", path.display());
                SkillTaxonomy::from_file(path)?
            }
            None => SkillTaxonomy::embedded(),
        };

        Self::with_components(
            LanguageResources::english(),
            taxonomy,
            &config.signals,
            &config.scoring,
        )
    }

    pub fn with_components(
        resources: LanguageResources,
        taxonomy: SkillTaxonomy,
        signals: &SignalConfig,
        weights: &ScoringConfig,
    ) -> Result<Self> {
        weights.validate()?;
        signals.validate()?;

        // Skill names must survive lemmatization verbatim ("kubernetes", "pandas").
        let lemmatizer: Lemmatizer = resources
            .lemmatizer()
            .clone()
            .with_protected_words(taxonomy.skills().iter());
        let resources = Arc::new(resources.with_lemmatizer(lemmatizer));
        let processor = TextProcessor::new(resources);

        for skill in taxonomy.skills() {
            let normalized = processor.normalize(skill);
            if &normalized != skill {
                warn!("Skill '{}' normalizes to '{}' and will never match", skill, normalized);
            }
        }

        let education = KeywordSignal::education(signals);
        let experience = KeywordSignal::experience(signals);
        for signal in [&education, &experience] {
            for keyword in signal.keywords() {
                if processor.normalize(keyword) != keyword {
                    warn!("{} keyword '{}' does not survive normalization", signal.name(), keyword);
                }
            }
        }

        let extractor = SkillExtractor::new(processor.clone(), Arc::new(taxonomy))?;

        Ok(Self {
            processor,
            extractor,
            education,
            experience,
            weights: weights.clone(),
        })
    }

    /// Score a resume against a job description. Total over all inputs.
    pub fn analyze(&self, job_description: &str, resume_text: &str) -> MatchResult {
        let job_tokens = self.processor.tokenize(job_description);
        let resume_tokens = self.processor.tokenize(resume_text);

        let similarity = tfidf_cosine(&job_tokens, &resume_tokens);

        let job_skills = self.extractor.extract_from_normalized(&job_tokens.join(" "));
        let resume_skills = self.extractor.extract_from_normalized(&resume_tokens.join(" "));

        let matching: BTreeSet<String> = resume_skills.intersection(&job_skills).cloned().collect();
        let missing: Vec<String> = job_skills.difference(&resume_skills).cloned().collect();

        let skill_ratio = if job_skills.is_empty() {
            0.0
        } else {
            matching.len() as f64 / job_skills.len() as f64
        };

        // Only the resume carries education/experience signal.
        let education_score = self.education.score_tokens(&resume_tokens);
        let experience_score = self.experience.score_tokens(&resume_tokens);

        let overall = self.weights.similarity_weight * similarity
            + self.weights.skill_weight * skill_ratio
            + self.weights.education_weight * education_score
            + self.weights.experience_weight * experience_score;

        debug!(
            "similarity={:.4} skills={}/{} education={:.2} experience={:.2} overall={:.4}",
            similarity,
            matching.len(),
            job_skills.len(),
            education_score,
            experience_score,
            overall
        );

        let skill_categories = SkillCategories {
            job: self.extractor.identify_categories(&job_skills),
            resume: self.extractor.identify_categories(&resume_skills),
            matching: self.extractor.identify_categories(&matching),
        };

        MatchResult {
            overall_match_score: to_percentage(overall),
            similarity_score: to_percentage(similarity),
            skill_match: SkillMatch {
                percentage: to_percentage(skill_ratio),
                matching_skills: matching.into_iter().collect(),
                missing_skills: missing,
            },
            skill_categories,
            education_score: to_percentage(education_score),
            experience_score: to_percentage(experience_score),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        self.processor.normalize(text)
    }

    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.extractor.extract_skills(text)
    }

    pub fn identify_categories(&self, skills: &BTreeSet<String>) -> BTreeMap<String, CategoryMatch> {
        self.extractor.identify_categories(skills)
    }

    /// Raw similarity in [0, 1].
    pub fn similarity(&self, job_text: &str, resume_text: &str) -> f64 {
        tfidf_cosine(
            &self.processor.tokenize(job_text),
            &self.processor.tokenize(resume_text),
        )
    }

    /// Raw education signal in [0, 1].
    pub fn education_score(&self, resume_text: &str) -> f64 {
        self.education.score(&self.processor, resume_text)
    }

    /// Raw experience signal in [0, 1].
    pub fn experience_score(&self, resume_text: &str) -> f64 {
        self.experience.score(&self.processor, resume_text)
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.extractor.taxonomy()
    }

    pub fn get_stats(&self) -> EngineStats {
        EngineStats {
            skill_count: self.taxonomy().skill_count(),
            category_count: self.taxonomy().categories().len(),
            stop_word_count: self.processor.resources().stop_word_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "We are looking for a Python developer with experience in Flask, Django, and SQL. \
                       Knowledge of AWS and Docker is a plus.";
    const RESUME: &str = "Experienced software developer with 5 years of Python programming. \
                          Built web applications using Flask and Django. Familiar with PostgreSQL and MySQL. \
                          Experience with cloud deployment on AWS.";

    fn reviewer() -> ResumeReviewer {
        ResumeReviewer::new().unwrap()
    }

    #[test]
    fn test_reference_example() {
        let reviewer = reviewer();

        let job_skills = reviewer.extract_skills(JOB);
        for skill in ["python", "flask", "django", "sql", "aws", "docker"] {
            assert!(job_skills.contains(skill), "job is missing {}", skill);
        }
        let resume_skills = reviewer.extract_skills(RESUME);
        for skill in ["python", "flask", "django", "aws"] {
            assert!(resume_skills.contains(skill), "resume is missing {}", skill);
        }

        let result = reviewer.analyze(JOB, RESUME);
        assert_eq!(result.skill_match.matching_skills, vec!["aws", "django", "flask", "python"]);
        assert_eq!(result.skill_match.missing_skills, vec!["docker", "sql"]);
        assert_eq!(result.skill_match.percentage, 66.67);
        assert!(result.overall_match_score > 0.0 && result.overall_match_score < 100.0);
    }

    #[test]
    fn test_empty_inputs() {
        let result = reviewer().analyze("", "");
        assert_eq!(result.overall_match_score, 0.0);
        assert_eq!(result.similarity_score, 0.0);
        assert_eq!(result.skill_match.percentage, 0.0);
        assert!(result.skill_match.matching_skills.is_empty());
        assert!(result.skill_categories.job.is_empty());
    }

    #[test]
    fn test_non_matching_content() {
        let result = reviewer().analyze(
            "Looking for a doctor with medical experience",
            "Software engineer with programming skills",
        );
        assert!(result.skill_match.matching_skills.is_empty());
        assert!(result.similarity_score < 50.0);
        assert_eq!(result.skill_match.missing_skills, vec!["medical"]);
    }

    #[test]
    fn test_no_job_skills_means_zero_ratio() {
        let result = reviewer().analyze(
            "Friendly person wanted",
            "Python, SQL, Docker, Kubernetes and AWS expert",
        );
        assert_eq!(result.skill_match.percentage, 0.0);
        assert!(result.skill_match.missing_skills.is_empty());
    }

    #[test]
    fn test_matching_and_missing_partition_job_skills() {
        let reviewer = reviewer();
        let pairs = [
            (JOB, RESUME),
            ("Senior Python Developer needed. Must know Django, React and SQL.",
             "Python developer with 5 years experience in Django and SQL."),
            ("Data scientist: machine learning, pandas, statistics, Tableau", "Excel and Tableau reporting"),
        ];

        for (job, resume) in pairs {
            let result = reviewer.analyze(job, resume);
            let job_skills = reviewer.extract_skills(job);

            let matching: BTreeSet<String> = result.skill_match.matching_skills.iter().cloned().collect();
            let missing: BTreeSet<String> = result.skill_match.missing_skills.iter().cloned().collect();
            assert!(matching.is_disjoint(&missing));
            assert_eq!(&matching | &missing, job_skills);
            assert!((0.0..=100.0).contains(&result.skill_match.percentage));
            assert!((0.0..=100.0).contains(&result.overall_match_score));
        }
    }

    #[test]
    fn test_identical_documents_score_full_similarity() {
        let reviewer = reviewer();
        let result = reviewer.analyze(RESUME, RESUME);
        assert_eq!(result.similarity_score, 100.0);
        assert_eq!(result.skill_match.percentage, 100.0);
        assert!(reviewer.similarity(RESUME, RESUME) == 1.0);
    }

    #[test]
    fn test_overall_uses_fixed_weights() {
        let reviewer = reviewer();
        let similarity = reviewer.similarity(JOB, RESUME);
        let education = reviewer.education_score(RESUME);
        let experience = reviewer.experience_score(RESUME);
        let expected = 0.5 * similarity + 0.3 * (4.0 / 6.0) + 0.1 * education + 0.1 * experience;

        let result = reviewer.analyze(JOB, RESUME);
        assert_eq!(result.overall_match_score, to_percentage(expected));
        assert_eq!(result.education_score, 0.0);
        // year, experience
        assert_eq!(result.experience_score, 20.0);
    }

    #[test]
    fn test_category_breakdowns() {
        let result = reviewer().analyze(JOB, RESUME);
        let categories = &result.skill_categories;

        assert_eq!(categories.job["technology"].skills, vec!["python", "django", "flask"]);
        assert_eq!(categories.job["database"].skills, vec!["sql"]);
        assert_eq!(categories.matching["cloud_devops"].skills, vec!["aws"]);
        assert!(!categories.matching.contains_key("database"));
        assert!(categories.resume["database"].skills.contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_embedded_skills_survive_normalization() {
        let reviewer = reviewer();
        for skill in reviewer.taxonomy().skills() {
            assert_eq!(&reviewer.normalize(skill), skill);
        }
    }

    #[test]
    fn test_engine_stats() {
        let reviewer = reviewer();
        let stats = reviewer.get_stats();
        assert_eq!(stats.stop_word_count, 179);
        assert_eq!(stats.category_count, 9);
        assert_eq!(stats.skill_count, reviewer.taxonomy().skills().len());
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringConfig {
            similarity_weight: 0.0,
            skill_weight: 1.0,
            education_weight: 0.0,
            experience_weight: 0.0,
        };
        let reviewer = ResumeReviewer::with_components(
            LanguageResources::english(),
            SkillTaxonomy::embedded(),
            &SignalConfig::default(),
            &weights,
        )
        .unwrap();

        let result = reviewer.analyze(JOB, RESUME);
        assert_eq!(result.overall_match_score, result.skill_match.percentage);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoringConfig {
            similarity_weight: 0.5,
            skill_weight: 0.5,
            education_weight: 0.5,
            experience_weight: 0.0,
        };
        assert!(ResumeReviewer::with_components(
            LanguageResources::english(),
            SkillTaxonomy::embedded(),
            &SignalConfig::default(),
            &weights,
        )
        .is_err());
    }

    #[test]
    fn test_to_percentage() {
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(2.0 / 3.0), 66.67);
        assert_eq!(to_percentage(0.123456), 12.35);
    }
}
