//! Categorized skill taxonomy used for keyword extraction

use crate::error::{Result, ReviewerError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Embedded default taxonomy. Entries are written in normalized form
/// (lowercase, alphabetic, singular) so they can match normalized text.
const DEFAULT_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "python", "java", "javascript", "typescript", "golang", "rust", "ruby",
            "php", "swift", "kotlin", "scala", "perl", "haskell", "elixir", "matlab",
            "html", "css", "sass", "react", "angular", "vue", "svelte", "node",
            "express", "django", "flask", "fastapi", "spring", "spring boot", "rails",
            "laravel", "jquery", "bootstrap", "tailwind", "webpack", "graphql",
            "grpc", "rest api", "microservices", "api", "frontend", "backend",
            "fullstack", "full stack", "development", "programming", "software engineering",
            "web development", "mobile development", "react native", "flutter",
            "android", "ios", "dotnet", "object oriented programming",
            "functional programming", "data structure", "algorithm", "git", "github",
            "gitlab", "linux", "unix", "bash", "powershell", "testing", "unit testing",
            "integration testing", "test automation", "selenium", "cypress", "jest",
            "pytest", "junit", "tdd", "debugging", "embedded system", "networking",
            "cybersecurity", "security", "blockchain",
        ],
    ),
    (
        "database",
        &[
            "sql", "mysql", "postgresql", "postgres", "sqlite", "oracle", "mongodb",
            "redis", "cassandra", "dynamodb", "elasticsearch", "nosql",
            "database design", "data modeling", "etl", "data warehouse", "snowflake",
            "bigquery",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws", "azure", "gcp", "google cloud", "cloud", "cloud computing",
            "docker", "kubernetes", "terraform", "ansible", "puppet", "chef",
            "jenkins", "ci cd", "continuous integration", "continuous deployment",
            "devops", "serverless", "aws lambda", "nginx", "monitoring", "prometheus",
            "grafana", "site reliability engineering",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning", "deep learning", "ml", "ai", "artificial intelligence",
            "data", "analysis", "data analysis", "data science", "data engineering",
            "data visualization", "statistics", "statistical modeling", "pandas",
            "numpy", "scipy", "tensorflow", "pytorch", "keras", "scikit learn",
            "natural language processing", "nlp", "computer vision", "spark",
            "hadoop", "kafka", "airflow", "tableau", "power bi", "excel",
            "jupyter", "regression", "big data",
        ],
    ),
    (
        "business",
        &[
            "project management", "product management", "agile", "scrum", "kanban",
            "jira", "confluence", "stakeholder management", "business analysis",
            "business development", "strategy", "strategic planning", "marketing",
            "digital marketing", "sales", "seo", "crm", "salesforce", "operations",
            "supply chain", "logistics", "procurement", "customer service",
            "account management", "consulting", "lean", "six sigma",
        ],
    ),
    (
        "finance",
        &[
            "accounting", "financial analysis", "financial modeling", "financial reporting",
            "budgeting", "forecasting", "auditing", "bookkeeping", "tax", "taxation",
            "investment", "banking", "risk management", "compliance", "gaap", "ifrs",
            "quickbooks", "payroll", "valuation", "equity research",
        ],
    ),
    (
        "healthcare",
        &[
            "medical", "clinical", "healthcare", "patient care", "nursing",
            "diagnosis", "pharmacology", "surgery", "pediatrics", "radiology",
            "hipaa", "emr", "electronic health record", "medical coding",
            "clinical research", "public health", "epidemiology", "first aid", "cpr",
        ],
    ),
    (
        "design",
        &[
            "ui", "ux", "user experience", "user interface", "user research", "figma",
            "sketch", "photoshop", "illustrator", "indesign", "adobe", "graphic design",
            "web design", "wireframing", "prototyping", "typography", "branding",
            "animation",
        ],
    ),
    (
        "soft_skills",
        &[
            "leadership", "communication", "teamwork", "collaboration", "problem solving",
            "critical thinking", "mentoring", "coaching", "negotiation", "presentation",
            "public speaking", "time management", "adaptability", "creativity",
            "organization", "attention detail", "conflict resolution", "decision making",
        ],
    ),
];

/// A named group of skill phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Skills of one category found in a skill set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub count: usize,
    pub skills: Vec<String>,
}

/// Immutable category -> skills mapping plus its flattened, deduplicated skill set.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
    skills: BTreeSet<String>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::embedded()
    }
}

impl SkillTaxonomy {
    /// The taxonomy compiled into the binary.
    pub fn embedded() -> Self {
        let categories = DEFAULT_TAXONOMY
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self::from_parts(categories)
    }

    /// Build from explicit categories. Skills are lowercased and
    /// whitespace-collapsed; blank entries are rejected.
    pub fn from_categories(categories: Vec<SkillCategory>) -> Result<Self> {
        if categories.is_empty() {
            return Err(ReviewerError::Taxonomy("taxonomy has no categories".to_string()));
        }

        let mut cleaned = Vec::with_capacity(categories.len());
        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(ReviewerError::Taxonomy("category name cannot be empty".to_string()));
            }

            let mut skills = Vec::with_capacity(category.skills.len());
            for skill in &category.skills {
                let phrase = skill
                    .split_whitespace()
                    .map(|word| word.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" ");
                if phrase.is_empty() {
                    return Err(ReviewerError::Taxonomy(format!(
                        "category '{}' contains an empty skill",
                        name
                    )));
                }
                if !skills.contains(&phrase) {
                    skills.push(phrase);
                }
            }

            cleaned.push(SkillCategory { name, skills });
        }

        Ok(Self::from_parts(cleaned))
    }

    /// Parse a TOML document of the form `category = ["skill", ...]`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: BTreeMap<String, Vec<String>> = toml::from_str(content)
            .map_err(|e| ReviewerError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;

        Self::from_categories(
            table
                .into_iter()
                .map(|(name, skills)| SkillCategory { name, skills })
                .collect(),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    fn from_parts(categories: Vec<SkillCategory>) -> Self {
        let skills = categories
            .iter()
            .flat_map(|c| c.skills.iter().cloned())
            .collect();
        Self { categories, skills }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Flattened, deduplicated skill set.
    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Skill phrases with an internal space.
    pub fn multi_word_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .filter(|s| s.contains(' '))
            .map(|s| s.as_str())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Group a skill set by category, keeping only categories with at least
    /// one hit. Skills within a category keep the taxonomy's order.
    pub fn identify_categories(&self, skills: &BTreeSet<String>) -> BTreeMap<String, CategoryMatch> {
        let mut breakdown = BTreeMap::new();

        for category in &self.categories {
            let matched: Vec<String> = category
                .skills
                .iter()
                .filter(|skill| skills.contains(*skill))
                .cloned()
                .collect();

            if !matched.is_empty() {
                breakdown.insert(
                    category.name.clone(),
                    CategoryMatch {
                        count: matched.len(),
                        skills: matched,
                    },
                );
            }
        }

        breakdown
    }
}
