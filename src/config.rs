//! Configuration management for the resume reviewer

use crate::error::{Result, ReviewerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub signals: SignalConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    pub output: OutputConfig,
}

/// Weights applied by the match aggregator. They must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub similarity_weight: f64,
    pub skill_weight: f64,
    pub education_weight: f64,
    pub experience_weight: f64,
}

/// Keyword lists and calibration divisors for the education/experience signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    pub education_keywords: Vec<String>,
    pub education_divisor: f64,
    pub experience_keywords: Vec<String>,
    pub experience_divisor: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Replaces the embedded taxonomy when set.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.5,
            skill_weight: 0.3,
            education_weight: 0.1,
            experience_weight: 0.1,
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        let education_keywords = [
            "degree", "bachelor", "master", "phd", "bs", "ms", "ba",
            "university", "college", "certification", "certified", "license",
        ];
        let experience_keywords = [
            "year", "month", "experience", "work", "project", "led", "managed",
            "developed", "implemented", "created", "designed", "team",
            "client", "stakeholder", "deadline",
        ];

        Self {
            education_keywords: education_keywords.iter().map(|s| s.to_string()).collect(),
            education_divisor: 5.0,
            experience_keywords: experience_keywords.iter().map(|s| s.to_string()).collect(),
            experience_divisor: 10.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            signals: SignalConfig::default(),
            taxonomy: TaxonomyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("similarity_weight", self.similarity_weight),
            ("skill_weight", self.skill_weight),
            ("education_weight", self.education_weight),
            ("experience_weight", self.experience_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ReviewerError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ReviewerError::Configuration(format!(
                "scoring weights must sum to 1.0, got {}",
                total
            )));
        }

        Ok(())
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, divisor) in [
            ("education_divisor", self.education_divisor),
            ("experience_divisor", self.experience_divisor),
        ] {
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(ReviewerError::Configuration(format!(
                    "signals.{} must be greater than zero, got {}",
                    name, divisor
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ReviewerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ReviewerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.signals.validate()
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-reviewer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.signals.education_divisor, 5.0);
        assert_eq!(config.signals.experience_divisor, 10.0);
        assert_eq!(config.signals.education_keywords.len(), 12);
        assert_eq!(config.signals.experience_keywords.len(), 15);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.scoring.similarity_weight = 0.9;
        assert!(matches!(config.validate(), Err(ReviewerError::Configuration(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = Config::default();
        config.scoring.similarity_weight = 0.7;
        config.scoring.skill_weight = -0.1;
        config.scoring.education_weight = 0.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = Config::default();
        config.signals.experience_divisor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.taxonomy.path = Some(PathBuf::from("/tmp/skills.toml"));

        let text = config.to_toml().unwrap();
        assert!(text.contains("format = \"markdown\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
