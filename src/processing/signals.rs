//! Keyword-count signals (education, experience) over normalized resume text

use crate::config::SignalConfig;
use crate::processing::text_processor::TextProcessor;
use std::collections::HashSet;

/// Counts which keywords occur as exact tokens and scales the count into [0, 1].
#[derive(Debug, Clone)]
pub struct KeywordSignal {
    name: String,
    keywords: HashSet<String>,
    divisor: f64,
}

impl KeywordSignal {
    /// `divisor` is the count at which the signal saturates at 1.0.
    pub fn new<I, S>(name: &str, keywords: I, divisor: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            name: name.to_string(),
            keywords,
            divisor,
        }
    }

    pub fn education(config: &SignalConfig) -> Self {
        Self::new("education", &config.education_keywords, config.education_divisor)
    }

    pub fn experience(config: &SignalConfig) -> Self {
        Self::new("experience", &config.experience_keywords, config.experience_divisor)
    }

    /// Number of distinct keywords present among `tokens`.
    pub fn count_matches<S: AsRef<str>>(&self, tokens: &[S]) -> usize {
        let present: HashSet<&str> = tokens.iter().map(|token| AsRef::<str>::as_ref(token)).collect();
        self.keywords
            .iter()
            .filter(|keyword| present.contains(keyword.as_str()))
            .count()
    }

    pub fn score_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> f64 {
        if self.divisor <= 0.0 {
            return 0.0;
        }
        (self.count_matches(tokens) as f64 / self.divisor).min(1.0)
    }

    /// Normalize `text` and score it.
    pub fn score(&self, processor: &TextProcessor, text: &str) -> f64 {
        self.score_tokens(&processor.tokenize(text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

/// Free-standing form: normalize, count keywords present, cap at 1.0.
pub fn signal_score(
    processor: &TextProcessor,
    resume_text: &str,
    keywords: &[&str],
    normalization_divisor: f64,
) -> f64 {
    KeywordSignal::new("custom", keywords, normalization_divisor).score(processor, resume_text)
}
