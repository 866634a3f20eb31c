//! Text processing and normalization

use crate::processing::resources::LanguageResources;
use regex::Regex;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes raw text into lowercase, alphabetic, lemmatized tokens with
/// stopwords removed.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    resources: Arc<LanguageResources>,
    non_alpha_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(Arc::new(LanguageResources::english()))
    }
}

impl TextProcessor {
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        let non_alpha_regex = Regex::new(r"[^a-zA-Z\s]")
            .expect("Invalid non-alphabetic regex");

        Self {
            resources,
            non_alpha_regex,
        }
    }

    /// Normalize text and rejoin the surviving tokens with single spaces.
    ///
    /// Total over every input; empty text yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    /// Normalize text into its ordered token sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        // Digits and punctuation become token boundaries: "node.js" -> "node js".
        let cleaned = self.non_alpha_regex.replace_all(&lowered, " ");

        let lemmatizer = self.resources.lemmatizer();
        cleaned
            .unicode_words()
            .filter(|word| !self.resources.is_stop_word(word))
            .map(|word| lemmatizer.lemmatize(word))
            // A lemma can itself be a stopword ("whys" -> "why").
            .filter(|lemma| !self.resources.is_stop_word(lemma))
            .collect()
    }

    pub fn resources(&self) -> &LanguageResources {
        &self.resources
    }
}
