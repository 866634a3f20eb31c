//! Taxonomy-driven skill extraction from normalized text

use crate::error::{Result, ReviewerError};
use crate::processing::taxonomy::{CategoryMatch, SkillTaxonomy};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Pulls known skills out of arbitrary text.
///
/// Single-word skills match whole tokens. Multi-word skills match as raw
/// substrings of the space-joined normalized text, so a phrase may also hit
/// across an unrelated word boundary (e.g. "big data" inside "big database").
pub struct SkillExtractor {
    processor: TextProcessor,
    taxonomy: Arc<SkillTaxonomy>,
    phrase_matcher: AhoCorasick,
    phrases: Vec<String>,
}

impl SkillExtractor {
    pub fn new(processor: TextProcessor, taxonomy: Arc<SkillTaxonomy>) -> Result<Self> {
        let phrases: Vec<String> = taxonomy.multi_word_skills().map(str::to_string).collect();

        // Standard semantics with overlapping search reports every phrase
        // that occurs anywhere, same as a per-phrase substring test.
        let phrase_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| ReviewerError::Taxonomy(format!("Failed to build phrase matcher: {}", e)))?;

        Ok(Self {
            processor,
            taxonomy,
            phrase_matcher,
            phrases,
        })
    }

    /// Normalize `text` and return every taxonomy skill it mentions, sorted.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.extract_from_normalized(&self.processor.normalize(text))
    }

    /// Same as [`extract_skills`](Self::extract_skills) for text that is
    /// already normalized.
    pub fn extract_from_normalized(&self, normalized: &str) -> BTreeSet<String> {
        let mut found: BTreeSet<String> = normalized
            .split_whitespace()
            .filter(|token| self.taxonomy.contains(token))
            .map(str::to_string)
            .collect();

        for mat in self.phrase_matcher.find_overlapping_iter(normalized) {
            found.insert(self.phrases[mat.pattern().as_usize()].clone());
        }

        found
    }

    pub fn identify_categories(&self, skills: &BTreeSet<String>) -> BTreeMap<String, CategoryMatch> {
        self.taxonomy.identify_categories(skills)
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }
}
