//! TF-IDF cosine similarity over a two-document corpus

use crate::processing::text_processor::TextProcessor;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Vector space fitted to a single corpus and discarded after use.
///
/// Follows the usual smoothed formulation: raw term counts, IDF of
/// `ln((1 + n) / (1 + df)) + 1`, and L2-normalized document vectors.
/// Terms shorter than two characters are not part of the vocabulary.
#[derive(Debug)]
struct TfIdfSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfSpace {
    fn fit(documents: &[&[String]]) -> Self {
        let n = documents.len() as f64;
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for tokens in documents {
            let unique: HashSet<&str> = tokens
                .iter()
                .map(String::as_str)
                .filter(|t| is_vocabulary_term(t))
                .collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        Self { vocabulary, idf }
    }

    fn dimensions(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = vec![0.0; self.dimensions()];
        for (idx, count) in counts {
            vector[idx] = count * self.idf[idx];
        }

        normalize(&mut vector);
        vector
    }
}

fn is_vocabulary_term(token: &str) -> bool {
    token.chars().count() >= 2
}

/// Normalize a vector to unit length (in-place).
fn normalize(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity between two token sequences, fitted on just this pair.
///
/// Returns 0.0 when either document has no vocabulary terms.
pub fn tfidf_cosine(first: &[String], second: &[String]) -> f64 {
    let space = TfIdfSpace::fit(&[first, second]);
    if space.dimensions() == 0 {
        return 0.0;
    }

    let a = space.transform(first);
    let b = space.transform(second);

    // Identical unit vectors: skip the float round trip so the result is exactly 1.
    if a == b && a.iter().any(|x| *x > 0.0) {
        return 1.0;
    }

    let dot: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    dot.clamp(0.0, 1.0)
}

/// Scores textual similarity between a job description and a resume.
pub struct SimilarityScorer {
    processor: TextProcessor,
}

impl SimilarityScorer {
    pub fn new(processor: TextProcessor) -> Self {
        Self { processor }
    }

    /// Similarity in [0, 1] of the two texts after normalization.
    pub fn similarity(&self, job_text: &str, resume_text: &str) -> f64 {
        let job_tokens = self.processor.tokenize(job_text);
        let resume_tokens = self.processor.tokenize(resume_text);
        tfidf_cosine(&job_tokens, &resume_tokens)
    }
}
