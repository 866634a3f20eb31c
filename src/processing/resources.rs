//! Read-only language resources shared by every normalization call

use std::collections::{HashMap, HashSet};

/// English stopwords, matching the list commonly shipped with NLP toolkits.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Irregular plurals that suffix rules cannot recover.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("curricula", "curriculum"),
    ("syllabi", "syllabus"),
    ("alumni", "alumnus"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("avalanches", "avalanche"),
    ("movies", "movie"),
    ("cookies", "cookie"),
];

/// Words ending in `s` that are already in base form.
const INVARIANT_NOUNS: &[&str] = &[
    "news", "series", "species", "means", "headquarters", "lens", "canvas",
    "bus", "gas", "alias", "atlas", "bias", "chaos", "kudos", "ethos", "thermos",
    "business", "process", "access", "address", "success", "progress", "class",
    "glass", "express", "sales", "jenkins", "kubernetes", "pandas", "aws", "sas",
    "rails", "windows", "ios", "macos", "redis", "postgres", "js", "nodejs",
    "vuejs", "nextjs", "reactjs", "css", "sass", "less", "cors", "dns", "https",
    "gis", "his", "hers", "its", "ours", "yours", "theirs", "this", "thus", "yes",
];

/// Dictionary-guarded noun lemmatizer.
///
/// Reduces plural nouns to their singular form with a small set of
/// inflection rules plus an irregular-form table. Words listed as invariant,
/// words ending in `ss`, `us`, `is`, `os` or `ics`, and very short words are
/// returned unchanged. Output is always a fixed point: lemmatizing a lemma
/// yields the same lemma.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
    invariant: HashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        let irregular = IRREGULAR_NOUNS
            .iter()
            .map(|(word, lemma)| (word.to_string(), lemma.to_string()))
            .collect();
        let invariant = INVARIANT_NOUNS.iter().map(|s| s.to_string()).collect();

        Self { irregular, invariant }
    }

    /// Protect additional words (e.g. skill names) from inflection rules.
    pub fn with_protected_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            // Only single words can ever reach the lemmatizer.
            for part in word.as_ref().split_whitespace() {
                self.invariant.insert(part.to_lowercase());
            }
        }
        self
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if self.invariant.contains(word) {
            return word.to_string();
        }

        if let Some(lemma) = self.irregular.get(word) {
            return lemma.clone();
        }

        if !word.ends_with('s') || word.len() <= 3 {
            return word.to_string();
        }

        if ["ss", "us", "is", "os", "ics"].iter().any(|suffix| word.ends_with(suffix)) {
            return word.to_string();
        }

        let stem = if let Some(stem) = word.strip_suffix("ies") {
            format!("{}y", stem)
        } else if let Some(stem) = word.strip_suffix("sses") {
            format!("{}ss", stem)
        } else if let Some((stem, suffix)) = ["ches", "shes", "xes"]
            .iter()
            .find_map(|suffix| word.strip_suffix(*suffix).map(|stem| (stem, *suffix)))
        {
            format!("{}{}", stem, &suffix[..suffix.len() - 2])
        } else {
            word[..word.len() - 1].to_string()
        };

        // Guard against stripping too much from short words.
        if stem.len() < 3 {
            return word.to_string();
        }

        // The stem may itself be an irregular plural ("childrens" -> "children").
        self.irregular.get(&stem).cloned().unwrap_or(stem)
    }
}

/// Bundle of stopwords and lemmatizer, built once and never mutated.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for LanguageResources {
    fn default() -> Self {
        Self::english()
    }
}

impl LanguageResources {
    pub fn english() -> Self {
        Self::new(
            ENGLISH_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            Lemmatizer::new(),
        )
    }

    pub fn new(stop_words: HashSet<String>, lemmatizer: Lemmatizer) -> Self {
        Self { stop_words, lemmatizer }
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Lemmatizer) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}
