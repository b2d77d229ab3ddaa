//! TF-IDF Text Vectors
//!
//! Bag-of-words vectors weighted by smoothed inverse document frequency and
//! normalized to unit length, plus the text cleanup applied before
//! vectorizing.

use regex::Regex;
use std::collections::HashMap;

/// Sparse unit vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product. For unit vectors this is the cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// Cleans raw place text before vectorizing.
///
/// Non-word characters become spaces, purely numeric words are dropped and
/// the rest is lower-cased.
pub struct TextPreprocessor {
    non_word: Regex,
}

impl TextPreprocessor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            non_word: Regex::new(r"[^\w]")?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let spaced = self.non_word.replace_all(text, " ");
        spaced
            .split_whitespace()
            .filter(|word| !word.chars().all(|c| c.is_numeric()))
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// TF-IDF vectorizer with a vocabulary learned from a fitting corpus
pub struct TfidfVectorizer {
    token: Regex,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `docs`.
    ///
    /// Tokens are runs of two or more word characters. Idf is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Result<Self, regex::Error> {
        let token = Regex::new(r"\b\w\w+\b")?;
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for doc in docs {
            let lowered = doc.as_ref().to_lowercase();
            let mut seen: Vec<usize> = token
                .find_iter(&lowered)
                .map(|m| {
                    let next = vocabulary.len();
                    *vocabulary.entry(m.as_str().to_string()).or_insert(next)
                })
                .collect();
            seen.sort_unstable();
            seen.dedup();

            for idx in seen {
                if idx >= doc_freq.len() {
                    doc_freq.resize(idx + 1, 0);
                }
                doc_freq[idx] += 1;
            }
        }

        let n = docs.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Ok(Self {
            token,
            vocabulary,
            idf,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize one document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let lowered = doc.to_lowercase();
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for m in self.token.find_iter(&lowered) {
            if let Some(&idx) = self.vocabulary.get(m.as_str()) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }

        SparseVector { entries }
    }

    pub fn transform_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}
