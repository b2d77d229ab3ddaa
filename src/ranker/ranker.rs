//! Place Ranker
//!
//! Scores every catalog place by how closely its text matches the reference
//! places, then shifts scores toward places similar to the ones in a click
//! history.

use std::collections::HashMap;
use thiserror::Error;

use super::tfidf::{SparseVector, TextPreprocessor, TfidfVectorizer};
use crate::catalog::{Catalog, CatalogEntry, ReferencePlace};
use crate::place::Place;

/// Rating assumed for places nobody has rated
const NEUTRAL_RATING: f64 = 3.0;

/// Scale of the rating term. Small enough that it only breaks ties between
/// equally similar places.
const POPULARITY_SCALE: f64 = 1e-20;

/// Decay exponent for older history entries
const HISTORY_DECAY: f64 = 0.15;

/// Ranking parameters
#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Weight of the history bias relative to the base score
    pub history_weight: f64,
    /// Number of best reference matches averaged into the base score
    pub top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            history_weight: 0.4,
            top_k: 5,
        }
    }
}

/// Errors raised while building a ranker
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("Invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Pre-computed ranking state for one catalog
pub struct Ranker {
    entries: Vec<CatalogEntry>,
    index_of: HashMap<i64, usize>,
    base_scores: Vec<f64>,
    vectors: Vec<SparseVector>,
    config: RankerConfig,
}

impl Ranker {
    /// Build a ranker for `catalog`.
    ///
    /// With an empty `reference` set the catalog is scored against itself.
    pub fn build(
        catalog: Catalog,
        reference: &[ReferencePlace],
        config: RankerConfig,
    ) -> Result<Self, RankerError> {
        let preprocessor = TextPreprocessor::new()?;

        let reference = if reference.is_empty() {
            catalog.as_reference()
        } else {
            reference.to_vec()
        };

        let entries = catalog.into_entries();
        let catalog_texts: Vec<String> =
            entries.iter().map(|e| preprocessor.clean(&e.text())).collect();
        let reference_texts: Vec<String> =
            reference.iter().map(|r| preprocessor.clean(&r.text())).collect();

        let reference_vectorizer = TfidfVectorizer::fit(&reference_texts)?;
        let reference_vectors = reference_vectorizer.transform_all(&reference_texts);
        let catalog_against_reference = reference_vectorizer.transform_all(&catalog_texts);

        let base_scores = entries
            .iter()
            .zip(&catalog_against_reference)
            .map(|(entry, vector)| {
                let similarities: Vec<f64> =
                    reference_vectors.iter().map(|r| vector.dot(r)).collect();
                top_k_mean(similarities, config.top_k) + popularity(entry.rating)
            })
            .collect();

        let catalog_vectorizer = TfidfVectorizer::fit(&catalog_texts)?;
        let vectors = catalog_vectorizer.transform_all(&catalog_texts);

        // Later duplicates of an id win
        let index_of = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.id, idx))
            .collect();

        tracing::info!(
            places = entries.len(),
            reference = reference.len(),
            vocabulary = catalog_vectorizer.vocabulary_size(),
            "Ranker ready"
        );

        Ok(Self {
            entries,
            index_of,
            base_scores,
            vectors,
            config,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Scores without any history
    pub fn base_scores(&self) -> &[f64] {
        &self.base_scores
    }

    /// All places, best base score first
    pub fn rank(&self) -> Vec<Place> {
        self.ordered(&self.base_scores)
    }

    /// All places ranked with the bias from `history` applied
    pub fn rank_with_history(&self, history: &[i64]) -> Vec<Place> {
        let scores = self.scores_with_history(history);
        self.ordered(&scores)
    }

    /// Base scores shifted toward places similar to the clicked ones.
    ///
    /// The most recent click weighs most; the `k`-th most recent click is
    /// scaled by `(1/k)^0.15`. A clicked place gets no bias from its own
    /// click. Ids missing from the catalog are ignored.
    pub fn scores_with_history(&self, history: &[i64]) -> Vec<f64> {
        let mut scores = self.base_scores.clone();

        let clicked: Vec<usize> = history
            .iter()
            .filter_map(|id| {
                let idx = self.index_of.get(id).copied();
                if idx.is_none() {
                    tracing::warn!(id = id, "Ignoring history entry for unknown place");
                }
                idx
            })
            .collect();

        for (position, &place) in clicked.iter().rev().enumerate() {
            let coef = (1.0 / (position + 1) as f64).powf(HISTORY_DECAY);
            let clicked_vector = &self.vectors[place];

            for (idx, score) in scores.iter_mut().enumerate() {
                if idx == place {
                    continue;
                }
                *score += coef * self.config.history_weight * clicked_vector.dot(&self.vectors[idx]);
            }
        }

        scores
    }

    /// Entries with `id`. Normally zero or one.
    pub fn get(&self, id: i64) -> Vec<Place> {
        self.entries
            .iter()
            .filter(|e| e.id == id)
            .map(CatalogEntry::to_place)
            .collect()
    }

    /// Places by descending score. Equal scores put later catalog entries
    /// first.
    fn ordered(&self, scores: &[f64]) -> Vec<Place> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        order
            .into_iter()
            .rev()
            .map(|idx| self.entries[idx].to_place())
            .collect()
    }
}

fn top_k_mean(mut similarities: Vec<f64>, k: usize) -> f64 {
    let take = k.min(similarities.len());
    if take == 0 {
        return 0.0;
    }
    similarities.sort_by(|a, b| b.total_cmp(a));
    similarities[..take].iter().sum::<f64>() / take as f64
}

fn popularity(rating: Option<f64>) -> f64 {
    let rating = rating.filter(|r| *r > 0.0).unwrap_or(NEUTRAL_RATING);
    POPULARITY_SCALE * rating.ln()
}
