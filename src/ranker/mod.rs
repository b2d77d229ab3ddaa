//! Place Ranking
//!
//! Content-based ranking of the catalog.
//!
//! ## Scoring
//!
//! 1. Place texts (title + description) are cleaned and turned into TF-IDF
//!    vectors
//! 2. Each place's base score is the mean of its best `top_k` cosine
//!    similarities to the reference places, plus a negligible rating term
//! 3. A click history adds, per clicked place, a decayed share of that
//!    place's similarity to every other place

mod ranker;
mod tfidf;

pub use ranker::{Ranker, RankerConfig, RankerError};
pub use tfidf::{SparseVector, TextPreprocessor, TfidfVectorizer};
