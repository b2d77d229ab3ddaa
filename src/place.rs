//! Place Model
//!
//! The record exchanged between the ranking service and its clients, plus the
//! client-side click history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown for places that have no picture of their own
pub const DEFAULT_IMAGE_LINK: &str =
    "https://i.pinimg.com/originals/8a/eb/d8/8aebd875fbddd22bf3971c3a7159bdc7.png";

/// A travel point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_link: String,
}

impl Place {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        image_link: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image_link: image_link.into(),
        }
    }

    /// Record shown by the detail view until the real place arrives
    pub fn placeholder() -> Self {
        Self::new(1, "string", "string", "a")
    }

    /// True if this is the placeholder record
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

/// Ordered list of place ids the user has opened.
///
/// Append-only: entries are never removed, deduplicated or capped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickHistory(Vec<i64>);

impl ClickHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: i64) {
        self.0.push(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.0.iter()
    }

    /// Most recent click first
    pub fn most_recent_first(&self) -> impl Iterator<Item = &i64> {
        self.0.iter().rev()
    }
}

impl From<Vec<i64>> for ClickHistory {
    fn from(ids: Vec<i64>) -> Self {
        Self(ids)
    }
}

impl FromIterator<i64> for ClickHistory {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
