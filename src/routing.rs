//! Route Table
//!
//! Client-side routes:
//!
//! - `places` - catalog view
//! - `place/:id` - detail view, `:id` passed through untouched

use std::fmt;

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The ranked catalog
    Places,
    /// A single place. The id is kept as the raw path segment.
    PlaceDetail { id: String },
}

impl Route {
    /// Detail route for a place id
    pub fn place(id: impl ToString) -> Self {
        Route::PlaceDetail { id: id.to_string() }
    }

    /// Match a path against the route table.
    ///
    /// A leading or trailing `/` is ignored. Returns `None` for paths that
    /// match no route.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/').trim_end_matches('/');
        let mut segments = path.split('/');

        match (segments.next(), segments.next(), segments.next()) {
            (Some("places"), None, None) => Some(Route::Places),
            (Some("place"), Some(id), None) if !id.is_empty() => Some(Route::place(id)),
            _ => None,
        }
    }

    /// Path for this route, without a leading `/`
    pub fn path(&self) -> String {
        match self {
            Route::Places => "places".to_string(),
            Route::PlaceDetail { id } => format!("place/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}
