//! Detail View
//!
//! Shows a single place. Starts with the placeholder record and swaps in the
//! first element of the backend's response once it arrives.

use std::fmt::Write;
use std::sync::Arc;

use crate::client::{ClientError, PlacesApi};
use crate::place::Place;

/// Detail page for one place
pub struct DetailView {
    api: Arc<dyn PlacesApi>,
    id: Option<String>,
    place: Place,
}

impl DetailView {
    pub fn new(api: Arc<dyn PlacesApi>) -> Self {
        Self {
            api,
            id: None,
            place: Place::placeholder(),
        }
    }

    /// Route parameter the view was activated with
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Place currently displayed
    pub fn place(&self) -> &Place {
        &self.place
    }

    /// Fetch the place for the raw route parameter `id`.
    ///
    /// Displays element 0 of the response. An empty response or a failed
    /// request leaves the current place displayed.
    pub async fn activate(&mut self, id: &str) -> Result<(), ClientError> {
        self.id = Some(id.to_string());

        match self.api.get_by_id(id).await {
            Ok(places) => {
                match places.into_iter().next() {
                    Some(place) => self.place = place,
                    None => tracing::debug!(id = %id, "No place returned"),
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Failed to load place");
                Err(e)
            }
        }
    }

    /// Plain-text rendering of the displayed place
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.place);
        let _ = writeln!(out, "image: {}", self.place.image_link);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.place.description);
        out
    }
}
