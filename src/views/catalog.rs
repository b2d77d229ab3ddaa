//! Catalog View
//!
//! Ranked list of places. Activation asks the backend for the list ranked
//! against the current click history; selecting a place records the click and
//! yields the detail route for it.

use std::fmt::Write;
use std::sync::Arc;

use crate::client::{ClientError, PlacesApi};
use crate::place::Place;
use crate::routing::Route;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Catalog of ranked places
pub struct CatalogView {
    api: Arc<dyn PlacesApi>,
    places: Vec<Place>,
}

impl CatalogView {
    pub fn new(api: Arc<dyn PlacesApi>) -> Self {
        Self {
            api,
            places: Vec::new(),
        }
    }

    /// Places currently displayed
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Fetch the ranked list and replace the displayed places with it.
    ///
    /// On failure the previously displayed places stay.
    pub async fn activate(&mut self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(places) => {
                tracing::debug!(count = places.len(), "Catalog loaded");
                self.places = places;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load catalog, keeping previous list");
                Err(e)
            }
        }
    }

    /// Record a click on `place` and return the route to navigate to
    pub async fn select(&self, place: &Place) -> Route {
        self.select_id(place.id).await
    }

    /// Record a click on the place with `id` and return its detail route
    pub async fn select_id(&self, id: i64) -> Route {
        self.api.record_click(id).await;
        Route::place(id)
    }

    /// Plain-text listing, one numbered entry per place
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Places ({})", self.places.len());

        for (idx, place) in self.places.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", idx + 1, place);
            let _ = writeln!(out, "      {}", preview(&place.description));
        }

        out
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{sample_places, FakeApi};

    #[tokio::test]
    async fn test_activate_replaces_places() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut view = CatalogView::new(api.clone());
        assert!(view.places().is_empty());

        view.activate().await.unwrap();
        assert_eq!(view.places(), sample_places().as_slice());
    }

    #[tokio::test]
    async fn test_failed_activation_keeps_stale_list() {
        let api = Arc::new(FakeApi::failing());
        let mut view = CatalogView::new(api);
        view.places = sample_places();

        assert!(view.activate().await.is_err());
        assert_eq!(view.places(), sample_places().as_slice());
    }

    #[tokio::test]
    async fn test_select_records_click_and_routes_to_detail() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut view = CatalogView::new(api.clone());
        view.activate().await.unwrap();

        let route = view.select(&view.places()[1].clone()).await;
        assert_eq!(route, Route::place(7));
        assert_eq!(route.path(), "place/7");

        let route = view.select_id(3).await;
        assert_eq!(route.path(), "place/3");

        assert_eq!(api.clicks.lock().unwrap().as_slice(), &[7, 3]);
    }

    #[tokio::test]
    async fn test_activation_sends_clicks_so_far() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut view = CatalogView::new(api.clone());

        view.activate().await.unwrap();
        view.select_id(3).await;
        view.select_id(7).await;
        view.activate().await.unwrap();

        assert_eq!(
            api.listed_with.lock().unwrap().as_slice(),
            &[Vec::<i64>::new(), vec![3, 7]]
        );
    }

    #[tokio::test]
    async fn test_render() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut view = CatalogView::new(api);
        view.activate().await.unwrap();

        let text = view.render();
        assert!(text.starts_with("Places (3)\n"));
        assert!(text.contains("[1] #3 Teriberka"));
        assert!(text.contains("[3] #12 Kirovsk"));
        assert!(text.contains("Mountain range with ski resorts"));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "a".repeat(150);
        let short = preview(&long);
        assert_eq!(short.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert!(short.ends_with("..."));

        assert_eq!(preview("short"), "short");
    }
}
