//! Navigator
//!
//! Holds the current route and the view built for it. Every navigation
//! builds a fresh view and activates it; the last navigation wins and earlier
//! ones are never cancelled.

use std::sync::Arc;
use thiserror::Error;

use crate::client::{ClientError, PlacesApi};
use crate::routing::Route;
use crate::views::{CatalogView, DetailView};

/// The view bound to the current route
pub enum ActiveView {
    Catalog(CatalogView),
    Detail(DetailView),
}

impl ActiveView {
    pub fn render(&self) -> String {
        match self {
            ActiveView::Catalog(view) => view.render(),
            ActiveView::Detail(view) => view.render(),
        }
    }
}

/// Errors raised while navigating
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("No route matches path '{0}'")]
    UnknownRoute(String),

    #[error("Not on the catalog")]
    NotOnCatalog,

    #[error("No catalog entry at position {0}")]
    NoSuchEntry(usize),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Route-driven view switcher
pub struct Navigator {
    api: Arc<dyn PlacesApi>,
    route: Option<Route>,
    view: Option<ActiveView>,
}

impl Navigator {
    pub fn new(api: Arc<dyn PlacesApi>) -> Self {
        Self {
            api,
            route: None,
            view: None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn view(&self) -> Option<&ActiveView> {
        self.view.as_ref()
    }

    /// Switch to `route` and activate its view.
    ///
    /// The route and view change even when activation fails; the view then
    /// keeps its initial content.
    pub async fn navigate(&mut self, route: Route) -> Result<(), ViewError> {
        tracing::info!(route = %route, "Navigating");

        let (view, result) = match &route {
            Route::Places => {
                let mut view = CatalogView::new(Arc::clone(&self.api));
                let result = view.activate().await;
                (ActiveView::Catalog(view), result)
            }
            Route::PlaceDetail { id } => {
                let mut view = DetailView::new(Arc::clone(&self.api));
                let result = view.activate(id).await;
                (ActiveView::Detail(view), result)
            }
        };

        self.route = Some(route);
        self.view = Some(view);
        result.map_err(ViewError::from)
    }

    /// Resolve `path` against the route table and navigate to it
    pub async fn navigate_to(&mut self, path: &str) -> Result<(), ViewError> {
        let route = Route::parse(path).ok_or_else(|| ViewError::UnknownRoute(path.to_string()))?;
        self.navigate(route).await
    }

    /// Select the catalog entry at 1-based `position`, record the click and
    /// open its detail route
    pub async fn select(&mut self, position: usize) -> Result<(), ViewError> {
        let route = match &self.view {
            Some(ActiveView::Catalog(catalog)) => {
                let place = position
                    .checked_sub(1)
                    .and_then(|idx| catalog.places().get(idx))
                    .ok_or(ViewError::NoSuchEntry(position))?;
                catalog.select(place).await
            }
            _ => return Err(ViewError::NotOnCatalog),
        };

        self.navigate(route).await
    }

    /// Render the current view, empty before the first navigation
    pub fn render(&self) -> String {
        self.view.as_ref().map(ActiveView::render).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{sample_places, FakeApi};

    #[tokio::test]
    async fn test_navigate_to_catalog() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut nav = Navigator::new(api);

        nav.navigate_to("/places").await.unwrap();

        assert_eq!(nav.route(), Some(&Route::Places));
        match nav.view() {
            Some(ActiveView::Catalog(view)) => assert_eq!(view.places().len(), 3),
            _ => panic!("expected catalog view"),
        }
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let mut nav = Navigator::new(Arc::new(FakeApi::default()));
        assert!(matches!(
            nav.navigate_to("/settings").await,
            Err(ViewError::UnknownRoute(_))
        ));
        assert!(nav.route().is_none());
        assert_eq!(nav.render(), "");
    }

    #[tokio::test]
    async fn test_select_opens_detail_with_verbatim_id() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut nav = Navigator::new(api.clone());

        nav.navigate(Route::Places).await.unwrap();
        nav.select(3).await.unwrap();

        assert_eq!(nav.route().map(Route::path), Some("place/12".to_string()));
        assert_eq!(api.clicks.lock().unwrap().as_slice(), &[12]);
        assert_eq!(api.requested_ids.lock().unwrap().as_slice(), &["12".to_string()]);
        match nav.view() {
            Some(ActiveView::Detail(view)) => assert_eq!(view.place().title, "Kirovsk"),
            _ => panic!("expected detail view"),
        }
    }

    #[tokio::test]
    async fn test_select_requires_catalog() {
        let mut nav = Navigator::new(Arc::new(FakeApi::with_places(sample_places())));
        assert!(matches!(nav.select(1).await, Err(ViewError::NotOnCatalog)));

        nav.navigate(Route::place(3)).await.unwrap();
        assert!(matches!(nav.select(1).await, Err(ViewError::NotOnCatalog)));
    }

    #[tokio::test]
    async fn test_select_out_of_range() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut nav = Navigator::new(api.clone());
        nav.navigate(Route::Places).await.unwrap();

        assert!(matches!(nav.select(0).await, Err(ViewError::NoSuchEntry(0))));
        assert!(matches!(nav.select(4).await, Err(ViewError::NoSuchEntry(4))));
        assert!(api.clicks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_back_to_catalog_sends_grown_history() {
        let api = Arc::new(FakeApi::with_places(sample_places()));
        let mut nav = Navigator::new(api.clone());

        nav.navigate(Route::Places).await.unwrap();
        nav.select(1).await.unwrap();
        nav.navigate(Route::Places).await.unwrap();
        nav.select(2).await.unwrap();
        nav.navigate(Route::Places).await.unwrap();

        assert_eq!(
            api.listed_with.lock().unwrap().as_slice(),
            &[vec![], vec![3], vec![3, 7]]
        );
    }

    #[tokio::test]
    async fn test_failed_detail_shows_placeholder() {
        let mut nav = Navigator::new(Arc::new(FakeApi::failing()));

        assert!(matches!(
            nav.navigate(Route::place(5)).await,
            Err(ViewError::Client(_))
        ));
        assert_eq!(nav.route(), Some(&Route::place(5)));
        assert!(nav.render().starts_with("#1 string"));
    }
}
