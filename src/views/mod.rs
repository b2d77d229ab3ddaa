//! Views
//!
//! Headless renditions of the two screens and the navigator that switches
//! between them.
//!
//! - [`CatalogView`]: ranked list of places, selecting one records the click
//! - [`DetailView`]: a single place, starts out showing the placeholder
//! - [`Navigator`]: owns the current route and activates its view
//!
//! Views never show an error state. A failed request leaves whatever was
//! displayed before in place; the error is logged and handed back to the
//! caller.

mod catalog;
mod detail;
mod navigator;

pub use catalog::CatalogView;
pub use detail::DetailView;
pub use navigator::{ActiveView, Navigator, ViewError};

#[cfg(test)]
pub(crate) mod testing {
    use crate::client::{ClientError, PlacesApi};
    use crate::place::Place;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory places backend that records what it was asked
    #[derive(Default)]
    pub struct FakeApi {
        pub places: Vec<Place>,
        pub failing: bool,
        pub clicks: Mutex<Vec<i64>>,
        pub listed_with: Mutex<Vec<Vec<i64>>>,
        pub requested_ids: Mutex<Vec<String>>,
    }

    impl FakeApi {
        pub fn with_places(places: Vec<Place>) -> Self {
            Self {
                places,
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl PlacesApi for FakeApi {
        async fn list(&self) -> Result<Vec<Place>, ClientError> {
            self.listed_with
                .lock()
                .unwrap()
                .push(self.clicks.lock().unwrap().clone());
            if self.failing {
                return Err(ClientError::Unavailable);
            }
            Ok(self.places.clone())
        }

        async fn get_by_id(&self, id: &str) -> Result<Vec<Place>, ClientError> {
            self.requested_ids.lock().unwrap().push(id.to_string());
            if self.failing {
                return Err(ClientError::Unavailable);
            }
            Ok(self
                .places
                .iter()
                .filter(|p| p.id.to_string() == id)
                .cloned()
                .collect())
        }

        async fn record_click(&self, id: i64) {
            self.clicks.lock().unwrap().push(id);
        }
    }

    pub fn sample_places() -> Vec<Place> {
        vec![
            Place::new(3, "Teriberka", "Village on the Barents Sea coast", "http://img/3"),
            Place::new(7, "Khibiny", "Mountain range with ski resorts", "http://img/7"),
            Place::new(12, "Kirovsk", "Town at the foot of the Khibiny", "http://img/12"),
        ]
    }
}
