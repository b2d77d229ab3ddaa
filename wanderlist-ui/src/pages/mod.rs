//! Pages
//!
//! Top-level page components for each route.

pub mod place_detail;
pub mod places;
pub mod settings;

pub use place_detail::PlaceDetail;
pub use places::Places;
pub use settings::Settings;
