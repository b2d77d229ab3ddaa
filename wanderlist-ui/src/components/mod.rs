//! UI Components
//!
//! Reusable Leptos components for the pages.

pub mod loading;
pub mod nav;
pub mod place_card;

pub use loading::Loading;
pub use nav::Nav;
pub use place_card::PlaceCard;
