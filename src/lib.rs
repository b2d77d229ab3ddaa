//! # Wanderlist
//!
//! Travel places catalog: a history-aware ranking service, the HTTP client
//! that talks to it, and headless catalog/detail views driven by a small
//! route table.
//!
//! ## Modules
//!
//! - [`place`]: the `Place` record and the click history
//! - [`client`]: HTTP client for the ranking service
//! - [`views`]: catalog and detail views plus the navigator
//! - [`routing`]: `places` and `place/:id` routes
//! - [`catalog`]: loading places from JSON or CSV
//! - [`ranker`]: TF-IDF ranking with click-history bias
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wanderlist::client::{ClientConfig, PlacesClient};
//! use wanderlist::routing::Route;
//! use wanderlist::views::Navigator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlacesClient::new(ClientConfig::default())?;
//!     let mut navigator = Navigator::new(Arc::new(client));
//!
//!     // Show the ranked catalog, then open its first entry
//!     navigator.navigate(Route::Places).await?;
//!     navigator.select(1).await?;
//!     println!("{}", navigator.render());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod logging;
pub mod place;
pub mod ranker;
pub mod routing;
pub mod views;

// Re-export top-level types for convenience
pub use place::{ClickHistory, Place, DEFAULT_IMAGE_LINK};

pub use client::{ClientConfig, ClientError, PlacesApi, PlacesClient};

pub use views::{ActiveView, CatalogView, DetailView, Navigator, ViewError};

pub use routing::Route;

pub use catalog::{Catalog, CatalogEntry, CatalogError, ReferencePlace};

pub use ranker::{Ranker, RankerConfig, RankerError};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
