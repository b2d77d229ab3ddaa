//! Places Client
//!
//! Talks to the ranking service on behalf of the views.
//!
//! ## Operations
//!
//! - **list**: `POST /history` with the click history, returns ranked places
//! - **get_by_id**: `GET /place?id=<id>`, returns a one-element list
//! - **record_click**: appends to the in-memory click history, no network
//!
//! There is no caching, retrying or de-duplication of in-flight requests.

mod client;

pub use client::{ClientConfig, ClientError, PlacesApi, PlacesClient, DEFAULT_BASE_URL};
