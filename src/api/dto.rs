//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Places themselves are served as [`crate::place::Place`].

use serde::{Deserialize, Serialize};

// ============================================
// PLACES DTOs
// ============================================

/// History ranking request
#[derive(Debug, Deserialize, Serialize)]
pub struct HistoryRequest {
    /// Place ids the user opened, oldest first. `null` or missing means none.
    #[serde(default)]
    pub history: Option<Vec<i64>>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of places in the catalog
    pub places: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
