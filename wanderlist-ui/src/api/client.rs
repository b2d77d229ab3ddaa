//! HTTP API Client
//!
//! Functions for communicating with the ranking service.

use gloo_net::http::{Request, Response};

use crate::state::global::Place;

/// Default ranking service address
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

const API_BASE_KEY: &str = "wanderlist_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[derive(Debug, serde::Serialize)]
struct HistoryRequest<'a> {
    history: &'a [i64],
}

// ============ API Functions ============

/// Places ranked against `history`, sent as it stands at call time
pub async fn fetch_places(history: &[i64]) -> Result<Vec<Place>, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/history", api_base))
        .json(&HistoryRequest { history })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_places(response).await
}

/// Places matching `id`; the id is passed through as given
pub async fn fetch_place(id: &str) -> Result<Vec<Place>, String> {
    let api_base = get_api_base();
    let encoded = String::from(js_sys::encode_uri_component(id));

    let response = Request::get(&format!("{}/place?id={}", api_base, encoded))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_places(response).await
}

/// Check whether the ranking service answers
pub async fn check_health() -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/health/live", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("Service returned {}", response.status()))
    }
}

async fn read_places(response: Response) -> Result<Vec<Place>, String> {
    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("API error {}: {}", response.status(), text));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://127.0.0.1:5000/"), "http://127.0.0.1:5000");
        assert_eq!(normalize_base("  http://places.local//  "), "http://places.local");
    }

    #[test]
    fn test_history_body_shape() {
        let body = serde_json::to_string(&HistoryRequest { history: &[3, 7] }).unwrap();
        assert_eq!(body, r#"{"history":[3,7]}"#);
    }
}
