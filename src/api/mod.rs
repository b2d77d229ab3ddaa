//! Ranking Service REST API
//!
//! HTTP API over the place ranker, built with Axum.
//!
//! # Endpoints
//!
//! ## Places
//! - `GET /` - Places in default order
//! - `POST /history` - Places ranked against `{"history": [ids...]}`
//! - `GET /place?id=<id>` - One-element list with the place, empty if unknown
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use wanderlist::api::{serve, ApiConfig, AppState};
//! use wanderlist::catalog::Catalog;
//! use wanderlist::ranker::{Ranker, RankerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::load("places.json".as_ref())?;
//!     let ranker = Arc::new(Ranker::build(catalog, &[], RankerConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(ranker, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::places::default_ranking))
        .route("/history", post(routes::places::history_ranking))
        .route("/place", get(routes::places::get_place))
        .nest("/health", health_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "This route is not found")
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    serve_listener(listener, state).await
}

/// Serve on an already bound listener until a shutdown signal arrives
pub async fn serve_listener(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    tracing::info!("Wanderlist API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Wanderlist API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogEntry, ReferencePlace};
    use crate::place::{Place, DEFAULT_IMAGE_LINK};
    use crate::ranker::{Ranker, RankerConfig};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_test_app_with(ApiConfig::default())
    }

    fn create_test_app_with(config: ApiConfig) -> Router {
        let catalog = Catalog::new(vec![
            CatalogEntry::new(1, "Northern lights tour", "Aurora hunting in the tundra")
                .image("http://img/1"),
            CatalogEntry::new(2, "Ski resort", "Slopes in the Khibiny mountains"),
            CatalogEntry::new(3, "Mountain hiking", "Trails through the Khibiny mountains"),
        ]);
        let reference = vec![ReferencePlace {
            title: "Aurora".to_string(),
            description: "Northern lights".to_string(),
        }];
        let ranker = Ranker::build(catalog, &reference, RankerConfig::default()).unwrap();

        build_router(AppState::new(Arc::new(ranker), config))
    }

    async fn places_of(response: Response) -> Vec<Place> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: dto::HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.places, 3);
    }

    #[tokio::test]
    async fn test_ready_with_empty_catalog() {
        let ranker = Ranker::build(Catalog::default(), &[], RankerConfig::default()).unwrap();
        let app = build_router(AppState::new(Arc::new(ranker), ApiConfig::default()));

        let response = app
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_default_ranking() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let places = places_of(response).await;
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].id, 1);
    }

    #[tokio::test]
    async fn test_history_ranking() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/history")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"history": [2]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let ids: Vec<i64> = places_of(response).await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn test_history_without_content_type() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/history")
                    .body(Body::from(r#"{"history": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(places_of(response).await.len(), 3);
    }

    #[tokio::test]
    async fn test_history_null_is_empty() {
        for body in [r#"{"history": null}"#, "{}"] {
            let response = create_test_app()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/history")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let ids: Vec<i64> = places_of(response).await.iter().map(|p| p.id).collect();
            assert_eq!(ids, vec![1, 3, 2]);
        }
    }

    #[tokio::test]
    async fn test_history_invalid_json() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/history")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_place() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/place?id=2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let places = places_of(response).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].title, "Ski resort");
        assert_eq!(places[0].image_link, DEFAULT_IMAGE_LINK);
    }

    #[tokio::test]
    async fn test_get_unknown_place_is_empty_list() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/place?id=99").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(places_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_place_non_numeric_falls_back_to_first() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/place?id=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let places = places_of(response).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, 1);
        assert_eq!(places[0].image_link, "http://img/1");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/places").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"This route is not found");
    }

    #[tokio::test]
    async fn test_client_and_views_against_server() {
        use crate::client::{ClientConfig, PlacesApi, PlacesClient};
        use crate::routing::Route;
        use crate::views::{ActiveView, Navigator};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_test_app()).await.unwrap();
        });

        let client = PlacesClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap();
        let mut navigator = Navigator::new(Arc::new(client.clone()));

        navigator.navigate(Route::Places).await.unwrap();
        match navigator.view() {
            Some(ActiveView::Catalog(view)) => assert_eq!(view.places().len(), 3),
            _ => panic!("expected the catalog view"),
        }

        // Equal scores rank later entries first, leaving the ski resort third
        navigator.select(3).await.unwrap();
        assert_eq!(navigator.route(), Some(&Route::place(2)));
        assert!(navigator.render().starts_with("#2 Ski resort"));
        assert_eq!(client.history().await.as_slice(), &[2]);

        navigator.navigate(Route::Places).await.unwrap();
        let ids: Vec<i64> = client.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);

        // Unknown id leaves the placeholder
        navigator.navigate(Route::place(99)).await.unwrap();
        match navigator.view() {
            Some(ActiveView::Detail(view)) => assert!(view.place().is_placeholder()),
            _ => panic!("expected the detail view"),
        }
    }

    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header("Origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_cors_configured_origins() {
        let config = ApiConfig {
            cors_origins: vec![
                "http://localhost:4200".to_string(),
                // Invalid origins are skipped
                "bad\norigin".to_string(),
            ],
            ..ApiConfig::default()
        };

        assert_eq!(
            allowed_origin(create_test_app_with(config.clone()), "http://localhost:4200").await,
            Some("http://localhost:4200".to_string())
        );
        assert_eq!(
            allowed_origin(create_test_app_with(config), "http://evil.example").await,
            None
        );
    }

    #[tokio::test]
    async fn test_cors_any_origin_when_unconfigured() {
        assert_eq!(
            allowed_origin(create_test_app(), "http://evil.example").await,
            Some("*".to_string())
        );
    }
}
