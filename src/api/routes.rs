//! API Routes
//!
//! Configures the Axum router with all results endpoints.

use std::any::Any;

use axum::{response::IntoResponse, response::Response, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    achievements_handler, cache_stats_handler, health_handler, rankings_handler,
    team_stats_handler, AppState,
};
use crate::error::ApiError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/rankings` - Current event rankings
/// - `GET /api/team-stats` - Operating team's headline stats
/// - `GET /api/achievements` - Award history
/// - `GET /api/cache/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Catch panic: converts a handler panic into a 500 JSON body
/// - CORS: Allows any origin (the site is read-only)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/rankings", get(rankings_handler))
        .route("/api/team-stats", get(team_stats_handler))
        .route("/api/achievements", get(achievements_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turns a handler panic into a 500 with `available: false`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!("Handler panicked: {}", details);
    ApiError::Internal(details).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let config = Config {
            api_url: "http://127.0.0.1:9/graphql".to_string(),
            request_timeout_secs: 2,
            ..Config::default()
        };
        create_router(AppState::from_config(&config).unwrap())
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status(create_test_app(), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        assert_eq!(get_status(create_test_app(), "/api/cache/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rankings_not_found_when_offline() {
        assert_eq!(get_status(create_test_app(), "/api/rankings").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_achievements_ok_when_offline() {
        assert_eq!(get_status(create_test_app(), "/api/achievements").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(get_status(create_test_app(), "/api/sponsors").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        async fn boom() -> &'static str {
            panic!("ranking table exploded")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["message"], "Internal error: ranking table exploded");
    }
}
