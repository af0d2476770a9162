//! Ojas REST API
//!
//! HTTP API layer for Ojas, built with Axum.
//!
//! # Endpoints
//!
//! ## Users
//! - `POST /api/v1/users` - Register a user
//! - `GET /api/v1/users/:id` - Fetch a user
//! - `PUT /api/v1/users/:id/profile` - Update measurements, reclassify dosha
//!
//! ## Logs
//! - `POST /api/v1/users/:id/logs` - Upsert a daily log, recompute the score
//! - `GET /api/v1/users/:id/logs/today` - Today's entry
//! - `GET /api/v1/users/:id/logs` - History window
//! - `GET /api/v1/users/:id/logs/export` - History window as CSV
//! - `GET /api/v1/users/:id/dashboard` - Today + weekly averages + score
//!
//! ## Foods
//! - `GET /api/v1/foods` - Full corpus
//! - `GET /api/v1/foods/featured` - Featured items
//! - `GET /api/v1/foods/remedy-of-day` - One random item
//! - `GET /api/v1/foods/condition/:condition` - Condition filter
//! - `POST /api/v1/foods/seed` - Load the built-in corpus
//! - `GET /api/v1/users/:id/recommendations` - Personalized picks
//!
//! ## Chat
//! - `POST /api/v1/users/:id/chat` - Rule-based guidance
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ojas::api::{serve, ApiConfig, AppState};
//! use ojas::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
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
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // User routes
        .route("/users", post(routes::users::create_user))
        .route("/users/:id", get(routes::users::get_user))
        .route("/users/:id/profile", put(routes::users::update_profile))
        // Log routes
        .route("/users/:id/logs", post(routes::logs::upsert_log))
        .route("/users/:id/logs", get(routes::logs::log_history))
        .route("/users/:id/logs/today", get(routes::logs::today_log))
        .route("/users/:id/logs/export", get(routes::logs::export_logs))
        .route("/users/:id/dashboard", get(routes::logs::dashboard))
        // Recommendation and chat routes
        .route(
            "/users/:id/recommendations",
            get(routes::foods::recommendations),
        )
        .route("/users/:id/chat", post(routes::chat::chat))
        // Food routes
        .route("/foods", get(routes::foods::list_foods))
        .route("/foods/featured", get(routes::foods::featured_foods))
        .route("/foods/remedy-of-day", get(routes::foods::daily_remedy))
        .route(
            "/foods/condition/:condition",
            get(routes::foods::foods_for_condition),
        )
        .route("/foods/seed", post(routes::foods::seed_foods));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Ojas API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Ojas API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
    use crate::corpus;
    use crate::store::{MemoryStore, Store};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn create_test_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        store.seed_foods(corpus::defaults()).await.unwrap();

        let state = AppState::new(store, ApiConfig::default());
        build_router(state)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn register_user(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/users",
                json!({"name": "Asha", "age": 34, "gender": "female"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"]["corpus_items"], 8);
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "Asha");
        assert_eq!(body["wellness_score"], 75);
        assert!(body["dosha"].is_null());
    }

    #[tokio::test]
    async fn test_create_user_rejects_empty_name() {
        let app = create_test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/users",
                json!({"name": "  ", "age": 34, "gender": "other"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_profile_update_classifies_dosha() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/users/{id}/profile"),
                json!({"height_cm": 172.0, "weight_kg": 65.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // BMI 21.97 lands in the pitta band
        let body = body_json(response).await;
        assert_eq!(body["dosha"], "pitta");
    }

    #[tokio::test]
    async fn test_log_upsert_returns_recomputed_score() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/users/{id}/logs"),
                json!({
                    "water_glasses": 8,
                    "sleep_hours": 8.0,
                    "steps": 9000,
                    "calories": 2000
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        // 50 base + 5 for the logged day + 2 + 3 + 2 + 2 for the goals
        let body = body_json(response).await;
        assert_eq!(body["wellness_score"], 64);
        assert_eq!(body["log"]["water_glasses"], 8);
    }

    #[tokio::test]
    async fn test_log_upsert_merges_within_day() {
        let app = create_test_app().await;
        let id = register_user(&app).await;
        let uri = format!("/api/v1/users/{id}/logs");

        let first = app
            .clone()
            .oneshot(json_request("POST", &uri, json!({"water_glasses": 8})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request("POST", &uri, json!({"steps": 9000})))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CREATED);

        let body = body_json(second).await;
        assert_eq!(body["log"]["water_glasses"], 8);
        assert_eq!(body["log"]["steps"], 9000);
    }

    #[tokio::test]
    async fn test_today_log_before_any_write() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{id}/logs/today"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_synthesizes_today() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{id}/dashboard"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["wellness_score"], 75);
        assert_eq!(body["today"]["calories"], 0);
        assert_eq!(body["week"].as_array().unwrap().len(), 0);
        assert_eq!(body["weekly_average"]["sleep_hours"], 0.0);
    }

    #[tokio::test]
    async fn test_export_is_csv_attachment() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/users/{id}/logs"),
                json!({"calories": 1800}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{id}/logs/export?days=7"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/csv"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("date,weight_kg,calories"));
        assert!(text.contains(",1800,"));
    }

    #[tokio::test]
    async fn test_foods_and_featured() {
        let app = create_test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/foods")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 8);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/foods/featured")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_foods_by_condition() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/foods/condition/diabetes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Turmeric", "Amla"]);
    }

    #[tokio::test]
    async fn test_seed_foods() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/foods/seed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 8);
    }

    #[tokio::test]
    async fn test_remedy_of_day() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/foods/remedy-of-day")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["name"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_for_fresh_user() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/users/{id}/recommendations"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // No conditions, no dosha: the whole corpus qualifies
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_chat_routes_greeting() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/users/{id}/chat"),
                json!({"message": "Hello there"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["rule"], "greeting");
        assert!(body["text"].as_str().unwrap().contains("Namaste"));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let app = create_test_app().await;
        let id = register_user(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/users/{id}/chat"),
                json!({"message": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
