//! Stock Register Server
//!
//! Reconstructs per-material stock ledgers from the inventory API's receipt
//! and work order history, and flags materials that need reordering.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use external::{InventoryApiClient, ReorderAdvisorClient};
use services::StockRegisterService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: StockRegisterService,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_register_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Stock Register Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Inventory API: {}", config.inventory_api.base_url);

    let inventory = InventoryApiClient::new(&config.inventory_api)?;
    let advisor = ReorderAdvisorClient::from_config(&config.reorder_advisor)?;
    if advisor.is_none() {
        tracing::info!("Reorder advisor not configured, suggestions will be computed locally");
    }

    // Create application state
    let state = AppState {
        service: StockRegisterService::new(inventory, advisor),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stock Register API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config {
            environment: "test".to_string(),
            server: crate::config::ServerConfig::default(),
            inventory_api: crate::config::InventoryApiConfig {
                base_url: "http://127.0.0.1:9/api".to_string(),
                api_key: None,
                page_size: 10,
                timeout_secs: 1,
            },
            reorder_advisor: crate::config::ReorderAdvisorConfig {
                endpoint: None,
                api_key: None,
                timeout_secs: 1,
            },
        };
        let inventory = InventoryApiClient::new(&config.inventory_api).unwrap();
        AppState {
            service: StockRegisterService::new(inventory, None),
            config: Arc::new(config),
        }
    }

    #[tokio::test]
    async fn test_api_health() {
        let app = create_app(test_state());
        let response = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["environment"], "test");
    }

    #[tokio::test]
    async fn test_post_ledger() {
        let app = create_app(test_state());
        let body = r#"{
            "material": {"id": "m", "name": "A4 Paper", "type": "Ream", "currentStock": 1200},
            "onboardings": [{
                "id": "onb-1",
                "date": "2024-03-01T09:00:00Z",
                "isReverted": true,
                "items": [{"paperType": "A4 Paper", "quantity": 1, "amount": "250.00"}]
            }],
            "measurements": [{"name": "Ream", "sheetsPerUnit": 500}]
        }"#;
        let response = app
            .oneshot(
                Request::post("/api/v1/ledger")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["sheetsPerUnit"], 500);
        assert_eq!(json["entries"][0]["type"], "ONBOARDING_REVERSAL");
        assert_eq!(json["entries"][0]["sheetChange"], -500);
        assert_eq!(json["entries"][0]["stockBefore"]["units"], 3);
        assert_eq!(json["entries"][0]["stockBefore"]["extraSheets"], 200);
    }

    #[tokio::test]
    async fn test_inverted_date_range_is_bad_request() {
        let app = create_app(test_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/materials/m/ledger?from=2024-02-01&to=2024-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
