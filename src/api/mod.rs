//! REST API - axum router, shared state and server lifecycle.
//!
//! Handlers are thin: they extract the caller, deserialize the body, call one
//! `core` function and serialize its result. All bodies are camelCase JSON.

pub mod error;
pub mod extract;
pub mod routes;

use crate::{config::settings::AppSettings, core::auth::ResetDelivery, errors::Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Loaded settings
    pub settings: Arc<AppSettings>,
    /// Where password reset links are sent
    pub delivery: Arc<dyn ResetDelivery>,
}

impl AppState {
    /// Bundles the connection, settings and reset delivery.
    pub fn new(
        db: DatabaseConnection,
        settings: AppSettings,
        delivery: Arc<dyn ResetDelivery>,
    ) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
            delivery,
        }
    }
}

fn cors_layer(settings: &AppSettings) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    if settings.allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Builds the full API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/forgot-password", post(routes::auth::forgot_password))
        .route("/api/auth/reset-password", post(routes::auth::reset_password))
        .route("/api/users/all", get(routes::staff::list_users))
        .route("/api/users/:id/role", patch(routes::staff::change_role))
        .route(
            "/api/employees",
            get(routes::staff::list_employees).post(routes::staff::create_employee),
        )
        .route("/api/dashboard/stats", get(routes::staff::dashboard_stats))
        .route(
            "/api/orders",
            get(routes::kitchen::list_orders).post(routes::kitchen::create_order),
        )
        .route("/api/orders/:id", delete(routes::kitchen::delete_order))
        .route("/api/orders/:id/status", patch(routes::kitchen::update_order_status))
        .route(
            "/api/recipes",
            get(routes::kitchen::list_recipes).post(routes::kitchen::create_recipe),
        )
        .route("/api/recipes/:id", put(routes::kitchen::update_recipe))
        .route(
            "/api/bills",
            get(routes::bills::list_bills).post(routes::bills::create_bill),
        )
        .route(
            "/api/bills/:id",
            put(routes::bills::update_bill).delete(routes::bills::delete_bill),
        )
        .route(
            "/api/shopping",
            get(routes::shopping::list_items).post(routes::shopping::create_item),
        )
        .route(
            "/api/shopping/:id",
            put(routes::shopping::update_item).delete(routes::shopping::delete_item),
        )
        .route(
            "/api/shopping/bills",
            get(routes::shopping::list_bills).post(routes::shopping::create_bill),
        )
        .route(
            "/api/shopping/bills/:id",
            put(routes::shopping::update_bill).delete(routes::shopping::delete_bill),
        )
        .route(
            "/api/shopping/reviews",
            get(routes::shopping::list_reviews).post(routes::shopping::submit_review),
        )
        .route(
            "/api/shopping/reviews/:id/approve",
            post(routes::shopping::approve_review),
        )
        .route(
            "/api/shopping/reviews/:id/reject",
            post(routes::shopping::reject_review),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves the API on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    info!("Server running on {}", address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
