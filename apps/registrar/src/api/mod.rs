//! # Registrar HTTP Module
//!
//! Server-rendered student pages over axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Redirect to the student list
//! - `GET /students` - List every student
//! - `GET /students/new` - Empty creation form
//! - `POST /students` - Create a student
//! - `GET /students/edit/{id}` - Edit form for an existing student
//! - `POST /students/{id}` - Update a student
//! - `GET /students/delete/{id}` - Delete a student
//! - `GET /health` - Health check (JSON)
//!
//! ## Configuration
//!
//! - `server.rate_limit` / `REGISTRAR_RATE_LIMIT`: requests per second (default 100, 0 disables)

mod error;
mod handlers;
mod middleware;
mod types;
mod views;

// Re-exports for integration tests (via `registrar::api::*`)
pub use error::AppError;
pub use handlers::{
    delete_student, health_handler, index_handler, list_students, show_create_form,
    show_edit_form, submit_create, submit_update,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{Bound, DATE_FORMAT, HealthResponse, StudentForm, messages};
pub use views::{ErrorPage, FormMode, StudentFormPage, StudentListPage};

use crate::config::Config;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use registrar_core::{RegistrarError, Registry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Where successful writes redirect to.
pub const STUDENTS_PATH: &str = "/students";

/// Largest accepted request body. A full form is well under 2 KiB.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the student registry.
#[derive(Clone)]
pub struct AppState {
    /// Readers run concurrently; each write holds the lock for one store call.
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all pages and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. Body limit
/// 3. Rate limiting (if enabled)
pub fn create_router(state: AppState, rate_limit: u32) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route(
            STUDENTS_PATH,
            get(handlers::list_students).post(handlers::submit_create),
        )
        .route("/students/new", get(handlers::show_create_form))
        .route("/students/edit/{id}", get(handlers::show_edit_form))
        .route("/students/delete/{id}", get(handlers::delete_student))
        .route("/students/{id}", post(handlers::submit_update));

    match create_rate_limiter(rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and serve until the process stops.
pub async fn run_server(config: &Config, registry: Registry) -> Result<(), RegistrarError> {
    let addr = config.listen_addr();
    let persistent = registry.is_persistent();
    let router = create_router(AppState::new(registry), config.server.rate_limit);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RegistrarError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!(%addr, persistent, "Registrar HTTP server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| RegistrarError::IoError(format!("Server error: {}", e)))
}
