//! API Routes
//!
//! Configures the Axum router with the cat resource endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, destroy_handler, health_handler, index_handler, show_handler,
    update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cats` - List cats
/// - `POST /cats` - Create a cat
/// - `GET /cats/:id` - Show a cat
/// - `PATCH /cats/:id`, `PUT /cats/:id` - Update a cat
/// - `DELETE /cats/:id` - Delete a cat
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so a browser frontend can call the API
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cats", get(index_handler).post(create_handler))
        .route(
            "/cats/:id",
            get(show_handler)
                .patch(update_handler)
                .put(update_handler)
                .delete(destroy_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
