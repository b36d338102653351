//! API Module
//!
//! HTTP handlers and routing for the cat REST API.
//!
//! # Endpoints
//! - `GET /cats` - List all cats
//! - `POST /cats` - Create a cat
//! - `GET /cats/:id` - Show one cat
//! - `PATCH|PUT /cats/:id` - Update a cat
//! - `DELETE /cats/:id` - Delete a cat
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
