//! Response DTOs for the cat API
//!
//! Cats are serialized directly; this module holds the remaining bodies.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Number of cats currently stored
    pub cats: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cats: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            cats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
