//! Cat Tracker - A small JSON API for keeping track of cats
//!
//! CRUD over a single `Cat` resource with presence validation and an
//! optional JSON snapshot for durability.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{CatError, Result};
pub use store::CatStore;
