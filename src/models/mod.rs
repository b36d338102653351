//! Domain and transfer types for the cat API
//!
//! The `Cat` record, the request envelope, presence validation and the
//! remaining response bodies.

pub mod cat;
pub mod requests;
pub mod responses;
pub mod validation;

// Re-export commonly used types
pub use cat::{Cat, NewCat};
pub use requests::{CatAttributes, CatParams};
pub use responses::HealthResponse;
pub use validation::{ValidationErrors, BLANK_MESSAGE};
