//! Store Module
//!
//! Ordered in-memory storage of cats, optionally mirrored to a JSON snapshot.

mod cat_store;
mod snapshot;


// Re-export public types
pub use cat_store::CatStore;
pub use snapshot::{Snapshot, SnapshotFile};

// == Public Constants ==
/// Identifier handed to the first cat in an empty store
pub const FIRST_ID: u64 = 1;
