//! The Cat record and its validated input form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Cat ==
/// A persisted cat, as returned by the API and written to the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    /// Store-assigned identifier
    pub id: u64,
    pub name: String,
    pub age: i32,
    /// What the cat likes to do
    pub enjoys: String,
    /// Optional image URL
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cat {
    /// Builds a record from validated attributes, stamping both timestamps.
    pub fn new(id: u64, attrs: NewCat) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: attrs.name,
            age: attrs.age,
            enjoys: attrs.enjoys,
            image: attrs.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable attributes and bumps `updated_at`.
    pub fn assign(&mut self, attrs: NewCat) {
        self.name = attrs.name;
        self.age = attrs.age;
        self.enjoys = attrs.enjoys;
        self.image = attrs.image;
        self.updated_at = Utc::now();
    }
}

// == New Cat ==
/// Attributes that passed validation; every required field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCat {
    pub name: String,
    pub age: i32,
    pub enjoys: String,
    pub image: Option<String>,
}
