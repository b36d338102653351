//! Cat Store Module
//!
//! Keeps cats ordered by id and, when opened on a file, writes the full
//! snapshot after every change before reporting success.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::error::{CatError, Result};
use crate::models::{Cat, CatAttributes};
use crate::store::{Snapshot, SnapshotFile, FIRST_ID};

// == Cat Store ==
/// Record store for cats.
#[derive(Debug)]
pub struct CatStore {
    /// Cats keyed by id; ids only grow, so iteration is insertion order
    cats: BTreeMap<u64, Cat>,
    /// Id for the next created cat
    next_id: u64,
    /// Optional durable mirror
    snapshot: Option<SnapshotFile>,
}

impl CatStore {
    // == Constructors ==
    /// Creates an empty, purely in-memory store.
    pub fn new() -> Self {
        Self {
            cats: BTreeMap::new(),
            next_id: FIRST_ID,
            snapshot: None,
        }
    }

    /// Opens a store backed by the snapshot at `path`.
    ///
    /// Existing contents are loaded; a missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = SnapshotFile::new(path);
        let mut store = Self::new();

        if let Some(snapshot) = file.load()? {
            store.cats = snapshot
                .cats
                .into_iter()
                .map(|cat| (cat.id, cat))
                .collect();
            // Never hand out an id already present in the file
            let after_last = store.cats.keys().next_back().map_or(FIRST_ID, |id| id + 1);
            store.next_id = snapshot.next_id.max(after_last);
            info!(
                "Loaded {} cats from {}",
                store.cats.len(),
                file.path().display()
            );
        }

        store.snapshot = Some(file);
        Ok(store)
    }

    // == Create ==
    /// Validates `attrs` and stores a new cat with a fresh id.
    pub fn create(&mut self, attrs: CatAttributes) -> Result<Cat> {
        let new_cat = attrs.into_new_cat()?;

        let id = self.next_id;
        let cat = Cat::new(id, new_cat);
        self.cats.insert(id, cat.clone());
        self.next_id += 1;

        if let Err(e) = self.persist() {
            self.cats.remove(&id);
            self.next_id = id;
            return Err(e);
        }

        debug!("Created cat {}", id);
        Ok(cat)
    }

    // == List ==
    /// Returns every cat in insertion order.
    pub fn list(&self) -> Vec<Cat> {
        self.cats.values().cloned().collect()
    }

    // == Find ==
    /// Looks up a cat by id.
    pub fn find(&self, id: u64) -> Result<Cat> {
        self.cats
            .get(&id)
            .cloned()
            .ok_or_else(|| CatError::NotFound(id.to_string()))
    }

    // == Update ==
    /// Applies `changes` to the cat with `id`.
    ///
    /// Unsent attributes keep their stored values; the merged record must
    /// still pass validation.
    pub fn update(&mut self, id: u64, changes: CatAttributes) -> Result<Cat> {
        let cat = self
            .cats
            .get_mut(&id)
            .ok_or_else(|| CatError::NotFound(id.to_string()))?;

        let merged = changes.merge_into(cat)?;
        let previous = cat.clone();
        cat.assign(merged);
        let updated = cat.clone();

        if let Err(e) = self.persist() {
            self.cats.insert(id, previous);
            return Err(e);
        }

        debug!("Updated cat {}", id);
        Ok(updated)
    }

    // == Delete ==
    /// Removes the cat with `id`, returning it.
    pub fn delete(&mut self, id: u64) -> Result<Cat> {
        let cat = self
            .cats
            .remove(&id)
            .ok_or_else(|| CatError::NotFound(id.to_string()))?;

        if let Err(e) = self.persist() {
            self.cats.insert(id, cat);
            return Err(e);
        }

        debug!("Deleted cat {}", id);
        Ok(cat)
    }

    // == Length ==
    /// Returns the number of stored cats.
    pub fn len(&self) -> usize {
        self.cats.len()
    }

    // == Is Empty ==
    /// Returns true if no cats are stored.
    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let Some(file) = &self.snapshot else {
            return Ok(());
        };

        let snapshot = Snapshot {
            next_id: self.next_id,
            cats: self.list(),
        };
        file.save(&snapshot).inspect_err(|e| error!("{}", e))
    }
}

impl Default for CatStore {
    fn default() -> Self {
        Self::new()
    }
}
