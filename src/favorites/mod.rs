// ABOUTME: Favorite recipes loaded once and rewritten in full on every change
// ABOUTME: Combines the in-memory collection with a key-value store under the savedRecipes key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Favorites
//!
//! The collection lives in memory and is persisted as one JSON array under
//! [`FAVORITES_KEY`]. Stored data that cannot be read or decoded is logged
//! and replaced by an empty collection on the next change. Only changes
//! that actually modify the collection are written.

mod collection;
mod store;

pub use collection::FavoritesCollection;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use tracing::{info, warn};

use crate::constants::storage::FAVORITES_KEY;
use crate::errors::AppResult;
use crate::models::Recipe;

/// Favorites backed by a store
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    collection: FavoritesCollection,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Load the saved collection from `store`
    ///
    /// Never fails: unreadable or corrupt data yields an empty collection.
    pub fn load(store: S) -> Self {
        let collection = match store.load(FAVORITES_KEY) {
            Ok(Some(json)) => FavoritesCollection::from_json(&json).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable favorites");
                FavoritesCollection::new()
            }),
            Ok(None) => FavoritesCollection::new(),
            Err(e) => {
                warn!(error = %e, "Could not load favorites, starting empty");
                FavoritesCollection::new()
            }
        };

        info!(count = collection.len(), "Loaded favorites");
        Self { store, collection }
    }

    /// Current collection
    #[must_use]
    pub const fn collection(&self) -> &FavoritesCollection {
        &self.collection
    }

    /// Saved recipe with this name
    #[must_use]
    pub fn get(&self, recipe_name: &str) -> Option<&Recipe> {
        self.collection.get(recipe_name)
    }

    /// Whether a recipe with this name is saved
    #[must_use]
    pub fn contains(&self, recipe_name: &str) -> bool {
        self.collection.contains(recipe_name)
    }

    /// Save a recipe; a duplicate name is a no-op
    ///
    /// Returns whether the recipe was added.
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the collection could
    /// not be written; the in-memory collection is then left unchanged.
    pub fn add(&mut self, recipe: Recipe) -> AppResult<bool> {
        let mut updated = self.collection.clone();
        if !updated.add(recipe) {
            return Ok(false);
        }
        self.commit(updated)?;
        Ok(true)
    }

    /// Remove a recipe by name; an unknown name is a no-op
    ///
    /// Returns whether a recipe was removed.
    ///
    /// # Errors
    ///
    /// Same as [`Favorites::add`].
    pub fn remove(&mut self, recipe_name: &str) -> AppResult<bool> {
        let mut updated = self.collection.clone();
        if !updated.remove(recipe_name) {
            return Ok(false);
        }
        self.commit(updated)?;
        Ok(true)
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, updated: FavoritesCollection) -> AppResult<()> {
        let json = updated.to_json()?;
        self.store.save(FAVORITES_KEY, &json)?;
        self.collection = updated;
        Ok(())
    }
}
