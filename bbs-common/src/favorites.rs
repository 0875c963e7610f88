//! Favorites engine
//!
//! An insertion-ordered set of beat ids persisted under `"favorites"`.
//! Mutations write through immediately, the same way the cart does.

use crate::cart::Cart;
use crate::catalog::{Beat, Catalog};
use crate::storage::{CollectionKey, KeyValueStore, Persistence};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Favorites<S> {
    catalog: Arc<Catalog>,
    persistence: Persistence<S>,
    ids: Vec<String>,
    last_save_error: Option<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Rehydrate from the `"favorites"` collection, dropping duplicate ids
    pub async fn load(catalog: Arc<Catalog>, persistence: Persistence<S>) -> Self {
        let stored: Vec<String> = persistence.load_collection(CollectionKey::Favorites).await;
        let mut ids: Vec<String> = Vec::with_capacity(stored.len());
        for id in stored {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self {
            catalog,
            persistence,
            ids,
            last_save_error: None,
        }
    }

    /// Favorited ids in insertion order, including unresolvable ones
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_favorite(&self, beat_id: &str) -> bool {
        self.ids.iter().any(|id| id == beat_id)
    }

    /// Favorited beats that resolve against the catalog
    pub fn beats(&self) -> Vec<&Beat> {
        self.ids
            .iter()
            .filter_map(|id| self.catalog.beat_by_id(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add if absent, remove if present; returns the resulting membership
    pub async fn toggle_favorite(&mut self, beat_id: &str) -> bool {
        let now_favorite = if let Some(pos) = self.ids.iter().position(|id| id == beat_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(beat_id.to_string());
            true
        };
        debug!(beat_id, now_favorite, "Favorite toggled");
        self.save().await;
        now_favorite
    }

    /// Remove a favorite. No-op if absent.
    pub async fn remove_favorite(&mut self, beat_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != beat_id);
        if self.ids.len() == before {
            return false;
        }
        debug!(beat_id, "Favorite removed");
        self.save().await;
        true
    }

    /// Add every resolvable favorite that is not yet in the cart
    ///
    /// Lines already in the cart are left as they are. Each add writes
    /// through on its own, so a persistence failure part way leaves the
    /// earlier adds in place. Returns the number of lines added.
    pub async fn add_all_favorites_to_cart(&self, cart: &mut Cart<S>) -> usize {
        let mut added = 0;
        for id in &self.ids {
            if !self.catalog.contains(id) {
                continue;
            }
            if cart.add_item(id).await {
                added += 1;
            }
        }
        if added > 0 {
            info!("Moved {} favorites into the cart", added);
        }
        added
    }

    /// Error from the most recent failed write, cleared by the next success
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    async fn save(&mut self) {
        match self
            .persistence
            .save_collection(CollectionKey::Favorites, &self.ids)
            .await
        {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!("Favorites not persisted, keeping in-memory state: {}", e);
                self.last_save_error = Some(e.to_string());
            }
        }
    }
}
