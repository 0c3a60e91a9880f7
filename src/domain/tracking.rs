use crate::domain::storage::Storage;
use crate::error::Result;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// The set of releases the user has marked, mirrored to storage on every change.
pub struct TrackedGames {
    ids: FxHashSet<u64>,
    store: Arc<dyn Storage>,
}

impl TrackedGames {
    /// Reads the persisted set once. Missing or unreadable data yields an empty set.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let ids = match store.load_tracked_games() {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => FxHashSet::default(),
            Err(e) => {
                warn!("Ignoring unreadable tracked games data: {}", e);
                FxHashSet::default()
            }
        };

        info!("Loaded {} tracked games", ids.len());
        Self { ids, store }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Tracked ids in ascending order.
    pub fn ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Flips membership of `id`, persists the whole set and returns whether
    /// `id` is tracked afterwards. The set is left untouched if saving fails.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let tracked = !self.ids.contains(&id);
        let mut next: Vec<u64> = self.ids.iter().copied().filter(|&t| t != id).collect();
        if tracked {
            next.push(id);
        }
        next.sort_unstable();

        self.store.save_tracked_games(&next)?;

        if tracked {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
        Ok(tracked)
    }
}
