use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Ordered, keyed collection persisted as a JSON array under a single
/// storage key. Backs both the bookmark set and the recent-search ring.
///
/// Every mutation writes the full collection back to the store before
/// returning, and loading tolerates missing or malformed persisted JSON by
/// starting empty.
pub struct PersistentSet<T> {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    key_fn: fn(&T) -> String,
    capacity: Option<usize>,
    entries: Vec<T>,
}

impl<T> PersistentSet<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        key_fn: fn(&T) -> String,
        capacity: Option<usize>,
    ) -> Self {
        let storage_key = storage_key.into();
        let entries = match store.get(&storage_key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(key = %storage_key, %err, "Discarding malformed persisted entries");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = %storage_key, %err, "Failed to read persisted entries");
                Vec::new()
            }
        };
        PersistentSet {
            store,
            storage_key,
            key_fn,
            capacity,
            entries,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| (self.key_fn)(entry) == key)
    }

    /// Appends a new entry and persists. An entry whose key is already
    /// present is left untouched. At capacity the oldest entry is evicted
    /// first.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        let key = (self.key_fn)(&value);
        if self.contains(&key) {
            return Ok(false);
        }
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.remove(0);
            }
        }
        self.entries.push(value);
        self.persist()?;
        Ok(true)
    }

    /// Removes the entry with the given key and persists. Returns whether an
    /// entry was removed.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| (self.key_fn)(entry) != key);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.entries)?;
        self.store.set(&self.storage_key, &raw)
    }
}

/// Storage key for the recent-search ring.
pub const HISTORY_KEY: &str = "searchHistory";

/// How many recent searches are retained.
pub const HISTORY_CAPACITY: usize = 5;

/// Recent-search ring: distinct terms only, oldest evicted past capacity.
pub struct SearchHistory {
    set: PersistentSet<String>,
}

impl SearchHistory {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        SearchHistory {
            set: PersistentSet::load(store, HISTORY_KEY, |term| term.clone(), Some(HISTORY_CAPACITY)),
        }
    }

    /// Records a successful query term. Repeated terms are not re-added.
    pub fn record(&mut self, term: &str) -> Result<bool> {
        self.set.insert(term.to_string())
    }

    pub fn terms(&self) -> &[String] {
        self.set.entries()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
