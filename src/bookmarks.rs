use crate::error::{Result, SearchEngineError};
use crate::models::{AnnotatedResult, BookmarkEntry, SearchResult};
use crate::persist::PersistentSet;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::debug;

/// Storage key for the bookmark set.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Keeps the persisted bookmark set reconciled with rendered results.
///
/// Presence of a composite id in the set is authoritative for "is
/// bookmarked". Toggling stores the full result snapshot at toggle time and
/// writes the whole set through to the store before returning.
pub struct BookmarkReconciler {
    set: PersistentSet<BookmarkEntry>,
}

impl BookmarkReconciler {
    /// Loads the reconciler from the store's last persisted content.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        BookmarkReconciler {
            set: PersistentSet::load(
                store,
                BOOKMARKS_KEY,
                |entry| entry.composite_id.clone(),
                None,
            ),
        }
    }

    pub fn is_bookmarked(&self, result: &SearchResult) -> bool {
        match result.composite_id() {
            Some(id) => self.set.contains(&id),
            None => false,
        }
    }

    /// Flips the bookmark state of a result and returns the new state.
    /// User results are rejected; they carry no composite id.
    pub fn toggle(&mut self, result: &SearchResult) -> Result<bool> {
        let id = result
            .composite_id()
            .ok_or(SearchEngineError::NotBookmarkable)?;
        if self.set.remove(&id)? {
            debug!(composite_id = %id, "Bookmark removed");
            return Ok(false);
        }
        self.set.insert(BookmarkEntry {
            composite_id: id.clone(),
            snapshot: result.clone(),
        })?;
        debug!(composite_id = %id, "Bookmark added");
        Ok(true)
    }

    /// Removes a rendered bookmark. Defined as `toggle` on the stored
    /// snapshot, which always lands on the remove branch.
    pub fn remove(&mut self, entry: &BookmarkEntry) -> Result<bool> {
        self.toggle(&entry.snapshot)?;
        Ok(true)
    }

    /// Tags each result with its current bookmark state for rendering.
    pub fn annotate(&self, items: &[SearchResult]) -> Vec<AnnotatedResult> {
        items
            .iter()
            .map(|result| AnnotatedResult {
                result: result.clone(),
                bookmarked: self.is_bookmarked(result),
            })
            .collect()
    }

    /// Bookmarks in insertion order.
    pub fn list(&self) -> &[BookmarkEntry] {
        self.set.entries()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
