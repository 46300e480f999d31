use crate::bookmarks::BookmarkReconciler;
use crate::coordinator::{RequestCoordinator, SearchOutcome, SearchProvider, DEFAULT_DEBOUNCE};
use crate::error::Result;
use crate::merge::{merge_with, MergePolicy, VisibleResults, VisibleStatus};
use crate::models::{AnnotatedResult, BookmarkEntry, SearchRequest, SearchResult};
use crate::persist::SearchHistory;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Engine knobs owned by the caller.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub merge_policy: MergePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            debounce: DEFAULT_DEBOUNCE,
            merge_policy: MergePolicy::default(),
        }
    }
}

/// What the rendering layer receives after each settled search.
#[derive(Debug)]
pub enum SessionUpdate {
    Results {
        items: Vec<AnnotatedResult>,
        status: VisibleStatus,
        append: bool,
    },
    Error {
        reason: &'static str,
        message: String,
    },
}

/// One user-facing search session: coordinator, visible result set, bookmark
/// set and recent-search history, all owned here and passed in by the
/// caller. Input events go in through the three passthroughs; annotated
/// result sets come out of [`SearchSession::next_update`].
pub struct SearchSession {
    coordinator: RequestCoordinator,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    visible: VisibleResults,
    bookmarks: BookmarkReconciler,
    history: SearchHistory,
    merge_policy: MergePolicy,
}

impl SearchSession {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        store: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Self {
        let (coordinator, outcomes) = RequestCoordinator::spawn(provider, config.debounce);
        SearchSession {
            coordinator,
            outcomes,
            visible: VisibleResults::new(),
            bookmarks: BookmarkReconciler::load(Arc::clone(&store)),
            history: SearchHistory::load(store),
            merge_policy: config.merge_policy,
        }
    }

    pub fn keystroke(&self, request: SearchRequest) -> Result<()> {
        self.coordinator.keystroke(request)
    }

    pub fn submit(&self, request: SearchRequest) -> Result<()> {
        self.coordinator.submit(request)
    }

    pub fn load_more(&self) {
        self.coordinator.load_more();
    }

    /// Waits for the next settled search and folds it into the session:
    /// merge into the visible set, record the term for successful base
    /// queries, annotate with bookmark state. Returns `None` once the
    /// coordinator is gone.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        let outcome = self.outcomes.recv().await?;
        Some(self.apply(outcome))
    }

    fn apply(&mut self, outcome: SearchOutcome) -> SessionUpdate {
        match outcome {
            SearchOutcome::Success { request, page } => {
                let append = page.append;
                if !append {
                    if let Err(err) = self.history.record(request.term.trim()) {
                        warn!(%err, "Failed to persist search history");
                    }
                }
                self.visible = merge_with(&self.visible, page, self.merge_policy);
                SessionUpdate::Results {
                    items: self.bookmarks.annotate(&self.visible.items),
                    status: self.visible.status,
                    append,
                }
            }
            SearchOutcome::Failure { request: _, error } => SessionUpdate::Error {
                reason: error.reason(),
                message: error.to_string(),
            },
        }
    }

    /// Flips a result's bookmark state and returns the new state. The
    /// persisted set is written through before this returns.
    pub fn toggle_bookmark(&mut self, result: &SearchResult) -> Result<bool> {
        self.bookmarks.toggle(result)
    }

    pub fn remove_bookmark(&mut self, entry: &BookmarkEntry) -> Result<bool> {
        self.bookmarks.remove(entry)
    }

    pub fn is_bookmarked(&self, result: &SearchResult) -> bool {
        self.bookmarks.is_bookmarked(result)
    }

    pub fn bookmarks(&self) -> &[BookmarkEntry] {
        self.bookmarks.list()
    }

    pub fn history(&self) -> &[String] {
        self.history.terms()
    }

    pub fn visible(&self) -> &VisibleResults {
        &self.visible
    }

    /// The current visible set with bookmark annotations, for re-rendering
    /// after a toggle.
    pub fn annotated(&self) -> Vec<AnnotatedResult> {
        self.bookmarks.annotate(&self.visible.items)
    }
}
