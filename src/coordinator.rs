use crate::error::{Result, SearchEngineError};
use crate::models::{ResultPage, SearchRequest, SearchResult};
use crate::query::{self, ProviderQuery};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Delay between the last keystroke and dispatch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// The remote search service, dyn-safe so sessions can swap in a scripted
/// provider under test.
pub trait SearchProvider: Send + Sync {
    fn search(&self, query: ProviderQuery) -> BoxFuture<'static, Result<Vec<SearchResult>>>;
}

/// Terminal state of one submitted search.
#[derive(Debug)]
pub enum SearchOutcome {
    Success {
        request: SearchRequest,
        page: ResultPage,
    },
    Failure {
        request: SearchRequest,
        error: SearchEngineError,
    },
}

enum Event {
    Keystroke(SearchRequest),
    Submit(SearchRequest),
    LoadMore,
}

/// Debounces keystrokes, dispatches at most one authoritative base search at
/// a time, and discards stale responses at the application boundary.
///
/// Every base dispatch bumps a monotonic sequence number; responses tagged
/// with an older sequence are dropped on arrival, whether they are a
/// superseded base search or an append fragment from before a reset. There
/// is no true cancellation of the underlying call.
#[derive(Clone)]
pub struct RequestCoordinator {
    events: mpsc::UnboundedSender<Event>,
}

impl RequestCoordinator {
    /// Starts the coordinator task and returns the input handle plus the
    /// outcome stream.
    pub fn spawn(
        provider: Arc<dyn SearchProvider>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(provider, debounce, event_rx, outcome_tx));
        (RequestCoordinator { events: event_tx }, outcome_rx)
    }

    /// A keystroke restarts the debounce timer; only the request pending
    /// when the timer fires is dispatched. An empty term clears any pending
    /// dispatch instead of erroring.
    pub fn keystroke(&self, request: SearchRequest) -> Result<()> {
        if !request.term.trim().is_empty() {
            request.validate()?;
        }
        self.send(Event::Keystroke(request));
        Ok(())
    }

    /// An explicit action (button, Enter) bypasses the timer: the request is
    /// validated synchronously and dispatched immediately, cancelling any
    /// pending debounced dispatch.
    pub fn submit(&self, request: SearchRequest) -> Result<()> {
        request.validate()?;
        self.send(Event::Submit(request));
        Ok(())
    }

    /// Requests the next page of the active base search. Ignored when no
    /// base search is active or its kind has no pagination.
    pub fn load_more(&self) {
        self.send(Event::LoadMore);
    }

    fn send(&self, event: Event) {
        if self.events.send(event).is_err() {
            warn!("Coordinator task stopped; input event dropped");
        }
    }
}

type TaggedCompletion = (u64, u32, bool, SearchRequest, Result<Vec<SearchResult>>);

struct TaskState {
    provider: Arc<dyn SearchProvider>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
    debounce: Duration,
    base_seq: u64,
    page: u32,
    active: Option<SearchRequest>,
    pending: Option<SearchRequest>,
    deadline: Option<Instant>,
}

async fn run(
    provider: Arc<dyn SearchProvider>,
    debounce: Duration,
    mut events: mpsc::UnboundedReceiver<Event>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
) {
    let mut state = TaskState {
        provider,
        outcomes,
        debounce,
        base_seq: 0,
        page: 0,
        active: None,
        pending: None,
        deadline: None,
    };
    let mut in_flight: FuturesUnordered<BoxFuture<'static, TaggedCompletion>> =
        FuturesUnordered::new();

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(Event::Keystroke(request)) => state.on_keystroke(request),
                    Some(Event::Submit(request)) => state.dispatch_base(request, &mut in_flight),
                    Some(Event::LoadMore) => state.on_load_more(&mut in_flight),
                    None => break,
                }
            }
            _ = wait_until(state.deadline), if state.deadline.is_some() => {
                state.deadline = None;
                if let Some(request) = state.pending.take() {
                    debug!(term = %request.term, "Debounce timer fired");
                    state.dispatch_base(request, &mut in_flight);
                }
            }
            Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                state.on_completion(completion);
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        // Guarded off in the select; never polled without a deadline.
        None => std::future::pending().await,
    }
}

impl TaskState {
    fn on_keystroke(&mut self, request: SearchRequest) {
        if request.term.trim().is_empty() {
            self.pending = None;
            self.deadline = None;
            return;
        }
        self.pending = Some(request);
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// A fresh base search: supersedes everything in flight, resets the page
    /// counter, and becomes the request that "load more" extends.
    fn dispatch_base(
        &mut self,
        mut request: SearchRequest,
        in_flight: &mut FuturesUnordered<BoxFuture<'static, TaggedCompletion>>,
    ) {
        self.pending = None;
        self.deadline = None;
        self.base_seq += 1;
        self.page = 1;
        request.page = 1;
        self.active = Some(request.clone());
        debug!(seq = self.base_seq, term = %request.term, "Dispatching base search");
        self.dispatch(request, self.page, false, in_flight);
    }

    fn on_load_more(
        &mut self,
        in_flight: &mut FuturesUnordered<BoxFuture<'static, TaggedCompletion>>,
    ) {
        let Some(active) = self.active.clone() else {
            debug!("Load more ignored: no active search");
            return;
        };
        if !active.kind.supports_filters() {
            debug!(kind = ?active.kind, "Load more ignored: kind has no pagination");
            return;
        }
        self.page += 1;
        let mut request = active;
        request.page = self.page;
        debug!(seq = self.base_seq, page = self.page, "Dispatching append search");
        self.dispatch(request, self.page, true, in_flight);
    }

    fn dispatch(
        &self,
        request: SearchRequest,
        page_number: u32,
        append: bool,
        in_flight: &mut FuturesUnordered<BoxFuture<'static, TaggedCompletion>>,
    ) {
        let provider_query: ProviderQuery = query::build(&request);
        let seq = self.base_seq;
        let call = self.provider.search(provider_query);
        in_flight.push(Box::pin(async move {
            let result = call.await;
            (seq, page_number, append, request, result)
        }));
    }

    /// The application boundary: responses whose sequence no longer matches
    /// the current base sequence are discarded, so only the most recently
    /// dispatched base search (and its own append pages) ever reaches the
    /// visible state.
    fn on_completion(&mut self, completion: TaggedCompletion) {
        let (seq, page_number, append, request, result) = completion;
        if seq != self.base_seq {
            debug!(
                seq,
                current = self.base_seq,
                append,
                "Discarding stale response"
            );
            return;
        }
        let outcome = match result {
            Ok(items) => SearchOutcome::Success {
                request,
                page: ResultPage {
                    items,
                    page_number,
                    append,
                },
            },
            Err(error) => SearchOutcome::Failure { request, error },
        };
        if self.outcomes.send(outcome).is_err() {
            debug!("Outcome receiver dropped");
        }
    }
}
