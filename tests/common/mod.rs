// Not every test binary uses every helper here.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use github_search_engine::coordinator::SearchProvider;
use github_search_engine::error::{Result, SearchEngineError};
use github_search_engine::models::{
    GistResult, RepositoryResult, SearchKind, SearchRequest, SearchResult, UserResult,
};
use github_search_engine::query::ProviderQuery;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted stand-in for the remote search service. Responses are consumed
/// in dispatch order; each can carry a simulated latency so tests can race
/// calls against each other under a paused clock.
#[derive(Default)]
pub struct MockProvider {
    scripts: Mutex<VecDeque<(Duration, Result<Vec<SearchResult>>)>>,
    calls: Mutex<Vec<ProviderQuery>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, items: Vec<SearchResult>) {
        self.push_ok_after(Duration::ZERO, items);
    }

    pub fn push_ok_after(&self, delay: Duration, items: Vec<SearchResult>) {
        self.scripts
            .lock()
            .unwrap()
            .push_back((delay, Ok(items)));
    }

    pub fn push_err_after(&self, delay: Duration, error: SearchEngineError) {
        self.scripts
            .lock()
            .unwrap()
            .push_back((delay, Err(error)));
    }

    /// Queries seen so far, in dispatch order.
    pub fn calls(&self) -> Vec<ProviderQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SearchProvider for MockProvider {
    fn search(&self, query: ProviderQuery) -> BoxFuture<'static, Result<Vec<SearchResult>>> {
        self.calls.lock().unwrap().push(query);
        let (delay, result) = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

pub fn repo(id: u64, name: &str) -> SearchResult {
    SearchResult::Repository(RepositoryResult {
        id,
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        html_url: format!("https://github.com/owner/{}", name),
        owner_login: "owner".to_string(),
        owner_avatar_url: "https://github.com/owner.png".to_string(),
        owner_html_url: "https://github.com/owner".to_string(),
        stars: 100,
        forks: 10,
        watchers: 100,
        homepage: None,
        has_pages: false,
    })
}

pub fn gist(id: &str) -> SearchResult {
    let created: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
    SearchResult::Gist(GistResult {
        id: id.to_string(),
        description: Some("a gist".to_string()),
        html_url: format!("https://gist.github.com/owner/{}", id),
        files: vec!["main.rs".to_string()],
        created_at: created,
        updated_at: created,
        owner_login: "owner".to_string(),
    })
}

pub fn user(login: &str) -> SearchResult {
    SearchResult::User(UserResult {
        login: login.to_string(),
        html_url: format!("https://github.com/{}", login),
        avatar_url: format!("https://github.com/{}.png", login),
    })
}

pub fn repo_request(term: &str) -> SearchRequest {
    SearchRequest::new(term, SearchKind::Repository)
}
