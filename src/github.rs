use crate::coordinator::SearchProvider;
use crate::error::{Result, SearchEngineError};
use crate::models::{SearchKind, SearchResult};
use crate::query::ProviderQuery;
use crate::types::{ApiGist, ApiRepo, RepoSearchResponse, UserSearchResponse};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const API_BASE_URL: &str = "https://api.github.com";

/// Thin client over the GitHub REST API's search and listing endpoints.
///
/// Transport failures and non-2xx statuses surface as network errors, a
/// body that does not decode as the expected shape surfaces as a decode
/// error; neither is retried.
#[derive(Clone)]
pub struct GitHubSearchClient {
    client: Client,
}

impl GitHubSearchClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("GitHub Search Engine/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubSearchClient { client })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchEngineError::Status { status, body });
        }

        // Decoded from text so a malformed body maps to a decode error
        // rather than a transport error.
        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        Ok(decoded)
    }

    /// Repository search: `/search/repositories?q=...`.
    pub async fn search_repositories(&self, query: &ProviderQuery) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search/repositories?{}", API_BASE_URL, query.query);
        let response: RepoSearchResponse = self.get_json(&url).await?;
        Ok(response.items.into_iter().map(SearchResult::from).collect())
    }

    /// User search: `/search/users?q=...`.
    pub async fn search_users(&self, query: &ProviderQuery) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search/users?{}", API_BASE_URL, query.query);
        let response: UserSearchResponse = self.get_json(&url).await?;
        Ok(response.items.into_iter().map(SearchResult::from).collect())
    }

    /// Gist listing for a user: `/users/{user}/gists`. The gist surface of
    /// the API is a listing, not a search, so the term names the user.
    pub async fn list_gists(&self, user: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/users/{}/gists", API_BASE_URL, user);
        let gists: Vec<ApiGist> = self.get_json(&url).await?;
        Ok(gists.into_iter().map(SearchResult::from).collect())
    }

    /// Repository listing for a user: `/users/{login}/repos`.
    pub async fn list_user_repositories(&self, login: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/users/{}/repos", API_BASE_URL, login);
        let repos: Vec<ApiRepo> = self.get_json(&url).await?;
        Ok(repos.into_iter().map(SearchResult::from).collect())
    }

    /// Dispatches a built query to the endpoint matching its kind.
    pub async fn execute(&self, query: &ProviderQuery) -> Result<Vec<SearchResult>> {
        match query.kind {
            SearchKind::Repository => self.search_repositories(query).await,
            SearchKind::Gist => self.list_gists(&query.term).await,
            SearchKind::User => self.search_users(query).await,
        }
    }
}

impl SearchProvider for GitHubSearchClient {
    fn search(&self, query: ProviderQuery) -> BoxFuture<'static, Result<Vec<SearchResult>>> {
        let client = self.clone();
        Box::pin(async move { client.execute(&query).await })
    }
}
