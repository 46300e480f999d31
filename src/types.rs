use crate::models::{GistResult, RepositoryResult, SearchResult, UserResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

// GitHub API response structures

#[derive(Debug, Deserialize)]
pub struct RepoSearchResponse {
    pub items: Vec<ApiRepo>,
}

#[derive(Debug, Deserialize)]
pub struct UserSearchResponse {
    pub items: Vec<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner: ApiOwner,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub watchers_count: u32,
    pub homepage: Option<String>,
    #[serde(default)]
    pub has_pages: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiOwner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiGist {
    pub id: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub files: HashMap<String, ApiGistFile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Option<ApiGistOwner>,
}

// Gist listings key files by name; only the names are carried forward.
#[derive(Debug, Deserialize)]
pub struct ApiGistFile {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiGistOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub login: String,
    pub html_url: String,
    pub avatar_url: String,
}

impl From<ApiRepo> for SearchResult {
    fn from(repo: ApiRepo) -> Self {
        SearchResult::Repository(RepositoryResult {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            html_url: repo.html_url,
            owner_login: repo.owner.login,
            owner_avatar_url: repo.owner.avatar_url,
            owner_html_url: repo.owner.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
            homepage: repo.homepage.filter(|h| !h.is_empty()),
            has_pages: repo.has_pages,
        })
    }
}

impl From<ApiGist> for SearchResult {
    fn from(gist: ApiGist) -> Self {
        let mut files: Vec<String> = gist.files.into_keys().collect();
        files.sort();
        SearchResult::Gist(GistResult {
            id: gist.id,
            description: gist.description.filter(|d| !d.is_empty()),
            html_url: gist.html_url,
            files,
            created_at: gist.created_at,
            updated_at: gist.updated_at,
            owner_login: gist.owner.map(|o| o.login).unwrap_or_default(),
        })
    }
}

impl From<ApiUser> for SearchResult {
    fn from(user: ApiUser) -> Self {
        SearchResult::User(UserResult {
            login: user.login,
            html_url: user.html_url,
            avatar_url: user.avatar_url,
        })
    }
}
