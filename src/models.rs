use crate::error::{Result, SearchEngineError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which of the provider's search surfaces a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Repository,
    Gist,
    User,
}

impl SearchKind {
    /// Tag used to build bookmark composite ids. Users are not bookmarkable.
    pub fn kind_tag(&self) -> Option<&'static str> {
        match self {
            SearchKind::Repository => Some("repo"),
            SearchKind::Gist => Some("gist"),
            SearchKind::User => None,
        }
    }

    /// Only repository searches understand filters and pagination.
    pub fn supports_filters(&self) -> bool {
        matches!(self, SearchKind::Repository)
    }
}

/// Typed filter keys for repository searches. The declaration order is the
/// order qualifiers are emitted in, so the built query is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKey {
    Language,
    Topic,
    MinStars,
    MinForks,
    MinWatchers,
    MinOpenIssues,
    PushedAfter,
    CreatedAfter,
    License,
}

impl FilterKey {
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Language,
        FilterKey::Topic,
        FilterKey::MinStars,
        FilterKey::MinForks,
        FilterKey::MinWatchers,
        FilterKey::MinOpenIssues,
        FilterKey::PushedAfter,
        FilterKey::CreatedAfter,
        FilterKey::License,
    ];

    /// Provider qualifier prefix, including its punctuation.
    pub fn qualifier(&self) -> &'static str {
        match self {
            FilterKey::Language => "language:",
            FilterKey::Topic => "topic:",
            FilterKey::MinStars => "stars:>",
            FilterKey::MinForks => "forks:>",
            FilterKey::MinWatchers => "watchers:>",
            FilterKey::MinOpenIssues => "open_issues:>",
            FilterKey::PushedAfter => "pushed:>",
            FilterKey::CreatedAfter => "created:>",
            FilterKey::License => "license:",
        }
    }

    /// Whether the value must parse as a non-negative integer before dispatch.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FilterKey::MinStars
                | FilterKey::MinForks
                | FilterKey::MinWatchers
                | FilterKey::MinOpenIssues
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKey::Language => "language",
            FilterKey::Topic => "topic",
            FilterKey::MinStars => "min-stars",
            FilterKey::MinForks => "min-forks",
            FilterKey::MinWatchers => "min-watchers",
            FilterKey::MinOpenIssues => "min-open-issues",
            FilterKey::PushedAfter => "pushed-after",
            FilterKey::CreatedAfter => "created-after",
            FilterKey::License => "license",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Server-side ordering for repository searches. Absence means the provider's
/// default ("best match") ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Forks => "forks",
            SortField::HelpWantedIssues => "help-wanted-issues",
            SortField::Updated => "updated",
        }
    }
}

/// A single search as entered by the user, constructed per action and
/// discarded after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub term: String,
    pub kind: SearchKind,
    pub filters: BTreeMap<FilterKey, String>,
    pub sort: Option<SortField>,
    pub page: u32,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>, kind: SearchKind) -> Self {
        SearchRequest {
            term: term.into(),
            kind,
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
        }
    }

    pub fn with_filter(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.filters.insert(key, value.into());
        self
    }

    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Rejects a request before it reaches the network: the trimmed term must
    /// be non-empty, the page positive, and numeric filter values must be
    /// non-negative integers. Non-numeric filter values pass through verbatim.
    pub fn validate(&self) -> Result<()> {
        if self.term.trim().is_empty() {
            return Err(SearchEngineError::EmptyTerm);
        }
        if self.page < 1 {
            return Err(SearchEngineError::InvalidPage);
        }
        for (key, value) in &self.filters {
            if key.is_numeric() && !value.trim().is_empty() && value.trim().parse::<u64>().is_err()
            {
                return Err(SearchEngineError::InvalidFilter {
                    key: key.name(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A repository hit from the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResult {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub owner_html_url: String,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    pub homepage: Option<String>,
    pub has_pages: bool,
}

/// A gist from the per-user listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistResult {
    pub id: String,
    pub description: Option<String>,
    pub html_url: String,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_login: String,
}

/// A user hit from the user search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    pub login: String,
    pub html_url: String,
    pub avatar_url: String,
}

/// One search hit, tagged by kind. Serialized form is what bookmark
/// snapshots persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchResult {
    Repository(RepositoryResult),
    Gist(GistResult),
    User(UserResult),
}

impl SearchResult {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchResult::Repository(_) => SearchKind::Repository,
            SearchResult::Gist(_) => SearchKind::Gist,
            SearchResult::User(_) => SearchKind::User,
        }
    }

    /// Bookmark key: the provider id joined with the kind tag, so a
    /// repository and a gist sharing a numeric id never collide. Users have
    /// no composite id and cannot be bookmarked.
    pub fn composite_id(&self) -> Option<String> {
        match self {
            SearchResult::Repository(repo) => Some(format!("{}-repo", repo.id)),
            SearchResult::Gist(gist) => Some(format!("{}-gist", gist.id)),
            SearchResult::User(_) => None,
        }
    }

    /// Identity used by the opt-in append deduplication mode.
    pub fn dedup_id(&self) -> String {
        match self {
            SearchResult::Repository(repo) => format!("{}-repo", repo.id),
            SearchResult::Gist(gist) => format!("{}-gist", gist.id),
            SearchResult::User(user) => format!("{}-user", user.login),
        }
    }

    /// Display title for terminal output.
    pub fn title(&self) -> &str {
        match self {
            SearchResult::Repository(repo) => &repo.name,
            SearchResult::Gist(gist) => gist
                .files
                .first()
                .map(String::as_str)
                .unwrap_or(gist.id.as_str()),
            SearchResult::User(user) => &user.login,
        }
    }

    pub fn html_url(&self) -> &str {
        match self {
            SearchResult::Repository(repo) => &repo.html_url,
            SearchResult::Gist(gist) => &gist.html_url,
            SearchResult::User(user) => &user.html_url,
        }
    }
}

/// A persisted bookmark: the composite id plus the full result snapshot at
/// toggle time. Snapshots are never refreshed, so displayed stats can go
/// stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
    pub composite_id: String,
    pub snapshot: SearchResult,
}

/// One page of results as delivered by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub items: Vec<SearchResult>,
    pub page_number: u32,
    pub append: bool,
}

/// A result annotated with its current bookmark state; this is what the
/// rendering layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedResult {
    pub result: SearchResult,
    pub bookmarked: bool,
}
