use crate::models::{SearchKind, SortField};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Repository,
    Gist,
    User,
}

impl From<KindArg> for SearchKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Repository => SearchKind::Repository,
            KindArg::Gist => SearchKind::Gist,
            KindArg::User => SearchKind::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl From<SortArg> for SortField {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Stars => SortField::Stars,
            SortArg::Forks => SortField::Forks,
            SortArg::HelpWantedIssues => SortField::HelpWantedIssues,
            SortArg::Updated => SortField::Updated,
        }
    }
}

#[derive(Parser)]
#[command(name = "github-search-engine")]
#[command(about = "Search GitHub repositories, gists and users from the terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Search term (a username for gist searches)
    pub term: Option<String>,

    /// What to search for
    #[arg(long, value_enum, default_value = "repository")]
    pub kind: KindArg,

    /// Filter repositories by language
    #[arg(long)]
    pub language: Option<String>,

    /// Filter repositories by topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Minimum star count
    #[arg(long)]
    pub min_stars: Option<String>,

    /// Minimum fork count
    #[arg(long)]
    pub min_forks: Option<String>,

    /// Minimum watcher count
    #[arg(long)]
    pub min_watchers: Option<String>,

    /// Minimum open issue count
    #[arg(long)]
    pub min_open_issues: Option<String>,

    /// Only repositories pushed after this date (YYYY-MM-DD)
    #[arg(long)]
    pub pushed_after: Option<String>,

    /// Only repositories created after this date (YYYY-MM-DD)
    #[arg(long)]
    pub created_after: Option<String>,

    /// Filter repositories by license keyword
    #[arg(long)]
    pub license: Option<String>,

    /// Server-side ordering for repository searches
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// How many result pages to fetch (pages past the first are appended)
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Toggle the bookmark on the Nth result (1-based) after searching
    #[arg(long)]
    pub bookmark: Option<usize>,

    /// List persisted bookmarks and exit
    #[arg(long)]
    pub bookmarks: bool,

    /// List recent searches and exit
    #[arg(long)]
    pub history: bool,

    /// List a user's repositories and exit
    #[arg(long)]
    pub user_repos: Option<String>,

    /// Path of the persistent store file
    #[arg(long, env = "SEARCH_STORE_PATH", default_value = ".github-search.json")]
    pub store: String,
}
