use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use github_search_engine::cli::{Cli, KindArg};
use github_search_engine::github::GitHubSearchClient;
use github_search_engine::merge::VisibleStatus;
use github_search_engine::models::{AnnotatedResult, FilterKey, SearchRequest, SearchResult};
use github_search_engine::session::{SearchSession, SessionConfig, SessionUpdate};
use github_search_engine::storage::FileStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let store = Arc::new(
        FileStore::open(&cli.store)
            .with_context(|| format!("Failed to open store at {}", cli.store))?,
    );
    let client = Arc::new(GitHubSearchClient::new().context("Failed to build HTTP client")?);
    let mut session = SearchSession::new(client.clone(), store, SessionConfig::default());

    if cli.bookmarks {
        print_bookmarks(&session);
        return Ok(());
    }

    if cli.history {
        print_history(&session);
        return Ok(());
    }

    if let Some(login) = &cli.user_repos {
        let repos = client
            .list_user_repositories(login)
            .await
            .with_context(|| format!("Failed to list repositories of {}", login))?;
        println!("{}", format!("Repositories of {}", login).bold().green());
        for (index, repo) in repos.iter().enumerate() {
            print_result(index, repo, false);
        }
        return Ok(());
    }

    let term = cli
        .term
        .clone()
        .context("A search term is required (or use --bookmarks / --history / --user-repos)")?;

    let mut request = SearchRequest::new(term, cli.kind.into());
    if let Some(sort) = cli.sort {
        request = request.with_sort(sort.into());
    }
    let filters = [
        (FilterKey::Language, &cli.language),
        (FilterKey::Topic, &cli.topic),
        (FilterKey::MinStars, &cli.min_stars),
        (FilterKey::MinForks, &cli.min_forks),
        (FilterKey::MinWatchers, &cli.min_watchers),
        (FilterKey::MinOpenIssues, &cli.min_open_issues),
        (FilterKey::PushedAfter, &cli.pushed_after),
        (FilterKey::CreatedAfter, &cli.created_after),
        (FilterKey::License, &cli.license),
    ];
    for (key, value) in filters {
        if let Some(value) = value {
            request = request.with_filter(key, value.clone());
        }
    }

    // Gist and user searches have no pagination; extra pages would never
    // produce an update.
    let pages = match cli.kind {
        KindArg::Repository => cli.pages.max(1),
        _ => 1,
    };

    session
        .submit(request)
        .context("Search request rejected")?;
    for _ in 1..pages {
        session.load_more();
    }

    let mut remaining = pages;
    while remaining > 0 {
        match session.next_update().await {
            Some(SessionUpdate::Results { items, status, append }) => {
                remaining -= 1;
                if remaining > 0 {
                    continue;
                }
                render(&items, status, append);
            }
            Some(SessionUpdate::Error { reason, message }) => {
                eprintln!("{} {}", format!("[{}]", reason).red().bold(), message.red());
                return Ok(());
            }
            None => break,
        }
    }

    if let Some(index) = cli.bookmark {
        let items = session.annotated();
        let picked = items
            .get(index.saturating_sub(1))
            .map(|annotated| annotated.result.clone())
            .context("--bookmark index out of range")?;
        let now = session
            .toggle_bookmark(&picked)
            .context("Failed to toggle bookmark")?;
        let verb = if now { "Bookmarked" } else { "Unbookmarked" };
        println!("\n{} {}", verb.yellow().bold(), picked.title());
    }

    Ok(())
}

fn render(items: &[AnnotatedResult], status: VisibleStatus, append: bool) {
    if status == VisibleStatus::NoResults {
        println!("{}", "No results found".yellow());
        return;
    }
    let heading = if append { "Results (all pages)" } else { "Results" };
    println!("{}", heading.bold().green());
    println!("{}", "=".repeat(50).dimmed());
    for (index, annotated) in items.iter().enumerate() {
        print_result(index, &annotated.result, annotated.bookmarked);
    }
}

fn print_result(index: usize, result: &SearchResult, bookmarked: bool) {
    let marker = if bookmarked { "★".yellow() } else { " ".normal() };
    match result {
        SearchResult::Repository(repo) => {
            println!(
                "{:>3} {} {} {}",
                index + 1,
                marker,
                repo.name.bold(),
                format!("({}★ {}⑂)", repo.stars, repo.forks).dimmed()
            );
            if let Some(description) = &repo.description {
                println!("       {}", description);
            }
        }
        SearchResult::Gist(gist) => {
            let files = gist.files.join(", ");
            println!("{:>3} {} {}", index + 1, marker, files.bold());
            if let Some(description) = &gist.description {
                println!("       {}", description);
            }
        }
        SearchResult::User(user) => {
            println!("{:>3} {} {}", index + 1, marker, user.login.bold());
        }
    }
    println!("       {}", result.html_url().blue());
}

fn print_bookmarks(session: &SearchSession) {
    let entries = session.bookmarks();
    if entries.is_empty() {
        println!("{}", "No bookmarks saved".yellow());
        return;
    }
    println!("{}", "Bookmarks".bold().green());
    println!("{}", "=".repeat(50).dimmed());
    for (index, entry) in entries.iter().enumerate() {
        print_result(index, &entry.snapshot, true);
    }
}

fn print_history(session: &SearchSession) {
    let terms = session.history();
    if terms.is_empty() {
        println!("{}", "No recent searches".yellow());
        return;
    }
    println!("{}", "Recent searches".bold().green());
    for term in terms {
        println!("  {}", term);
    }
}
