use github_search_engine::github::GitHubSearchClient;
use github_search_engine::models::{SearchKind, SearchRequest, SearchResult};
use github_search_engine::query;

#[tokio::test]
async fn test_client_creation() {
    let client = GitHubSearchClient::new();
    assert!(client.is_ok());
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_search_repositories() {
    let client = GitHubSearchClient::new().expect("Failed to create client");
    let request = SearchRequest::new("react", SearchKind::Repository);
    let built = query::build(&request);

    let results = client
        .search_repositories(&built)
        .await
        .expect("Search failed");

    assert!(!results.is_empty());
    for result in &results {
        match result {
            SearchResult::Repository(repo) => {
                assert!(!repo.name.is_empty());
                assert!(!repo.html_url.is_empty());
                assert!(!repo.owner_login.is_empty());
            }
            other => panic!("Expected repository results, got: {:?}", other),
        }
    }
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_search_users() {
    let client = GitHubSearchClient::new().expect("Failed to create client");
    let request = SearchRequest::new("octocat", SearchKind::User);
    let built = query::build(&request);

    let results = client.search_users(&built).await.expect("Search failed");

    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|r| matches!(r, SearchResult::User(_))));
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_list_gists() {
    let client = GitHubSearchClient::new().expect("Failed to create client");

    let results = client.list_gists("octocat").await.expect("Listing failed");

    for result in &results {
        match result {
            SearchResult::Gist(gist) => {
                assert!(!gist.id.is_empty());
                assert!(!gist.html_url.is_empty());
            }
            other => panic!("Expected gist results, got: {:?}", other),
        }
    }
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_list_user_repositories() {
    let client = GitHubSearchClient::new().expect("Failed to create client");

    let results = client
        .list_user_repositories("octocat")
        .await
        .expect("Listing failed");

    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|r| matches!(r, SearchResult::Repository(_))));
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_paginated_pages_differ() {
    let client = GitHubSearchClient::new().expect("Failed to create client");

    let mut first = SearchRequest::new("rust", SearchKind::Repository);
    first.page = 1;
    let mut second = first.clone();
    second.page = 2;

    let page_one = client
        .search_repositories(&query::build(&first))
        .await
        .expect("Page 1 failed");
    let page_two = client
        .search_repositories(&query::build(&second))
        .await
        .expect("Page 2 failed");

    assert!(!page_one.is_empty());
    assert!(!page_two.is_empty());
    assert_ne!(
        page_one.first().map(SearchResult::dedup_id),
        page_two.first().map(SearchResult::dedup_id)
    );
}
