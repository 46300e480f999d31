use github_search_engine::models::{FilterKey, SearchKind, SearchRequest, SortField};
use github_search_engine::query::{build, PER_PAGE};

#[test]
fn test_plain_repository_query() {
    let request = SearchRequest::new("react", SearchKind::Repository);
    let built = build(&request);

    assert_eq!(
        built.query,
        format!("q=react&page=1&per_page={}", PER_PAGE)
    );
    assert_eq!(built.kind, SearchKind::Repository);
    assert_eq!(built.term, "react");
}

#[test]
fn test_term_is_trimmed_and_encoded() {
    let request = SearchRequest::new("  rust web  ", SearchKind::Repository);
    let built = build(&request);

    assert!(built.query.starts_with("q=rust+web"));
    assert_eq!(built.term, "rust web");
}

#[test]
fn test_language_filter_follows_term() {
    let request =
        SearchRequest::new("react", SearchKind::Repository).with_filter(FilterKey::Language, "go");
    let built = build(&request);

    let q_pos = built.query.find("q=react").expect("term missing");
    let lang_pos = built.query.find("language:go").expect("qualifier missing");
    assert!(q_pos < lang_pos);
}

#[test]
fn test_qualifier_order_is_deterministic() {
    // Inserted deliberately out of declaration order.
    let request = SearchRequest::new("cli", SearchKind::Repository)
        .with_filter(FilterKey::License, "mit")
        .with_filter(FilterKey::MinStars, "50")
        .with_filter(FilterKey::Language, "rust")
        .with_filter(FilterKey::PushedAfter, "2024-01-01");
    let built = build(&request);

    assert_eq!(
        built.query,
        format!(
            "q=cli+language:rust+stars:>50+pushed:>2024-01-01+license:mit&page=1&per_page={}",
            PER_PAGE
        )
    );
}

#[test]
fn test_all_qualifiers_emitted_in_order() {
    let mut request = SearchRequest::new("x", SearchKind::Repository);
    for key in FilterKey::ALL {
        request = request.with_filter(key, "1");
    }
    let built = build(&request);

    assert_eq!(
        built.query,
        format!(
            "q=x+language:1+topic:1+stars:>1+forks:>1+watchers:>1+open_issues:>1\
             +pushed:>1+created:>1+license:1&page=1&per_page={}",
            PER_PAGE
        )
    );
}

#[test]
fn test_absent_and_empty_filters_never_appear() {
    let request = SearchRequest::new("react", SearchKind::Repository)
        .with_filter(FilterKey::Language, "")
        .with_filter(FilterKey::Topic, "   ");
    let built = build(&request);

    assert!(!built.query.contains("language:"));
    assert!(!built.query.contains("topic:"));
}

#[test]
fn test_filter_values_pass_through_verbatim() {
    // The builder treats values as opaque strings; nothing is re-encoded.
    let request = SearchRequest::new("react", SearchKind::Repository)
        .with_filter(FilterKey::License, "gpl-3.0");
    let built = build(&request);

    assert!(built.query.contains("license:gpl-3.0"));
}

#[test]
fn test_sort_is_a_separate_parameter() {
    let request =
        SearchRequest::new("react", SearchKind::Repository).with_sort(SortField::Stars);
    let built = build(&request);

    assert!(built.query.contains("&sort=stars&order=desc"));
    assert!(!built.query.contains("+sort"));
}

#[test]
fn test_no_sort_parameter_without_sort() {
    let request = SearchRequest::new("react", SearchKind::Repository);
    let built = build(&request);

    assert!(!built.query.contains("sort="));
    assert!(!built.query.contains("order="));
}

#[test]
fn test_pagination_always_present_for_repositories() {
    let mut request = SearchRequest::new("react", SearchKind::Repository);
    request.page = 4;
    let built = build(&request);

    assert!(built.query.ends_with(&format!("&page=4&per_page={}", PER_PAGE)));
}

#[test]
fn test_gist_queries_ignore_filters_and_pagination() {
    let mut request = SearchRequest::new("octocat", SearchKind::Gist)
        .with_filter(FilterKey::Language, "rust")
        .with_sort(SortField::Stars);
    request.page = 3;
    let built = build(&request);

    assert_eq!(built.query, "q=octocat");
    assert_eq!(built.term, "octocat");
}

#[test]
fn test_user_queries_ignore_filters_and_pagination() {
    let mut request = SearchRequest::new("tom", SearchKind::User)
        .with_filter(FilterKey::MinStars, "10");
    request.page = 2;
    let built = build(&request);

    assert_eq!(built.query, "q=tom");
}

#[test]
fn test_validation_rejects_non_numeric_counts() {
    let request = SearchRequest::new("react", SearchKind::Repository)
        .with_filter(FilterKey::MinStars, "lots");

    assert!(request.validate().is_err());
}

#[test]
fn test_validation_accepts_numeric_counts_and_opaque_dates() {
    let request = SearchRequest::new("react", SearchKind::Repository)
        .with_filter(FilterKey::MinStars, "50")
        .with_filter(FilterKey::PushedAfter, "whenever");

    assert!(request.validate().is_ok());
}
