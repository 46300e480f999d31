use crate::models::{SearchKind, SearchRequest};
use url::form_urlencoded;

/// Fixed page size for repository searches.
pub const PER_PAGE: u32 = 30;

/// The provider-facing form of a request: the assembled query string for
/// search endpoints plus the raw term for path-style endpoints (gist
/// listings address a user by name rather than a query).
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderQuery {
    pub kind: SearchKind,
    pub term: String,
    pub query: String,
}

/// Translates a validated request into the provider's query grammar.
///
/// Repository queries emit `q=<term>` followed by each present filter as a
/// `+qualifier:value` token in `FilterKey` declaration order, then the
/// optional sort pair, then pagination. Gist and user requests carry the
/// term alone; the underlying grammar has no filters or pagination for them.
pub fn build(request: &SearchRequest) -> ProviderQuery {
    let term = request.term.trim();
    let encoded: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
    let mut query = format!("q={}", encoded);

    if request.kind.supports_filters() {
        for (key, value) in &request.filters {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            // Filter values are opaque: appended verbatim, qualifier
            // punctuation included, nothing re-encoded.
            query.push('+');
            query.push_str(key.qualifier());
            query.push_str(value);
        }

        if let Some(sort) = request.sort {
            query.push_str("&sort=");
            query.push_str(sort.as_str());
            query.push_str("&order=desc");
        }

        query.push_str(&format!("&page={}&per_page={}", request.page, PER_PAGE));
    }

    ProviderQuery {
        kind: request.kind,
        term: term.to_string(),
        query,
    }
}
