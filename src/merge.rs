use crate::models::{ResultPage, SearchResult};
use std::collections::HashSet;

/// Distinguishes a view that has never received results from one that ran a
/// search and came back empty; the rendering layer draws the two differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleStatus {
    Initial,
    NoResults,
    Populated,
}

/// How appended pages are combined with what is already visible.
///
/// `KeepDuplicates` reproduces the provider-faithful behavior: overlapping
/// pages can repeat entries. `DedupById` is an opt-in deviation that drops
/// appended items already visible under the same kind-scoped identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    #[default]
    KeepDuplicates,
    DedupById,
}

/// The ordered result set currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleResults {
    pub items: Vec<SearchResult>,
    pub status: VisibleStatus,
}

impl VisibleResults {
    pub fn new() -> Self {
        VisibleResults {
            items: Vec::new(),
            status: VisibleStatus::Initial,
        }
    }

}

impl Default for VisibleResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Integrates one page into the visible set.
///
/// A base page replaces everything and settles the status: empty means a
/// confirmed `NoResults`, otherwise `Populated`. An append page concatenates
/// in arrival order; an empty append leaves the prior status alone.
pub fn merge(existing: &VisibleResults, page: ResultPage) -> VisibleResults {
    merge_with(existing, page, MergePolicy::KeepDuplicates)
}

pub fn merge_with(
    existing: &VisibleResults,
    page: ResultPage,
    policy: MergePolicy,
) -> VisibleResults {
    if !page.append {
        let status = if page.items.is_empty() {
            VisibleStatus::NoResults
        } else {
            VisibleStatus::Populated
        };
        return VisibleResults {
            items: page.items,
            status,
        };
    }

    let mut items = existing.items.clone();
    match policy {
        MergePolicy::KeepDuplicates => items.extend(page.items),
        MergePolicy::DedupById => {
            let mut seen: HashSet<String> = items.iter().map(SearchResult::dedup_id).collect();
            for item in page.items {
                if seen.insert(item.dedup_id()) {
                    items.push(item);
                }
            }
        }
    }

    let status = if items.is_empty() {
        existing.status
    } else {
        VisibleStatus::Populated
    };
    VisibleResults { items, status }
}
