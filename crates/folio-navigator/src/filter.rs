//! Title filtering.

use folio_api::Titled;

/// Case-insensitive substring match. An empty or blank query matches.
#[must_use]
pub fn matches_query(title: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Items whose title contains `query`, in source order.
///
/// The source slice is never modified.
#[must_use]
pub fn filter_by_title<'a, T: Titled>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_query(item.title(), query))
        .collect()
}
