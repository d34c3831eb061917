//! AND-semantics tag filtering.
//!
//! The store resolves candidates by grouping tag relations per recipe and
//! keeping only groups whose matched-tag count equals the number of distinct
//! requested names. Counting is what makes this AND rather than OR, so the
//! requested names must be distinct before they are counted.

/// Trims, drops empty names and deduplicates, keeping first-seen order.
#[must_use]
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(str::to_string)
        .collect()
}
