use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub has_more: bool,
}

impl Pagination {
    #[must_use]
    pub const fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            has_more: offset.saturating_add(limit) < total,
        }
    }

    /// Result of a search that matched nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            has_more: false,
        }
    }
}
