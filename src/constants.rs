pub mod cache {
    use std::time::Duration;

    /// Facet and suggestion entries are served for this long, then recomputed.
    pub const FILTER_TTL: Duration = Duration::from_secs(5 * 60);
}

pub mod suggestions {

    pub const MIN_QUERY_CHARS: usize = 2;

    pub const DEFAULT_LIMIT: usize = 10;

    pub const MAX_LIMIT: usize = 50;

    pub const TITLE_MATCHES: u64 = 5;

    pub const CUISINE_MATCHES: u64 = 3;

    pub const TAG_MATCHES: u64 = 3;
}

pub mod limits {

    pub const DEFAULT_SEARCH_LIMIT: u64 = 20;

    pub const MAX_SEARCH_LIMIT: u64 = 100;

    pub const REBUILD_BATCH_SIZE: u64 = 200;
}

/// Header carrying the acting user's identifier, set by the identity layer in front of us.
pub const USER_ID_HEADER: &str = "x-user-id";
