pub mod index_service;
pub mod index_service_impl;
pub use index_service::{IndexError, IndexMaintainer};
pub use index_service_impl::SeaOrmIndexMaintainer;

pub mod search_service;
pub mod search_service_impl;
pub use search_service::{SearchError, SearchResponse, SearchService};
pub use search_service_impl::SeaOrmSearchService;
