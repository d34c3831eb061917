//! The recipe search engine: planning, tag intersection, pagination,
//! hydration, index documents and the facet/suggestion cache.
//!
//! Everything in here is store-agnostic. The `db` module translates the
//! typed [`Filter`] and [`PageOrder`] into `SeaORM` queries, and the
//! services in `crate::services` orchestrate the I/O.

pub mod cache;
pub mod document;
pub mod facets;
pub mod hydrate;
pub mod pagination;
pub mod params;
pub mod planner;
pub mod predicate;
pub mod tags;

pub use cache::{Cache, Clock, ManualClock, SystemClock, TtlCache};
pub use facets::{CacheKey, CachePayload, FacetSet, FilterCache};
pub use hydrate::ChildRows;
pub use pagination::Pagination;
pub use params::{SearchParams, SortKey};
pub use planner::{PageOrder, QueryPlan, TextStage};
pub use predicate::{Filter, Predicate, Visibility};
