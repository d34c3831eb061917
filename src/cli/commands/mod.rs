mod index;
mod search;
mod suggest;

pub use index::cmd_rebuild_index;
pub use search::cmd_search;
pub use suggest::cmd_suggest;
