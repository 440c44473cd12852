//! Infrastructure Layer
//!
//! Database implementation and the search-index client.

pub mod postgres;
pub mod search;

pub use postgres::PgContentRepository;
pub use search::SearchIndexClient;
