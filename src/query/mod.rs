pub mod executor;
pub mod types;

pub use executor::{QueryExecutor, Scores};
pub use types::{BoolQuery, MatchQuery, Query};
