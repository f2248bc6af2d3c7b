//! # rankdex - In-Memory Ranked Search
//!
//! rankdex is a small inverted-index search engine. Documents carry named,
//! multi-valued text fields; each configured field keeps its own token
//! dictionary, and queries are scored by summing term frequencies.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Documents, per-field postings and the multi-field document index
//! - [`query`] - Query tree (match, bool, match-all) and its scoring executor
//! - [`plugin`] - Search plugin contract, configuration and the movie quote demo
//! - [`output`] - Result formatting for the command line
//! - [`utils`] - Tokenizer
//! - [`error`] - Library error type
//!
//! ## Quick Start
//!
//! ```
//! use rankdex::{Document, DocumentIndex, MatchQuery, Query};
//!
//! let mut index = DocumentIndex::with_fields(["title"]);
//! index.index(&Document::new("1", [("title", vec!["To be or not to be"])]));
//! index.index(&Document::new("2", [("title", vec!["Not today"])]));
//!
//! let hits = index.search(&Query::from(MatchQuery::new("title", "be")));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "1");
//! assert_eq!(hits[0].score, 2.0);
//! ```
//!
//! ## Scoring
//!
//! A match query scores a document by the number of times its tokens occur
//! in the field, multiplied by the query boost. Bool queries add the scores
//! of their `must` and `should` clauses and drop anything a `must_not`
//! clause matches. Only documents with a non-zero score are returned.

pub mod error;
pub mod index;
#[cfg(feature = "cli")]
pub mod output;
pub mod plugin;
pub mod query;
pub mod utils;

pub use error::{Result, SearchError};
pub use index::{DocId, Document, DocumentIndex, FieldIndex, IndexStats, SearchHit, TopHits};
pub use plugin::{
    IndexSearchPlugin, PluginFactory, PluginFactoryRegistry, SearchContext, SearchPlugin,
    SearchPluginConfiguration, SearchResultItem, SearchResults,
};
pub use query::{BoolQuery, MatchQuery, Query, QueryExecutor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the command line.
///
/// Verbosity: 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE. `RUST_LOG`
/// directives are honored alongside the verbosity level.
#[cfg(feature = "cli")]
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
