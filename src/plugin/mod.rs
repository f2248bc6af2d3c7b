//! Search plugins: the uniform fetch contract consumed by UIs and evaluators.
//!
//! A plugin turns a search context (a flat map of named string parameters
//! such as `q` or `size`) into a ranked, labelled result list. How the
//! context becomes a query is up to each plugin.
//!
//! ## Modules
//!
//! - [`adapter`] - Plugin backed by an in-memory [`DocumentIndex`](crate::index::DocumentIndex)
//! - [`config`] - Plugin configuration and search context fields
//! - [`metrics`] - Relevance metric configuration
//! - [`registry`] - Plugin factories keyed by plugin type
//! - [`quotes`] - Movie quote demo plugin

pub mod adapter;
pub mod config;
pub mod metrics;
pub mod quotes;
pub mod registry;

pub use adapter::{IndexSearchPlugin, QueryTranslator};
pub use config::{SearchContextField, SearchPluginConfiguration, template_variables};
pub use metrics::{Metric, MetricConfiguration, MetricParam};
pub use registry::{PluginFactory, PluginFactoryRegistry};

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Named search parameters, e.g. `q` -> `"to be"`, `size` -> `"5"`
pub type SearchContext = BTreeMap<String, String>;

/// A search backend that can be exercised with a search context
pub trait SearchPlugin: Send + Sync {
    /// Fetch up to `number_of_items_to_fetch` hits for a search context.
    ///
    /// A negative count is rejected with [`SearchError::InvalidArgument`].
    fn fetch(
        &self,
        context: &SearchContext,
        number_of_items_to_fetch: i64,
    ) -> Result<SearchResults>;
}

/// Result of one plugin fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Number of matching documents before slicing
    pub total_hits: u64,
    /// Time spent searching
    #[serde(rename = "took_ms", with = "duration_ms")]
    pub took: Duration,
    pub hits: Vec<SearchResultItem>,
}

/// One ranked hit with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub label: String,
}

impl SearchResultItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Validate a requested item count
pub fn fetch_limit(number_of_items_to_fetch: i64) -> Result<usize> {
    if number_of_items_to_fetch < 0 {
        return Err(SearchError::invalid_argument(
            "number_of_items_to_fetch",
            format!("must not be negative, got {number_of_items_to_fetch}"),
        ));
    }
    Ok(usize::try_from(number_of_items_to_fetch).unwrap_or(usize::MAX))
}

/// Serialize a `Duration` as fractional milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        if !ms.is_finite() || ms < 0.0 {
            return Err(serde::de::Error::custom("duration must be a non-negative number"));
        }
        Ok(Duration::from_secs_f64(ms / 1000.0))
    }
}
