//! Movie quote demo plugin.
//!
//! Indexes the `quote` and `movie` fields of a movie quote collection. A
//! non-blank `q` becomes a prefix match on both fields, with movie titles
//! weighted at a quarter of quote text; a blank or missing `q` lists every
//! quote.

use crate::error::Result;
use crate::index::{Document, DocumentIndex};
use crate::plugin::{
    IndexSearchPlugin, Metric, MetricConfiguration, PluginFactory, PluginFactoryRegistry,
    SearchContext, SearchContextField, SearchPlugin, SearchPluginConfiguration,
};
use crate::query::{BoolQuery, MatchQuery, Query};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Plugin type the movie quote factory registers under
pub const MOVIES_PLUGIN_TYPE: &str = "movies";

/// Weight of movie title matches relative to quote matches
pub const MOVIE_TITLE_BOOST: f64 = 0.25;

const QUOTE_FIELD: &str = "quote";
const MOVIE_FIELD: &str = "movie";

fn default_id() -> String {
    "-".to_string()
}

/// One entry of a movie quote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuote {
    /// Source data carries no id; loaders assign positional ids
    #[serde(default = "default_id")]
    pub id: String,
    pub quote: String,
    pub movie: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: i32,
}

impl MovieQuote {
    /// Display label: `"<movie>, <year>: <quote>"`
    pub fn label(&self) -> String {
        format!("{}, {}: {}", self.movie, self.year, self.quote)
    }

    pub fn to_document(&self) -> Document {
        Document::new(
            self.id.clone(),
            [
                (QUOTE_FIELD, vec![self.quote.clone()]),
                (MOVIE_FIELD, vec![self.movie.clone()]),
            ],
        )
    }
}

/// Parse a JSON array of quotes, assigning ids `"0"`, `"1"`, ... by position
pub fn parse_quotes(json: &str) -> Result<Vec<MovieQuote>> {
    let quotes: Vec<MovieQuote> = serde_json::from_str(json)?;
    Ok(quotes
        .into_iter()
        .enumerate()
        .map(|(i, quote)| MovieQuote {
            id: i.to_string(),
            ..quote
        })
        .collect())
}

/// Load and parse a quote collection from a JSON file
pub fn load_quotes(path: &Path) -> Result<Vec<MovieQuote>> {
    let content = fs::read_to_string(path)?;
    let quotes = parse_quotes(&content)?;
    debug!(path = %path.display(), count = quotes.len(), "loaded movie quotes");
    Ok(quotes)
}

/// Query for a search context: prefix match on quote and movie, or list everything
pub fn quote_query(context: &SearchContext) -> Query {
    match context.get("q").map(|q| q.trim()).filter(|q| !q.is_empty()) {
        Some(text) => BoolQuery::new()
            .should(MatchQuery::new(QUOTE_FIELD, text).prefix())
            .should(
                MatchQuery::new(MOVIE_FIELD, text)
                    .prefix()
                    .with_boost(MOVIE_TITLE_BOOST),
            )
            .into(),
        None => Query::MatchAll,
    }
}

/// Build a search plugin over a quote collection
pub fn quote_search_plugin(quotes: &[MovieQuote]) -> IndexSearchPlugin {
    let mut index = DocumentIndex::with_fields([QUOTE_FIELD, MOVIE_FIELD]);
    let mut labels = FxHashMap::default();

    for quote in quotes {
        labels.insert(quote.id.clone(), quote.label());
        index.index(&quote.to_document());
    }
    debug!(documents = index.len(), "built movie quote index");

    IndexSearchPlugin::new(index, labels, quote_query)
}

/// Default configuration for the movie quote plugin, with every metric
/// enabled under its own name
pub fn movie_quotes_plugin_configuration() -> SearchPluginConfiguration {
    let mut config =
        SearchPluginConfiguration::new("movie-quotes", "Movie Quote Search", MOVIES_PLUGIN_TYPE)
            .with_field(SearchContextField::string("q"))
            .with_field(SearchContextField::int("size", Some(5)));
    config.metrics = Metric::ALL.into_iter().map(MetricConfiguration::new).collect();
    config
}

/// Creates movie quote plugins over a shared quote collection
#[derive(Debug, Clone)]
pub struct MovieQuotesPluginFactory {
    quotes: Arc<Vec<MovieQuote>>,
}

impl MovieQuotesPluginFactory {
    pub fn new(quotes: Vec<MovieQuote>) -> Self {
        Self {
            quotes: Arc::new(quotes),
        }
    }

    pub fn quotes(&self) -> &[MovieQuote] {
        &self.quotes
    }
}

impl PluginFactory for MovieQuotesPluginFactory {
    fn create(&self, _configuration: &SearchPluginConfiguration) -> Result<Box<dyn SearchPlugin>> {
        Ok(Box::new(quote_search_plugin(&self.quotes)))
    }
}

/// Registry with the movie quote factory registered under [`MOVIES_PLUGIN_TYPE`]
pub fn movies_registry(quotes: Vec<MovieQuote>) -> PluginFactoryRegistry {
    let mut registry = PluginFactoryRegistry::new();
    registry.register(MOVIES_PLUGIN_TYPE, MovieQuotesPluginFactory::new(quotes));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTES: &str = r#"[
        {"quote": "Here's looking at you, kid.", "movie": "Casablanca", "type": "movie", "year": 1942},
        {"quote": "May the Force be with you.", "movie": "Star Wars", "type": "movie", "year": 1977},
        {"quote": "You're gonna need a bigger boat.", "movie": "Jaws", "type": "movie", "year": 1975}
    ]"#;

    fn ctx(q: &str) -> SearchContext {
        SearchContext::from([("q".to_string(), q.to_string())])
    }

    #[test]
    fn test_parse_assigns_positional_ids() {
        let quotes = parse_quotes(QUOTES).unwrap();
        let ids: Vec<_> = quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert_eq!(quotes[2].kind, "movie");
    }

    #[test]
    fn test_missing_id_defaults_before_assignment() {
        let quote: MovieQuote = serde_json::from_str(
            r#"{"quote": "q", "movie": "m", "type": "movie", "year": 2000}"#,
        )
        .unwrap();
        assert_eq!(quote.id, "-");
    }

    #[test]
    fn test_label() {
        let quotes = parse_quotes(QUOTES).unwrap();
        assert_eq!(quotes[2].label(), "Jaws, 1975: You're gonna need a bigger boat.");
    }

    #[test]
    fn test_quote_query_translation() {
        assert_eq!(quote_query(&ctx("  ")), Query::MatchAll);
        assert_eq!(quote_query(&SearchContext::new()), Query::MatchAll);

        let Query::Bool(bool_query) = quote_query(&ctx("force")) else {
            panic!("expected bool query");
        };
        assert_eq!(bool_query.should.len(), 2);
        assert!(bool_query.must.is_empty());
        assert_eq!(
            bool_query.should[1],
            Query::Match(MatchQuery::new("movie", "force").prefix().with_boost(0.25))
        );
    }

    #[test]
    fn test_movie_matches_use_title_boost() {
        let plugin = quote_search_plugin(&parse_quotes(QUOTES).unwrap());
        let results = plugin.fetch(&ctx("star"), 10).unwrap();
        assert_eq!(results.total_hits, 1);
        assert_eq!(results.hits[0].label, "Star Wars, 1977: May the Force be with you. (0.25)");

        let results = plugin.fetch(&ctx("you"), 10).unwrap();
        // "You're" tokenizes to "you" + "re", so every quote scores 1.0
        assert_eq!(results.total_hits, 3);
        let ids: Vec<_> = results.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_blank_query_lists_everything() {
        let plugin = quote_search_plugin(&parse_quotes(QUOTES).unwrap());
        let results = plugin.fetch(&SearchContext::new(), 2).unwrap();
        assert_eq!(results.total_hits, 3);
        assert_eq!(results.hits.len(), 2);
        assert!(results.hits[0].label.ends_with("(1.0)"));
    }

    #[test]
    fn test_registry_creates_movie_plugin() {
        let registry = movies_registry(parse_quotes(QUOTES).unwrap());
        let config = movie_quotes_plugin_configuration();
        assert_eq!(config.plugin_type, MOVIES_PLUGIN_TYPE);
        assert!(config.field("size").is_some());
        assert_eq!(config.metrics.len(), Metric::ALL.len());
        assert!(config.metrics.iter().all(|m| m.params.is_empty()));
        assert_eq!(
            config.metric("MeanReciprocalRank").map(|m| m.metric),
            Some(Metric::MeanReciprocalRank)
        );
        config.validate().unwrap();

        let plugin = registry.create(&config).unwrap();
        let results = plugin.fetch(&ctx("jaws"), 5).unwrap();
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].id, "2");
    }

    #[test]
    fn test_load_quotes_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviequotes.json");
        fs::write(&path, QUOTES).unwrap();
        assert_eq!(load_quotes(&path).unwrap().len(), 3);
        assert!(load_quotes(&dir.path().join("missing.json")).is_err());
    }
}
