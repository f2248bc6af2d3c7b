use crate::error::Result;
use crate::index::DocumentIndex;
use crate::plugin::{SearchContext, SearchPlugin, SearchResultItem, SearchResults, fetch_limit};
use crate::query::Query;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// Turns a search context into a query tree
pub trait QueryTranslator: Send + Sync {
    fn translate(&self, context: &SearchContext) -> Query;
}

impl<F> QueryTranslator for F
where
    F: Fn(&SearchContext) -> Query + Send + Sync,
{
    fn translate(&self, context: &SearchContext) -> Query {
        self(context)
    }
}

/// Search plugin over a populated [`DocumentIndex`].
///
/// Each hit is labelled through an id -> label map and the label is
/// annotated with the hit's score. Hits without a label fall back to their id.
pub struct IndexSearchPlugin {
    index: DocumentIndex,
    labels: FxHashMap<String, String>,
    translator: Box<dyn QueryTranslator>,
}

impl IndexSearchPlugin {
    pub fn new(
        index: DocumentIndex,
        labels: FxHashMap<String, String>,
        translator: impl QueryTranslator + 'static,
    ) -> Self {
        Self {
            index,
            labels,
            translator: Box::new(translator),
        }
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// The query this plugin would run for a context
    pub fn query_for(&self, context: &SearchContext) -> Query {
        self.translator.translate(context)
    }

    fn annotate(&self, id: &str, score: f64) -> String {
        let label = self.label(id).unwrap_or(id);
        format!("{label} ({score:?})")
    }
}

impl SearchPlugin for IndexSearchPlugin {
    fn fetch(
        &self,
        context: &SearchContext,
        number_of_items_to_fetch: i64,
    ) -> Result<SearchResults> {
        let limit = fetch_limit(number_of_items_to_fetch)?;

        let start = Instant::now();
        let query = self.translator.translate(context);
        let top = self.index.search_top(&query, limit);
        let took = start.elapsed();

        debug!(
            total_hits = top.total_hits,
            returned = top.hits.len(),
            took_us = took.as_micros() as u64,
            "fetched"
        );

        Ok(SearchResults {
            total_hits: top.total_hits as u64,
            took,
            hits: top
                .hits
                .into_iter()
                .map(|hit| {
                    let label = self.annotate(&hit.id, hit.score);
                    SearchResultItem::new(hit.id, label)
                })
                .collect(),
        })
    }
}

impl fmt::Debug for IndexSearchPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSearchPlugin")
            .field("documents", &self.index.len())
            .field("labels", &self.labels.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::index::Document;
    use crate::query::MatchQuery;

    fn plugin() -> IndexSearchPlugin {
        let mut index = DocumentIndex::with_fields(["title"]);
        index.index(&Document::new("a", [("title", vec!["Rust in Action"])]));
        index.index(&Document::new("b", [("title", vec!["Programming Rust, rust"])]));
        index.index(&Document::new("c", [("title", vec!["Go in Action"])]));

        let mut labels = FxHashMap::default();
        labels.insert("a".to_string(), "Rust in Action".to_string());
        labels.insert("b".to_string(), "Programming Rust".to_string());

        IndexSearchPlugin::new(index, labels, |ctx: &SearchContext| {
            match ctx.get("q").filter(|q| !q.trim().is_empty()) {
                Some(q) => Query::from(MatchQuery::new("title", q.as_str()).prefix()),
                None => Query::MatchAll,
            }
        })
    }

    fn context(q: &str) -> SearchContext {
        SearchContext::from([("q".to_string(), q.to_string())])
    }

    #[test]
    fn test_fetch_labels_hits_with_score() {
        let results = plugin().fetch(&context("rust"), 10).unwrap();
        assert_eq!(results.total_hits, 2);
        assert_eq!(
            results.hits,
            vec![
                SearchResultItem::new("b", "Programming Rust (2.0)"),
                SearchResultItem::new("a", "Rust in Action (1.0)"),
            ]
        );
    }

    #[test]
    fn test_missing_label_falls_back_to_id() {
        let results = plugin().fetch(&context("go"), 10).unwrap();
        assert_eq!(results.hits, vec![SearchResultItem::new("c", "c (1.0)")]);
    }

    #[test]
    fn test_fetch_truncates_but_reports_total() {
        let results = plugin().fetch(&context("action"), 1).unwrap();
        assert_eq!(results.total_hits, 2);
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].id, "a");
    }

    #[test]
    fn test_fetch_zero_items() {
        let results = plugin().fetch(&context(""), 0).unwrap();
        assert_eq!(results.total_hits, 3);
        assert!(results.hits.is_empty());
    }

    #[test]
    fn test_fetch_rejects_negative_count() {
        let err = plugin().fetch(&context("rust"), -1).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument { .. }));
    }

    #[test]
    fn test_query_for_uses_translator() {
        let plugin = plugin();
        assert_eq!(plugin.query_for(&SearchContext::new()), Query::MatchAll);
        assert!(format!("{plugin:?}").contains("documents: 3"));
    }
}
