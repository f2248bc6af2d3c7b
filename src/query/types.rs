use serde::{Deserialize, Serialize};

/// Query tree evaluated by the [`DocumentIndex`](crate::index::DocumentIndex).
///
/// Queries are plain values; evaluation never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Text match against one field
    Match(MatchQuery),
    /// Boolean combination of sub-queries
    Bool(BoolQuery),
    /// Every indexed document, score 1.0
    MatchAll,
}

impl Query {
    pub fn match_all() -> Self {
        Query::MatchAll
    }

    /// Shorthand for an exact-token match with boost 1.0
    pub fn matching(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Match(MatchQuery::new(field, text))
    }
}

impl From<MatchQuery> for Query {
    fn from(query: MatchQuery) -> Self {
        Query::Match(query)
    }
}

impl From<BoolQuery> for Query {
    fn from(query: BoolQuery) -> Self {
        Query::Bool(query)
    }
}

fn default_boost() -> f64 {
    1.0
}

/// Match the tokens of `text` against a field.
///
/// Each query token contributes the term frequency of the documents it
/// matches; with `prefix_match` a token matches every indexed token that
/// starts with it. The summed frequency is multiplied by `boost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub field: String,
    pub text: String,
    #[serde(default)]
    pub prefix_match: bool,
    #[serde(default = "default_boost")]
    pub boost: f64,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            prefix_match: false,
            boost: default_boost(),
        }
    }

    /// Enable prefix matching for every query token
    pub fn prefix(mut self) -> Self {
        self.prefix_match = true;
        self
    }

    pub fn with_prefix_match(mut self, prefix_match: bool) -> Self {
        self.prefix_match = prefix_match;
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }
}

/// Boolean combination of clauses.
///
/// - `must`: every clause has to match; their scores are added.
/// - `should`: when `must` is empty, matching any clause makes a candidate;
///   matching clauses always add their score.
/// - `must_not`: a matching clause removes the document; no score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoolQuery {
    #[serde(default)]
    pub should: Vec<Query>,
    #[serde(default)]
    pub must: Vec<Query>,
    #[serde(default)]
    pub must_not: Vec<Query>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    /// True when the query can never match anything
    pub fn is_empty(&self) -> bool {
        self.should.is_empty() && self.must.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_query_defaults() {
        let q = MatchQuery::new("quote", "to be");
        assert!(!q.prefix_match);
        assert_eq!(q.boost, 1.0);

        let q = q.prefix().with_boost(0.25);
        assert!(q.prefix_match);
        assert_eq!(q.boost, 0.25);
    }

    #[test]
    fn test_bool_builder() {
        let q = BoolQuery::new()
            .should(MatchQuery::new("quote", "a"))
            .must(Query::match_all())
            .must_not(MatchQuery::new("movie", "b"));
        assert_eq!(q.should.len(), 1);
        assert_eq!(q.must, vec![Query::MatchAll]);
        assert_eq!(q.must_not.len(), 1);
        assert!(!q.is_empty());

        let only_must_not = BoolQuery::new().must_not(Query::match_all());
        assert!(only_must_not.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let q: Query = BoolQuery::new()
            .should(MatchQuery::new("quote", "to").prefix())
            .into();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "bool");
        assert_eq!(json["should"][0]["type"], "match");
        assert_eq!(json["should"][0]["prefix_match"], true);

        let parsed: Query =
            serde_json::from_str(r#"{"type":"match","field":"movie","text":"jaws"}"#).unwrap();
        assert_eq!(parsed, Query::matching("movie", "jaws"));

        let all: Query = serde_json::from_str(r#"{"type":"match_all"}"#).unwrap();
        assert_eq!(all, Query::MatchAll);
    }
}
