use crate::index::document::DocumentIndex;
use crate::index::types::DocId;
use crate::query::types::{BoolQuery, MatchQuery, Query};
use crate::utils::tokenize;
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

/// Accumulated score per matching document
pub type Scores = FxHashMap<DocId, f64>;

/// Query executor
///
/// Walks a query tree against a [`DocumentIndex`] and returns the score of
/// every matching document. Only documents with a non-zero score are
/// reported, so "matched" and "present in the map" mean the same thing.
pub struct QueryExecutor<'a> {
    index: &'a DocumentIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a DocumentIndex) -> Self {
        Self { index }
    }

    /// Execute a query and return per-document scores
    pub fn execute(&self, query: &Query) -> Scores {
        match query {
            Query::MatchAll => self.index.doc_ids().map(|doc| (doc, 1.0)).collect(),
            Query::Match(match_query) => self.execute_match(match_query),
            Query::Bool(bool_query) => self.execute_bool(bool_query),
        }
    }

    fn execute_match(&self, query: &MatchQuery) -> Scores {
        let mut scores = Scores::default();

        let Some(field) = self.index.field(&query.field) else {
            warn!(field = %query.field, "match query against unconfigured field");
            return scores;
        };

        // Negative, zero and NaN boosts cannot produce a positive score
        if !(query.boost.is_finite() && query.boost > 0.0) {
            trace!(boost = query.boost, "match query boost disables clause");
            return scores;
        }

        for token in tokenize(&query.text) {
            let postings = if query.prefix_match {
                field.match_prefix(&token)
            } else {
                field.match_exact(&token)
            };
            for (doc, freq) in postings {
                *scores.entry(doc).or_insert(0.0) += f64::from(freq);
            }
        }

        for score in scores.values_mut() {
            *score = saturate(*score * query.boost);
        }
        scores
    }

    fn execute_bool(&self, query: &BoolQuery) -> Scores {
        if query.is_empty() {
            return Scores::default();
        }

        // Intersect the must clauses, adding their scores
        let mut required: Option<Scores> = None;
        for clause in &query.must {
            let clause_scores = self.execute(clause);
            let next = match required {
                None => clause_scores,
                Some(existing) => existing
                    .into_iter()
                    .filter_map(|(doc, score)| {
                        clause_scores.get(&doc).map(|extra| (doc, saturate(score + extra)))
                    })
                    .collect(),
            };
            if next.is_empty() {
                return next;
            }
            required = Some(next);
        }

        let has_required = required.is_some();
        let mut scores = required.unwrap_or_default();

        for clause in &query.should {
            for (doc, score) in self.execute(clause) {
                if has_required {
                    if let Some(existing) = scores.get_mut(&doc) {
                        *existing = saturate(*existing + score);
                    }
                } else {
                    let existing = scores.entry(doc).or_insert(0.0);
                    *existing = saturate(*existing + score);
                }
            }
        }

        for clause in &query.must_not {
            if scores.is_empty() {
                break;
            }
            let excluded = self.execute(clause);
            scores.retain(|doc, _| !excluded.contains_key(doc));
        }

        scores
    }
}

/// Keep scores finite: overflow saturates at `f64::MAX`
fn saturate(score: f64) -> f64 {
    score.min(f64::MAX)
}
