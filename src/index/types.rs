use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Dense ordinal assigned to a document by the [`DocumentIndex`](super::DocumentIndex).
///
/// Field indexes store postings against this ordinal rather than the
/// caller's string identifier.
pub type DocId = u32;

/// A document to be indexed: a stable identifier plus named text fields.
///
/// Each field holds an ordered list of text values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl Document {
    pub fn new<I, K, V>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.into(),
            fields: fields
                .into_iter()
                .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Add a field holding a single text value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }
}

/// A scored match for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Result ordering: descending score, then ascending id.
pub fn rank_order(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.id.cmp(&b.id))
}

/// A ranked page of hits together with the full match count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopHits {
    /// Number of documents that matched before slicing
    pub total_hits: usize,
    pub hits: Vec<SearchHit>,
}

/// Per-field statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStats {
    pub name: String,
    /// Distinct tokens in the field's dictionary
    pub tokens: usize,
    /// (token, document) pairs
    pub postings: usize,
    /// Documents with at least one token in this field
    pub documents: usize,
}

/// Index statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub fields: Vec<FieldStats>,
}
