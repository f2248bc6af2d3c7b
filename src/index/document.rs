//! Document index: named field indexes plus query evaluation.

use crate::index::field::FieldIndex;
use crate::index::types::{DocId, Document, FieldStats, IndexStats, SearchHit, TopHits, rank_order};
use crate::query::{Query, QueryExecutor};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, trace, warn};

/// In-memory index over a fixed set of named text fields.
///
/// The caller decides which fields are indexed when constructing it; fields
/// of a document without a configured [`FieldIndex`] are ignored. Indexing
/// is synchronous: a document is searchable as soon as [`index`](Self::index)
/// returns.
#[derive(Debug, Default, Clone)]
pub struct DocumentIndex {
    fields: BTreeMap<String, FieldIndex>,
    /// DocId -> caller's document id
    ids: Vec<String>,
    /// Caller's document id -> DocId
    id_lookup: FxHashMap<String, DocId>,
}

impl DocumentIndex {
    /// Create an index from a field-name to field-index mapping.
    ///
    /// Postings already present in a supplied field index refer to ordinals
    /// this index never assigned, so they are discarded.
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldIndex)>,
        K: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, mut field)| {
                    let name = name.into();
                    if !field.is_empty() {
                        warn!(
                            field = %name,
                            tokens = field.token_count(),
                            "discarding postings of pre-populated field index"
                        );
                        field.clear();
                    }
                    (name, field)
                })
                .collect(),
            ids: Vec::new(),
            id_lookup: FxHashMap::default(),
        }
    }

    /// Create an index with an empty [`FieldIndex`] per field name
    pub fn with_fields<I, K>(names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(names.into_iter().map(|name| (name, FieldIndex::new())))
    }

    /// Index a document.
    ///
    /// Indexing an id that is already present replaces all of its postings,
    /// including those of fields the new version no longer has. Returns
    /// `None` once the index has run out of document ordinals.
    pub fn index(&mut self, document: &Document) -> Option<DocId> {
        let doc = match self.id_lookup.get(&document.id) {
            Some(&doc) => {
                trace!(id = %document.id, "replacing document");
                doc
            }
            None => {
                let Some(doc) = next_doc_id(self.ids.len()) else {
                    warn!(id = %document.id, documents = self.ids.len(), "document limit reached");
                    return None;
                };
                self.ids.push(document.id.clone());
                self.id_lookup.insert(document.id.clone(), doc);
                doc
            }
        };

        for (name, field) in self.fields.iter_mut() {
            match document.field(name) {
                Some(values) => {
                    field.index(doc, values);
                }
                None => {
                    field.remove(doc);
                }
            }
        }

        for name in document.fields.keys() {
            if !self.fields.contains_key(name) {
                trace!(id = %document.id, field = %name, "ignoring unconfigured field");
            }
        }

        Some(doc)
    }

    /// Index a batch of documents, returning how many were indexed
    pub fn index_all<'d>(&mut self, documents: impl IntoIterator<Item = &'d Document>) -> usize {
        let mut count = 0;
        for document in documents {
            if self.index(document).is_some() {
                count += 1;
            }
        }
        debug!(count, total = self.len(), "indexed documents");
        count
    }

    /// Evaluate a query into hits ordered by descending score, then ascending id.
    ///
    /// The result depends only on the index contents and the query.
    pub fn search(&self, query: &Query) -> Vec<SearchHit> {
        let scores = QueryExecutor::new(self).execute(query);

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter_map(|(doc, score)| self.document_id(doc).map(|id| SearchHit::new(id, score)))
            .collect();
        hits.sort_by(rank_order);

        trace!(hits = hits.len(), "search complete");
        hits
    }

    /// Evaluate a query and keep the first `limit` hits.
    ///
    /// Every matching document is scored and sorted before slicing, so
    /// `total_hits` is the full match count.
    pub fn search_top(&self, query: &Query, limit: usize) -> TopHits {
        let mut hits = self.search(query);
        let total_hits = hits.len();
        hits.truncate(limit);
        TopHits { total_hits, hits }
    }

    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.get(name)
    }

    /// Configured field names, sorted
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn doc_id(&self, id: &str) -> Option<DocId> {
        self.id_lookup.get(id).copied()
    }

    pub fn document_id(&self, doc: DocId) -> Option<&str> {
        self.ids.get(doc as usize).map(String::as_str)
    }

    /// All indexed document ordinals
    pub fn doc_ids(&self) -> Range<DocId> {
        0..next_doc_id(self.ids.len()).unwrap_or(DocId::MAX)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_lookup.contains_key(id)
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.len(),
            fields: self
                .fields
                .iter()
                .map(|(name, field)| FieldStats {
                    name: name.clone(),
                    tokens: field.token_count(),
                    postings: field.posting_count(),
                    documents: field.document_count(),
                })
                .collect(),
        }
    }
}

/// Ordinal for the document after `len` indexed ones.
///
/// `DocId::MAX` itself is never handed out, so `0..len` always fits in a
/// `Range<DocId>`.
fn next_doc_id(len: usize) -> Option<DocId> {
    DocId::try_from(len).ok().filter(|&doc| doc < DocId::MAX)
}
