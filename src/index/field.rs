//! Inverted index for a single text field.
//!
//! The token dictionary is a `BTreeMap`, so prefix lookups are an ordered
//! range scan starting at the prefix rather than a walk over every token.

use crate::index::types::DocId;
use crate::utils::tokenize_all;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Inverted index for one field across all documents
#[derive(Debug, Default, Clone)]
pub struct FieldIndex {
    /// Token -> (doc -> term frequency)
    postings: BTreeMap<String, FxHashMap<DocId, u32>>,
    /// Doc -> distinct tokens it posted, used to drop its postings on re-index
    doc_tokens: FxHashMap<DocId, Vec<String>>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the text values of one document.
    ///
    /// Re-indexing a document replaces its previous postings in this field.
    /// Returns the number of tokens indexed.
    pub fn index<S: AsRef<str>>(&mut self, doc: DocId, values: &[S]) -> usize {
        self.remove(doc);

        let tokens = tokenize_all(values);
        let token_count = tokens.len();

        let mut frequencies: FxHashMap<String, u32> = FxHashMap::default();
        for token in tokens {
            *frequencies.entry(token).or_insert(0) += 1;
        }

        if frequencies.is_empty() {
            return 0;
        }

        let mut posted = Vec::with_capacity(frequencies.len());
        for (token, frequency) in frequencies {
            self.postings
                .entry(token.clone())
                .or_default()
                .insert(doc, frequency);
            posted.push(token);
        }
        self.doc_tokens.insert(doc, posted);

        token_count
    }

    /// Remove every posting of a document. Returns false if it had none.
    pub fn remove(&mut self, doc: DocId) -> bool {
        let Some(tokens) = self.doc_tokens.remove(&doc) else {
            return false;
        };

        for token in tokens {
            if let Some(docs) = self.postings.get_mut(&token) {
                docs.remove(&doc);
                if docs.is_empty() {
                    self.postings.remove(&token);
                }
            }
        }
        true
    }

    /// Documents containing exactly `token`, with its frequency, ordered by doc.
    pub fn match_exact(&self, token: &str) -> Vec<(DocId, u32)> {
        let mut matches: Vec<(DocId, u32)> = self
            .postings
            .get(token)
            .map(|docs| docs.iter().map(|(&doc, &freq)| (doc, freq)).collect())
            .unwrap_or_default();
        matches.sort_unstable_by_key(|&(doc, _)| doc);
        matches
    }

    /// Documents containing any token that starts with `prefix`.
    ///
    /// Frequencies of all matching tokens are summed per document. An empty
    /// prefix matches nothing.
    pub fn match_prefix(&self, prefix: &str) -> Vec<(DocId, u32)> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let mut aggregated: FxHashMap<DocId, u32> = FxHashMap::default();
        for docs in self.tokens_with_prefix(prefix).map(|(_, docs)| docs) {
            for (&doc, &freq) in docs {
                *aggregated.entry(doc).or_insert(0) += freq;
            }
        }

        let mut matches: Vec<(DocId, u32)> = aggregated.into_iter().collect();
        matches.sort_unstable_by_key(|&(doc, _)| doc);
        matches
    }

    fn tokens_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a FxHashMap<DocId, u32>)> + 'a {
        self.postings
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(token, _)| token.starts_with(prefix))
    }

    /// Drop every posting
    pub fn clear(&mut self) {
        self.postings.clear();
        self.doc_tokens.clear();
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of (token, document) postings
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(|docs| docs.len()).sum()
    }

    /// Number of documents with at least one posting
    pub fn document_count(&self) -> usize {
        self.doc_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
