#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rankdex::{BoolQuery, Document, DocumentIndex, MatchQuery, Query};

#[derive(Arbitrary, Debug)]
struct Input {
    documents: Vec<(String, String)>,
    text: String,
    prefix: bool,
    boost: f64,
    limit: u8,
}

fuzz_target!(|input: Input| {
    let mut index = DocumentIndex::with_fields(["body"]);
    for (i, (title, body)) in input.documents.iter().enumerate() {
        let doc = Document::new(i.to_string(), [("title", vec![title.clone()]), ("body", vec![body.clone()])]);
        index.index(&doc);
    }

    let clause = MatchQuery::new("body", input.text.as_str())
        .with_prefix_match(input.prefix)
        .with_boost(input.boost);
    let query: Query = BoolQuery::new()
        .should(clause.clone())
        .must_not(MatchQuery::new("title", input.text.as_str()))
        .into();

    let hits = index.search(&Query::from(clause));
    assert!(hits.iter().all(|hit| hit.score > 0.0));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));

    let top = index.search_top(&query, input.limit as usize);
    assert!(top.hits.len() <= input.limit as usize);
    assert!(top.hits.len() <= top.total_hits);
});
