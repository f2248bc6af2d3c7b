pub mod document;
pub mod field;
pub mod types;

pub use document::DocumentIndex;
pub use field::FieldIndex;
pub use types::*;
