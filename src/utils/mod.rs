//! Utility functions.
//!
//! ## Modules
//!
//! - [`tokenizer`] - Text normalization shared by indexing and querying
//!
//! ```
//! use rankdex::utils::tokenize;
//!
//! let tokens = tokenize("To be, or not to be");
//! assert_eq!(tokens, vec!["to", "be", "or", "not", "to", "be"]);
//! ```

pub mod tokenizer;

pub use tokenizer::*;
