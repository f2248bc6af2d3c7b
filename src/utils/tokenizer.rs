/// Split text into lower-cased tokens.
///
/// Any run of non-alphanumeric characters is a boundary and empty tokens are
/// dropped. Duplicates are kept, in order, so callers can count term
/// frequency. Indexing and querying both go through this function.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current_token = String::new();

    for ch in text.chars() {
        match classify_char(ch) {
            CharType::Alphanumeric => {
                // Some characters lower-case to more than one char (e.g. 'İ')
                current_token.extend(ch.to_lowercase());
            }
            CharType::Boundary => {
                if !current_token.is_empty() {
                    tokens.push(std::mem::take(&mut current_token));
                }
            }
        }
    }

    if !current_token.is_empty() {
        tokens.push(current_token);
    }

    tokens
}

/// Tokenize every value of a field, in value order.
pub fn tokenize_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| tokenize(value.as_ref()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CharType {
    Alphanumeric,
    Boundary,
}

fn classify_char(ch: char) -> CharType {
    if ch.is_alphanumeric() {
        CharType::Alphanumeric
    } else {
        CharType::Boundary
    }
}
