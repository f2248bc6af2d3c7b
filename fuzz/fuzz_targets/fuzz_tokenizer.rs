#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Tokens are never empty and never contain whitespace
    for token in rankdex::utils::tokenize(data) {
        assert!(!token.is_empty());
        assert!(!token.contains(char::is_whitespace));
    }
});
