use regex::Regex;
use std::sync::OnceLock;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[a-z]{1,3}:[a-z]{1,3}").expect("vector token pattern compiles")
    })
}

/// Every `ABBR:VALUE` token in order of appearance; anything else is skipped.
pub(crate) fn tokenize(vector: &str) -> Vec<&str> {
    token_pattern()
        .find_iter(vector)
        .map(|token| token.as_str())
        .collect()
}
