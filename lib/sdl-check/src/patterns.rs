use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

/// `type Name {` anywhere in the text.
pub(crate) static TYPE_DEFINITION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\btype\s+[A-Za-z_][A-Za-z0-9_]*\s*\{")
        .expect("type definition pattern should compile")
});

pub(crate) static QUERY_TYPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btype\s+Query\s*\{").expect("query type pattern should compile")
});

/// Groups: 1 = keyword, 2 = identifier, 3 = body up to the first `}`.
pub(crate) static TYPE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(type|input)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{([^}]*)\}")
        .expect("type block pattern should compile")
});
