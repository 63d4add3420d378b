use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use tracing::trace;

use crate::comments::strip_line_comments;
use crate::patterns::{QUERY_TYPE_REGEX, TYPE_DEFINITION_REGEX};

/// A single rule violation found in schema text.
///
/// The `Display` messages are relied upon by callers that match on the exact
/// text, so they must stay stable. `code()` is the machine-friendly variant.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaIssue {
    #[error("Schema cannot be empty")]
    EmptySchema,
    #[error("No valid type definitions found")]
    NoTypeDefinitions,
    #[error("No Query type defined")]
    NoQueryType,
    #[error("Unbalanced braces in schema")]
    UnbalancedBraces,
}

impl SchemaIssue {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaIssue::EmptySchema => "empty_schema",
            SchemaIssue::NoTypeDefinitions => "no_type_definitions",
            SchemaIssue::NoQueryType => "no_query_type",
            SchemaIssue::UnbalancedBraces => "unbalanced_braces",
        }
    }
}

/// Outcome of [`validate`]. Serializes as `{ "valid": bool, "errors": [string] }`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    errors: Vec<SchemaIssue>,
}

impl ValidationResult {
    fn from_issues(errors: Vec<SchemaIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Issues in the order the rules found them. May contain duplicates.
    pub fn errors(&self) -> &[SchemaIssue] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has(&self, issue: SchemaIssue) -> bool {
        self.errors.contains(&issue)
    }
}

/// Runs every check against `text` and collects all violations.
///
/// Empty (or whitespace-only) text short-circuits with a single
/// [`SchemaIssue::EmptySchema`]. Everything else is checked on the text with
/// `#` comments removed.
pub fn validate(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::from_issues(vec![SchemaIssue::EmptySchema]);
    }

    let stripped = strip_line_comments(text);
    let source: &str = &stripped;
    let mut issues = Vec::new();

    if !TYPE_DEFINITION_REGEX.is_match(source) {
        issues.push(SchemaIssue::NoTypeDefinitions);
    }

    if !QUERY_TYPE_REGEX.is_match(source) {
        issues.push(SchemaIssue::NoQueryType);
    }

    check_brace_balance(source, &mut issues);

    trace!(
        issues = issues.len(),
        bytes = text.len(),
        "schema text validated"
    );

    ValidationResult::from_issues(issues)
}

// A dip below zero reports once and stops the scan, then the non-zero final
// count reports again. Callers have always seen both entries.
fn check_brace_balance(source: &str, issues: &mut Vec<SchemaIssue>) {
    let mut depth: i64 = 0;

    for byte in source.bytes() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => continue,
        }

        if depth < 0 {
            issues.push(SchemaIssue::UnbalancedBraces);
            break;
        }
    }

    if depth != 0 {
        issues.push(SchemaIssue::UnbalancedBraces);
    }
}
