use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::extract::{parse, ParsedSchema};
use crate::validate::{validate, ValidationResult};

pub const DEFAULT_IMPORT_EXTENSIONS: &[&str] = &["graphql", "gql", "json", "txt"];
pub const DEFAULT_MAX_IMPORT_BYTES: u64 = 5_000_000;

/// Where the current schema text came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaSource {
    #[default]
    Manual,
    Import {
        file_name: String,
    },
    Introspection,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Unsupported file type for '{file_name}'. Accepted extensions: {accepted}")]
    UnsupportedExtension { file_name: String, accepted: String },
    #[error("File '{file_name}' is {size} bytes, which exceeds the import limit of {limit} bytes")]
    TooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },
}

/// Which files [`SchemaSession::import_file`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPolicy {
    allowed_extensions: Vec<String>,
    max_bytes: Option<u64>,
}

impl Default for ImportPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_IMPORT_EXTENSIONS.iter().copied(),
            Some(DEFAULT_MAX_IMPORT_BYTES),
        )
    }
}

impl ImportPolicy {
    /// Extensions are compared case-insensitively, a leading `.` is ignored.
    pub fn new<I, S>(allowed_extensions: I, max_bytes: Option<u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_bytes,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn check(&self, file_name: &str, size: u64) -> Result<(), ImportError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let accepted = extension
            .as_deref()
            .is_some_and(|ext| self.allowed_extensions.iter().any(|allowed| allowed == ext));

        if !accepted {
            return Err(ImportError::UnsupportedExtension {
                file_name: file_name.to_string(),
                accepted: self
                    .allowed_extensions
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        if let Some(limit) = self.max_bytes {
            if size > limit {
                return Err(ImportError::TooLarge {
                    file_name: file_name.to_string(),
                    size,
                    limit,
                });
            }
        }

        Ok(())
    }
}

/// Holds the schema text being edited and keeps its validation current.
///
/// Every change re-validates. The extracted types are refreshed only while the
/// text is valid; after an edit breaks the text, the last good extraction is
/// still available through [`SchemaSession::displayed_types`] and the session
/// reports itself as stale until the text is valid again.
#[derive(Debug, Clone)]
pub struct SchemaSession {
    text: String,
    source: SchemaSource,
    validation: ValidationResult,
    last_valid_types: Option<ParsedSchema>,
    stale: bool,
}

impl Default for SchemaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaSession {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            source: SchemaSource::Manual,
            validation: validate(""),
            last_valid_types: None,
            stale: false,
        }
    }

    pub fn with_text(text: impl Into<String>, source: SchemaSource) -> Self {
        let mut session = Self::new();
        session.set_text(text, source);
        session
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    pub fn set_text(&mut self, text: impl Into<String>, source: SchemaSource) -> &ValidationResult {
        self.text = text.into();
        self.source = source;
        self.refresh();
        &self.validation
    }

    pub fn import_file(
        &mut self,
        file_name: &str,
        contents: impl Into<String>,
        policy: &ImportPolicy,
    ) -> Result<&ValidationResult, ImportError> {
        let contents = contents.into();
        policy.check(file_name, contents.len() as u64)?;

        Ok(self.set_text(
            contents,
            SchemaSource::Import {
                file_name: file_name.to_string(),
            },
        ))
    }

    pub fn load_introspection(&mut self, sdl: impl Into<String>) -> &ValidationResult {
        self.set_text(sdl, SchemaSource::Introspection)
    }

    /// Re-runs validation on the current text and reports whether it passed.
    pub fn validate(&mut self) -> bool {
        self.refresh();
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Types extracted from the current text, only if the text is valid.
    pub fn trusted_types(&self) -> Option<&ParsedSchema> {
        if self.is_valid() {
            self.last_valid_types.as_ref()
        } else {
            None
        }
    }

    /// Types from the most recent valid text, possibly stale.
    pub fn displayed_types(&self) -> Option<&ParsedSchema> {
        self.last_valid_types.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Drops the text and every derived result.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn refresh(&mut self) {
        self.validation = validate(&self.text);

        if self.validation.is_valid() {
            self.last_valid_types = Some(parse(&self.text));
            self.stale = false;
        } else {
            self.stale = self.last_valid_types.is_some();
        }

        debug!(
            source = ?self.source,
            valid = self.validation.is_valid(),
            errors = self.validation.errors().len(),
            stale = self.stale,
            "schema session refreshed"
        );
    }
}
