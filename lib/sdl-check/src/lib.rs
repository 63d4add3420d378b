//! SDL Check
//! =========
//!
//! Best-effort sanity checks for hand-written GraphQL schema text, plus a
//! flat extractor for `type` and `input` blocks. This is meant for giving
//! quick feedback while a schema is being edited or imported, not as a
//! replacement for a real GraphQL parser.
//!
//! Example: Validate then Extract
//! ------------------------------
//!
//! ```rust
//! use sdl_check::{parse, validate};
//!
//! let sdl = "type Query {\n  users: [User!]!\n}\ntype User {\n  id: ID!\n}";
//!
//! let result = validate(sdl);
//! assert!(result.is_valid());
//!
//! // Only trust the extracted types once the text is known to be valid.
//! let schema = parse(sdl);
//! assert_eq!(schema.types[0].name, "type Query");
//! assert_eq!(schema.types[1].fields, vec!["id: ID!"]);
//! ```
//!
//! Known limitation: a block body ends at the first `}`, so nested braces
//! inside a type body truncate the extracted fields.

mod comments;
mod extract;
mod patterns;
mod session;
mod validate;

#[cfg(test)]
mod tests;

pub use comments::strip_line_comments;
pub use extract::{parse, BlockKind, ParsedSchema, ParsedType};
pub use session::{
    ImportError, ImportPolicy, SchemaSession, SchemaSource, DEFAULT_IMPORT_EXTENSIONS,
    DEFAULT_MAX_IMPORT_BYTES,
};
pub use validate::{validate, SchemaIssue, ValidationResult};
