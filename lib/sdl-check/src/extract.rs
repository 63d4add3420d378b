use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::comments::strip_line_comments;
use crate::patterns::TYPE_BLOCK_REGEX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Type,
    Input,
}

impl BlockKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::Type => "type",
            BlockKind::Input => "input",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "type" => Some(BlockKind::Type),
            "input" => Some(BlockKind::Input),
            _ => None,
        }
    }
}

/// One `type` or `input` block, with its field lines kept as raw text.
///
/// `name` carries the keyword prefix (`"type User"`, `"input CreateUserInput"`)
/// so objects and inputs of the same name stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedType {
    pub name: String,
    pub fields: Vec<String>,
}

impl ParsedType {
    pub fn new(kind: BlockKind, ident: &str, fields: Vec<String>) -> Self {
        Self {
            name: format!("{} {}", kind.keyword(), ident),
            fields,
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        let (keyword, _) = self.name.split_once(' ')?;
        BlockKind::from_keyword(keyword)
    }

    /// The declared identifier without the keyword prefix.
    pub fn ident(&self) -> &str {
        self.name
            .split_once(' ')
            .map(|(_, ident)| ident)
            .unwrap_or(&self.name)
    }
}

impl Display for ParsedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSchema {
    pub types: Vec<ParsedType>,
}

impl ParsedSchema {
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// First block declared under `name` (prefixed, e.g. `"input Filter"`).
    pub fn find(&self, name: &str) -> Option<&ParsedType> {
        self.types.iter().find(|parsed| parsed.name == name)
    }
}

impl Display for ParsedSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, parsed) in self.types.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", parsed)?;
        }
        Ok(())
    }
}

/// Extracts every `type`/`input` block in source order.
///
/// This does not check validity; pair it with `validate` and only
/// trust the output for text that passed. Duplicated names are kept as-is.
pub fn parse(text: &str) -> ParsedSchema {
    let stripped = strip_line_comments(text);
    let source: &str = &stripped;

    let types: Vec<ParsedType> = TYPE_BLOCK_REGEX
        .captures_iter(source)
        .filter_map(|caps| {
            let kind = BlockKind::from_keyword(&source[caps.get_group(1)?.range()])?;
            let ident = &source[caps.get_group(2)?.range()];
            let body = &source[caps.get_group(3)?.range()];

            Some(ParsedType::new(kind, ident, collect_fields(body)))
        })
        .collect();

    trace!(types = types.len(), "schema blocks extracted");

    ParsedSchema { types }
}

fn collect_fields(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_types_and_inputs_in_order() {
        let schema = parse(
            "type User {\n id: ID!\n name: String!\n}\ninput CreateUserInput {\n name: String!\n}",
        );

        assert_eq!(
            schema.types,
            vec![
                ParsedType {
                    name: "type User".into(),
                    fields: vec!["id: ID!".into(), "name: String!".into()],
                },
                ParsedType {
                    name: "input CreateUserInput".into(),
                    fields: vec!["name: String!".into()],
                },
            ]
        );
    }

    #[test]
    fn single_line_body_is_one_field() {
        let schema = parse("type Query { id: ID }");
        assert_eq!(schema.types[0].fields, vec!["id: ID"]);
    }

    #[test]
    fn empty_body_has_no_fields() {
        let schema = parse("type Empty {\n\n   \n}");
        assert_eq!(schema.len(), 1);
        assert!(schema.types[0].fields.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let schema = parse("type Foo { a: Int }\ntype Foo { b: Int }");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.types[0].fields, vec!["a: Int"]);
        assert_eq!(schema.types[1].fields, vec!["b: Int"]);
        assert_eq!(schema.find("type Foo"), Some(&schema.types[0]));
    }

    #[test]
    fn commented_blocks_are_skipped() {
        let schema = parse("# type Hidden { a: Int }\ntype Shown {\n  b: Int # note\n}");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.types[0].name, "type Shown");
        assert_eq!(schema.types[0].fields, vec!["b: Int"]);
    }

    #[test]
    fn other_definitions_are_ignored() {
        let schema = parse("scalar Date\nenum Role { ADMIN }\ninterface Node { id: ID! }");
        assert!(schema.is_empty());
    }

    #[test]
    fn nested_braces_truncate_the_body() {
        let schema = parse("type Query {\n  a: Int\n  b: Foo { x }\n  c: Int\n}");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.types[0].fields, vec!["a: Int", "b: Foo { x"]);
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let schema = parse("type Query {\r\n  id: ID\r\n}");
        assert_eq!(schema.types[0].fields, vec!["id: ID"]);
    }

    #[test]
    fn kind_and_ident() {
        let parsed = ParsedType::new(BlockKind::Input, "Filter", vec![]);
        assert_eq!(parsed.name, "input Filter");
        assert_eq!(parsed.kind(), Some(BlockKind::Input));
        assert_eq!(parsed.ident(), "Filter");
    }

    #[test]
    fn display_lists_fields_indented() {
        let schema = parse("type A { x: Int }\ninput B {\n y: Int\n z: Int\n}");
        insta::assert_snapshot!(schema, @r"
        type A
          x: Int

        input B
          y: Int
          z: Int
        ");
    }
}
