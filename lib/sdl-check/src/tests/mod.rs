use std::path::PathBuf;

use pretty_assertions::assert_eq;

use crate::{parse, validate, SchemaIssue, SchemaSession, SchemaSource};

fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixture")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("failed to read {}", path.display()))
}

#[test]
fn empty_schema() {
    let json = serde_json::to_string(&validate("")).unwrap();
    assert_eq!(json, r#"{"valid":false,"errors":["Schema cannot be empty"]}"#);
}

#[test]
fn stray_leading_brace() {
    let result = validate("} type Query {}");
    assert!(!result.is_valid());
    assert!(result.has(SchemaIssue::UnbalancedBraces));
    assert!(!result.has(SchemaIssue::NoQueryType));
}

#[test]
fn commented_query_does_not_count() {
    let result = validate("# type Query {}\ntype Query { id: ID }");
    assert!(result.is_valid());

    let only_commented = validate("# type Query {}\ntype Foo { id: ID }");
    assert_eq!(only_commented.errors(), &[SchemaIssue::NoQueryType]);
}

#[test]
fn validate_and_parse_are_idempotent() {
    let sdl = read_fixture("shareholders.graphql");
    assert_eq!(validate(&sdl), validate(&sdl));
    assert_eq!(parse(&sdl), parse(&sdl));

    let broken = "type Foo { a: Int }}";
    assert_eq!(validate(broken), validate(broken));
    assert_eq!(parse(broken), parse(broken));
}

#[test]
fn shareholder_fixture_is_valid() {
    let sdl = read_fixture("shareholders.graphql");
    let result = validate(&sdl);
    assert!(result.is_valid(), "unexpected errors: {:?}", result.messages());
}

#[test]
fn shareholder_fixture_extraction() {
    let sdl = read_fixture("shareholders.graphql");
    let schema = parse(&sdl);

    insta::assert_snapshot!(serde_json::to_string_pretty(&schema).unwrap(), @r#"
    {
      "types": [
        {
          "name": "type Query",
          "fields": [
            "shareholders(clientId: ID!): [Shareholder!]!",
            "shareholder(id: ID!): Shareholder"
          ]
        },
        {
          "name": "type Mutation",
          "fields": [
            "registerShareholder(input: RegisterShareholderInput!): Shareholder!"
          ]
        },
        {
          "name": "type Shareholder",
          "fields": [
            "id: ID!",
            "fullName: String!",
            "shares: Int!",
            "holdingType: HoldingType"
          ]
        },
        {
          "name": "input RegisterShareholderInput",
          "fields": [
            "clientId: ID!",
            "fullName: String!",
            "shares: Int!"
          ]
        }
      ]
    }
    "#);
}

#[test]
fn editing_session_walkthrough() {
    let sdl = read_fixture("shareholders.graphql");
    let mut session = SchemaSession::new();

    session.load_introspection(sdl.clone());
    assert!(session.is_valid());
    assert_eq!(session.trusted_types().map(|types| types.len()), Some(4));

    // User deletes the last closing brace.
    let edited = sdl.trim_end().trim_end_matches('}').to_string();
    let result = session.set_text(edited, SchemaSource::Manual);
    assert_eq!(result.errors(), &[SchemaIssue::UnbalancedBraces]);

    assert!(session.is_stale());
    assert!(session.trusted_types().is_none());
    assert_eq!(session.displayed_types().map(|types| types.len()), Some(4));
}
