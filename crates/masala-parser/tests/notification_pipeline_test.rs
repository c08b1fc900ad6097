//! Integration tests for the notification -> document -> diagnostics path
//!
//! These tests drive the public API with payloads shaped like the ones the
//! language service sends.

use masala_parser::{
    DocumentChange, DocumentError, Severity, ast::Element, error::ErrorCode, normalize, validate,
};

fn change_with(content: serde_json::Value) -> DocumentChange {
    let payload = serde_json::json!({
        "content": content.to_string(),
        "diagnostics": [],
    });
    DocumentChange::from_json(&payload.to_string()).expect("Failed to parse notification")
}

#[test]
fn test_blog_model_is_clean() {
    let change = change_with(serde_json::json!({
        "$type": "Domainmodel",
        "elements": [
            { "$type": "DataType", "name": "String" },
            { "$type": "Entity", "name": "Blog", "features": [
                { "$type": "Feature", "name": "title",
                  "type": { "$ref": "#/elements@0", "$refText": "String" } },
                { "$type": "Feature", "name": "posts", "many": true,
                  "type": { "$ref": "#/elements@2", "$refText": "Post" } }
            ]},
            { "$type": "Entity", "name": "Post" },
            { "$type": "Person", "name": "Alice" },
            { "$type": "Greeting", "person": { "$ref": "#/elements@3", "$refText": "Alice" } }
        ]
    }));

    let document = change.document().expect("Failed to read document");
    let model = normalize(&document);
    assert_eq!(model.entities.len(), 2);
    assert_eq!(model.greetings.len(), 1);
    assert!(validate(&model).is_empty());

    let greeting = &model.greetings[0];
    let person = document.resolve_person(greeting.person());
    assert_eq!(person.ok().map(|p| p.name().to_name()).as_deref(), Some("Alice"));
}

#[test]
fn test_violations_across_scopes() {
    let change = change_with(serde_json::json!({
        "$type": "Domainmodel",
        "elements": [
            { "$type": "Entity", "name": "User" },
            { "$type": "Person", "name": "bob" },
            { "$type": "Greeting", "person": { "$ref": "#/elements@1", "$refText": "bob" } },
            { "$type": "Greeting", "person": { "$ref": "#/elements@1", "$refText": "bob" } },
            { "$type": "PackageDeclaration", "name": "admin", "elements": [
                { "$type": "Entity", "name": "Role" },
                { "$type": "Entity", "name": "Role" }
            ]},
            { "$type": "Entity", "name": "User" }
        ]
    }));

    let document = change.document().unwrap();
    let diagnostics = validate(&normalize(&document));

    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.error_code()).collect();
    assert_eq!(
        codes,
        [ErrorCode::E200, ErrorCode::E201, ErrorCode::W200, ErrorCode::E200]
    );

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();
    assert_eq!(errors, 3);

    let package_diag = &diagnostics[3];
    assert_eq!(
        package_diag.target().unwrap().to_string(),
        "/elements@4/elements@1"
    );
    assert_eq!(
        package_diag.message(),
        "Entity has non-unique name 'Role' (2nd occurrence)."
    );
}

#[test]
fn test_dangling_greetings_still_counted() {
    let change = change_with(serde_json::json!({
        "$type": "Domainmodel",
        "elements": [
            { "$type": "Greeting", "person": { "$refText": "Ghost", "$error": "Could not resolve reference to Person named 'Ghost'." } },
            { "$type": "Greeting", "person": { "$refText": "Ghost", "$error": "Could not resolve reference to Person named 'Ghost'." } }
        ]
    }));

    let document = change.document().unwrap();
    let Element::Greeting(greeting) = &document.elements()[0] else {
        panic!("expected greeting");
    };
    assert!(!document.resolve_person(greeting.person()).is_resolved());

    let diagnostics = validate(&normalize(&document));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().contains("'Ghost'"));
}

#[test]
fn test_language_service_diagnostics_are_forwarded() {
    let payload = r#"{
        "content": "{\"$type\":\"Domainmodel\",\"elements\":[]}",
        "diagnostics": [
            {"severity": 2, "message": "unused", "range": {"start": {"line": 0, "character": 0}, "end": {"line": 0, "character": 3}}},
            {"severity": 1, "message": "Expecting token", "source": "masala", "code": "parsing-error",
             "range": {"start": {"line": 3, "character": 1}, "end": {"line": 5, "character": 0}}}
        ]
    }"#;

    let change = DocumentChange::from_json(payload).unwrap();
    assert!(change.has_errors());

    let diagnostics: Vec<_> = change.diagnostics().collect();
    assert!(diagnostics[0].severity().is_warning());
    assert!(diagnostics[1].severity().is_error());
    assert_eq!(diagnostics[1].target().unwrap().to_string(), "Line 4-6");
    assert_eq!(
        diagnostics[1].code().map(ToString::to_string).as_deref(),
        Some("parsing-error")
    );
}

#[test]
fn test_malformed_content_is_rejected() {
    let change = DocumentChange::from_json(r#"{"content": "{ not json"}"#).unwrap();
    assert!(matches!(change.document(), Err(DocumentError::Malformed(_))));
}
