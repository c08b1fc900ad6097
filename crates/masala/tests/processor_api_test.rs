//! Integration tests for the Processor API
//!
//! These tests feed notifications through the public API the way the
//! language service would, one edit after another.

use float_cmp::assert_approx_eq;
use serde_json::json;

use masala::{
    MasalaError, Processor,
    config::{AppConfig, LayoutConfig, ValidationConfig, ViewConfig, ViewKind},
    geometry::Point,
    identifier::Id,
    report::View,
    session::DragEvent,
    structure::Tag,
};

/// Wrap a serialized AST into a notification payload.
fn notification(content: serde_json::Value, diagnostics: serde_json::Value) -> String {
    json!({ "content": content.to_string(), "diagnostics": diagnostics }).to_string()
}

fn entities(names: &[&str]) -> serde_json::Value {
    let elements: Vec<_> = names
        .iter()
        .map(|name| json!({ "$type": "Entity", "name": name }))
        .collect();
    json!({ "$type": "Domainmodel", "elements": elements })
}

fn blog() -> serde_json::Value {
    json!({
        "$type": "Domainmodel",
        "elements": [
            { "$type": "DataType", "name": "String" },
            { "$type": "Entity", "name": "HasAuthor", "features": [
                { "$type": "Feature", "name": "author",
                  "type": { "$ref": "#/elements@0", "$refText": "String" } }
            ]},
            { "$type": "Entity", "name": "Post",
              "superType": { "$ref": "#/elements@1", "$refText": "HasAuthor" },
              "features": [
                { "$type": "Feature", "name": "tags", "many": true,
                  "type": { "$ref": "#/elements@0", "$refText": "String" } }
            ]}
        ]
    })
}

#[test]
fn test_fresh_processor_has_nothing_to_show() {
    let mut processor = Processor::default();

    assert!(processor.snapshot().is_none());
    assert!(processor.view(ViewKind::Tree).is_none());
    assert!(!processor.apply_drag(&DragEvent::dropped(Id::new("Post"), None)));
    assert!(processor.session().cache().is_empty());
}

#[test]
fn test_clean_document_renders_both_views() {
    let mut processor = Processor::default();
    let snapshot = processor
        .apply_json(&notification(blog(), json!([])))
        .expect("Failed to process blog");

    assert!(!snapshot.has_errors());

    let View::Tree(tree) = snapshot.view(ViewKind::Tree) else {
        panic!("expected tree view");
    };
    let post = tree
        .child("Entities")
        .and_then(|e| e.child("Post"))
        .expect("Post node");
    assert_eq!(post.children()[0].name(), "tags[]");
    assert!(post.children()[1].has_tag(Tag::Supertype));

    let View::Graph(graph) = snapshot.view(ViewKind::Graph) else {
        panic!("expected graph view");
    };
    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.edges()[0].id(), "Post-HasAuthor");
}

#[test]
fn test_validator_errors_gate_the_view() {
    let mut processor = Processor::default();
    let snapshot = processor
        .apply_json(&notification(entities(&["User", "Order", "User"]), json!([])))
        .unwrap();

    assert_eq!(snapshot.diagnostics().len(), 1);
    let view = snapshot.view(ViewKind::Graph);
    let View::Diagnostics(listing) = view else {
        panic!("expected diagnostics listing");
    };
    assert_eq!(listing.entries_len(), 1);
    assert!(
        listing
            .to_string()
            .contains("Entity has non-unique name 'User' (2nd occurrence).")
    );
}

#[test]
fn test_external_warnings_do_not_gate_and_come_first() {
    let warning = json!([{
        "severity": 2,
        "message": "Unused datatype",
        "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 8 } }
    }]);
    let content = json!({
        "$type": "Domainmodel",
        "elements": [{ "$type": "Person", "name": "alice" }]
    });

    let mut processor = Processor::default();
    let snapshot = processor.apply_json(&notification(content, warning)).unwrap();

    let messages: Vec<_> = snapshot.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(
        messages,
        ["Unused datatype", "Person name should start with a capital."]
    );
    assert!(!snapshot.view(ViewKind::Tree).is_gated());
}

#[test]
fn test_external_errors_gate_the_view() {
    let error = json!([{
        "severity": 1,
        "message": "Could not resolve reference to DataType named 'Strin'.",
        "source": "masala",
        "range": { "start": { "line": 4, "character": 10 }, "end": { "line": 4, "character": 15 } }
    }]);

    let mut processor = Processor::default();
    let snapshot = processor.apply_json(&notification(blog(), error)).unwrap();

    let View::Diagnostics(listing) = snapshot.view(ViewKind::Tree) else {
        panic!("expected diagnostics listing");
    };
    assert!(listing.to_string().contains("Line 5-5: Could not resolve"));
}

#[test]
fn test_positions_survive_edits() {
    let mut processor = Processor::default();
    processor
        .apply_json(&notification(entities(&["A", "B"]), json!([])))
        .unwrap();

    let id = Id::new("B");
    processor.apply_drag(&DragEvent::moving(id, Point::new(10.0, 10.0)));
    assert!(processor.apply_drag(&DragEvent::dropped(id, Some(Point::new(250.0, 40.0)))));

    // Reorder and add an entity: B keeps its dropped position.
    let snapshot = processor
        .apply_json(&notification(entities(&["C", "B", "A"]), json!([])))
        .unwrap();
    let graph = snapshot.graph();

    assert_eq!(graph.node(id).unwrap().position(), Point::new(250.0, 40.0));
    assert_approx_eq!(f32, graph.node(Id::new("A")).unwrap().position().y(), 0.0);
    assert_approx_eq!(f32, graph.node(Id::new("C")).unwrap().position().y(), 0.0);
}

#[test]
fn test_intermediate_drag_moves_view_but_not_cache() {
    let mut processor = Processor::default();
    processor
        .apply_json(&notification(entities(&["A"]), json!([])))
        .unwrap();

    let id = Id::new("A");
    assert!(!processor.apply_drag(&DragEvent::moving(id, Point::new(7.0, 8.0))));

    let snapshot = processor.snapshot().unwrap();
    assert_eq!(snapshot.graph().nodes()[0].position(), Point::new(7.0, 8.0));
    assert_eq!(processor.session().cache().get(id), Some(Point::new(0.0, 0.0)));
}

#[test]
fn test_malformed_document_keeps_previous_snapshot() {
    let mut processor = Processor::default();
    processor
        .apply_json(&notification(entities(&["A"]), json!([])))
        .unwrap();

    let bad = json!({ "content": "{\"$type\": \"Model\", \"elements\": []}" }).to_string();
    let err = processor.apply_json(&bad).unwrap_err();
    assert!(matches!(err, MasalaError::Document { .. }));

    let snapshot = processor.snapshot().expect("previous snapshot kept");
    assert_eq!(snapshot.graph().nodes().len(), 1);
}

#[test]
fn test_invalid_notification_is_rejected() {
    let mut processor = Processor::default();
    let err = processor.apply_json("not a notification").unwrap_err();

    assert!(matches!(err, MasalaError::Notification(_)));
    assert!(processor.snapshot().is_none());
}

#[test]
fn test_config_drives_layout_and_validation() {
    let config = AppConfig::new(
        LayoutConfig::new(50.0, 30.0),
        ValidationConfig::new(false),
        ViewConfig::default(),
    );
    let content = json!({
        "$type": "Domainmodel",
        "elements": [
            { "$type": "Entity", "name": "A" },
            { "$type": "Entity", "name": "B" },
            { "$type": "Person", "name": "alice" }
        ]
    });

    let mut processor = Processor::new(config);
    let snapshot = processor.apply_json(&notification(content, json!([]))).unwrap();

    assert!(snapshot.diagnostics().is_empty());
    let b = snapshot.graph().nodes()[1].position();
    assert_approx_eq!(f32, b.x(), 50.0);
    assert_approx_eq!(f32, b.y(), 30.0);
}

#[test]
fn test_reset_session_forgets_positions() {
    let mut processor = Processor::default();
    processor
        .apply_json(&notification(entities(&["A"]), json!([])))
        .unwrap();
    processor.apply_drag(&DragEvent::dropped(Id::new("A"), Some(Point::new(99.0, 99.0))));

    processor.reset_session();
    let snapshot = processor
        .apply_json(&notification(entities(&["A"]), json!([])))
        .unwrap();
    assert_eq!(snapshot.graph().nodes()[0].position(), Point::new(0.0, 0.0));
}
