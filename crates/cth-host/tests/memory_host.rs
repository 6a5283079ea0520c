//! Integration tests for loading compilation snapshots into a `MemoryHost`.
//!
//! These tests exercise:
//! - Qualified naming of nested declarations and declaration order
//! - Rejection of duplicate and unknown type references, cyclic base chains
//!   and inverted spans
//! - Implicit conversions along base types and interfaces
//! - Binding of pattern names, properties and `Deconstruct` overloads
//! - Locating switch constructs from diagnostic locations
//! - Option lookup precedence between snapshot and analyzer config

use cth_common::{FileId, Location, Span};
use cth_host::syntax::{ConstantValue, SwitchLabel};
use cth_host::{
    AnalyzerConfig, MemoryHost, OptionsProvider, Pattern, SemanticModel, SnapshotError, Symbol,
    SyntaxQueries, TypeQueries,
};
use serde_json::json;

// ── Helpers ────────────────────────────────────────────────────────────

fn nested_hierarchy() -> serde_json::Value {
    json!([
        { "name": "ILeaf", "abstract": true },
        {
            "name": "Root",
            "abstract": true,
            "constructors": [{ "accessibility": "private" }],
            "nested": [
                { "name": "Leaf1", "sealed": true, "base": "Root", "interfaces": ["ILeaf"],
                  "properties": [{ "name": "Value", "type": "object" }, { "name": "Pair", "type": null }],
                  "deconstructors": [["object"], ["object", "string"]] },
                {
                    "name": "Intermediate",
                    "abstract": true,
                    "base": "Root",
                    "constructors": [{ "accessibility": "private" }],
                    "nested": [
                        { "name": "Leaf2", "sealed": true, "base": "Root.Intermediate" },
                        { "name": "Leaf3", "sealed": true, "base": "Root.Intermediate" }
                    ]
                }
            ]
        }
    ])
}

fn load(value: serde_json::Value) -> MemoryHost {
    MemoryHost::from_value(value).expect("snapshot should load")
}

fn ty(host: &MemoryHost, name: &str) -> cth_host::TypeId {
    host.type_by_name(name)
        .unwrap_or_else(|| panic!("type `{}` should be declared", name))
}

// ── Types ──────────────────────────────────────────────────────────────

#[test]
fn nested_types_are_qualified_in_declaration_order() {
    let host = load(json!({ "types": nested_hierarchy() }));
    let root = ty(&host, "Root");

    let nested: Vec<&str> = host
        .nested_types(root)
        .iter()
        .map(|&t| host.type_name(t))
        .collect();
    insta::assert_snapshot!(nested.join("\n"), @r"
    Root.Leaf1
    Root.Intermediate
    ");

    let intermediate = ty(&host, "Root.Intermediate");
    assert_eq!(host.base_type(intermediate), Some(root));
    assert!(host.is_abstract(intermediate));
    assert!(host.is_sealed(ty(&host, "Root.Intermediate.Leaf3")));
    assert_eq!(host.constructors(root).len(), 1);
}

#[test]
fn builtin_types_are_predeclared() {
    let host = load(json!({}));
    assert!(host.type_by_name("object").is_some());
    assert!(host.is_sealed(ty(&host, "string")));
    assert!(!host.is_sealed(ty(&host, "object")));
}

#[test]
fn duplicate_type_is_rejected() {
    let err = MemoryHost::from_value(json!({
        "types": [{ "name": "Root" }, { "name": "Root" }]
    }))
    .unwrap_err();
    assert!(matches!(err, SnapshotError::DuplicateType(ref name) if name == "Root"));
}

#[test]
fn unknown_base_type_is_rejected() {
    let err = MemoryHost::from_value(json!({
        "types": [{ "name": "Leaf", "base": "Missing" }]
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "unknown type `Missing` referenced by `Leaf`");
}

#[test]
fn malformed_snapshot_is_a_parse_error() {
    let err = MemoryHost::from_json("{ \"types\": 3 }").unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn implicit_conversions_follow_bases_and_interfaces() {
    let host = load(json!({ "types": nested_hierarchy() }));
    let root = ty(&host, "Root");
    let leaf1 = ty(&host, "Root.Leaf1");
    let leaf2 = ty(&host, "Root.Intermediate.Leaf2");
    let ileaf = ty(&host, "ILeaf");
    let object = ty(&host, "object");

    assert!(host.has_implicit_conversion(leaf1, leaf1));
    assert!(host.has_implicit_conversion(leaf1, root));
    assert!(host.has_implicit_conversion(leaf2, root));
    assert!(host.has_implicit_conversion(leaf1, ileaf));
    assert!(host.has_implicit_conversion(leaf2, object));
    assert!(!host.has_implicit_conversion(leaf2, ileaf));
    assert!(!host.has_implicit_conversion(root, leaf1));
}

#[test]
fn record_detection_uses_clone_member() {
    let host = load(json!({
        "types": [
            { "name": "Rec", "members": ["<Clone>$", "Equals"] },
            { "name": "Class", "members": ["Equals"] }
        ]
    }));
    assert!(host.is_record(ty(&host, "Rec")));
    assert!(!host.is_record(ty(&host, "Class")));
}

// ── Syntax and binding ─────────────────────────────────────────────────

fn switch_file(switches: serde_json::Value) -> serde_json::Value {
    json!({
        "types": nested_hierarchy(),
        "extensions": [{ "receiver": "Root.Leaf1", "parameters": ["object", "string", "object"] }],
        "files": [{ "path": "Test.cs", "switches": switches }],
        "diagnostics": [{ "id": "CS8509", "file": "Test.cs", "span": { "start": 12, "end": 18 } }]
    })
}

#[test]
fn switch_expression_patterns_are_bound() {
    let host = load(switch_file(json!([{
        "kind": "expression",
        "span": { "start": 5, "end": 90 },
        "governing": { "type": "Root", "symbol": { "kind": "parameter", "annotation": "not_annotated" } },
        "arms": [
            { "pattern": { "kind": "recursive", "type": "Root.Leaf1",
                           "properties": [{ "name": "Value", "pattern": { "kind": "declaration", "type": "object" } },
                                          { "name": "Missing", "pattern": { "kind": "var" } }] } },
            { "pattern": { "kind": "type", "type": "Root.Nope" } }
        ]
    }])));

    let location = host.diagnostics()[0].location;
    let switch = host.switch_expression_at(&location).expect("switch expression");
    assert_eq!(
        host.type_info(switch.governing.node).ty,
        host.type_by_name("Root")
    );
    assert!(matches!(
        host.symbol_info(switch.governing.node),
        Some(Symbol::Parameter { .. })
    ));

    let Pattern::Recursive(recursive) = &switch.arms[0].pattern else {
        panic!("expected recursive pattern, got {:?}", switch.arms[0].pattern);
    };
    let ty_node = recursive.ty.expect("typed recursive pattern");
    assert_eq!(
        host.symbol_info(ty_node),
        Some(Symbol::Type(ty(&host, "Root.Leaf1")))
    );
    let properties = recursive.properties.as_ref().expect("property clause");
    assert_eq!(
        host.symbol_info(properties[0].member),
        Some(Symbol::Property { ty: host.type_by_name("object") })
    );
    assert_eq!(host.symbol_info(properties[1].member), None);

    let Pattern::Type { ty: unknown } = switch.arms[1].pattern else {
        panic!("expected type pattern");
    };
    assert_eq!(host.symbol_info(unknown), None);
}

#[test]
fn positional_patterns_select_deconstruct_by_arity() {
    let positional = |arity: usize| {
        json!({
            "kind": "recursive",
            "type": "Root.Leaf1",
            "positional": vec![json!({ "kind": "var" }); arity]
        })
    };
    let host = load(switch_file(json!([{
        "kind": "expression",
        "span": { "start": 5, "end": 90 },
        "governing": { "type": "Root" },
        "arms": [
            { "pattern": positional(2) },
            { "pattern": positional(3) },
            { "pattern": positional(4) }
        ]
    }])));
    let file = host.file(FileId(0)).unwrap();
    let arms = &file.switch_expressions()[0].arms;

    let method = |idx: usize| {
        let Pattern::Recursive(recursive) = &arms[idx].pattern else {
            panic!("expected recursive pattern");
        };
        let clause = recursive.positional.as_ref().expect("positional clause");
        match host.symbol_info(clause.node) {
            Some(Symbol::Deconstruct(method)) => Some(method),
            None => None,
            other => panic!("unexpected symbol {:?}", other),
        }
    };

    let instance = method(0).expect("instance Deconstruct(object, string)");
    assert!(!instance.is_extension);
    assert_eq!(instance.element_type(1), host.type_by_name("string"));

    let extension = method(1).expect("extension Deconstruct");
    assert!(extension.is_extension);
    assert_eq!(extension.parameters.len(), 4);
    assert_eq!(extension.element_type(1), host.type_by_name("string"));

    assert!(method(2).is_none());
}

#[test]
fn switch_statement_labels_are_lowered() {
    let host = load(switch_file(json!([{
        "kind": "statement",
        "span": { "start": 10, "end": 80 },
        "governing": { "type": "Root" },
        "sections": [
            { "labels": [{ "kind": "case", "value": { "name": "Root.Leaf1" } },
                         { "kind": "case", "value": "null" }] },
            { "labels": [{ "kind": "pattern", "guard": true, "pattern": { "kind": "discard" } }] },
            { "labels": [{ "kind": "default" }] }
        ]
    }])));
    let location = host.diagnostics()[0].location;
    let statement = host.switch_statement_at(&location).expect("switch statement");
    assert_eq!(statement.sections.len(), 3);

    match &statement.sections[0].labels[0] {
        SwitchLabel::Case {
            value: ConstantValue::Name(node),
            ..
        } => assert_eq!(
            host.symbol_info(*node),
            Some(Symbol::Type(ty(&host, "Root.Leaf1")))
        ),
        other => panic!("expected named case label, got {:?}", other),
    }
    assert!(matches!(
        statement.sections[0].labels[1],
        SwitchLabel::Case { value: ConstantValue::Null, .. }
    ));
    match &statement.sections[1].labels[0] {
        SwitchLabel::Pattern(case) => assert!(case.is_guarded()),
        other => panic!("expected pattern label, got {:?}", other),
    }
    assert!(matches!(statement.sections[2].labels[0], SwitchLabel::Default { .. }));
}

#[test]
fn innermost_switch_expression_wins() {
    let arm = json!([{ "pattern": { "kind": "discard" } }]);
    let host = load(switch_file(json!([
        { "kind": "expression", "span": { "start": 0, "end": 200 }, "governing": { "type": "Root" }, "arms": arm },
        { "kind": "expression", "span": { "start": 10, "end": 50 }, "governing": { "type": "Root.Leaf1" }, "arms": arm }
    ])));
    let file = FileId(0);

    let inner = host
        .switch_expression_at(&Location::new(file, Span::new(12, 18)))
        .unwrap();
    assert_eq!(inner.span, Span::new(10, 50));

    let outer = host
        .switch_expression_at(&Location::new(file, Span::new(60, 70)))
        .unwrap();
    assert_eq!(outer.span, Span::new(0, 200));

    // A location no switch encloses falls back to the first switch inside it.
    let wider = Location::new(file, Span::new(5, 210));
    assert_eq!(host.switch_expression_at(&wider).unwrap().span, Span::new(10, 50));

    assert!(host.switch_statement_at(&Location::new(file, Span::new(12, 18))).is_none());
    assert!(host
        .switch_expression_at(&Location::new(FileId(7), Span::new(12, 18)))
        .is_none());
}

#[test]
fn cyclic_base_chain_is_rejected() {
    let err = MemoryHost::from_value(json!({
        "types": [{ "name": "A", "abstract": true, "base": "A" }],
        "files": [{
            "path": "Test.cs",
            "switches": [{
                "kind": "expression",
                "span": { "start": 0, "end": 40 },
                "governing": { "type": "A" },
                "arms": [{ "pattern": { "kind": "recursive", "type": "A", "properties": [
                    { "name": "Missing", "pattern": { "kind": "var" } }
                ]}}]
            }]
        }]
    }))
    .unwrap_err();
    assert!(matches!(err, SnapshotError::CyclicBase { ref name } if name == "A"));

    let err = MemoryHost::from_value(json!({
        "types": [
            { "name": "A", "base": "B" },
            { "name": "B", "base": "A" }
        ]
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "base type chain of `A` is cyclic");
}

#[test]
fn inverted_spans_are_rejected() {
    let err = MemoryHost::from_value(switch_file(json!([{
        "kind": "expression",
        "span": { "start": 50, "end": 10 },
        "governing": { "type": "Root" },
        "arms": []
    }])))
    .unwrap_err();
    assert!(matches!(err, SnapshotError::InvertedSpan { start: 50, end: 10, .. }));

    let err = MemoryHost::from_value(json!({
        "files": [{ "path": "Test.cs" }],
        "diagnostics": [{ "id": "CS8509", "file": "Test.cs", "span": { "start": 9, "end": 3 } }]
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "span 9..3 in `Test.cs` ends before it starts");
}

#[test]
fn diagnostic_in_unknown_file_is_rejected() {
    let err = MemoryHost::from_value(json!({
        "diagnostics": [{ "id": "CS8509", "file": "Nowhere.cs", "span": { "start": 0, "end": 1 } }]
    }))
    .unwrap_err();
    assert!(matches!(err, SnapshotError::UnknownFile(ref path) if path == "Nowhere.cs"));
}

// ── Options ────────────────────────────────────────────────────────────

#[test]
fn file_options_override_analyzer_config() {
    let host = load(json!({
        "files": [
            { "path": "A.cs", "options": { "key": "from-snapshot" } },
            { "path": "B.cs" },
            { "path": "C.cs" }
        ]
    }));
    let config = AnalyzerConfig::from_str(
        r#"
[options]
key = "global"

[files."B.cs"]
key = true
"#,
    )
    .unwrap();
    let host = host.with_config(config);

    let a = host.file_id("A.cs").unwrap();
    let b = host.file_id("B.cs").unwrap();
    let c = host.file_id("C.cs").unwrap();
    assert_eq!(host.option(a, "key"), Some("from-snapshot"));
    assert_eq!(host.option(b, "key"), Some("true"));
    assert_eq!(host.option(c, "key"), Some("global"));
    assert_eq!(host.option(c, "other"), None);
    assert_eq!(host.option(FileId(9), "key"), None);
}
