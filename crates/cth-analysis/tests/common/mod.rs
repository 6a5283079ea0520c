//! Shared fixtures for suppressor integration tests.
//!
//! Each fixture is a snapshot with one switch in `Test.cs` spanning bytes
//! 0..100 and one diagnostic reported on it.

#![allow(dead_code)]

use cth_analysis::DiagnosticSuppressor;
use cth_host::MemoryHost;
use serde_json::{json, Value};

/// `abstract class Root { Root() {} sealed class Leaf1 : Root; sealed class Leaf2 : Root }`
pub fn simple() -> Value {
    json!([{
        "name": "Root", "abstract": true,
        "constructors": [{ "accessibility": "private" }],
        "nested": [
            { "name": "Leaf1", "sealed": true, "base": "Root" },
            { "name": "Leaf2", "sealed": true, "base": "Root" }
        ]
    }])
}

/// Like [`simple`], but `Leaf1` exposes a `Value` property of type `value`
/// (`null` for a type that is not named, such as a tuple).
pub fn with_value(value: Value) -> Value {
    json!([{
        "name": "Root", "abstract": true,
        "constructors": [{ "accessibility": "private" }],
        "nested": [
            { "name": "Leaf1", "sealed": true, "base": "Root",
              "properties": [{ "name": "Value", "type": value }] },
            { "name": "Leaf2", "sealed": true, "base": "Root" }
        ]
    }])
}

/// `Root<Root<int>>`: `Leaf1.Value` is an `Inner`, itself a closed hierarchy
/// whose `Leaf1` has an `int` `Value`.
pub fn recursive() -> Value {
    json!([
        {
            "name": "Inner", "abstract": true,
            "constructors": [{ "accessibility": "private" }],
            "properties": [{ "name": "Value", "type": "int" }],
            "nested": [{ "name": "Leaf1", "sealed": true, "base": "Inner" }]
        },
        {
            "name": "Root", "abstract": true,
            "constructors": [{ "accessibility": "private" }],
            "nested": [
                { "name": "Leaf1", "sealed": true, "base": "Root",
                  "properties": [{ "name": "Value", "type": "Inner" }] },
                { "name": "Leaf2", "sealed": true, "base": "Root" }
            ]
        }
    ])
}

/// `Leaf1` has `Deconstruct(out object)` and `Deconstruct(out object, out
/// string)`; an extension adds `Deconstruct(this Leaf1, out object, out
/// string, out object)`.
pub fn deconstruct() -> Value {
    json!([{
        "name": "Root", "abstract": true,
        "constructors": [{ "accessibility": "private" }],
        "nested": [
            { "name": "Leaf1", "sealed": true, "base": "Root",
              "deconstructors": [["object"], ["object", "string"]] },
            { "name": "Leaf2", "sealed": true, "base": "Root" }
        ]
    }])
}

pub fn deconstruct_extensions() -> Value {
    json!([{ "receiver": "Root.Leaf1", "parameters": ["object", "string", "object"] }])
}

/// Three leaves, two of which implement `ILeaf`.
pub fn interfaces() -> Value {
    json!([
        { "name": "ILeaf", "abstract": true },
        {
            "name": "Root", "abstract": true,
            "constructors": [{ "accessibility": "private" }],
            "nested": [
                { "name": "Leaf1", "sealed": true, "base": "Root", "interfaces": ["ILeaf"] },
                { "name": "Leaf2", "sealed": true, "base": "Root", "interfaces": ["ILeaf"] },
                { "name": "Leaf3", "sealed": true, "base": "Root" }
            ]
        }
    ])
}

/// `abstract record Root` with only the synthesized protected copy
/// constructor besides a private one.
pub fn record() -> Value {
    json!([{
        "name": "Root", "abstract": true,
        "members": ["<Clone>$"],
        "constructors": [
            { "accessibility": "private" },
            { "accessibility": "protected", "parameters": ["Root"] }
        ],
        "nested": [
            { "name": "Leaf1", "sealed": true, "base": "Root", "members": ["<Clone>$"] },
            { "name": "Leaf2", "sealed": true, "base": "Root", "members": ["<Clone>$"] }
        ]
    }])
}

/// Governing expression of static type `Root` with the given nullability
/// annotation and flow state.
pub fn governing(annotation: &str, flow_state: &str) -> Value {
    json!({
        "type": "Root",
        "nullability": { "annotation": annotation, "flow_state": flow_state }
    })
}

/// A parameter `Root root` with nullable context enabled.
pub fn non_null() -> Value {
    governing("not_annotated", "not_null")
}

/// Nullable context disabled: no annotation information at all.
pub fn oblivious() -> Value {
    governing("none", "none")
}

pub fn arm(pattern: Value) -> Value {
    json!({ "pattern": pattern })
}

pub fn guarded(pattern: Value) -> Value {
    json!({ "pattern": pattern, "guard": true })
}

pub fn ty(name: &str) -> Value {
    json!({ "kind": "type", "type": name })
}

pub fn null() -> Value {
    json!({ "kind": "constant", "value": "null" })
}

pub struct Fixture {
    pub types: Value,
    pub extensions: Value,
    pub options: Value,
}

impl Fixture {
    pub fn new(types: Value) -> Self {
        Fixture {
            types,
            extensions: json!([]),
            options: json!({}),
        }
    }

    pub fn extensions(mut self, extensions: Value) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.options[key] = json!(value);
        self
    }

    /// A switch expression reported as `CS8509`.
    pub fn expression(self, governing: Value, arms: Value) -> MemoryHost {
        self.build(
            json!({ "kind": "expression", "span": { "start": 0, "end": 100 },
                    "governing": governing, "arms": arms }),
            "CS8509",
        )
    }

    /// A switch statement reported as `IDE0010`; each entry of `sections`
    /// is the label list of one section.
    pub fn statement(self, governing: Value, sections: Value) -> MemoryHost {
        let sections: Vec<Value> = sections
            .as_array()
            .expect("sections must be an array")
            .iter()
            .map(|labels| json!({ "labels": labels }))
            .collect();
        self.build(
            json!({ "kind": "statement", "span": { "start": 0, "end": 100 },
                    "governing": governing, "sections": sections }),
            "IDE0010",
        )
    }

    fn build(self, switch: Value, diagnostic: &str) -> MemoryHost {
        MemoryHost::from_value(json!({
            "types": self.types,
            "extensions": self.extensions,
            "files": [{ "path": "Test.cs", "options": self.options, "switches": [switch] }],
            "diagnostics": [{
                "id": diagnostic,
                "file": "Test.cs",
                "span": { "start": 0, "end": 6 },
                "message": "switch is not exhaustive"
            }]
        }))
        .expect("fixture snapshot should load")
    }
}

/// Whether `suppressor` suppresses the fixture's single diagnostic.
pub fn is_suppressed(host: &MemoryHost, suppressor: &dyn DiagnosticSuppressor) -> bool {
    let diagnostic = &host.diagnostics()[0];
    match suppressor.suppress(host, diagnostic) {
        Some(suppression) => {
            assert_eq!(suppression.diagnostic, *diagnostic);
            assert_eq!(suppression.descriptor.id, "CTH001");
            true
        }
        None => false,
    }
}

/// `case <pattern>:` label.
pub fn pattern_label(pattern: Value) -> Value {
    json!({ "kind": "pattern", "pattern": pattern })
}

pub fn guarded_label(pattern: Value) -> Value {
    json!({ "kind": "pattern", "pattern": pattern, "guard": true })
}

/// Classic `case Root.Leaf1:` label.
pub fn case_label(name: &str) -> Value {
    json!({ "kind": "case", "value": { "name": name } })
}

pub fn case_null() -> Value {
    json!({ "kind": "case", "value": "null" })
}
