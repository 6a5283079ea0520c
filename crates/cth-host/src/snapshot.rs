//! JSON schema of a compilation snapshot.
//!
//! A snapshot is what a host exports for offline analysis: its named types,
//! the switch constructs of each file with their bound semantics, and the
//! diagnostics it reported. Types are referenced by qualified name
//! (`Root.Leaf1`); nested declarations are qualified by their parent.
//!
//! A type or symbol name that cannot be found while lowering a *pattern* is
//! not an error: the node simply stays unbound, exactly like a host whose
//! binder failed. Unknown names in *declarations* are rejected.

use std::collections::BTreeMap;

use cth_common::Span;
use serde::Deserialize;

use crate::syntax::RelationalOp;
use crate::ty::{Accessibility, NullableAnnotation, Nullability};

#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub extensions: Vec<ExtensionDeconstructDecl>,
    #[serde(default)]
    pub files: Vec<FileDecl>,
    #[serde(default)]
    pub diagnostics: Vec<DiagnosticDecl>,
}

#[derive(Debug, Deserialize)]
pub struct TypeDecl {
    /// Simple name; nested declarations get `Parent.Name`.
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Every instance constructor, including the ones the compiler
    /// synthesizes.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
    /// Declared member names (used for record detection).
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    /// Instance `Deconstruct` overloads, as lists of out-parameter types.
    #[serde(default)]
    pub deconstructors: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub nested: Vec<TypeDecl>,
}

#[derive(Debug, Deserialize)]
pub struct ConstructorDecl {
    pub accessibility: Accessibility,
    /// `null` entries stand for parameters of a non-named type.
    #[serde(default)]
    pub parameters: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    /// `None` when the property type is not a named type.
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

/// `static void Deconstruct(this Receiver r, out P0 p0, ...)`
#[derive(Debug, Deserialize)]
pub struct ExtensionDeconstructDecl {
    pub receiver: String,
    /// Out-parameter types, receiver excluded.
    #[serde(default)]
    pub parameters: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct FileDecl {
    pub path: String,
    /// Source text, used for rendering only.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub switches: Vec<SwitchDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwitchDecl {
    Expression {
        span: Span,
        governing: GoverningDecl,
        #[serde(default)]
        arms: Vec<CaseDecl>,
    },
    Statement {
        span: Span,
        governing: GoverningDecl,
        #[serde(default)]
        sections: Vec<SectionDecl>,
    },
}

/// The switched-on expression.
#[derive(Debug, Deserialize)]
pub struct GoverningDecl {
    #[serde(default)]
    pub span: Span,
    /// Static type; `None` (or a name that is not declared) means the
    /// expression has no named type.
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub nullability: Nullability,
    /// The symbol the expression binds to, if it is a simple name.
    #[serde(default)]
    pub symbol: Option<SymbolDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolDecl {
    Parameter {
        #[serde(default)]
        annotation: NullableAnnotation,
    },
    Local {
        #[serde(default)]
        annotation: NullableAnnotation,
    },
    Other,
}

/// A switch expression arm or a pattern case label.
#[derive(Debug, Deserialize)]
pub struct CaseDecl {
    pub pattern: PatternDecl,
    /// Whether the case carries a `when` clause.
    #[serde(default)]
    pub guard: bool,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Deserialize)]
pub struct SectionDecl {
    pub labels: Vec<LabelDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelDecl {
    Case {
        value: ConstantDecl,
        #[serde(default)]
        span: Span,
    },
    Pattern {
        pattern: PatternDecl,
        #[serde(default)]
        guard: bool,
        #[serde(default)]
        span: Span,
    },
    Default {
        #[serde(default)]
        span: Span,
    },
}

/// `"null"`, `{ "literal": "0" }` or `{ "name": "Root.Leaf1" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantDecl {
    Null,
    Literal(String),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternDecl {
    Constant {
        value: ConstantDecl,
    },
    Type {
        #[serde(rename = "type")]
        ty: String,
    },
    Declaration {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        designation: Option<String>,
    },
    Recursive {
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        positional: Option<Vec<PatternDecl>>,
        #[serde(default)]
        properties: Option<Vec<PropertyPatternDecl>>,
        #[serde(default)]
        designation: Option<String>,
    },
    Discard,
    Var {
        #[serde(default)]
        designation: Option<String>,
    },
    Relational {
        op: RelationalOpDecl,
        value: ConstantDecl,
    },
    Opaque,
}

#[derive(Debug, Deserialize)]
pub struct PropertyPatternDecl {
    pub name: String,
    pub pattern: PatternDecl,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum RelationalOpDecl {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
}

impl From<RelationalOpDecl> for RelationalOp {
    fn from(op: RelationalOpDecl) -> Self {
        match op {
            RelationalOpDecl::Less => RelationalOp::Less,
            RelationalOpDecl::LessEqual => RelationalOp::LessEqual,
            RelationalOpDecl::Greater => RelationalOp::Greater,
            RelationalOpDecl::GreaterEqual => RelationalOp::GreaterEqual,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DiagnosticDecl {
    pub id: String,
    pub file: String,
    pub span: Span,
    #[serde(default)]
    pub message: String,
}
