//! Syntax of switch constructs as the suppressor sees them.
//!
//! Patterns are a closed tagged enum with one variant per pattern kind.
//! Anything that refers to a symbol (a type name, a property name, a
//! positional clause) carries the [`NodeId`] the host binds through
//! [`SemanticModel::symbol_info`](crate::host::SemanticModel::symbol_info),
//! so resolution failures surface as a missing symbol rather than a panic.

use cth_common::Span;

/// Handle to a syntax node the host can answer semantic queries about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// An expression whose type or symbol may be queried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub node: NodeId,
    pub span: Span,
}

/// The operand of a constant pattern or a classic `case` label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstantValue {
    /// The `null` literal.
    Null,
    /// Any other literal (`0`, `"text"`, `true`, ...).
    Literal(String),
    /// An identifier or member access such as `Root.Leaf1`.
    Name(NodeId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelationalOp {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

/// A single pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `null`, `42`, or a constant naming a type.
    Constant(ConstantValue),
    /// `Root.Leaf1`
    Type { ty: NodeId },
    /// `Root.Leaf1 leaf`
    Declaration {
        ty: NodeId,
        designation: Option<String>,
    },
    /// `Root.Leaf1(var a) { Prop: var b } leaf`
    Recursive(RecursivePattern),
    /// `_`
    Discard,
    /// `var x`, `var (a, b)`
    Var { designation: Option<String> },
    /// `> 0`
    Relational { op: RelationalOp, value: ConstantValue },
    /// Logical, parenthesized, list or any other pattern the suppressor
    /// does not look into.
    Opaque,
}

/// A property and/or positional destructuring pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecursivePattern {
    /// The optional type in front of the clauses.
    pub ty: Option<NodeId>,
    pub positional: Option<PositionalClause>,
    pub properties: Option<Vec<PropertySubpattern>>,
    pub designation: Option<String>,
}

/// `(p0, p1, ...)`; the node binds to the selected deconstruct method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionalClause {
    pub node: NodeId,
    pub subpatterns: Vec<Pattern>,
}

/// `Name: pattern`; `member` binds to the property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySubpattern {
    pub member: NodeId,
    pub pattern: Pattern,
}

/// A `when` clause. Its condition is never interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    pub span: Span,
}

/// A pattern together with its optional guard: a switch expression arm or
/// a pattern `case` label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Guard>,
    pub span: Span,
}

impl MatchCase {
    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

/// `governing switch { arm, ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchExpression {
    pub span: Span,
    pub governing: Expr,
    pub arms: Vec<MatchCase>,
}

/// `switch (governing) { section ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchStatement {
    pub span: Span,
    pub governing: Expr,
    pub sections: Vec<SwitchSection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchSection {
    pub labels: Vec<SwitchLabel>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchLabel {
    /// Classic `case <constant>:`.
    Case { value: ConstantValue, span: Span },
    /// `case <pattern> [when <condition>]:`
    Pattern(MatchCase),
    /// `default:`
    Default { span: Span },
}
