//! Type-level facts a host exposes about its named types.
//!
//! Types are referred to by [`TypeId`]; the host owns the actual symbol
//! table and answers every question about a type through
//! [`TypeQueries`](crate::host::TypeQueries).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a named type in the host's symbol table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared accessibility of a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Private,
    PrivateProtected,
    Protected,
    Internal,
    ProtectedInternal,
    Public,
}

/// A declared (or host-synthesized) instance constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub accessibility: Accessibility,
    /// Parameter types in order; `None` for a parameter whose type is not a
    /// named type (arrays, tuples, pointers, ...).
    pub parameters: Vec<Option<TypeId>>,
}

impl Constructor {
    pub fn new(accessibility: Accessibility, parameters: Vec<Option<TypeId>>) -> Self {
        Self {
            accessibility,
            parameters,
        }
    }

    /// Whether this is a protected single-parameter constructor taking its
    /// own declaring type, the shape of a synthesized record copy constructor.
    pub fn is_copy_constructor_of(&self, declaring: TypeId) -> bool {
        self.accessibility == Accessibility::Protected
            && matches!(self.parameters.as_slice(), [Some(param)] if *param == declaring)
    }
}

/// The declared nullable annotation of a type occurrence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullableAnnotation {
    /// No annotation information, e.g. nullable analysis disabled.
    #[default]
    None,
    NotAnnotated,
    Annotated,
}

/// The null state computed by the host's flow analysis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullableFlowState {
    #[default]
    None,
    NotNull,
    MaybeNull,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nullability {
    #[serde(default)]
    pub annotation: NullableAnnotation,
    #[serde(default)]
    pub flow_state: NullableFlowState,
}

impl Nullability {
    pub fn new(annotation: NullableAnnotation, flow_state: NullableFlowState) -> Self {
        Self {
            annotation,
            flow_state,
        }
    }
}

/// Static type information for an expression.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    /// The named type of the expression, `None` when the expression has no
    /// type or a type that is not a named type.
    pub ty: Option<TypeId>,
    pub nullability: Nullability,
}
