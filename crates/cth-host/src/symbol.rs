//! Symbols the host binds syntax nodes to.

use crate::ty::{NullableAnnotation, TypeId};

/// The symbol a syntax node refers to, as far as the suppressor cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A named type, e.g. the `Root.Leaf1` in `Root.Leaf1 leaf => ...`.
    Type(TypeId),
    /// A property; `ty` is `None` when its type is not a named type.
    Property { ty: Option<TypeId> },
    /// A method parameter with its declared nullable annotation.
    Parameter { annotation: NullableAnnotation },
    /// A local variable with its declared nullable annotation.
    Local { annotation: NullableAnnotation },
    /// The deconstruct method a positional pattern binds to.
    Deconstruct(DeconstructMethod),
    /// Anything else: fields, methods, namespaces, ...
    Other,
}

/// A `Deconstruct` method selected for a positional pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeconstructMethod {
    /// Extension methods take the deconstructed value as parameter 0.
    pub is_extension: bool,
    /// Types of all parameters in order, receiver included for extensions.
    pub parameters: Vec<Option<TypeId>>,
}

impl DeconstructMethod {
    /// Type of the parameter that receives the `index`-th positional
    /// element, shifted past the receiver for extension methods.
    pub fn element_type(&self, index: usize) -> Option<TypeId> {
        let index = if self.is_extension { index + 1 } else { index };
        self.parameters.get(index).copied().flatten()
    }
}
