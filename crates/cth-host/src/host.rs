//! The read-only query interface a host compiler provides.
//!
//! The suppressor owns no syntax or symbols. Every fact it needs comes
//! through these traits, and all of them are called concurrently from the
//! batch runner, so a [`Host`] must be `Send + Sync`.

use cth_common::{FileId, Location};

use crate::symbol::Symbol;
use crate::syntax::{NodeId, SwitchExpression, SwitchStatement};
use crate::ty::{Constructor, TypeId, TypeInfo};

/// Member name the compiler synthesizes for the clone method of records.
pub const RECORD_CLONE_METHOD: &str = "<Clone>$";

/// Structural facts about named types.
pub trait TypeQueries {
    /// Display name of the type, used for logging and rendering only.
    fn type_name(&self, ty: TypeId) -> &str;

    fn is_abstract(&self, ty: TypeId) -> bool;

    fn is_sealed(&self, ty: TypeId) -> bool;

    /// All instance constructors, implicit ones included.
    fn constructors(&self, ty: TypeId) -> &[Constructor];

    /// Types declared directly inside `ty`, in declaration order.
    fn nested_types(&self, ty: TypeId) -> &[TypeId];

    fn base_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Whether `ty` declares a member with exactly this name.
    fn has_member(&self, ty: TypeId, name: &str) -> bool;

    /// Whether a value of type `from` converts implicitly to `to`.
    fn has_implicit_conversion(&self, from: TypeId, to: TypeId) -> bool;

    /// Whether `ty` has record semantics.
    fn is_record(&self, ty: TypeId) -> bool {
        self.has_member(ty, RECORD_CLONE_METHOD)
    }
}

/// Semantic facts about syntax nodes.
pub trait SemanticModel {
    /// Static type and nullability of an expression.
    fn type_info(&self, node: NodeId) -> TypeInfo;

    /// The symbol a node binds to, `None` if it does not bind.
    fn symbol_info(&self, node: NodeId) -> Option<Symbol>;
}

/// Maps reported locations back to syntax.
pub trait SyntaxQueries {
    /// The switch expression at `location`, or failing that the first one
    /// nested inside it.
    fn switch_expression_at(&self, location: &Location) -> Option<&SwitchExpression>;

    /// The switch statement at `location`. Nested statements do not count.
    fn switch_statement_at(&self, location: &Location) -> Option<&SwitchStatement>;
}

/// Per-file analyzer configuration.
pub trait OptionsProvider {
    fn option(&self, file: FileId, key: &str) -> Option<&str>;
}

/// Everything the suppressor consumes from a host.
pub trait Host: TypeQueries + SemanticModel + SyntaxQueries + OptionsProvider + Send + Sync {}

impl<T> Host for T where T: TypeQueries + SemanticModel + SyntaxQueries + OptionsProvider + Send + Sync
{}
