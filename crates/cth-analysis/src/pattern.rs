//! Coverage of a single match case.
//!
//! A case covers a leaf type *without restriction* when it accepts every
//! instance of that type. Anything the evaluator cannot prove, such as an
//! unresolved name, a literal sub-pattern, a guard, counts as restrictive.

use cth_host::syntax::{ConstantValue, RecursivePattern};
use cth_host::{MatchCase, NodeId, Pattern, SemanticModel, Symbol, TypeId, TypeQueries};
use tracing::trace;

/// Whether `case` matches every instance of `target`.
pub fn covers_without_restriction<H>(host: &H, case: &MatchCase, target: TypeId) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    if case.is_guarded() {
        return false;
    }
    pattern_covers(host, &case.pattern, target)
}

/// Whether `case` matches `null`.
pub fn covers_null(case: &MatchCase) -> bool {
    !case.is_guarded()
        && matches!(
            case.pattern,
            Pattern::Discard | Pattern::Var { .. } | Pattern::Constant(ConstantValue::Null)
        )
}

/// Unguarded form of [`covers_without_restriction`].
pub fn pattern_covers<H>(host: &H, pattern: &Pattern, target: TypeId) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    let Some(matched) = referenced_type(host, pattern) else {
        trace!(?pattern, "pattern does not name a type");
        return false;
    };
    if !host.has_implicit_conversion(target, matched) {
        return false;
    }
    match pattern {
        Pattern::Recursive(recursive) => is_non_restrictive(host, recursive),
        _ => true,
    }
}

/// The named type a pattern tests against, if it resolves.
fn referenced_type<H>(host: &H, pattern: &Pattern) -> Option<TypeId>
where
    H: SemanticModel + ?Sized,
{
    let node = match pattern {
        Pattern::Constant(ConstantValue::Name(node)) => *node,
        Pattern::Type { ty } | Pattern::Declaration { ty, .. } => *ty,
        Pattern::Recursive(RecursivePattern { ty: Some(ty), .. }) => *ty,
        _ => return None,
    };
    named_type(host, node)
}

pub(crate) fn named_type<H>(host: &H, node: NodeId) -> Option<TypeId>
where
    H: SemanticModel + ?Sized,
{
    match host.symbol_info(node) {
        Some(Symbol::Type(ty)) => Some(ty),
        _ => None,
    }
}

/// Every sub-pattern of both clauses accepts its whole member.
fn is_non_restrictive<H>(host: &H, recursive: &RecursivePattern) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    if recursive.positional.is_none() && recursive.properties.is_none() {
        return false;
    }

    let positional_ok = recursive.positional.as_ref().map_or(true, |clause| {
        let method = match host.symbol_info(clause.node) {
            Some(Symbol::Deconstruct(method)) => Some(method),
            _ => None,
        };
        clause.subpatterns.iter().enumerate().all(|(index, sub)| {
            let element = method.as_ref().and_then(|m| m.element_type(index));
            subpattern_is_non_restrictive(host, sub, element)
        })
    });

    let properties_ok = recursive.properties.as_ref().map_or(true, |subpatterns| {
        subpatterns.iter().all(|sub| {
            let member = match host.symbol_info(sub.member) {
                Some(Symbol::Property { ty }) => ty,
                _ => None,
            };
            subpattern_is_non_restrictive(host, &sub.pattern, member)
        })
    });

    positional_ok && properties_ok
}

/// `member` is the static type of the property or deconstructed element
/// the sub-pattern is applied to.
fn subpattern_is_non_restrictive<H>(host: &H, pattern: &Pattern, member: Option<TypeId>) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    match pattern {
        Pattern::Var { .. } | Pattern::Discard => true,
        Pattern::Declaration { ty, .. } => accepts_member(host, *ty, member),
        Pattern::Recursive(recursive) => {
            if let Some(ty) = recursive.ty {
                if !accepts_member(host, ty, member) {
                    return false;
                }
            }
            is_non_restrictive(host, recursive)
        }
        _ => false,
    }
}

/// Whether the type named at `ty_node` is a widening of `member`.
fn accepts_member<H>(host: &H, ty_node: NodeId, member: Option<TypeId>) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    match (named_type(host, ty_node), member) {
        (Some(declared), Some(member)) => host.has_implicit_conversion(member, declared),
        _ => false,
    }
}
