//! Closed type hierarchy classification.
//!
//! A hierarchy is closed when no code outside of it can add a subtype: the
//! root and every intermediate type are abstract and cannot be constructed
//! from outside, and every concrete type is sealed. Only subtypes declared
//! *nested* inside their base are considered, since those are the only ones
//! a private constructor admits.

use cth_host::{Accessibility, TypeId, TypeQueries};
use tracing::trace;

/// A closed hierarchy and its concrete leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosedHierarchy {
    pub root: TypeId,
    /// Sealed leaves, depth-first in declaration order.
    pub leaves: Vec<TypeId>,
}

/// Classify `root` as a closed hierarchy.
///
/// With `allow_record_copy_ctor`, abstract records may also expose the
/// protected copy constructor the compiler synthesizes for them.
///
/// Returns `None` as soon as any reachable subtype is neither a valid
/// intermediate root nor sealed; the judgment covers the whole subtree.
pub fn classify<H>(host: &H, root: TypeId, allow_record_copy_ctor: bool) -> Option<ClosedHierarchy>
where
    H: TypeQueries + ?Sized,
{
    if !can_be_root(host, root, allow_record_copy_ctor) {
        trace!(root = host.type_name(root), "not a closed hierarchy root");
        return None;
    }
    let mut leaves = Vec::new();
    collect_leaves(host, root, allow_record_copy_ctor, &mut leaves)?;
    Some(ClosedHierarchy { root, leaves })
}

fn collect_leaves<H>(host: &H, ty: TypeId, allow_record_copy_ctor: bool, leaves: &mut Vec<TypeId>) -> Option<()>
where
    H: TypeQueries + ?Sized,
{
    for &nested in host.nested_types(ty) {
        if host.base_type(nested) != Some(ty) {
            continue;
        }
        if can_be_root(host, nested, allow_record_copy_ctor) {
            collect_leaves(host, nested, allow_record_copy_ctor, leaves)?;
        } else if can_be_leaf(host, nested) {
            leaves.push(nested);
        } else {
            trace!(
                parent = host.type_name(ty),
                subtype = host.type_name(nested),
                "subtype is neither sealed nor a closed root"
            );
            return None;
        }
    }
    Some(())
}

fn can_be_root<H>(host: &H, ty: TypeId, allow_record_copy_ctor: bool) -> bool
where
    H: TypeQueries + ?Sized,
{
    if !host.is_abstract(ty) {
        return false;
    }
    let record_copy_allowed = allow_record_copy_ctor && host.is_record(ty);
    host.constructors(ty).iter().all(|ctor| {
        ctor.accessibility == Accessibility::Private
            || (record_copy_allowed && ctor.is_copy_constructor_of(ty))
    })
}

fn can_be_leaf<H>(host: &H, ty: TypeId) -> bool
where
    H: TypeQueries + ?Sized,
{
    host.is_sealed(ty)
}
