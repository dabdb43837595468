// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contract checks for element collections.
//!
//! Violations point at a collaborator that bypassed the mutation engine, not
//! at bad user input, so they are reported rather than repaired.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::hierarchy::HierarchyNode;
use crate::ident::ElementId;
use crate::record::ElementRecord;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// Two records share an id.
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    /// A record points at a parent that is not in the collection.
    #[error("element {id} references missing parent {parent}")]
    DanglingParent {
        /// Offending record.
        id: ElementId,
        /// Parent it points at.
        parent: ElementId,
    },
    /// A record names itself as parent.
    #[error("element {0} is its own parent")]
    SelfParent(ElementId),
    /// Following parents from this record loops back to it.
    #[error("parent chain of element {0} forms a cycle")]
    Cycle(ElementId),
    /// A hierarchy root still carries a parent reference.
    #[error("root {id} still references parent {parent}")]
    DetachedRoot {
        /// Offending node.
        id: ElementId,
        /// Parent it still points at.
        parent: ElementId,
    },
    /// A hierarchy child whose record names a different parent.
    #[error("element {id} is placed under {placed_under} but references {parent:?}")]
    MisplacedChild {
        /// Offending node.
        id: ElementId,
        /// Node it is nested under.
        placed_under: ElementId,
        /// Parent its record names.
        parent: Option<ElementId>,
    },
}

/// Every violation in a flat collection, in collection order.
pub fn violations(records: &[ElementRecord]) -> Vec<InvariantError> {
    let mut found = Vec::new();
    let mut parents: HashMap<&ElementId, Option<&ElementId>> = HashMap::new();
    for rec in records {
        if parents.insert(&rec.id, rec.parent_id.as_ref()).is_some() {
            found.push(InvariantError::DuplicateId(rec.id.clone()));
        }
    }

    for rec in records {
        let Some(parent) = &rec.parent_id else {
            continue;
        };
        if parent == &rec.id {
            found.push(InvariantError::SelfParent(rec.id.clone()));
        } else if !parents.contains_key(parent) {
            found.push(InvariantError::DanglingParent {
                id: rec.id.clone(),
                parent: parent.clone(),
            });
        }
    }

    // A walk stops at a root, a dangling link, a record already known to
    // reach a root, or the first repeated id.
    let mut reaches_root: HashSet<&ElementId> = HashSet::new();
    for rec in records {
        let mut path: Vec<&ElementId> = Vec::new();
        let mut on_path: HashSet<&ElementId> = HashSet::new();
        let mut looped_at = None;
        let mut current = Some(&rec.id);
        while let Some(at) = current {
            if reaches_root.contains(at) {
                break;
            }
            if !on_path.insert(at) {
                looped_at = Some(at);
                break;
            }
            path.push(at);
            current = parents.get(at).copied().flatten();
        }
        match looped_at {
            None => reaches_root.extend(path),
            Some(at) if at == &rec.id && !is_self_loop(rec) => {
                found.push(InvariantError::Cycle(rec.id.clone()));
            }
            Some(_) => {}
        }
    }
    found
}

fn is_self_loop(rec: &ElementRecord) -> bool {
    rec.parent_id.as_ref() == Some(&rec.id)
}

/// First violation in a flat collection, if any.
pub fn check_invariants(records: &[ElementRecord]) -> Result<(), InvariantError> {
    violations(records).into_iter().next().map_or(Ok(()), Err)
}

/// Verify that a built forest agrees with the parent references it carries.
///
/// Catches a dangling `parent_id` that survived [`crate::build`] as a root.
pub fn check_hierarchy(roots: &[HierarchyNode]) -> Result<(), InvariantError> {
    let mut stack: Vec<(&HierarchyNode, Option<&ElementId>)> =
        roots.iter().map(|root| (root, None)).collect();
    while let Some((node, placed_under)) = stack.pop() {
        match (placed_under, &node.record.parent_id) {
            (None, Some(parent)) => {
                return Err(InvariantError::DetachedRoot {
                    id: node.id().clone(),
                    parent: parent.clone(),
                });
            }
            (Some(expected), actual) if actual.as_ref() != Some(expected) => {
                return Err(InvariantError::MisplacedChild {
                    id: node.id().clone(),
                    placed_under: expected.clone(),
                    parent: actual.clone(),
                });
            }
            _ => {}
        }
        stack.extend(node.children.iter().map(|child| (child, Some(node.id()))));
    }
    Ok(())
}
