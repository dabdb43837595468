// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! page-model: the element tree behind the page editor.
//!
//! A page is a flat, ordered collection of [`ElementRecord`]s linked by
//! `parent_id`. The crate provides:
//!
//! - [`NodeStore`]: owner of the current immutable [`Snapshot`].
//! - [`build`] / [`flatten`]: flat collection ⇄ [`HierarchyNode`] forest.
//! - [`add`], [`remove`], [`move_element`], [`update`]: pure
//!   snapshot-to-snapshot mutations; removal cascades, moves refuse cycles.
//! - [`scale`]: unit-aware style scaling for device previews.
//! - [`check_invariants`] / [`check_hierarchy`]: contract checks.
//!
//! Operations are total: a missing id or a cycle-forming move is a silent
//! no-op that hands back the input snapshot.
//!
//! # Crate Features
//!
//! - `serde`: Serialize/Deserialize for records and hierarchy nodes.
#![forbid(unsafe_code)]

mod hierarchy;
mod ident;
mod invariant;
pub mod mutation;
mod record;
pub mod scale;
mod store;

pub use hierarchy::{build, flatten, HierarchyNode, PreOrder};
pub use ident::{ElementId, IdSource, SequentialIds};
pub use invariant::{check_hierarchy, check_invariants, violations, InvariantError};
pub use mutation::{add, move_element, remove, update, ElementPatch};
pub use record::{ElementKind, ElementRecord, Style};
pub use scale::{scale, scale_forest, SCALED_PROPERTIES};
pub use store::{empty_snapshot, NodeStore, Snapshot};
