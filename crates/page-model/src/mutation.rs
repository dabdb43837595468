// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mutation engine: pure snapshot-to-snapshot operations.
//!
//! Every operation takes the current [`Snapshot`] and returns the next one.
//! No-ops (missing ids, rejected moves, empty patches) hand back the input
//! snapshot itself, so callers can detect "nothing changed" with
//! [`std::sync::Arc::ptr_eq`] or via [`crate::NodeStore::replace`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::ident::{ElementId, IdSource};
use crate::record::{ElementRecord, Style};
use crate::store::Snapshot;

/// Partial update for [`update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementPatch {
    /// Replacement content, if any.
    pub content: Option<String>,
    /// Style keys to overwrite; keys not listed keep their value.
    pub style: Style,
}

impl ElementPatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Overwrite one style key.
    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// True when applying the patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.style.is_empty()
    }
}

/// Append `draft` under `parent` with a freshly minted id.
///
/// Whatever id the draft carried is discarded. An unknown `parent` is kept as
/// is; the hierarchy builder will show the element as a root.
#[instrument(level = "debug", skip(snapshot, ids, draft), fields(kind = %draft.kind))]
pub fn add(
    snapshot: &Snapshot,
    ids: &mut impl IdSource,
    draft: ElementRecord,
    parent: Option<&ElementId>,
) -> (Snapshot, ElementId) {
    let id = ids.next_id();
    let record = ElementRecord {
        id: id.clone(),
        parent_id: parent.cloned(),
        ..draft
    };
    let mut next = Vec::with_capacity(snapshot.len() + 1);
    next.extend(snapshot.iter().cloned());
    next.push(record);
    debug!(%id, "element added");
    (Arc::from(next), id)
}

/// Ids of `root` and every transitive descendant present in `records`.
///
/// Empty when `root` is not in `records`.
pub fn subtree_ids<'a>(records: &'a [ElementRecord], root: &ElementId) -> HashSet<&'a ElementId> {
    let mut closure = HashSet::new();
    let Some(start) = records.iter().find(|rec| &rec.id == root) else {
        return closure;
    };

    let mut children: HashMap<&ElementId, Vec<&ElementId>> = HashMap::new();
    for rec in records {
        if let Some(parent) = &rec.parent_id {
            children.entry(parent).or_default().push(&rec.id);
        }
    }

    let mut pending = vec![&start.id];
    while let Some(id) = pending.pop() {
        if !closure.insert(id) {
            continue;
        }
        if let Some(kids) = children.get(id) {
            pending.extend(kids.iter().copied());
        }
    }
    closure
}

/// Drop `id` together with all of its descendants.
#[instrument(level = "debug", skip(snapshot), fields(id = %id))]
pub fn remove(snapshot: &Snapshot, id: &ElementId) -> Snapshot {
    let doomed = subtree_ids(snapshot, id);
    if doomed.is_empty() {
        debug!("remove ignored: element not found");
        return Arc::clone(snapshot);
    }
    let next: Vec<ElementRecord> = snapshot
        .iter()
        .filter(|rec| !doomed.contains(&rec.id))
        .cloned()
        .collect();
    debug!(removed = snapshot.len() - next.len(), "subtree removed");
    Arc::from(next)
}

/// True when `candidate` is `id` itself or lies below it.
///
/// Walks `candidate`'s parent chain iteratively. The walk gives up after
/// visiting every record once, so an already-corrupted (cyclic) snapshot
/// cannot make it spin; that case answers `true` to keep callers from
/// growing the cycle.
pub fn is_descendant_or_self(
    records: &[ElementRecord],
    candidate: &ElementId,
    id: &ElementId,
) -> bool {
    let parents: HashMap<&ElementId, Option<&ElementId>> = records
        .iter()
        .map(|rec| (&rec.id, rec.parent_id.as_ref()))
        .collect();

    let mut current = Some(candidate);
    let mut steps = 0usize;
    while let Some(at) = current {
        if at == id {
            return true;
        }
        steps += 1;
        if steps > records.len() {
            warn!(%candidate, "parent chain does not terminate; store is cyclic");
            return true;
        }
        current = parents.get(at).copied().flatten();
    }
    false
}

/// Reparent `id` under `new_parent` (`None` makes it a root).
///
/// Rejected, returning the input snapshot, when `id` is missing or when
/// `new_parent` is `id` itself or one of its descendants.
#[instrument(level = "debug", skip(snapshot), fields(id = %id))]
pub fn move_element(
    snapshot: &Snapshot,
    id: &ElementId,
    new_parent: Option<&ElementId>,
) -> Snapshot {
    let Some(pos) = snapshot.iter().position(|rec| &rec.id == id) else {
        debug!("move ignored: element not found");
        return Arc::clone(snapshot);
    };
    if let Some(target) = new_parent {
        if is_descendant_or_self(snapshot, target, id) {
            debug!(%target, "move rejected: would create a cycle");
            return Arc::clone(snapshot);
        }
    }
    if snapshot[pos].parent_id.as_ref() == new_parent {
        return Arc::clone(snapshot);
    }

    let mut next = snapshot.to_vec();
    next[pos].parent_id = new_parent.cloned();
    debug!(parent = ?new_parent, "element moved");
    Arc::from(next)
}

/// Merge `patch` into the record `id`.
///
/// Style keys in the patch overwrite, others are kept; content is replaced
/// when the patch carries one.
#[instrument(level = "debug", skip(snapshot, patch), fields(id = %id))]
pub fn update(snapshot: &Snapshot, id: &ElementId, patch: &ElementPatch) -> Snapshot {
    let Some(pos) = snapshot.iter().position(|rec| &rec.id == id) else {
        debug!("update ignored: element not found");
        return Arc::clone(snapshot);
    };

    let mut record = snapshot[pos].clone();
    if let Some(content) = &patch.content {
        record.content.clone_from(content);
    }
    for (key, value) in &patch.style {
        record.style.insert(key.clone(), value.clone());
    }
    if record == snapshot[pos] {
        return Arc::clone(snapshot);
    }

    let mut next = snapshot.to_vec();
    next[pos] = record;
    Arc::from(next)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ident::SequentialIds;
    use crate::record::ElementKind;

    fn rec(id: &str, parent: Option<&str>) -> ElementRecord {
        let rec = ElementRecord::new(id, ElementKind::Container);
        match parent {
            Some(p) => rec.with_parent(p),
            None => rec,
        }
    }

    fn snap(records: Vec<ElementRecord>) -> Snapshot {
        Arc::from(records)
    }

    fn id(raw: &str) -> ElementId {
        ElementId::from(raw)
    }

    fn ids_of(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn add_assigns_fresh_id_and_parent() {
        let mut ids = SequentialIds::new();
        let draft = ElementRecord::new("caller-chosen", ElementKind::Paragraph)
            .with_content("hi")
            .with_style("padding", "16px")
            .with_parent("stale");
        let (next, new_id) = add(&snap(vec![]), &mut ids, draft, None);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, new_id);
        assert_ne!(new_id.as_str(), "caller-chosen");
        assert!(next[0].is_root());
        assert_eq!(next[0].content, "hi");
    }

    #[test]
    fn add_under_missing_parent_still_appends() {
        let mut ids = SequentialIds::new();
        let base = snap(vec![rec("a", None)]);
        let draft = ElementRecord::draft(ElementKind::Icon);
        let (next, new_id) = add(&base, &mut ids, draft, Some(&id("ghost")));
        assert_eq!(ids_of(&next), ["a", new_id.as_str()]);
        assert_eq!(next[1].parent_id, Some(id("ghost")));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn remove_cascades_to_all_descendants() {
        let base = snap(vec![rec("a", None), rec("b", Some("a")), rec("c", Some("b"))]);
        let next = remove(&base, &id("a"));
        assert!(next.is_empty());
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn remove_keeps_siblings_and_order() {
        let base = snap(vec![
            rec("a", None),
            rec("b", Some("a")),
            rec("x", None),
            rec("c", Some("b")),
            rec("y", Some("x")),
        ]);
        let next = remove(&base, &id("b"));
        assert_eq!(ids_of(&next), ["a", "x", "y"]);
    }

    #[test]
    fn remove_missing_id_returns_same_snapshot() {
        let base = snap(vec![rec("a", None)]);
        assert!(Arc::ptr_eq(&base, &remove(&base, &id("nope"))));
    }

    #[test]
    fn move_into_descendant_is_rejected() {
        let base = snap(vec![rec("a", None), rec("b", Some("a"))]);
        let next = move_element(&base, &id("a"), Some(&id("b")));
        assert!(Arc::ptr_eq(&base, &next));
    }

    #[test]
    fn move_onto_itself_is_rejected() {
        let base = snap(vec![rec("a", None)]);
        assert!(Arc::ptr_eq(&base, &move_element(&base, &id("a"), Some(&id("a")))));
    }

    #[test]
    fn move_missing_element_is_ignored() {
        let base = snap(vec![rec("a", None)]);
        assert!(Arc::ptr_eq(&base, &move_element(&base, &id("z"), Some(&id("a")))));
    }

    #[test]
    fn move_reparents_and_can_make_root() {
        let base = snap(vec![rec("a", None), rec("b", None), rec("c", Some("a"))]);
        let next = move_element(&base, &id("c"), Some(&id("b")));
        assert_eq!(next[2].parent_id, Some(id("b")));
        let rooted = move_element(&next, &id("c"), None);
        assert!(rooted[2].is_root());
        assert_eq!(ids_of(&rooted), ["a", "b", "c"]);
    }

    #[test]
    fn move_to_unknown_parent_is_allowed() {
        let base = snap(vec![rec("a", None)]);
        let next = move_element(&base, &id("a"), Some(&id("ghost")));
        assert_eq!(next[0].parent_id, Some(id("ghost")));
    }

    #[test]
    fn cycle_walk_terminates_on_corrupted_store() {
        let corrupted = vec![rec("a", Some("b")), rec("b", Some("a")), rec("c", None)];
        assert!(is_descendant_or_self(&corrupted, &id("a"), &id("c")));
        let base = snap(corrupted);
        assert!(Arc::ptr_eq(&base, &move_element(&base, &id("c"), Some(&id("a")))));
    }

    #[test]
    fn update_merges_style_shallowly() {
        let base = snap(vec![rec("a", None)
            .with_content("old")
            .with_style("color", "#000000")
            .with_style("padding", "16px")]);
        let patch = ElementPatch::new().content("new").style("padding", "8px");
        let next = update(&base, &id("a"), &patch);
        assert_eq!(next[0].content, "new");
        assert_eq!(next[0].style["padding"], "8px");
        assert_eq!(next[0].style["color"], "#000000");
        assert_eq!(base[0].style["padding"], "16px");
    }

    #[test]
    fn update_without_content_keeps_content() {
        let base = snap(vec![rec("a", None).with_content("keep")]);
        let next = update(&base, &id("a"), &ElementPatch::new().style("gap", "4px"));
        assert_eq!(next[0].content, "keep");
    }

    #[test]
    fn update_missing_or_noop_returns_same_snapshot() {
        let base = snap(vec![rec("a", None).with_style("gap", "4px")]);
        let patch = ElementPatch::new().style("gap", "4px");
        assert!(Arc::ptr_eq(&base, &update(&base, &id("a"), &patch)));
        assert!(Arc::ptr_eq(&base, &update(&base, &id("zz"), &ElementPatch::new().content("x"))));
        assert!(!patch.is_empty());
        assert!(ElementPatch::new().is_empty());
    }

    #[test]
    fn subtree_ids_of_missing_root_is_empty() {
        assert!(subtree_ids(&[rec("a", None)], &id("b")).is_empty());
    }
}
