// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversion between the flat record collection and a rooted forest.

use std::collections::HashMap;

use crate::ident::ElementId;
use crate::record::ElementRecord;

/// A record together with its ordered children.
///
/// Derived on every read and owned by whoever asked for it. Cloning,
/// comparing and dropping walk the tree with an explicit stack, so arbitrarily
/// deep chains are fine.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyNode {
    /// The wrapped record.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub record: ElementRecord,
    /// Children in flat-collection order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Leaf node wrapping `record`.
    pub fn new(record: ElementRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    /// Build a tree from any tree-shaped source, bottom-up and without
    /// recursion.
    ///
    /// `children_of` lists a source node's children in order; `record_of`
    /// produces the record for a source node.
    pub fn from_tree<N, I>(
        root: N,
        mut children_of: impl FnMut(N) -> I,
        mut record_of: impl FnMut(N) -> ElementRecord,
    ) -> Self
    where
        N: Copy,
        I: IntoIterator<Item = N>,
    {
        // Pre-order with child counts; the root's own slot is handled last.
        let mut order: Vec<(N, usize)> = Vec::new();
        let mut pending = vec![root];
        while let Some(at) = pending.pop() {
            let kids: Vec<N> = children_of(at).into_iter().collect();
            order.push((at, kids.len()));
            pending.extend(kids.into_iter().rev());
        }

        // Reverse pre-order: every subtree is finished before its parent and
        // leaves exactly one node on `built`, last child on the bottom.
        let mut built: Vec<Self> = Vec::new();
        for &(at, count) in order.iter().skip(1).rev() {
            let mut children = built.split_off(built.len().saturating_sub(count));
            children.reverse();
            built.push(Self {
                record: record_of(at),
                children,
            });
        }
        built.reverse();
        Self {
            record: record_of(root),
            children: built,
        }
    }

    /// Append a child (builder style).
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Id of the wrapped record.
    pub fn id(&self) -> &ElementId {
        &self.record.id
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of descendants, not counting `self`.
    pub fn descendant_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// First node (pre-order) with the given id.
    pub fn find(&self, id: &ElementId) -> Option<&Self> {
        self.iter().find(|node| node.id() == id)
    }
}

impl Clone for HierarchyNode {
    fn clone(&self) -> Self {
        Self::from_tree(self, |node| &node.children, |node| node.record.clone())
    }
}

impl PartialEq for HierarchyNode {
    fn eq(&self, other: &Self) -> bool {
        fn shape(node: &HierarchyNode) -> (&ElementRecord, usize) {
            (&node.record, node.children.len())
        }
        self.iter().map(shape).eq(other.iter().map(shape))
    }
}

impl Eq for HierarchyNode {}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Depth-first pre-order traversal, see [`HierarchyNode::iter`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Rebuild the forest described by `records`.
///
/// Sibling order follows the order of `records`. A `parent_id` that does not
/// resolve turns the record into a root. Records caught in a parent cycle are
/// unreachable from any root and are left out; [`crate::check_invariants`]
/// reports that case.
pub fn build(records: &[ElementRecord]) -> Vec<HierarchyNode> {
    let mut index: HashMap<&ElementId, usize> = HashMap::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        index.entry(&rec.id).or_insert(i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        match rec.parent_id.as_ref().and_then(|p| index.get(p)) {
            Some(&parent) if parent != i => children[parent].push(i),
            _ => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|root| {
            HierarchyNode::from_tree(
                root,
                |at| children[at].iter().copied(),
                |at| records[at].clone(),
            )
        })
        .collect()
}

/// Flatten a forest back into records, depth-first pre-order.
///
/// Each emitted record's `parent_id` is its traversal parent (`None` for the
/// given roots), whatever the node carried before.
pub fn flatten(roots: &[HierarchyNode]) -> Vec<ElementRecord> {
    let mut out = Vec::new();
    let mut stack: Vec<(&HierarchyNode, Option<&ElementId>)> =
        roots.iter().rev().map(|node| (node, None)).collect();
    while let Some((node, parent)) = stack.pop() {
        let mut record = node.record.clone();
        record.parent_id = parent.cloned();
        out.push(record);
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, Some(node.id()))),
        );
    }
    out
}
