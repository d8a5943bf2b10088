// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction from a document, lookups, traversal.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::{vec, vec::Vec};
use hashbrown::{HashMap, HashSet};
use serde_json::Value;

use crate::layer::LayerNode;
use crate::types::{Frame, LayerFlags, NodeId};

/// Key holding the root layer in the source document.
pub const ROOT_KEY: &str = "artboard";

/// Immutable parent/child index over one layer document.
///
/// Built once per loaded document by [`TreeIndex::build`] and read-only
/// afterwards. To reload, build a fresh index and swap it in; there is no
/// incremental update.
///
/// ## Example
///
/// ```rust
/// use serde_json::json;
/// use strata_tree::TreeIndex;
///
/// let tree = TreeIndex::build(json!({
///     "artboard": {
///         "id": "A",
///         "layers": [{ "id": "B" }, { "id": "C" }],
///     },
/// }));
///
/// let a = tree.lookup("A").unwrap();
/// let children: Vec<_> = tree.children_of(a).iter().map(|&c| tree.id(c).unwrap()).collect();
/// assert_eq!(children, ["B", "C"]);
/// assert_eq!(tree.roots(), &[a]);
/// ```
#[derive(Clone, Default)]
pub struct TreeIndex {
    slots: Vec<Slot>,
    by_id: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl core::fmt::Debug for TreeIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeIndex")
            .field("nodes", &self.slots.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    layer: LayerNode,
    flags: LayerFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeIndex {
    /// An index with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from a document of the shape `{ "artboard": { ... } }`.
    ///
    /// The artboard is the only root. Nodes that are not objects or lack a
    /// non-empty string `id` are dropped together with their whole subtree. A
    /// node whose `id` is already registered is dropped the same way, which
    /// keeps the result a forest. A missing or unusable artboard yields an
    /// empty index; this never fails.
    ///
    /// The walk uses an explicit stack, so nesting depth is bounded only by
    /// memory.
    pub fn build(document: Value) -> Self {
        let mut tree = Self::empty();
        let artboard = match document {
            Value::Object(mut doc) => {
                let artboard = doc.remove(ROOT_KEY);
                discard(Value::Object(doc));
                artboard
            }
            other => {
                discard(other);
                None
            }
        };
        let Some(artboard) = artboard else {
            tracing::debug!("document has no artboard; built empty layer tree");
            return tree;
        };

        let mut dropped = 0_usize;
        let mut stack: Vec<(Value, Option<NodeId>)> = vec![(artboard, None)];
        while let Some((value, parent)) = stack.pop() {
            let obj = match value {
                Value::Object(obj) => obj,
                other => {
                    tracing::trace!(?parent, "skipping non-object layer");
                    dropped += 1;
                    discard(other);
                    continue;
                }
            };
            let (layer, children) = match LayerNode::from_object(obj) {
                Ok(parts) => parts,
                Err(obj) => {
                    tracing::trace!(?parent, "skipping layer without id");
                    dropped += 1;
                    discard(Value::Object(obj));
                    continue;
                }
            };
            if tree.by_id.contains_key(layer.id.as_str()) {
                tracing::warn!(id = %layer.id, "duplicate layer id; dropping its subtree");
                dropped += 1;
                discard(Value::Array(children));
                continue;
            }
            let id = tree.register(layer, parent);
            // Reversed so siblings pop in document order.
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        tracing::debug!(nodes = tree.len(), dropped, "built layer tree");
        tree
    }

    fn register(&mut self, layer: LayerNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.slots.len());
        self.by_id.insert(layer.id.clone(), id);
        self.slots.push(Slot {
            flags: layer.flags(),
            layer,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.slots[p.idx()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Number of nodes in the index.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index has no nodes.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Root nodes in document order. In practice this is just the artboard.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Find the handle for a layer identifier.
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Whether `id` refers to a node of this index.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.slots.len()
    }

    /// The layer identifier of a node.
    pub fn id(&self, id: NodeId) -> Option<&str> {
        self.slot(id).map(|s| s.layer.id.as_str())
    }

    /// The layer data of a node.
    pub fn node(&self, id: NodeId) -> Option<&LayerNode> {
        self.slot(id).map(|s| &s.layer)
    }

    /// The layer data for a layer identifier.
    pub fn node_by_id(&self, id: &str) -> Option<&LayerNode> {
        self.node(self.lookup(id)?)
    }

    /// The flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<LayerFlags> {
        self.slot(id).map(|s| s.flags)
    }

    /// The resolved frame of a node, if it has one.
    pub fn frame(&self, id: NodeId) -> Option<Frame> {
        self.node(id)?.resolve_frame()
    }

    /// Returns the parent of a node, or `None` for roots and unknown handles.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.parent
    }

    /// Children of a node in document order, or an empty slice for unknown handles.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.slot(id) {
            Some(s) => &s.children,
            None => &[],
        }
    }

    /// Iterate all nodes in preorder.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &LayerNode)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (NodeId::new(i), &s.layer))
    }

    /// Ancestors of a node, nearest first and root last.
    ///
    /// Empty for roots and unknown handles.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent_of(p);
        }
        out
    }

    /// Descendants of a node in breadth-first order.
    ///
    /// With `include_self` the node itself comes first. Each depth level is in
    /// document order. Empty for unknown handles.
    pub fn descendants(&self, id: NodeId, include_self: bool) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut out = Vec::new();
        if include_self {
            out.push(id);
        }
        let mut queue: VecDeque<NodeId> = self.children_of(id).iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            out.push(next);
            queue.extend(self.children_of(next).iter().copied());
        }
        out
    }

    /// Every node in depth-first, document-order preorder.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        self.walk_preorder(|id| out.push(id));
        out
    }

    /// The nodes of `included` in depth-first, document-order preorder.
    ///
    /// The whole tree is walked so that the output respects the hierarchy
    /// regardless of how `included` was assembled.
    pub fn preorder_restricted(&self, included: &HashSet<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(included.len());
        self.walk_preorder(|id| {
            if included.contains(&id) {
                out.push(id);
            }
        });
        out
    }

    fn walk_preorder<F: FnMut(NodeId)>(&self, mut f: F) {
        // Frames of (node, index of the next child to visit).
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        for &root in &self.roots {
            f(root);
            stack.push((root, 0));
            while let Some((node, next)) = stack.last_mut() {
                let children = self.children_of(*node);
                if let Some(&child) = children.get(*next) {
                    *next += 1;
                    f(child);
                    stack.push((child, 0));
                } else {
                    stack.pop();
                }
            }
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(id.idx())
    }
}

/// Free a JSON value without recursing.
///
/// Dropping a `Value` recurses once per nesting level, so subtrees the build
/// rejects are taken apart here instead.
fn discard(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}
