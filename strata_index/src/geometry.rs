// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area-ordered geometry index: build, point hits, and containment.

use alloc::vec::Vec;
use hashbrown::HashSet;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use strata_tree::{Frame, LayerFlags, NodeId, TreeIndex};

/// Tolerance used by containment queries, in document units.
pub const DEFAULT_CONTAINMENT_EPSILON: f64 = 0.01;

/// Hit-test results, smallest area first.
pub type HitList = SmallVec<[NodeId; 8]>;

/// Which layers a [`GeometryIndex`] takes in, judged by their [`LayerFlags`].
///
/// A layer is indexed when it has every flag in `require` and none in
/// `reject`. The default takes every layer with a usable frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryFilter {
    /// Flags a layer must carry.
    pub require: LayerFlags,
    /// Flags that keep a layer out.
    pub reject: LayerFlags,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            require: LayerFlags::empty(),
            reject: LayerFlags::empty(),
        }
    }
}

impl QueryFilter {
    /// A filter that takes every layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave out layers with `visible: false`.
    pub fn visible(mut self) -> Self {
        self.require |= LayerFlags::VISIBLE;
        self
    }

    /// Leave out mask layers, which shape their siblings rather than draw.
    pub fn skip_masks(mut self) -> Self {
        self.reject |= LayerFlags::MASK;
        self
    }

    /// Whether a layer with `flags` passes.
    pub fn matches(&self, flags: LayerFlags) -> bool {
        flags.contains(self.require) && !flags.intersects(self.reject)
    }
}

/// One indexed layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeometryEntry {
    /// The layer.
    pub node: NodeId,
    /// Its resolved frame.
    pub frame: Frame,
    /// `frame.width * frame.height`, always finite and positive.
    pub area: f64,
}

/// Layers with a usable rectangle, sorted by ascending area.
///
/// The ordering is what makes a hit "most specific": among all layers under a
/// point, the smallest comes first. The index is a snapshot of one
/// [`TreeIndex`]; rebuild it whenever the tree, the exclusion set, or the filter
/// changes.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use serde_json::json;
/// use strata_index::GeometryIndex;
/// use strata_tree::TreeIndex;
///
/// let tree = TreeIndex::build(json!({
///     "artboard": {
///         "id": "outer",
///         "frame": { "left": 0, "top": 0, "width": 100, "height": 100 },
///         "layers": [{
///             "id": "inner",
///             "frame": { "left": 10, "top": 10, "width": 20, "height": 20 },
///         }],
///     },
/// }));
/// let geometry = GeometryIndex::build(&tree);
///
/// let hits: Vec<_> = geometry
///     .hit_test(Point::new(15.0, 15.0))
///     .iter()
///     .map(|&n| tree.id(n).unwrap())
///     .collect();
/// assert_eq!(hits, ["inner", "outer"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GeometryIndex {
    entries: Vec<GeometryEntry>,
}

impl GeometryIndex {
    /// Index every layer of `tree` that has a positive-area frame.
    pub fn build(tree: &TreeIndex) -> Self {
        Self::build_with(tree, &HashSet::new(), QueryFilter::default())
    }

    /// Index the layers of `tree`, skipping `excluded` and layers that do not
    /// match `filter`.
    ///
    /// Entries are kept only if their frame resolves and `width * height` is
    /// finite and strictly positive. Equal areas keep tree preorder.
    pub fn build_with(tree: &TreeIndex, excluded: &HashSet<NodeId>, filter: QueryFilter) -> Self {
        let mut entries: Vec<GeometryEntry> = tree
            .iter()
            .filter(|(id, _)| !excluded.contains(id))
            .filter(|(_, layer)| filter.matches(layer.flags()))
            .filter_map(|(node, layer)| {
                let frame = layer.resolve_frame()?;
                let area = frame.area();
                (area.is_finite() && area > 0.0).then_some(GeometryEntry { node, frame, area })
            })
            .collect();
        entries.sort_by(|a, b| a.area.total_cmp(&b.area));
        tracing::debug!(
            indexed = entries.len(),
            excluded = excluded.len(),
            nodes = tree.len(),
            "built geometry index"
        );
        Self { entries }
    }

    /// Indexed entries, smallest area first.
    pub fn entries(&self) -> &[GeometryEntry] {
        &self.entries
    }

    /// Number of indexed layers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no layer was indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a layer, if it was indexed.
    pub fn get(&self, node: NodeId) -> Option<&GeometryEntry> {
        self.entries.iter().find(|e| e.node == node)
    }

    /// Iterate layers whose frame contains `point`, smallest area first.
    ///
    /// Edges are inclusive: a point on the boundary hits.
    pub fn containing_point(&self, point: Point) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.frame.contains_point(point))
            .map(|e| e.node)
    }

    /// All layers under `point`, smallest area first. Empty if nothing matches.
    pub fn hit_test(&self, point: Point) -> HitList {
        self.containing_point(point).collect()
    }

    /// Iterate layers whose bounds lie within `outer`, up to `epsilon`.
    pub fn contained_in(&self, outer: Rect, epsilon: f64) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .filter(move |e| rect_contains(e.frame.bounds(), outer, epsilon))
            .map(|e| e.node)
    }

    /// The container and every indexed layer geometrically inside it.
    ///
    /// Uses [`DEFAULT_CONTAINMENT_EPSILON`]. Empty if the container's own frame
    /// does not resolve.
    pub fn select_contained(&self, tree: &TreeIndex, container: NodeId) -> HashSet<NodeId> {
        self.select_contained_with_epsilon(tree, container, DEFAULT_CONTAINMENT_EPSILON)
    }

    /// Like [`GeometryIndex::select_contained`] with an explicit tolerance.
    pub fn select_contained_with_epsilon(
        &self,
        tree: &TreeIndex,
        container: NodeId,
        epsilon: f64,
    ) -> HashSet<NodeId> {
        let Some(frame) = tree.frame(container) else {
            tracing::debug!(?container, "container has no frame; nothing selected");
            return HashSet::new();
        };
        let mut selected: HashSet<NodeId> = self.contained_in(frame.bounds(), epsilon).collect();
        selected.insert(container);
        selected
    }
}

/// Whether `inner` lies within `outer`, allowing `epsilon` slack on each edge.
///
/// Both rectangles are compared by their normalized bounding boxes.
///
/// ```rust
/// use kurbo::Rect;
/// use strata_index::{DEFAULT_CONTAINMENT_EPSILON, rect_contains};
///
/// let inner = Rect::new(10.0, 10.0, 15.0, 15.0);
/// assert!(rect_contains(inner, Rect::new(10.0, 10.0, 15.005, 15.005), DEFAULT_CONTAINMENT_EPSILON));
/// assert!(!rect_contains(inner, Rect::new(10.0, 10.0, 14.9, 14.9), DEFAULT_CONTAINMENT_EPSILON));
/// ```
pub fn rect_contains(inner: Rect, outer: Rect, epsilon: f64) -> bool {
    let inner = inner.abs();
    let outer = outer.abs();
    inner.x0 >= outer.x0 - epsilon
        && inner.y0 >= outer.y0 - epsilon
        && inner.x1 <= outer.x1 + epsilon
        && inner.y1 <= outer.y1 + epsilon
}
