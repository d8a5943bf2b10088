// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An inspection session: the loaded document, its indices, and the selection.

use std::io::Read;
use std::sync::Arc;

use hashbrown::HashSet;
use kurbo::Point;
use serde_json::Value;
use strata_index::{DEFAULT_CONTAINMENT_EPSILON, GeometryIndex, HitCycle, HitList, QueryFilter};
use strata_tree::{NodeId, TreeIndex};

use crate::error::Error;
use crate::payload::{ExportFlags, ExportPayload, export_contained, export_subtree};

/// Settings for an [`Inspector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InspectorConfig {
    /// Slack for containment queries, in document units.
    pub containment_epsilon: f64,
    /// Layers that do not match are left out of the geometry index.
    pub filter: QueryFilter,
    /// Shaping applied to every export.
    pub export_flags: ExportFlags,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            containment_epsilon: DEFAULT_CONTAINMENT_EPSILON,
            filter: QueryFilter::new(),
            export_flags: ExportFlags::empty(),
        }
    }
}

/// An immutable view of one loaded document and its geometry.
///
/// Cloning is cheap. A snapshot handed to a reader stays valid and unchanged
/// while the [`Inspector`] moves on to a new document or a new hidden set.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    tree: Arc<TreeIndex>,
    geometry: Arc<GeometryIndex>,
}

impl Snapshot {
    /// The layer tree.
    pub fn tree(&self) -> &TreeIndex {
        &self.tree
    }

    /// The geometry index derived from [`Snapshot::tree`].
    pub fn geometry(&self) -> &GeometryIndex {
        &self.geometry
    }
}

/// A session over one layer document at a time.
///
/// Every change to the document or to the hidden set builds new indices and
/// swaps them in; nothing is patched in place. The selection survives a change
/// of the hidden set but not a reload.
///
/// ```
/// use kurbo::Point;
/// use serde_json::json;
/// use strata_export::Inspector;
///
/// let mut inspector = Inspector::default();
/// inspector.load(json!({
///     "artboard": {
///         "id": "outer",
///         "frame": { "left": 0, "top": 0, "width": 100, "height": 100 },
///         "layers": [{
///             "id": "inner",
///             "frame": { "left": 10, "top": 10, "width": 20, "height": 20 },
///         }],
///     },
/// }));
///
/// let p = Point::new(15.0, 15.0);
/// inspector.click(p);
/// assert_eq!(inspector.selected_id(), Some("inner"));
/// inspector.click(p);
/// assert_eq!(inspector.selected_id(), Some("outer"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Inspector {
    config: InspectorConfig,
    snapshot: Snapshot,
    hidden: HashSet<NodeId>,
    selected: Option<NodeId>,
    cycle: HitCycle,
}

impl Inspector {
    /// Create an empty session with the given settings.
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active settings.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Replace the settings and rebuild the geometry index.
    pub fn set_config(&mut self, config: InspectorConfig) {
        self.config = config;
        self.rebuild_geometry();
    }

    /// Load a document, replacing whatever was loaded before.
    ///
    /// The hidden set, the selection, and the click history are cleared.
    pub fn load(&mut self, document: Value) {
        let tree = Arc::new(TreeIndex::build(document));
        self.hidden.clear();
        let geometry = Arc::new(GeometryIndex::build_with(
            &tree,
            &self.hidden,
            self.config.filter,
        ));
        tracing::debug!(
            nodes = tree.len(),
            indexed = geometry.len(),
            "loaded layer document"
        );
        self.snapshot = Snapshot { tree, geometry };
        self.selected = None;
        self.cycle.reset();
    }

    /// Parse JSON text and [`load`](Self::load) it.
    ///
    /// On error the previous document stays loaded.
    pub fn load_str(&mut self, text: &str) -> Result<(), Error> {
        let document: Value = serde_json::from_str(text).map_err(Error::Parse)?;
        self.load(document);
        Ok(())
    }

    /// Read JSON from `reader` and [`load`](Self::load) it.
    ///
    /// On error the previous document stays loaded.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        let document: Value = serde_json::from_reader(reader).map_err(Error::Parse)?;
        self.load(document);
        Ok(())
    }

    /// Drop the loaded document.
    pub fn clear(&mut self) {
        self.snapshot = Snapshot::default();
        self.hidden.clear();
        self.selected = None;
        self.cycle.reset();
    }

    /// The current document and geometry.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// Layers currently hidden from hit testing and containment.
    pub fn hidden(&self) -> &HashSet<NodeId> {
        &self.hidden
    }

    /// Replace the hidden set and rebuild the geometry index.
    ///
    /// Handles that are not part of the loaded tree are ignored.
    pub fn set_hidden(&mut self, hidden: impl IntoIterator<Item = NodeId>) {
        let tree = &self.snapshot.tree;
        self.hidden = hidden.into_iter().filter(|&n| tree.contains(n)).collect();
        self.rebuild_geometry();
    }

    fn rebuild_geometry(&mut self) {
        let geometry =
            GeometryIndex::build_with(&self.snapshot.tree, &self.hidden, self.config.filter);
        self.snapshot = Snapshot {
            tree: Arc::clone(&self.snapshot.tree),
            geometry: Arc::new(geometry),
        };
        self.cycle.reset();
    }

    /// Layers under `point`, smallest first.
    pub fn hits(&self, point: Point) -> HitList {
        self.snapshot.geometry.hit_test(point)
    }

    /// Handle a click at `point` and return the new selection.
    ///
    /// The first click on a spot selects the smallest layer under it; clicking
    /// the same spot again selects the next larger one. Clicking where there is
    /// nothing clears the selection.
    pub fn click(&mut self, point: Point) -> Option<NodeId> {
        let hits = self.hits(point);
        self.selected = self.cycle.advance(&hits, self.selected);
        tracing::trace!(?point, hits = hits.len(), selected = ?self.selected, "click");
        self.selected
    }

    /// Select a layer directly, e.g. from a layer list.
    ///
    /// Handles that are not part of the loaded tree clear the selection.
    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node.filter(|&n| self.snapshot.tree.contains(n));
    }

    /// Select a layer by its identifier. Returns the handle if it exists.
    pub fn select_id(&mut self, id: &str) -> Option<NodeId> {
        self.selected = self.snapshot.tree.lookup(id);
        self.selected
    }

    /// The selected layer.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Identifier of the selected layer.
    pub fn selected_id(&self) -> Option<&str> {
        self.snapshot.tree.id(self.selected?)
    }

    /// Ancestors of the selection, nearest first.
    pub fn selection_ancestors(&self) -> Vec<NodeId> {
        self.selected
            .map(|s| self.snapshot.tree.ancestors(s))
            .unwrap_or_default()
    }

    /// Export the selected layer and its descendants.
    pub fn export_selected(&self) -> Option<ExportPayload> {
        export_subtree(&self.snapshot.tree, self.selected?, self.config.export_flags)
    }

    /// Export the selected layer and every layer inside its frame.
    ///
    /// `None` if nothing is selected or the selection has no frame.
    pub fn export_contained_in_selection(&self) -> Option<ExportPayload> {
        export_contained(
            &self.snapshot.tree,
            &self.snapshot.geometry,
            self.selected?,
            self.config.containment_epsilon,
            self.config.export_flags,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"{
        "artboard": {
            "id": "board",
            "frame": { "left": 0, "top": 0, "width": 200, "height": 200 },
            "layers": [
                {
                    "id": "card",
                    "frame": { "left": 20, "top": 20, "width": 100, "height": 100 },
                    "layers": [
                        { "id": "icon", "frame": { "left": 30, "top": 30, "width": 10, "height": 10 } },
                        { "id": "label", "visible": false, "frame": { "left": 30, "top": 50, "width": 60, "height": 10 } }
                    ]
                },
                { "id": "badge", "frame": { "left": 150, "top": 150, "width": 20, "height": 20 } }
            ]
        }
    }"#;

    fn loaded(config: InspectorConfig) -> Inspector {
        let mut inspector = Inspector::new(config);
        inspector.load_str(DOC).unwrap();
        inspector
    }

    #[test]
    fn clicks_expand_then_reset_elsewhere() {
        let mut inspector = loaded(InspectorConfig::default());
        let icon_spot = Point::new(35.0, 35.0);
        inspector.click(icon_spot);
        assert_eq!(inspector.selected_id(), Some("icon"));
        inspector.click(icon_spot);
        assert_eq!(inspector.selected_id(), Some("card"));
        inspector.click(icon_spot);
        assert_eq!(inspector.selected_id(), Some("board"));

        inspector.click(Point::new(160.0, 160.0));
        assert_eq!(inspector.selected_id(), Some("badge"));

        inspector.click(Point::new(500.0, 500.0));
        assert_eq!(inspector.selected(), None);
    }

    #[test]
    fn hidden_layers_are_not_hit() {
        let mut inspector = loaded(InspectorConfig::default());
        let card = inspector.snapshot().tree().lookup("card").unwrap();
        let before = inspector.snapshot();
        inspector.set_hidden([card]);
        inspector.click(Point::new(60.0, 80.0));
        assert_eq!(inspector.selected_id(), Some("board"));
        // Earlier snapshots are untouched by the rebuild.
        assert_eq!(before.geometry().len(), 5);
        assert_eq!(inspector.snapshot().geometry().len(), 4);
    }

    #[test]
    fn visibility_filter_skips_invisible_layers() {
        let config = InspectorConfig {
            filter: QueryFilter::new().visible(),
            ..InspectorConfig::default()
        };
        let mut inspector = loaded(config);
        inspector.click(Point::new(60.0, 55.0));
        assert_eq!(inspector.selected_id(), Some("card"));
    }

    #[test]
    fn exports_follow_the_selection() {
        let mut inspector = loaded(InspectorConfig {
            export_flags: ExportFlags::FILTER_EMPTY,
            ..InspectorConfig::default()
        });
        assert!(inspector.export_selected().is_none());

        inspector.select_id("card");
        let subtree = inspector.export_selected().unwrap();
        assert_eq!(subtree.count, 3);
        assert_eq!(subtree.nodes[0]["id"], json!("card"));
        assert!(subtree.nodes[0].get("name").is_none());

        inspector.select_id("board");
        let contained = inspector.export_contained_in_selection().unwrap();
        assert_eq!(contained.count, 5);
        assert!(inspector.selection_ancestors().is_empty());

        inspector.select_id("icon");
        assert_eq!(inspector.selection_ancestors().len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_document() {
        let mut inspector = loaded(InspectorConfig::default());
        assert!(matches!(inspector.load_str("{ not json"), Err(Error::Parse(_))));
        assert_eq!(inspector.snapshot().tree().len(), 5);
    }

    #[test]
    fn reload_clears_selection() {
        let mut inspector = loaded(InspectorConfig::default());
        inspector.select_id("badge");
        inspector
            .load_reader(r#"{ "artboard": { "id": "solo" } }"#.as_bytes())
            .unwrap();
        assert_eq!(inspector.selected(), None);
        assert!(inspector.hidden().is_empty());
        assert_eq!(inspector.snapshot().tree().len(), 1);

        inspector.clear();
        assert!(inspector.snapshot().tree().is_empty());
    }
}
