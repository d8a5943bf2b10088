// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Export payloads: which layers go out, in what order, and how they are shaped.

use serde::Serialize;
use serde_json::{Map, Value};
use strata_index::GeometryIndex;
use strata_tree::{NodeId, TreeIndex};

use crate::error::Error;
use crate::shape::{compact, pick_export_fields, pick_export_fields_with_extra};

bitflags::bitflags! {
    /// Options controlling how exported records are shaped.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ExportFlags: u8 {
        /// Run [`compact`] over every record, dropping null and empty fields.
        const FILTER_EMPTY  = 0b0000_0001;
        /// Add the layer's unrecognized attributes under `extra`.
        const INCLUDE_EXTRA = 0b0000_0010;
    }
}

/// A serializable export of a set of layers.
///
/// Serializes as `{ "selectedId", "count", "parentById", "nodes" }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    /// The layer the export was requested for.
    pub selected_id: Option<String>,
    /// Number of records in `nodes`.
    pub count: usize,
    /// Parent id of every exported layer, `null` for the root, in the order
    /// the layers appear in `nodes`.
    pub parent_by_id: Map<String, Value>,
    /// One record per exported layer.
    pub nodes: Vec<Value>,
}

impl ExportPayload {
    /// Serialize to JSON text.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, Error> {
        let text = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        text.map_err(Error::Serialize)
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Serialize)
    }
}

/// Export `nodes` in the order given.
///
/// Unknown handles are skipped. `parentById` records each exported layer's
/// real parent, even when that parent is not part of the export.
pub fn export_nodes(
    tree: &TreeIndex,
    selected: Option<NodeId>,
    nodes: &[NodeId],
    flags: ExportFlags,
) -> ExportPayload {
    let mut parent_by_id = Map::new();
    let mut records = Vec::with_capacity(nodes.len());
    for &node in nodes {
        let Some(layer) = tree.node(node) else {
            continue;
        };
        let parent = match tree.parent_of(node).and_then(|p| tree.id(p)) {
            Some(parent) => Value::String(parent.into()),
            None => Value::Null,
        };
        parent_by_id.insert(layer.id.clone(), parent);

        let record = if flags.contains(ExportFlags::INCLUDE_EXTRA) {
            pick_export_fields_with_extra(layer)
        } else {
            pick_export_fields(layer)
        };
        let record = Value::Object(record);
        if flags.contains(ExportFlags::FILTER_EMPTY) {
            // A record always keeps its id, so it never compacts away entirely.
            records.extend(compact(record));
        } else {
            records.push(record);
        }
    }
    ExportPayload {
        selected_id: selected.and_then(|s| tree.id(s)).map(String::from),
        count: records.len(),
        parent_by_id,
        nodes: records,
    }
}

/// Export a layer and all its descendants, breadth-first with the layer first.
///
/// Returns `None` if `root` is not part of `tree`.
pub fn export_subtree(tree: &TreeIndex, root: NodeId, flags: ExportFlags) -> Option<ExportPayload> {
    if !tree.contains(root) {
        return None;
    }
    let nodes = tree.descendants(root, true);
    tracing::debug!(?root, count = nodes.len(), "exporting subtree");
    Some(export_nodes(tree, Some(root), &nodes, flags))
}

/// Export a container and every layer geometrically inside it, in tree
/// preorder.
///
/// Returns `None`, and exports nothing, if the container's frame does not
/// resolve.
pub fn export_contained(
    tree: &TreeIndex,
    geometry: &GeometryIndex,
    container: NodeId,
    epsilon: f64,
    flags: ExportFlags,
) -> Option<ExportPayload> {
    tree.frame(container)?;
    let selected = geometry.select_contained_with_epsilon(tree, container, epsilon);
    let nodes = tree.preorder_restricted(&selected);
    tracing::debug!(?container, count = nodes.len(), "exporting contained layers");
    Some(export_nodes(tree, Some(container), &nodes, flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_index::DEFAULT_CONTAINMENT_EPSILON;

    fn frame(l: f64, t: f64, w: f64, h: f64) -> Value {
        json!({ "left": l, "top": t, "width": w, "height": h })
    }

    #[test]
    fn subtree_export_end_to_end() {
        let tree = TreeIndex::build(json!({
            "artboard": {
                "id": "A",
                "layers": [{ "id": "B", "frame": frame(0.0, 0.0, 10.0, 10.0) }],
            },
        }));
        let a = tree.lookup("A").unwrap();
        let payload = export_subtree(&tree, a, ExportFlags::empty()).unwrap();
        assert_eq!(payload.selected_id.as_deref(), Some("A"));
        assert_eq!(payload.count, 2);
        let order: Vec<&Value> = payload.nodes.iter().map(|n| &n["id"]).collect();
        assert_eq!(order, [&json!("A"), &json!("B")]);
        assert_eq!(payload.parent_by_id["A"], Value::Null);
        assert_eq!(payload.parent_by_id["B"], json!("A"));
        assert_eq!(payload.nodes[0]["frame"], Value::Null);

        let value = payload.to_value().unwrap();
        assert_eq!(value["selectedId"], json!("A"));
        assert_eq!(value["count"], json!(2));
        assert_eq!(value["parentById"], json!({ "A": null, "B": "A" }));
    }

    #[test]
    fn filter_empty_compacts_records() {
        let tree = TreeIndex::build(json!({
            "artboard": { "id": "A", "name": "Board", "opacity": 1 },
        }));
        let a = tree.lookup("A").unwrap();
        let payload = export_subtree(&tree, a, ExportFlags::FILTER_EMPTY).unwrap();
        assert_eq!(payload.nodes, [json!({ "id": "A", "name": "Board", "opacity": 1 })]);
    }

    #[test]
    fn contained_export_uses_preorder() {
        let tree = TreeIndex::build(json!({
            "artboard": {
                "id": "board",
                "frame": frame(0.0, 0.0, 500.0, 500.0),
                "layers": [
                    {
                        "id": "group",
                        "frame": frame(0.0, 0.0, 100.0, 100.0),
                        "layers": [
                            { "id": "big", "frame": frame(10.0, 10.0, 80.0, 80.0) },
                            { "id": "small", "frame": frame(20.0, 20.0, 5.0, 5.0) },
                        ],
                    },
                    { "id": "sibling", "frame": frame(50.0, 50.0, 10.0, 10.0) },
                    { "id": "far", "frame": frame(300.0, 300.0, 10.0, 10.0) },
                ],
            },
        }));
        let geometry = GeometryIndex::build(&tree);
        let group = tree.lookup("group").unwrap();
        let payload = export_contained(
            &tree,
            &geometry,
            group,
            DEFAULT_CONTAINMENT_EPSILON,
            ExportFlags::empty(),
        )
        .unwrap();
        let order: Vec<&str> = payload.nodes.iter().map(|n| n["id"].as_str().unwrap()).collect();
        assert_eq!(order, ["group", "big", "small", "sibling"]);
        assert_eq!(payload.parent_by_id["sibling"], json!("board"));
    }

    #[test]
    fn contained_export_needs_a_container_frame() {
        let tree = TreeIndex::build(json!({
            "artboard": { "id": "A", "layers": [{ "id": "B", "frame": frame(0.0, 0.0, 1.0, 1.0) }] },
        }));
        let geometry = GeometryIndex::build(&tree);
        let a = tree.lookup("A").unwrap();
        assert!(export_contained(&tree, &geometry, a, 0.01, ExportFlags::empty()).is_none());
    }

    #[test]
    fn parents_follow_export_order() {
        let tree = TreeIndex::build(json!({
            "artboard": {
                "id": "z-root",
                "layers": [
                    { "id": "m", "layers": [{ "id": "a" }] },
                    { "id": "b" },
                ],
            },
        }));
        let root = tree.lookup("z-root").unwrap();
        let payload = export_subtree(&tree, root, ExportFlags::empty()).unwrap();
        let keys: Vec<&str> = payload.parent_by_id.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z-root", "m", "b", "a"]);

        let text = payload.to_json_string(false).unwrap();
        assert!(text.contains(r#""parentById":{"z-root":null,"m":"z-root","b":"z-root","a":"m"}"#));
    }

    #[test]
    fn include_extra_adds_side_channel() {
        let tree = TreeIndex::build(json!({
            "artboard": { "id": "A", "booleanOperation": "union" },
        }));
        let a = tree.lookup("A").unwrap();
        let payload = export_subtree(&tree, a, ExportFlags::INCLUDE_EXTRA).unwrap();
        assert_eq!(payload.nodes[0]["extra"], json!({ "booleanOperation": "union" }));
    }
}
