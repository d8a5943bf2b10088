// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record shaping: the fixed export schema and empty-field pruning.

use serde_json::{Map, Value};
use strata_tree::LayerNode;

/// Keys of an exported layer record, in output order.
pub const EXPORT_FIELDS: [&str; 19] = [
    "id",
    "name",
    "type",
    "frame",
    "realFrame",
    "combinedFrame",
    "transform",
    "opacity",
    "visible",
    "rotation",
    "clipped",
    "isMask",
    "origin",
    "radius",
    "style",
    "paths",
    "text",
    "image",
    "sharedStyle",
];

/// Key under which unrecognized attributes are exported on request.
pub const EXTRA_FIELD: &str = "extra";

/// Project a layer onto [`EXPORT_FIELDS`].
///
/// Every key is present in the result. Attributes the layer does not carry
/// are exported as `null`, so all records share one shape.
pub fn pick_export_fields(layer: &LayerNode) -> Map<String, Value> {
    let mut record = Map::with_capacity(EXPORT_FIELDS.len());
    record.insert("id".into(), Value::String(layer.id.clone()));
    for key in &EXPORT_FIELDS[1..] {
        let value = layer.attribute(key).cloned().unwrap_or(Value::Null);
        record.insert((*key).into(), value);
    }
    record
}

/// Like [`pick_export_fields`], plus the layer's unrecognized attributes
/// under [`EXTRA_FIELD`] (`null` when there are none).
pub fn pick_export_fields_with_extra(layer: &LayerNode) -> Map<String, Value> {
    let mut record = pick_export_fields(layer);
    let extra = if layer.extra.is_empty() {
        Value::Null
    } else {
        Value::Object(layer.extra.clone())
    };
    record.insert(EXTRA_FIELD.into(), extra);
    record
}

/// Strip `null`s and empty containers, bottom-up.
///
/// Arrays keep only the elements that survive; objects keep only the keys
/// whose values survive. A container left empty is removed in turn, and
/// `None` means the whole value compacted away. Other scalars, including
/// `false`, `0`, and `""`, are kept.
///
/// The walk uses an explicit stack, so nesting depth is bounded only by
/// memory.
///
/// ```
/// use serde_json::json;
/// use strata_export::compact;
///
/// let v = json!({ "a": null, "b": { "c": null }, "d": [1, null, 2] });
/// assert_eq!(compact(v), Some(json!({ "d": [1, 2] })));
/// ```
pub fn compact(value: Value) -> Option<Value> {
    let mut stack: Vec<Open> = Vec::new();
    let mut next = Some(value);
    loop {
        let mut settled = match next.take() {
            Some(Value::Null) => Some(None),
            Some(Value::Array(items)) => {
                stack.push(Open::Array {
                    rest: items.into_iter(),
                    kept: Vec::new(),
                });
                None
            }
            Some(Value::Object(map)) => {
                stack.push(Open::Object {
                    rest: map.into_iter(),
                    kept: Map::new(),
                    key: String::new(),
                });
                None
            }
            Some(scalar) => Some(Some(scalar)),
            None => None,
        };
        loop {
            let Some(top) = stack.last_mut() else {
                return settled.flatten();
            };
            if let Some(child) = settled.take() {
                top.keep(child);
            }
            if let Some(child) = top.next_child() {
                next = Some(child);
                break;
            }
            settled = stack.pop().map(Open::finish);
        }
    }
}

/// A container being compacted: its unvisited entries and what survived so far.
enum Open {
    Array {
        rest: std::vec::IntoIter<Value>,
        kept: Vec<Value>,
    },
    Object {
        rest: serde_json::map::IntoIter,
        kept: Map<String, Value>,
        /// Key of the entry currently being compacted.
        key: String,
    },
}

impl Open {
    fn next_child(&mut self) -> Option<Value> {
        match self {
            Self::Array { rest, .. } => rest.next(),
            Self::Object { rest, key, .. } => rest.next().map(|(k, v)| {
                *key = k;
                v
            }),
        }
    }

    fn keep(&mut self, child: Option<Value>) {
        let Some(child) = child else {
            return;
        };
        match self {
            Self::Array { kept, .. } => kept.push(child),
            Self::Object { kept, key, .. } => {
                kept.insert(core::mem::take(key), child);
            }
        }
    }

    fn finish(self) -> Option<Value> {
        match self {
            Self::Array { kept, .. } => (!kept.is_empty()).then_some(Value::Array(kept)),
            Self::Object { kept, .. } => (!kept.is_empty()).then_some(Value::Object(kept)),
        }
    }
}
