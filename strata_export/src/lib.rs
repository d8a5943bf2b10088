// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Export: fixed-schema JSON export of layer selections, and an
//! inspector session tying tree, geometry, and selection together.
//!
//! ## Export shape
//!
//! An [`ExportPayload`] serializes as
//!
//! ```json
//! { "selectedId": "...", "count": 2, "parentById": { "A": null, "B": "A" }, "nodes": [ ... ] }
//! ```
//!
//! Each record in `nodes` carries exactly the keys of [`EXPORT_FIELDS`], with
//! `null` for attributes the layer lacks. [`ExportFlags::FILTER_EMPTY`] runs
//! [`compact`] over every record to drop those nulls and any empty containers.
//!
//! - [`export_subtree`]: a layer and its descendants, breadth-first.
//! - [`export_contained`]: a layer and everything inside its frame, in tree preorder.
//! - [`export_nodes`]: any list of layers, in the order given.
//!
//! ## Sessions
//!
//! [`Inspector`] owns the loaded document as a [`Snapshot`] and replaces it
//! wholesale on reload or when the hidden set changes. Readers holding an
//! older snapshot keep a consistent view.
//!
//! ```rust
//! use serde_json::json;
//! use strata_export::{ExportFlags, export_subtree};
//! use strata_tree::TreeIndex;
//!
//! let tree = TreeIndex::build(json!({
//!     "artboard": {
//!         "id": "A",
//!         "layers": [{ "id": "B", "frame": { "left": 0, "top": 0, "width": 10, "height": 10 } }],
//!     },
//! }));
//! let payload = export_subtree(&tree, tree.lookup("A").unwrap(), ExportFlags::FILTER_EMPTY).unwrap();
//! assert_eq!(payload.count, 2);
//! assert_eq!(payload.nodes[1], json!({
//!     "id": "B",
//!     "frame": { "left": 0, "top": 0, "width": 10, "height": 10 },
//! }));
//! ```

mod error;
mod inspector;
mod payload;
mod shape;

pub use error::Error;
pub use inspector::{Inspector, InspectorConfig, Snapshot};
pub use payload::{ExportFlags, ExportPayload, export_contained, export_nodes, export_subtree};
pub use shape::{EXPORT_FIELDS, EXTRA_FIELD, compact, pick_export_fields, pick_export_fields_with_extra};
