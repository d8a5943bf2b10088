// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Tree: a flat, query-friendly index over nested layer documents.
//!
//! Design tools export a document as an `artboard` whose `layers` nest
//! recursively. This crate turns that JSON into a [`TreeIndex`]: one slot per
//! layer, with parent, ordered children, and roots, addressed by [`NodeId`] or
//! by the layer's string identifier.
//!
//! - Construction is a single iterative top-down walk, so the result is always
//!   a forest and arbitrarily deep documents cannot exhaust the stack.
//! - Malformed input never fails. Layers without an identifier are dropped with
//!   their subtree; a missing artboard yields an empty index.
//! - Layers are exposed as [`LayerNode`]: a closed set of known attributes kept
//!   as opaque JSON plus an `extra` map for everything else.
//! - [`LayerNode::resolve_frame`] picks the layer's rectangle from `frame`,
//!   `realFrame`, or `combinedFrame`, in that order.
//!
//! ## API overview
//!
//! - [`TreeIndex::build`] → [`TreeIndex`]
//! - [`TreeIndex::lookup`] / [`TreeIndex::id`] convert between string ids and handles.
//! - [`TreeIndex::parent_of`] / [`TreeIndex::children_of`] / [`TreeIndex::roots`].
//! - [`TreeIndex::ancestors`]: nearest first, root last.
//! - [`TreeIndex::descendants`]: breadth-first, optionally including the node itself.
//! - [`TreeIndex::preorder_restricted`]: hierarchy order for an arbitrary subset.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use strata_tree::TreeIndex;
//!
//! let tree = TreeIndex::build(json!({
//!     "artboard": {
//!         "id": "A",
//!         "layers": [{ "id": "B", "layers": [{ "id": "C" }] }],
//!     },
//! }));
//!
//! let c = tree.lookup("C").unwrap();
//! let path: Vec<_> = tree.ancestors(c).iter().map(|&n| tree.id(n).unwrap()).collect();
//! assert_eq!(path, ["B", "A"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layer;
mod tree;
mod types;

pub use hashbrown::HashSet;
pub use layer::{CHILDREN_KEY, LayerNode};
pub use tree::{ROOT_KEY, TreeIndex};
pub use types::{Frame, LayerFlags, NodeId};
