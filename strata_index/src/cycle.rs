// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeated-click selection cycling over stacked hits.
//!
//! A single click picks the most specific layer under the pointer. Clicking the
//! same spot again walks outward to the next larger enclosing layer, and so on.
//! "The same spot" means the same candidate list: [`HitCycle`] remembers the
//! last list it saw and restarts from the smallest candidate whenever it
//! changes.
//!
//! ```
//! use kurbo::Point;
//! use serde_json::json;
//! use strata_index::{GeometryIndex, HitCycle};
//! use strata_tree::TreeIndex;
//!
//! let tree = TreeIndex::build(json!({
//!     "artboard": {
//!         "id": "outer",
//!         "frame": { "left": 0, "top": 0, "width": 100, "height": 100 },
//!         "layers": [{
//!             "id": "inner",
//!             "frame": { "left": 10, "top": 10, "width": 20, "height": 20 },
//!         }],
//!     },
//! }));
//! let geometry = GeometryIndex::build(&tree);
//! let inner = tree.lookup("inner");
//! let outer = tree.lookup("outer");
//!
//! let mut cycle = HitCycle::new();
//! let hits = geometry.hit_test(Point::new(15.0, 15.0));
//! let first = cycle.advance(&hits, None);
//! assert_eq!(first, inner);
//! let second = cycle.advance(&hits, first);
//! assert_eq!(second, outer);
//! ```

use alloc::vec::Vec;
use strata_tree::NodeId;

/// Tracks the candidate list of the previous click.
#[derive(Clone, Debug, Default)]
pub struct HitCycle {
    /// Candidate list from the last click, in hit order.
    last: Option<Vec<NodeId>>,
}

impl HitCycle {
    /// Create a cycle with no click history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the selection for a click whose hits are `candidates`.
    ///
    /// - No candidates: history is cleared and `None` is returned.
    /// - Candidates differ from the previous click: the smallest wins.
    /// - Same candidates and `selected` sits at index `i` below the last: `i + 1`.
    /// - Same candidates otherwise (nothing selected, selection not among the
    ///   candidates, or already at the largest): back to the smallest.
    pub fn advance(&mut self, candidates: &[NodeId], selected: Option<NodeId>) -> Option<NodeId> {
        let Some(&smallest) = candidates.first() else {
            self.last = None;
            return None;
        };
        if self.last.as_deref() != Some(candidates) {
            self.last = Some(candidates.to_vec());
            return Some(smallest);
        }
        let position = selected.and_then(|s| candidates.iter().position(|&c| c == s));
        match position {
            Some(i) if i + 1 < candidates.len() => Some(candidates[i + 1]),
            _ => Some(smallest),
        }
    }

    /// Forget the previous click. The next click starts from the smallest hit.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Candidate list of the previous click, if any.
    pub fn last_candidates(&self) -> Option<&[NodeId]> {
        self.last.as_deref()
    }
}
