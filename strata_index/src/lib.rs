// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Index: spatial queries over a layer tree.
//!
//! A [`GeometryIndex`] is derived from a [`strata_tree::TreeIndex`]. It keeps
//! every layer whose frame resolves to a finite, positive area, sorted from the
//! smallest to the largest area. That order is what "most specific" means
//! throughout this crate.
//!
//! - [`GeometryIndex::hit_test`]: every layer under a point, smallest first.
//! - [`HitCycle`]: repeated clicks on the same spot walk outward through the hits.
//! - [`rect_contains`]: bounding-box containment with a small tolerance.
//! - [`GeometryIndex::select_contained`]: a container plus everything inside it.
//!
//! Layers can be left out of the index with an exclusion set or a
//! [`QueryFilter`]; either change requires a rebuild, never an in-place edit.
//!
//! Frames are compared in document units. Coordinates are never transformed:
//! a layer's `transform` and `rotation` are carried through but not applied.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cycle;
mod geometry;

pub use cycle::HitCycle;
pub use geometry::{
    DEFAULT_CONTAINMENT_EPSILON, GeometryEntry, GeometryIndex, HitList, QueryFilter,
    rect_contains,
};
