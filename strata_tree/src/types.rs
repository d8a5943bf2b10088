// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layer tree: node handles, flags, and frames.

use kurbo::{Point, Rect};
use serde_json::Value;

/// Handle for a node in a [`TreeIndex`](crate::TreeIndex).
///
/// Handles are slots in the index that produced them. Rebuilding the index
/// from a new document hands out new handles; an old handle must not be used
/// against a different index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Rebuild a handle from its raw slot number.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw slot number of this handle.
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Flags derived from a layer's presentation attributes at build time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerFlags: u8 {
        /// Layer is visible (its `visible` attribute is not `false`).
        const VISIBLE = 0b0000_0001;
        /// Layer clips its content (`clipped` is `true`).
        const CLIPPED = 0b0000_0010;
        /// Layer is a mask (`isMask` is `true`).
        const MASK    = 0b0000_0100;
    }
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// A layer rectangle as it appears in the source document.
///
/// Width and height are kept as given; they may be zero or negative.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Frame {
    /// Create a frame from its four components.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Read a frame from a JSON object with `left`, `top`, `width`, `height`.
    ///
    /// Returns `None` unless all four fields are present and finite numbers.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| obj.get(key)?.as_f64().filter(|v| v.is_finite());
        Some(Self::new(
            field("left")?,
            field("top")?,
            field("width")?,
            field("height")?,
        ))
    }

    /// Signed area, `width * height`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge (`left + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the frame contains the point. Edges are inclusive.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.left <= point.x
            && point.x <= self.right()
            && self.top <= point.y
            && point.y <= self.bottom()
    }

    /// The normalized bounding box of this frame.
    ///
    /// Negative extents are flipped so that `x0 <= x1` and `y0 <= y1`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom()).abs()
    }
}

impl From<Frame> for Rect {
    fn from(frame: Frame) -> Self {
        frame.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_requires_all_four_fields() {
        let full = json!({ "left": 1, "top": 2, "width": 3.5, "height": 4 });
        assert_eq!(Frame::from_value(&full), Some(Frame::new(1.0, 2.0, 3.5, 4.0)));

        let partial = json!({ "left": 1, "top": 2, "width": 3 });
        assert_eq!(Frame::from_value(&partial), None);

        let stringly = json!({ "left": "1", "top": 2, "width": 3, "height": 4 });
        assert_eq!(Frame::from_value(&stringly), None);

        assert_eq!(Frame::from_value(&json!([0, 0, 1, 1])), None);
    }

    #[test]
    fn contains_point_is_edge_inclusive() {
        let f = Frame::new(10.0, 10.0, 20.0, 20.0);
        assert!(f.contains_point(Point::new(10.0, 10.0)));
        assert!(f.contains_point(Point::new(30.0, 30.0)));
        assert!(!f.contains_point(Point::new(30.01, 15.0)));
        assert!(!f.contains_point(Point::new(9.99, 15.0)));
    }

    #[test]
    fn bounds_normalize_negative_extents() {
        let f = Frame::new(10.0, 10.0, -5.0, 5.0);
        assert_eq!(f.bounds(), Rect::new(5.0, 10.0, 10.0, 15.0));
        assert!(f.area() < 0.0);
    }
}
