// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed view of a single layer from the source document.

use alloc::string::String;
use alloc::vec::Vec;
use serde_json::{Map, Value};

use crate::types::{Frame, LayerFlags};

/// Key holding a layer's children in the source document.
pub const CHILDREN_KEY: &str = "layers";

/// A layer node, detached from its children.
///
/// The named fields cover every attribute the export schema knows about. They
/// are carried as opaque JSON and never interpreted, except for the three frame
/// variants (see [`LayerNode::resolve_frame`]) and the flag-bearing
/// `visible`/`clipped`/`isMask`. Any other key lands in [`LayerNode::extra`]
/// untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerNode {
    /// Identifier. Never empty.
    pub id: String,
    /// `name`
    pub name: Option<Value>,
    /// `type`
    pub kind: Option<Value>,
    /// `frame`
    pub frame: Option<Value>,
    /// `realFrame`
    pub real_frame: Option<Value>,
    /// `combinedFrame`
    pub combined_frame: Option<Value>,
    /// `transform`
    pub transform: Option<Value>,
    /// `opacity`
    pub opacity: Option<Value>,
    /// `visible`
    pub visible: Option<Value>,
    /// `rotation`
    pub rotation: Option<Value>,
    /// `clipped`
    pub clipped: Option<Value>,
    /// `isMask`
    pub is_mask: Option<Value>,
    /// `origin`
    pub origin: Option<Value>,
    /// `radius`
    pub radius: Option<Value>,
    /// `style`
    pub style: Option<Value>,
    /// `paths`
    pub paths: Option<Value>,
    /// `text`
    pub text: Option<Value>,
    /// `image`
    pub image: Option<Value>,
    /// `sharedStyle`
    pub shared_style: Option<Value>,
    /// Every other key of the source object, except `layers`.
    pub extra: Map<String, Value>,
}

impl LayerNode {
    /// Create a bare layer with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Split a source object into a layer and its raw children.
    ///
    /// Hands the object back untouched when it has no usable identifier (a
    /// non-empty string `id`), so the caller decides how to dispose of it. A
    /// missing or non-array `layers` yields no children.
    pub fn from_object(
        mut obj: Map<String, Value>,
    ) -> Result<(Self, Vec<Value>), Map<String, Value>> {
        let id = match obj.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => return Err(obj),
        };
        obj.remove("id");
        let children = match obj.remove(CHILDREN_KEY) {
            Some(Value::Array(children)) => children,
            _ => Vec::new(),
        };
        let mut take = |key: &str| obj.remove(key).filter(|v| !v.is_null());
        let layer = Self {
            id,
            name: take("name"),
            kind: take("type"),
            frame: take("frame"),
            real_frame: take("realFrame"),
            combined_frame: take("combinedFrame"),
            transform: take("transform"),
            opacity: take("opacity"),
            visible: take("visible"),
            rotation: take("rotation"),
            clipped: take("clipped"),
            is_mask: take("isMask"),
            origin: take("origin"),
            radius: take("radius"),
            style: take("style"),
            paths: take("paths"),
            text: take("text"),
            image: take("image"),
            shared_style: take("sharedStyle"),
            extra: Map::new(),
        };
        Ok((
            Self {
                extra: obj,
                ..layer
            },
            children,
        ))
    }

    /// Look up an attribute by its source key (`"realFrame"`, `"isMask"`, ...).
    ///
    /// Known keys map to the named fields; anything else is looked up in
    /// [`LayerNode::extra`]. `id` is not an attribute, use [`LayerNode::id`].
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        let field = match key {
            "name" => &self.name,
            "type" => &self.kind,
            "frame" => &self.frame,
            "realFrame" => &self.real_frame,
            "combinedFrame" => &self.combined_frame,
            "transform" => &self.transform,
            "opacity" => &self.opacity,
            "visible" => &self.visible,
            "rotation" => &self.rotation,
            "clipped" => &self.clipped,
            "isMask" => &self.is_mask,
            "origin" => &self.origin,
            "radius" => &self.radius,
            "style" => &self.style,
            "paths" => &self.paths,
            "text" => &self.text,
            "image" => &self.image,
            "sharedStyle" => &self.shared_style,
            _ => return self.extra.get(key),
        };
        field.as_ref()
    }

    /// The layer name, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    /// The layer type tag, if it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_ref().and_then(Value::as_str)
    }

    /// Resolve the layer's rectangle.
    ///
    /// `frame`, `realFrame`, and `combinedFrame` are checked in that order and
    /// the first one present is used. If that candidate is malformed the
    /// resolution fails; later candidates are not consulted.
    pub fn resolve_frame(&self) -> Option<Frame> {
        let candidate = self
            .frame
            .as_ref()
            .or(self.real_frame.as_ref())
            .or(self.combined_frame.as_ref())?;
        Frame::from_value(candidate)
    }

    /// Flags derived from `visible`, `clipped`, and `isMask`.
    pub fn flags(&self) -> LayerFlags {
        let mut flags = LayerFlags::empty();
        if !matches!(self.visible, Some(Value::Bool(false))) {
            flags |= LayerFlags::VISIBLE;
        }
        if matches!(self.clipped, Some(Value::Bool(true))) {
            flags |= LayerFlags::CLIPPED;
        }
        if matches!(self.is_mask, Some(Value::Bool(true))) {
            flags |= LayerFlags::MASK;
        }
        flags
    }
}
