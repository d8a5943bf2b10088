// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Strata demos.

use serde_json::{Value, json};

/// A small card layout: an artboard with a card (icon, hidden label) and a badge.
pub fn sample_document() -> Value {
    json!({
        "artboard": {
            "id": "board",
            "name": "Home",
            "type": "artboard",
            "frame": { "left": 0, "top": 0, "width": 360, "height": 640 },
            "layers": [
                {
                    "id": "card",
                    "name": "Card",
                    "type": "shapeGroup",
                    "frame": { "left": 20, "top": 80, "width": 320, "height": 160 },
                    "style": { "fills": [{ "color": "#ffffff" }], "borders": [] },
                    "layers": [
                        {
                            "id": "icon",
                            "name": "Icon",
                            "type": "bitmap",
                            "frame": { "left": 36, "top": 96, "width": 48, "height": 48 },
                            "image": { "src": "icon.png" },
                        },
                        {
                            "id": "label",
                            "name": "Title",
                            "type": "text",
                            "visible": false,
                            "realFrame": { "left": 96, "top": 104, "width": 200, "height": 24 },
                            "text": { "value": "Hello" },
                        },
                    ],
                },
                {
                    "id": "badge",
                    "name": "Badge",
                    "type": "oval",
                    "combinedFrame": { "left": 300, "top": 60, "width": 40, "height": 40 },
                },
            ],
        },
    })
}
