// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load a layer document, click around, and export the selection.
//!
//! Reads the JSON file given as the first argument, or a built-in sample.
//! The optional second and third arguments are the click position.
//!
//! Run:
//! - `cargo run -p strata_demos --example inspect_layers -- path/to/document.json 50 120`

use std::fs::File;
use std::io::BufReader;

use kurbo::Point;
use strata_export::{ExportFlags, Inspector, InspectorConfig};
use strata_index::QueryFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next();
    let x = args.next().map(|v| v.parse::<f64>()).transpose()?.unwrap_or(50.0);
    let y = args.next().map(|v| v.parse::<f64>()).transpose()?.unwrap_or(120.0);

    let mut inspector = Inspector::new(InspectorConfig {
        filter: QueryFilter::new().visible(),
        export_flags: ExportFlags::FILTER_EMPTY,
        ..InspectorConfig::default()
    });
    match path {
        Some(path) => inspector.load_reader(BufReader::new(File::open(path)?))?,
        None => inspector.load(strata_demos::sample_document()),
    }

    let snapshot = inspector.snapshot();
    let tree = snapshot.tree();
    println!(
        "{} layers, {} with geometry",
        tree.len(),
        snapshot.geometry().len()
    );

    let point = Point::new(x, y);
    let hits: Vec<&str> = inspector
        .hits(point)
        .iter()
        .filter_map(|&n| tree.id(n))
        .collect();
    println!("hits at ({x}, {y}), smallest first: {hits:?}");

    // Each click on the same spot selects the next enclosing layer.
    for _ in 0..hits.len() {
        inspector.click(point);
        let path: Vec<&str> = inspector
            .selection_ancestors()
            .iter()
            .filter_map(|&n| tree.id(n))
            .collect();
        println!(
            "selected {:?} (ancestors {path:?})",
            inspector.selected_id().unwrap_or("-")
        );
    }

    if let Some(payload) = inspector.export_contained_in_selection() {
        println!("{}", payload.to_json_string(true)?);
    } else {
        println!("selection has no frame; nothing to export");
    }
    Ok(())
}
