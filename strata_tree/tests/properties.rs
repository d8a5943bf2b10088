// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural properties of trees built from arbitrary documents.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use strata_tree::{NodeId, TreeIndex};

/// A layer that may lack an id, may reuse an id, or may not be an object at all.
fn layer() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        8 => prop::option::of(0_u32..24).prop_map(|id| object(id, Vec::new())),
        1 => Just(Value::Null),
        1 => Just(json!("not a layer")),
    ];
    leaf.prop_recursive(5, 96, 6, |inner| {
        (
            prop::option::weighted(0.9, 0_u32..24),
            prop::collection::vec(inner, 0..6),
        )
            .prop_map(|(id, layers)| object(id, layers))
    })
}

fn object(id: Option<u32>, layers: Vec<Value>) -> Value {
    let mut m = Map::new();
    if let Some(id) = id {
        m.insert("id".into(), Value::String(format!("n{id}")));
    }
    if !layers.is_empty() {
        m.insert("layers".into(), Value::Array(layers));
    }
    Value::Object(m)
}

fn document() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(json!({})),
        9 => layer().prop_map(|artboard| json!({ "artboard": artboard })),
    ]
}

proptest! {
    #[test]
    fn children_and_parents_are_consistent(doc in document()) {
        let tree = TreeIndex::build(doc);
        for (id, _) in tree.iter() {
            for &child in tree.children_of(id) {
                prop_assert!(tree.contains(child));
                prop_assert_eq!(tree.parent_of(child), Some(id));
            }
            if let Some(parent) = tree.parent_of(id) {
                prop_assert!(tree.children_of(parent).contains(&id));
            } else {
                prop_assert!(tree.roots().contains(&id));
            }
        }
        prop_assert!(tree.roots().len() <= 1);
    }

    #[test]
    fn no_node_is_its_own_ancestor(doc in document()) {
        let tree = TreeIndex::build(doc);
        for (id, _) in tree.iter() {
            let ancestors = tree.ancestors(id);
            prop_assert!(!ancestors.contains(&id));
            prop_assert!(ancestors.len() < tree.len());
        }
    }

    #[test]
    fn ancestors_reconstruct_root_path(doc in document()) {
        let tree = TreeIndex::build(doc);
        for (id, _) in tree.iter() {
            let mut path = tree.ancestors(id);
            path.reverse();
            path.push(id);
            prop_assert_eq!(tree.roots().first(), path.first());
            for pair in path.windows(2) {
                prop_assert_eq!(tree.parent_of(pair[1]), Some(pair[0]));
            }
        }
    }

    #[test]
    fn descendants_self_inclusion(doc in document()) {
        let tree = TreeIndex::build(doc);
        for (id, _) in tree.iter() {
            let with_self = tree.descendants(id, true);
            let without = tree.descendants(id, false);
            prop_assert_eq!(with_self.first(), Some(&id));
            prop_assert!(!without.contains(&id));
            prop_assert_eq!(&with_self[1..], &without[..]);
        }
    }

    #[test]
    fn preorder_visits_every_node_once(doc in document()) {
        let tree = TreeIndex::build(doc);
        let order = tree.preorder();
        prop_assert_eq!(order.len(), tree.len());
        let all: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
        prop_assert_eq!(order, all);
    }

    #[test]
    fn ids_are_unique(doc in document()) {
        let tree = TreeIndex::build(doc);
        for (id, layer) in tree.iter() {
            prop_assert_eq!(tree.lookup(&layer.id), Some(id));
        }
    }
}
