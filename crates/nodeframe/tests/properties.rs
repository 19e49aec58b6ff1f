// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Randomized checks of the framework guarantees: archive round-trips,
// the showing gate, unknown placeholders, hidden bookkeeping fields,
// comparator antisymmetry and class ancestry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

use nodeframe::archive::{read_record, write_record};
use nodeframe::class::{root_class, ClassDescriptor, ClassRegistry};
use nodeframe::sort::{compare_by, sort_boxed};
use nodeframe::{ArchiveReader, ArchiveWriter, Node, NodeExt};
use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

const FIELDS: [&str; 4] = ["name", "kind", "count", "flag"];

fn registry() -> &'static ClassRegistry {
    static REGISTRY: OnceLock<ClassRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = ClassRegistry::new();
        registry
            .load_protos(
                r#"{"classes":[{"name":"Record","fields":[
                    {"name":"name","type":"text"},
                    {"name":"kind","type":"text"},
                    {"name":"count","type":"number"},
                    {"name":"flag","type":"bool"}
                ]}]}"#,
            )
            .expect("load protos");
        registry
    })
}

fn random_text(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..6);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

fn random_record(rng: &mut fastrand::Rng) -> Box<dyn Node> {
    let mut node = registry().create("Record").expect("create");
    node.set_value_by_name("name", &random_text(rng));
    node.set_value_by_name("kind", ["a", "b", "c"][rng.usize(0..3)]);
    node.set_value_by_name("count", &rng.u32(0..50).to_string());
    node.set_value_by_name("flag", if rng.bool() { "1" } else { "0" });
    node
}

#[test]
fn archive_round_trip_preserves_declared_fields() {
    let mut rng = fastrand::Rng::with_seed(0x5EED);
    for _ in 0..200 {
        let original = random_record(&mut rng);
        let mut writer = ArchiveWriter::new();
        write_record(original.as_ref(), &mut writer).expect("write");
        let bytes = writer.into_bytes();

        let mut copy = registry().create("Record").expect("create");
        read_record(copy.as_mut(), &mut ArchiveReader::new(&bytes)).expect("read");

        for field in FIELDS {
            assert_eq!(
                copy.get_value_by_name(field),
                original.get_value_by_name(field)
            );
        }
        assert_eq!(copy.base().schema, original.base().schema);
    }
}

#[test]
fn hidden_nodes_render_nothing() {
    let mut rng = fastrand::Rng::with_seed(7);
    let formats = ["", "{name}", "plain text", "{bogus}", "[{kind}]", "{", "report"];
    for _ in 0..50 {
        let mut node = random_record(&mut rng);
        node.set_showing(false);
        for fmt in formats {
            assert_eq!(node.to_formatted(fmt), "");
        }
    }
}

#[test]
fn unknown_fields_are_visible() {
    let node = random_record(&mut fastrand::Rng::with_seed(11));
    let mut rng = fastrand::Rng::with_seed(12);
    for _ in 0..100 {
        let name = format!("zz{}", random_text(&mut rng));
        assert_eq!(
            node.get_value_by_name(&name),
            format!("[{{{}}}]", name.to_uppercase())
        );
        let rendered = node.to_formatted(&format!("{{{}}}", name));
        assert!(rendered.contains(&name));
        assert!(rendered.contains("warning"));
    }
}

#[test]
fn bookkeeping_fields_hidden_but_readable() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..20 {
        let node = random_record(&mut rng);
        let canonical = node.canonical_json();
        assert!(!canonical.contains("schema"));
        assert!(!canonical.contains("deleted"));
        assert!(!node.get_value_by_name("schema").starts_with('['));
        assert_eq!(node.get_value_by_name("deleted"), "0");
    }
}

#[test]
fn comparator_is_antisymmetric_and_sort_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut nodes: Vec<Box<dyn Node>> = (0..60).map(|_| random_record(&mut rng)).collect();

    for a in &nodes {
        for b in &nodes {
            let forward = compare_by("kind", Some("name"), a.as_ref(), b.as_ref());
            let backward = compare_by("kind", Some("name"), b.as_ref(), a.as_ref());
            assert_eq!(forward, backward.reverse());
        }
    }

    sort_boxed(&mut nodes, "kind", Some("name"));
    for pair in nodes.windows(2) {
        assert_ne!(
            compare_by("kind", Some("name"), pair[0].as_ref(), pair[1].as_ref()),
            Ordering::Greater
        );
    }

    let once: Vec<String> = nodes.iter().map(|n| n.canonical_json()).collect();
    sort_boxed(&mut nodes, "kind", Some("name"));
    let twice: Vec<String> = nodes.iter().map(|n| n.canonical_json()).collect();
    assert_eq!(once, twice);
}

#[test]
fn sort_keeps_ties_in_input_order() {
    let mut rng = fastrand::Rng::with_seed(5);
    let mut nodes: Vec<Box<dyn Node>> = (0..40).map(|_| random_record(&mut rng)).collect();
    for (index, node) in nodes.iter_mut().enumerate() {
        node.set_value_by_name("count", &index.to_string());
    }

    sort_boxed(&mut nodes, "kind", None);
    for pair in nodes.windows(2) {
        if pair[0].get_value_by_name("kind") == pair[1].get_value_by_name("kind") {
            let first: usize = pair[0].get_value_by_name("count").parse().unwrap();
            let second: usize = pair[1].get_value_by_name("count").parse().unwrap();
            assert!(first < second);
        }
    }
}

#[test]
fn three_level_ancestry() {
    let grandparent = Arc::new(
        ClassDescriptor::proto("Grandparent", Some(root_class())).expect("grandparent"),
    );
    let parent =
        Arc::new(ClassDescriptor::proto("Parent", Some(grandparent.clone())).expect("parent"));
    let child = Arc::new(ClassDescriptor::proto("Child", Some(parent.clone())).expect("child"));

    assert!(child.is_derived_from(&grandparent));
    assert!(!grandparent.is_derived_from(&child));
    for class in [&grandparent, &parent, &child] {
        assert!(class.is_derived_from(class));
        assert!(class.is_derived_from(&root_class()));
    }
}
