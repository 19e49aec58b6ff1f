// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Ledger archives: mixed transactions, votes and parameters written to a
// file, read back through the global registry, sorted and rendered.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::missing_panics_doc)]

use nodeframe::archive::{load_nodes, save_nodes};
use nodeframe::node::{downcast_ref, finish_parse_chain};
use nodeframe::sort::{compare_by, sort_boxed};
use nodeframe::{ClassRegistry, Node, NodeExt};
use nodeframe_ledger::calldata::{encode_address, encode_word};
use nodeframe_ledger::{register_classes, Parameter, Transaction, Vote};
use std::cmp::Ordering;

const CURATOR: &str = "0xda4a4626d3e16e094de3225a751aab7128e96526";

fn random_transaction(rng: &mut fastrand::Rng) -> Transaction {
    let mut tx = Transaction::new();
    tx.hash = format!("0x{:016x}", rng.u64(..));
    tx.block_number = 1_500_000 + rng.u64(..10_000);
    tx.time_stamp = 1_464_000_000 + rng.u64(..1_000_000);
    tx.from = format!("0x{:040x}", rng.u128(..) >> 1);
    tx.to = CURATOR.to_string();
    tx.value = rng.u64(..).to_string();
    tx.gas = 21_000 + rng.u64(..100_000);
    tx.gas_used = if rng.bool() { tx.gas } else { 21_000 };
    tx.gas_price = 20_000_000_000;
    tx.nonce = rng.u64(..500);
    tx.input = match rng.u8(..3) {
        0 => "0x".to_string(),
        1 => format!("0xa9059cbb{}{}", encode_address(CURATOR), encode_word(rng.u64(..1_000))),
        _ => format!("0xc9d27afe{}{}", encode_word(rng.u64(..100)), encode_word(u64::from(rng.bool()))),
    };
    finish_parse_chain(&mut tx);
    tx
}

fn sample(seed: u64, count: usize) -> Vec<Box<dyn Node>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut nodes: Vec<Box<dyn Node>> = Vec::new();
    for _ in 0..count {
        let tx = random_transaction(&mut rng);
        match Vote::from_transaction(tx.clone()) {
            Some(vote) => nodes.push(Box::new(vote)),
            None => nodes.push(Box::new(tx)),
        }
    }
    nodes.push(Box::new(Parameter::new("_recipient", "address")));
    nodes
}

#[test]
fn file_round_trip_preserves_every_entity() {
    register_classes();
    let nodes = sample(0xDA0, 40);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.bin");

    let written = save_nodes(&path, nodes.iter().map(|n| n.as_ref())).unwrap();
    assert_eq!(written, nodes.len());

    let loaded = load_nodes(&path, ClassRegistry::global()).unwrap();
    assert!(loaded.skipped.is_empty());
    assert_eq!(loaded.nodes.len(), nodes.len());
    for (original, copy) in nodes.iter().zip(&loaded.nodes) {
        assert_eq!(copy.class().name(), original.class().name());
        assert_eq!(copy.canonical_json(), original.canonical_json());
        assert_eq!(
            copy.to_formatted("{function}|{ether}|{hitLimit}"),
            original.to_formatted("{function}|{ether}|{hitLimit}")
        );
    }

    let votes = loaded
        .nodes
        .iter()
        .filter_map(|n| downcast_ref::<Vote>(n.as_ref()))
        .count();
    assert!(votes > 0);
}

#[test]
fn transactions_sort_for_write() {
    let mut rng = fastrand::Rng::with_seed(17);
    let mut txs: Vec<Transaction> = (0..50).map(|_| random_transaction(&mut rng)).collect();
    txs.sort_by(Transaction::compare_for_write);
    for pair in txs.windows(2) {
        assert_ne!(pair[0].compare_for_write(&pair[1]), Ordering::Greater);
        assert!(pair[0].time_stamp <= pair[1].time_stamp);
    }
}

#[test]
fn generic_sort_by_placeholders() {
    register_classes();
    let mut nodes = sample(99, 30);
    nodes.retain(|n| n.class().is_derived_from(&Transaction::class()));
    sort_boxed(&mut nodes, "function", Some("hash"));
    for pair in nodes.windows(2) {
        assert_ne!(
            compare_by("function", Some("hash"), pair[0].as_ref(), pair[1].as_ref()),
            Ordering::Greater
        );
    }
}

#[test]
fn report_line_format() {
    let mut tx = Transaction::new();
    tx.hash = "0x01".to_string();
    tx.block_number = 1_599_207;
    tx.value = "0".to_string();
    tx.input = format!("0xbaac5300{}", encode_address(CURATOR));
    finish_parse_chain(&mut tx);

    assert_eq!(
        tx.to_formatted("{blockNumber}\t{hash}\t{ether}\t{function}\t{missing}"),
        format!(
            "1599207\t0x01\t0.000000000000000000\tcreateTokenProxy|{}\t<span class=warning>Field not found: [{{missing}}]</span>\n",
            CURATOR
        )
    );
}
