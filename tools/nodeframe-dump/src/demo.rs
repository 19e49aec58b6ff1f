// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Demo ledger content for `nodeframe-dump demo`.

use nodeframe::node::finish_parse_chain;
use nodeframe::Node;
use nodeframe_ledger::calldata::{encode_address, encode_word, selector_of};
use nodeframe_ledger::{Parameter, Transaction, Vote};

const DAO: &str = "0xbb9bc244d798123fde783fcc1c72d3bb8c189413";

/// Deterministic mix of transactions, votes and parameters.
pub fn ledger(count: usize) -> Vec<Box<dyn Node>> {
    let mut nodes: Vec<Box<dyn Node>> = vec![
        Box::new(Parameter::new("proposalID", "uint256")),
        Box::new(Parameter::new("supportsProposal", "bool")),
    ];

    for i in 0..count as u64 {
        let mut tx = Transaction::new();
        tx.hash = format!("0x{:064x}", 0xd0a0_0000 + i);
        tx.block_number = 1_599_200 + i / 3;
        tx.transaction_index = i % 3;
        tx.time_stamp = 1_464_000_000 + i * 17;
        tx.from = format!("0x{:040x}", 0xa11ce + i % 5);
        tx.to = DAO.to_string();
        tx.gas = 90_000;
        tx.gas_used = if i % 4 == 0 { 90_000 } else { 52_000 + i };
        tx.gas_price = 20_000_000_000;
        tx.nonce = i / 5;
        tx.value = if i % 3 == 0 {
            format!("{}000000000000000", 1 + i)
        } else {
            "0".to_string()
        };
        tx.input = match i % 3 {
            0 => selector_of("createTokenProxy")
                .map(|s| format!("{}{}", s, encode_address(&tx.from)))
                .unwrap_or_default(),
            1 => format!(
                "0xc9d27afe{}{}",
                encode_word(i % 7 + 1),
                encode_word(i % 2)
            ),
            _ => "0x".to_string(),
        };
        finish_parse_chain(&mut tx);

        match Vote::from_transaction(tx.clone()) {
            Some(vote) => nodes.push(Box::new(vote)),
            None => nodes.push(Box::new(tx)),
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeframe::NodeExt;

    #[test]
    fn test_demo_mix() {
        let nodes = ledger(9);
        assert_eq!(nodes.len(), 11);
        let votes = nodes.iter().filter(|n| n.class().name() == "Vote").count();
        assert_eq!(votes, 3);
        assert_eq!(nodes[2].to_formatted("{function}"), format!("createTokenProxy|{}", "0xa11ce"));
    }
}
