// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use nodeframe::NodeExt;
use nodeframe_ledger::{Transaction, Vote};

fuzz_target!(|data: &[u8]| {
    let Ok(fmt) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary placeholders and optional groups through the full chain
    let vote = Vote::new();
    let _ = vote.to_formatted(fmt);

    let mut tx = Transaction::new();
    tx.input = fmt.to_string();
    let _ = tx.to_formatted(fmt);
});
