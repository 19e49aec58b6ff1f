// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use nodeframe_ledger::calldata::decode;
use nodeframe_ledger::ether::wei_to_ether;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let _ = decode(input);
    let _ = wei_to_ether(input);
});
