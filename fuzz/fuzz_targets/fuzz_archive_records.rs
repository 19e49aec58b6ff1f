// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use nodeframe::archive::read_all;
use nodeframe::config::ArchiveLimits;
use nodeframe::{ArchiveReader, ClassRegistry};

fuzz_target!(|data: &[u8]| {
    nodeframe_ledger::register_classes();

    // Tight limits so corrupt lengths are rejected before allocating
    let limits = ArchiveLimits::default()
        .with_max_string_len(4096)
        .with_max_record_len(64 * 1024);
    let mut reader = ArchiveReader::with_limits(data, limits);
    let _ = read_all(&mut reader, ClassRegistry::global());
});
