// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use nodeframe::{ClassRegistry, NodeExt};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Fresh registry per input: loaded names must not collide across runs
    let registry = ClassRegistry::new();
    if let Ok(classes) = registry.load_protos(json) {
        for class in classes {
            if let Ok(node) = registry.create(class.name()) {
                let _ = node.canonical_json();
            }
        }
    }
});
