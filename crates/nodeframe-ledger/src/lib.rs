// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # nodeframe-ledger
//!
//! Ledger entities built on [`nodeframe`]: function parameters,
//! transactions and DAO votes, plus the call-data decoder and wei/ether
//! conversion they render with.
//!
//! ## Quick Start
//!
//! ```
//! use nodeframe::{ClassRegistry, NodeExt};
//! use nodeframe_ledger::register_classes;
//!
//! register_classes();
//! let mut tx = ClassRegistry::global().create("Transaction").unwrap();
//! tx.set_value_by_name("value", "1000000000000000000");
//! tx.set_value_by_name("gas", "21000");
//! tx.set_value_by_name("gasUsed", "21000");
//! assert_eq!(tx.to_formatted("{ether} {hitLimit}"), "1.000000000000000000 TRUE");
//! ```

pub mod calldata;
pub mod ether;
pub mod parameter;
pub mod transaction;
pub mod vote;

pub use parameter::Parameter;
pub use transaction::Transaction;
pub use vote::Vote;

use nodeframe::ClassDescriptor;
use std::sync::Arc;

/// Register every ledger class with the global registry.
///
/// Idempotent. Call once at start-up before reading archives so
/// `read_any` can instantiate ledger records by class name.
pub fn register_classes() -> Vec<Arc<ClassDescriptor>> {
    let classes = vec![Parameter::class(), Transaction::class(), Vote::class()];
    log::debug!("[ledger] {} classes registered", classes.len());
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeframe::ClassRegistry;

    #[test]
    fn test_register_classes() {
        let classes = register_classes();
        let registry = ClassRegistry::global();
        for class in &classes {
            let found = registry.lookup(class.name()).expect("registered");
            assert!(Arc::ptr_eq(&found, class));
        }
        let again = register_classes();
        assert!(Arc::ptr_eq(&again[2], &classes[2]));
    }
}
