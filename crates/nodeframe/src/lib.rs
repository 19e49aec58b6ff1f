// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # nodeframe - schema-driven node framework
//!
//! Gives every entity type, from a declared field list only:
//!
//! - reflective get/set of field values by name
//! - template rendering driven by a format string of `{name}` placeholders
//! - versioned binary archives with back-level read hooks
//! - generic two-key sorting
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  Entities (Parameter, Transaction, Vote, DynamicNode, ...)    |
//! +---------------------------------------------------------------+
//! |  node     Node / NodeExt, FieldTable, NodeBase                |
//! |  format   chunk lexer, resolution chain, sinks                |
//! |  archive  records, schema checks, read_back_level             |
//! |  sort     compare_by, sort_nodes                              |
//! +---------------------------------------------------------------+
//! |  class    ClassDescriptor, FieldDescriptor, ClassRegistry     |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ClassDescriptor`] | Shared metadata of one node type |
//! | [`ClassRegistry`] | Process-wide table of classes |
//! | [`Node`] | Trait implemented by every entity |
//! | [`NodeExt`] | Value access, formatting and archiving for any node |
//! | [`FieldTable`] | Declared fields of a Rust node type |
//! | [`ArchiveWriter`] / [`ArchiveReader`] | Binary archive streams |
//!
//! ## Quick Start
//!
//! ```
//! use nodeframe::{ClassRegistry, NodeExt};
//!
//! let registry = ClassRegistry::new();
//! registry
//!     .load_protos(r#"{"classes":[{"name":"QuickWidget","fields":[
//!         {"name":"name","type":"text"},{"name":"count","type":"number"}]}]}"#)
//!     .unwrap();
//!
//! let mut widget = registry.create("QuickWidget").unwrap();
//! widget.set_value_by_name("name", "bolt");
//! widget.set_value_by_name("count", "12");
//!
//! assert_eq!(widget.to_formatted("Item: {name} x{count}"), "Item: bolt x12");
//! assert_eq!(widget.canonical_json(), r#"{"name":"bolt","count":12}"#);
//! ```

pub mod archive;
pub mod class;
pub mod config;
pub mod format;
pub mod node;
pub mod sort;


pub use archive::{Archive, ArchiveError, ArchiveReader, ArchiveResult, ArchiveWriter};
pub use class::{
    builtin_class, root_class, ClassDescriptor, ClassRegistry, FieldDescriptor, RegistryError,
    TypeFlags,
};
pub use format::{ExportSink, WriteSink};
pub use node::{duplicate, DynamicNode, FieldTable, Node, NodeBase, NodeExt};

#[doc(hidden)]
pub use serde_json as __serde_json;
