// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nodes: reflective, formattable, archivable entities.
//!
//! A node type implements [`Node`]; everything generic (value-by-name
//! access, formatting, archiving) comes from [`NodeExt`].
//!
//! Inheritance is composition. A derived type embeds its parent node and
//! returns it from [`Node::parent`]; the shared bookkeeping fields live in a
//! single [`NodeBase`] reached through [`Node::base`].
//!
//! # Example
//!
//! ```
//! use nodeframe::class::{builtin_class, root_class, ClassDescriptor};
//! use nodeframe::node::{FieldTable, Node, NodeBase, NodeExt};
//! use nodeframe::TypeFlags;
//! use std::sync::{Arc, OnceLock};
//!
//! #[derive(Debug, Clone)]
//! struct Part {
//!     class: Arc<ClassDescriptor>,
//!     base: NodeBase,
//!     name: String,
//! }
//!
//! impl Part {
//!     fn field_table() -> &'static FieldTable<Part> {
//!         static TABLE: OnceLock<FieldTable<Part>> = OnceLock::new();
//!         TABLE.get_or_init(|| {
//!             FieldTable::new().field("name", TypeFlags::TEXT, |p: &Part| &p.name, |p: &mut Part| &mut p.name)
//!         })
//!     }
//!
//!     fn class() -> Arc<ClassDescriptor> {
//!         static CLASS: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
//!         builtin_class(&CLASS, || {
//!             let class = ClassDescriptor::builtin("DocPart", 0, 1, Some(root_class()), None);
//!             Part::field_table().declare(&class);
//!             class
//!         })
//!     }
//! }
//!
//! impl Node for Part {
//!     nodeframe::own_fields!();
//!
//!     fn class(&self) -> &Arc<ClassDescriptor> { &self.class }
//!     fn base(&self) -> &NodeBase { &self.base }
//!     fn base_mut(&mut self) -> &mut NodeBase { &mut self.base }
//! }
//!
//! let mut part = Part { class: Part::class(), base: NodeBase::new(1), name: String::new() };
//! assert!(part.set_value_by_name("name", "bolt"));
//! assert_eq!(part.to_formatted("part={name}"), "part=bolt");
//! assert_eq!(part.get_value_by_name("size"), "[{SIZE}]");
//! ```

mod base;
mod dynamic;
mod table;

pub use base::NodeBase;
pub use dynamic::DynamicNode;
pub use table::{text_to_json, FieldTable, FieldValue};

use crate::archive::{self, Archive, ArchiveReader, ArchiveResult, ArchiveWriter};
use crate::class::ClassDescriptor;
use crate::format::{self, ExportSink};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A reflective entity.
///
/// Implementors provide access to their class, bookkeeping fields, parent
/// node and own declared fields (usually through [`own_fields!`]). The
/// remaining methods are per-type hooks with neutral defaults.
///
/// [`own_fields!`]: crate::own_fields
pub trait Node: fmt::Debug + Send + Sync + 'static {
    fn class(&self) -> &Arc<ClassDescriptor>;

    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// The embedded parent node, if this type derives from another node type.
    fn parent(&self) -> Option<&dyn Node> {
        None
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Node> {
        None
    }

    /// Value of an own declared field.
    fn own_value(&self, name: &str) -> Option<String>;

    /// Assign an own declared field from text.
    fn set_own_value(&mut self, name: &str, value: &str) -> bool;

    /// Write own declared fields in declaration order.
    fn write_own_fields(&self, w: &mut ArchiveWriter) -> ArchiveResult<()>;

    /// Read own declared fields in declaration order.
    fn read_own_fields(&mut self, r: &mut ArchiveReader<'_>) -> ArchiveResult<()>;

    /// Add own visible fields to the canonical JSON object.
    fn own_json(&self, map: &mut Map<String, Value>);

    /// Computed placeholder values. `None` or an empty string means not
    /// handled here.
    fn custom_chunk(&self, _name: &str) -> Option<String> {
        None
    }

    /// Whole-entity rendering for a recognised report name.
    fn custom_format(&self, _format: &str) -> Option<String> {
        None
    }

    /// Decode a record body written with an older `schema`.
    ///
    /// `r` covers exactly the record body. Returning `Ok(false)` marks the
    /// record unreadable.
    fn read_back_level(&mut self, _schema: u32, _r: &mut ArchiveReader<'_>) -> ArchiveResult<bool> {
        Ok(false)
    }

    /// Rebuild derived state after fields were read or copied.
    fn finish_parse(&mut self) {}

    fn clone_node(&self) -> Box<dyn Node>;

    fn as_any(&self) -> &dyn Any;
}

/// Implement the own-field methods of [`Node`] from `Self::field_table()`.
///
/// Also provides `clone_node` (through [`duplicate`]) and `as_any`, so the
/// type must be `Clone`.
#[macro_export]
macro_rules! own_fields {
    () => {
        fn own_value(&self, name: &str) -> Option<String> {
            Self::field_table().get(self, name)
        }

        fn set_own_value(&mut self, name: &str, value: &str) -> bool {
            Self::field_table().set(self, name, value)
        }

        fn write_own_fields(
            &self,
            w: &mut $crate::archive::ArchiveWriter,
        ) -> $crate::archive::ArchiveResult<()> {
            Self::field_table().write(self, w)
        }

        fn read_own_fields(
            &mut self,
            r: &mut $crate::archive::ArchiveReader<'_>,
        ) -> $crate::archive::ArchiveResult<()> {
            Self::field_table().read(self, r)
        }

        fn own_json(
            &self,
            map: &mut $crate::__serde_json::Map<String, $crate::__serde_json::Value>,
        ) {
            Self::field_table().to_json(self, $crate::node::Node::class(self), map)
        }

        fn clone_node(&self) -> Box<dyn $crate::node::Node> {
            Box::new($crate::node::duplicate(self))
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}

/// Generic behaviour of every node.
pub trait NodeExt: Node {
    fn is_showing(&self) -> bool {
        self.base().showing
    }

    fn set_showing(&mut self, showing: bool) {
        self.base_mut().showing = showing;
    }

    fn is_deleted(&self) -> bool {
        self.base().deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.base_mut().deleted = deleted;
    }

    fn is_derived_from(&self, ancestor: &ClassDescriptor) -> bool {
        self.class().is_derived_from(ancestor)
    }

    /// Resolve a field through the whole chain.
    ///
    /// Never fails: a miss yields `[{NAME}]` with the name upper-cased.
    fn get_value_by_name(&self, name: &str) -> String {
        format::resolve_chain(self, name).unwrap_or_else(|| format!("[{{{}}}]", name.to_uppercase()))
    }

    /// Assign a field from text: own fields, then the parent chain, then
    /// the bookkeeping fields. `false` on a miss, a read-only field or a
    /// value that does not parse.
    fn set_value_by_name(&mut self, name: &str, value: &str) -> bool {
        set_chain(self, name, value)
    }

    /// Render into `sink` following `fmt`.
    fn format(&self, sink: &mut dyn ExportSink, fmt: &str) {
        format::format_node(self, sink, fmt);
    }

    fn to_formatted(&self, fmt: &str) -> String {
        let mut out = String::new();
        self.format(&mut out, fmt);
        out
    }

    /// Compact JSON of every visible declared field, ancestors first.
    fn canonical_json(&self) -> String {
        format::canonical_json(self)
    }

    /// Read or write this node as one archive record.
    fn serialize(&mut self, archive: Archive<'_, '_>) -> ArchiveResult<()> {
        match archive {
            Archive::Reading(r) => archive::read_record(self, r).map(|_| ()),
            Archive::Writing(w) => archive::write_record(self, w),
        }
    }
}

impl<N: Node + ?Sized> NodeExt for N {}

fn set_chain<N: Node + ?Sized>(node: &mut N, name: &str, value: &str) -> bool {
    if node.set_own_value(name, value) {
        return true;
    }
    match node.parent_mut() {
        Some(parent) => set_chain(parent, name, value),
        None => node.base_mut().set_value(name, value),
    }
}

/// Run `finish_parse` on the parent chain, then on `node`.
pub fn finish_parse_chain<N: Node + ?Sized>(node: &mut N) {
    if let Some(parent) = node.parent_mut() {
        finish_parse_chain(parent);
    }
    node.finish_parse();
}

/// Deep copy that also rebuilds derived state.
pub fn duplicate<T: Node + Clone>(node: &T) -> T {
    let mut copy = node.clone();
    finish_parse_chain(&mut copy);
    copy
}

/// Downcast a node to its concrete type.
pub fn downcast_ref<T: Node>(node: &dyn Node) -> Option<&T> {
    node.as_any().downcast_ref::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::root_class;

    fn gadget() -> DynamicNode {
        let class = ClassDescriptor::proto("NodeTestGadget", Some(root_class())).expect("proto");
        class.declare_field("label", crate::TypeFlags::TEXT);
        class.declare_field("weight", crate::TypeFlags::NUMBER);
        class.seal();
        DynamicNode::new(Arc::new(class))
    }

    #[test]
    fn test_get_value_miss_is_uppercased_placeholder() {
        let node = gadget();
        assert_eq!(node.get_value_by_name("colour"), "[{COLOUR}]");
        assert_eq!(node.get_value_by_name(""), "[{}]");
    }

    #[test]
    fn test_base_fields_through_chain() {
        let mut node = gadget();
        assert_eq!(node.get_value_by_name("deleted"), "0");
        assert_eq!(node.get_value_by_name("null"), "<x>");
        assert!(node.set_value_by_name("deleted", "1"));
        assert!(node.is_deleted());
        assert!(!node.set_value_by_name("null", "1"));
        assert!(!node.set_value_by_name("colour", "red"));
    }

    #[test]
    fn test_hidden_fields_readable_but_not_rendered() {
        let mut node = gadget();
        node.set_value_by_name("label", "bolt");
        let json = node.canonical_json();
        assert!(!json.contains("schema"));
        assert!(!json.contains("deleted"));
        assert!(json.contains("bolt"));
        assert_eq!(node.get_value_by_name("schema"), node.base().schema.to_string());
    }

    #[test]
    fn test_downcast() {
        let node: Box<dyn Node> = Box::new(gadget());
        assert!(downcast_ref::<DynamicNode>(node.as_ref()).is_some());
        let copy = node.clone_node();
        assert_eq!(copy.class().name(), "NodeTestGadget");
    }
}
