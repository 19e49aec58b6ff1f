// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nodes of proto classes.

use super::table::NameIndex;
use super::{text_to_json, Node, NodeBase};
use crate::archive::{ArchiveReader, ArchiveResult, ArchiveWriter};
use crate::class::{ClassDescriptor, TypeFlags};
use serde_json::{Map, Value};
use std::any::Any;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct DynamicField {
    name: String,
    flags: TypeFlags,
    value: String,
}

/// A node whose fields come from its class descriptor at runtime.
///
/// Values are kept as text and archived as strings, one per declared field.
#[derive(Debug, Clone)]
pub struct DynamicNode {
    class: Arc<ClassDescriptor>,
    base: NodeBase,
    fields: Vec<DynamicField>,
    index: NameIndex,
}

impl DynamicNode {
    /// Create an instance with every declared field empty.
    pub fn new(class: Arc<ClassDescriptor>) -> Self {
        let fields: Vec<DynamicField> = class
            .fields()
            .into_iter()
            .map(|field| DynamicField {
                name: field.name().to_string(),
                flags: field.type_flags(),
                value: String::new(),
            })
            .collect();
        let mut index = NameIndex::default();
        for (position, field) in fields.iter().enumerate() {
            index.insert(&field.name, position);
        }
        Self {
            base: NodeBase::new(class.schema()),
            class,
            fields,
            index,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.find(name, |i| self.fields[i].name.as_str())
    }
}

impl Node for DynamicNode {
    fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn own_value(&self, name: &str) -> Option<String> {
        let position = self.position(name)?;
        self.fields.get(position).map(|f| f.value.clone())
    }

    fn set_own_value(&mut self, name: &str, value: &str) -> bool {
        match self.position(name).and_then(|i| self.fields.get_mut(i)) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    fn write_own_fields(&self, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        for field in &self.fields {
            w.write_str(&field.value)?;
        }
        Ok(())
    }

    fn read_own_fields(&mut self, r: &mut ArchiveReader<'_>) -> ArchiveResult<()> {
        for field in &mut self.fields {
            field.value = r.read_string()?;
        }
        Ok(())
    }

    fn own_json(&self, map: &mut Map<String, Value>) {
        let declared = self.class.fields();
        for field in &self.fields {
            let hidden = declared
                .iter()
                .find(|f| f.name() == field.name)
                .map_or(false, |f| f.is_hidden());
            if !hidden {
                map.insert(field.name.clone(), text_to_json(&field.value, field.flags));
            }
        }
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::root_class;
    use crate::node::NodeExt;

    fn widget_class() -> Arc<ClassDescriptor> {
        let class = ClassDescriptor::proto("DynWidget", Some(root_class())).expect("proto");
        class.declare_field("name", TypeFlags::TEXT);
        class.declare_field("count", TypeFlags::NUMBER);
        class.declare_field("note", TypeFlags::TEXT);
        class.hide_field("note");
        class.seal();
        Arc::new(class)
    }

    #[test]
    fn test_dynamic_widget_values() {
        let mut widget = DynamicNode::new(widget_class());
        assert!(widget.set_value_by_name("name", "bolt"));
        assert!(widget.set_value_by_name("count", "12"));
        assert!(widget.set_value_by_name("note", "internal"));
        assert_eq!(widget.get_value_by_name("name"), "bolt");
        assert!(!widget.set_value_by_name("Name", "x"));
        assert!(!widget.set_value_by_name("n", "x"));
        assert_eq!(widget.canonical_json(), r#"{"name":"bolt","count":12}"#);
        assert_eq!(widget.to_formatted("Item: {name} x{count}"), "Item: bolt x12");
    }

    #[test]
    fn test_dynamic_archive_round_trip() {
        let class = widget_class();
        let mut widget = DynamicNode::new(class.clone());
        widget.set_value_by_name("name", "nut");
        widget.set_value_by_name("count", "3");

        let mut writer = ArchiveWriter::new();
        widget.write_own_fields(&mut writer).expect("write");
        let bytes = writer.into_bytes();

        let mut copy = DynamicNode::new(class);
        copy.read_own_fields(&mut ArchiveReader::new(&bytes))
            .expect("read");
        assert_eq!(copy.get_value_by_name("name"), "nut");
        assert_eq!(copy.get_value_by_name("count"), "3");
        assert_eq!(copy.get_value_by_name("note"), "");
    }
}
