// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Function parameter entity.

use nodeframe::class::{builtin_class, root_class, ClassDescriptor};
use nodeframe::{own_fields, FieldTable, Node, NodeBase, TypeFlags};
use std::sync::{Arc, OnceLock};

/// A named, typed function parameter (`name`, `type`).
#[derive(Debug, Clone)]
pub struct Parameter {
    class: Arc<ClassDescriptor>,
    base: NodeBase,
    pub name: String,
    pub kind: String,
}

fn create() -> Box<dyn Node> {
    Box::new(Parameter::default())
}

impl Parameter {
    pub const CLASS_NAME: &'static str = "Parameter";
    pub const SCHEMA: u32 = 1;

    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    fn field_table() -> &'static FieldTable<Parameter> {
        static TABLE: OnceLock<FieldTable<Parameter>> = OnceLock::new();
        TABLE.get_or_init(|| {
            FieldTable::new()
                .field("name", TypeFlags::TEXT, |p: &Parameter| &p.name, |p: &mut Parameter| &mut p.name)
                .field("type", TypeFlags::TEXT, |p: &Parameter| &p.kind, |p: &mut Parameter| &mut p.kind)
        })
    }

    pub fn class() -> Arc<ClassDescriptor> {
        static CLASS: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
        builtin_class(&CLASS, || {
            let class = ClassDescriptor::builtin(
                Self::CLASS_NAME,
                std::mem::size_of::<Parameter>(),
                Self::SCHEMA,
                Some(root_class()),
                Some(create),
            );
            Parameter::field_table().declare(&class);
            class
        })
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            class: Parameter::class(),
            base: NodeBase::new(Self::SCHEMA),
            name: String::new(),
            kind: String::new(),
        }
    }
}

impl Node for Parameter {
    own_fields!();

    fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}
