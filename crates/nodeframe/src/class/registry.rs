// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide class registry.
//!
//! Builtin classes are registered exactly once through [`builtin_class`],
//! whose `OnceLock` is the per-type latch. Proto classes are created at
//! runtime from a name (usually from a JSON schema document, see
//! [`ClassRegistry::load_protos`]).

use super::{ClassDescriptor, TypeFlags};
use crate::config::{FIRST_FIELD_ORDINAL, ROOT_CLASS_NAME, ROOT_SCHEMA};
use crate::node::{DynamicNode, Node, NodeBase};
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::TryReserveError;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Registry errors.
#[derive(Debug)]
pub enum RegistryError {
    /// Class names cannot be empty.
    EmptyName,
    /// The heap copy of a proto class name could not be allocated.
    NameAllocation(TryReserveError),
    /// No class is registered under this name.
    UnknownClass(String),
    /// A class with this name is already registered.
    DuplicateClass(String),
    /// A proto schema document could not be used.
    InvalidSchema(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Class name is empty"),
            Self::NameAllocation(e) => write!(f, "Cannot allocate class name: {}", e),
            Self::UnknownClass(name) => write!(f, "Unknown class: {}", name),
            Self::DuplicateClass(name) => write!(f, "Class already registered: {}", name),
            Self::InvalidSchema(msg) => write!(f, "Invalid proto schema: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NameAllocation(e) => Some(e),
            _ => None,
        }
    }
}

/// Table of class descriptors keyed by class name.
///
/// The registry holds one manual reference on every descriptor it stores.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: DashMap<String, Arc<ClassDescriptor>>,
}

fn registry_cell() -> &'static ClassRegistry {
    static GLOBAL: OnceLock<ClassRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ClassRegistry::new)
}

impl ClassRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry. The root class is always present.
    pub fn global() -> &'static ClassRegistry {
        root_class();
        registry_cell()
    }

    /// Insert a builtin descriptor.
    ///
    /// Registering the same descriptor twice is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if a different descriptor is already registered under the same
    /// name: two types claim one class name, which breaks every lookup.
    pub fn register_builtin(&self, class: Arc<ClassDescriptor>) -> Arc<ClassDescriptor> {
        let entry = self
            .classes
            .entry(class.name().to_string())
            .or_insert_with(|| {
                class.reference();
                log::debug!(
                    "[registry] registered builtin class '{}' schema={} fields=[{}]",
                    class.name(),
                    class.schema(),
                    class.list_fields(",")
                );
                class.clone()
            });
        assert!(
            Arc::ptr_eq(entry.value(), &class),
            "class '{}' registered twice with different descriptors",
            class.name()
        );
        entry.value().clone()
    }

    /// Insert a proto descriptor and seal it.
    pub fn register_proto(
        &self,
        class: ClassDescriptor,
    ) -> Result<Arc<ClassDescriptor>, RegistryError> {
        let name = class.name().to_string();
        if self.classes.contains_key(&name) {
            return Err(RegistryError::DuplicateClass(name));
        }
        class.seal();
        class.reference();
        let class = Arc::new(class);
        self.classes.insert(name, class.clone());
        Ok(class)
    }

    /// Remove a class and release the registry's reference.
    pub fn unregister(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        let (_, class) = self.classes.remove(name)?;
        class.dereference();
        Some(class)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(name).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Build a fresh instance of a registered class.
    ///
    /// Builtins go through their factory; protos yield a [`DynamicNode`].
    pub fn create(&self, name: &str) -> Result<Box<dyn Node>, RegistryError> {
        let class = self
            .lookup(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.to_string()))?;
        if let Some(node) = class.create() {
            return Ok(node);
        }
        if class.is_proto() {
            return Ok(Box::new(DynamicNode::new(class)));
        }
        Err(RegistryError::UnknownClass(name.to_string()))
    }

    /// Register every class of a JSON proto schema document.
    ///
    /// ```json
    /// {"classes":[{"name":"Widget","fields":[{"name":"name","type":"text"}]}]}
    /// ```
    ///
    /// The document is validated completely before anything is registered.
    pub fn load_protos(&self, json: &str) -> Result<Vec<Arc<ClassDescriptor>>, RegistryError> {
        let document: ProtoDocument =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidSchema(e.to_string()))?;

        let mut built: Vec<ClassDescriptor> = Vec::with_capacity(document.classes.len());
        for proto in &document.classes {
            if self.contains(&proto.name) || built.iter().any(|c| c.name() == proto.name) {
                return Err(RegistryError::DuplicateClass(proto.name.clone()));
            }
            let class = ClassDescriptor::proto(&proto.name, Some(root_class()))?;
            for field in &proto.fields {
                let flags = TypeFlags::from_keyword(&field.kind).ok_or_else(|| {
                    RegistryError::InvalidSchema(format!(
                        "{}.{}: unknown type '{}'",
                        proto.name, field.name, field.kind
                    ))
                })?;
                if !class.declare_field(&field.name, flags) {
                    return Err(RegistryError::InvalidSchema(format!(
                        "{}.{}: duplicate or empty field name",
                        proto.name, field.name
                    )));
                }
                if field.hidden {
                    class.hide_field(&field.name);
                }
            }
            built.push(class);
        }

        built
            .into_iter()
            .map(|class| self.register_proto(class))
            .collect()
    }
}

#[derive(Deserialize)]
struct ProtoDocument {
    classes: Vec<ProtoClass>,
}

#[derive(Deserialize)]
struct ProtoClass {
    name: String,
    #[serde(default)]
    fields: Vec<ProtoField>,
}

#[derive(Deserialize)]
struct ProtoField {
    name: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    hidden: bool,
}

fn default_kind() -> String {
    "text".to_string()
}

/// Register a builtin class exactly once.
///
/// `cell` is the type's latch. On first call `init` builds the descriptor
/// and declares its fields; the descriptor is then sealed and inserted into
/// the global registry. Later calls return the same descriptor.
pub fn builtin_class(
    cell: &'static OnceLock<Arc<ClassDescriptor>>,
    init: impl FnOnce() -> ClassDescriptor,
) -> Arc<ClassDescriptor> {
    cell.get_or_init(|| {
        let class = Arc::new(init());
        class.seal();
        registry_cell().register_builtin(class)
    })
    .clone()
}

/// The root `Node` class. Declares the hidden bookkeeping fields.
pub fn root_class() -> Arc<ClassDescriptor> {
    static ROOT: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
    builtin_class(&ROOT, || {
        let class = ClassDescriptor::builtin(
            ROOT_CLASS_NAME,
            std::mem::size_of::<NodeBase>(),
            ROOT_SCHEMA,
            None,
            None,
        );
        class.add_field(
            "schema",
            TypeFlags::NUMBER | TypeFlags::LABEL,
            FIRST_FIELD_ORDINAL + 1,
        );
        class.add_field(
            "deleted",
            TypeFlags::BOOL | TypeFlags::LABEL,
            FIRST_FIELD_ORDINAL + 2,
        );
        class.hide_field("schema");
        class.hide_field("deleted");
        class
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_class_is_registered() {
        let registry = ClassRegistry::global();
        let root = registry.lookup(ROOT_CLASS_NAME).expect("root");
        assert!(Arc::ptr_eq(&root, &root_class()));
        assert_eq!(root.list_fields(","), "schema,deleted");
        assert!(root.all_fields().iter().all(|f| f.is_hidden()));
        assert!(root.is_sealed());
    }

    #[test]
    fn test_builtin_latch_runs_once() {
        static CELL: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
        let mut runs = 0;
        let first = builtin_class(&CELL, || {
            runs += 1;
            ClassDescriptor::builtin("LatchProbe", 0, 1, Some(root_class()), None)
        });
        let second = builtin_class(&CELL, || unreachable!("latch"));
        assert_eq!(runs, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.ref_count(), 1);
    }

    #[test]
    fn test_register_same_builtin_is_idempotent() {
        let registry = ClassRegistry::new();
        let class = Arc::new(ClassDescriptor::builtin("Same", 0, 1, None, None));
        registry.register_builtin(class.clone());
        registry.register_builtin(class.clone());
        assert_eq!(registry.len(), 1);
        assert_eq!(class.ref_count(), 1);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_conflicting_builtin_panics() {
        let registry = ClassRegistry::new();
        registry.register_builtin(Arc::new(ClassDescriptor::builtin("Clash", 0, 1, None, None)));
        registry.register_builtin(Arc::new(ClassDescriptor::builtin("Clash", 0, 1, None, None)));
    }

    #[test]
    fn test_load_protos() {
        let registry = ClassRegistry::new();
        let json = r#"{"classes":[
            {"name":"Gadget","fields":[
                {"name":"label","type":"text"},
                {"name":"weight","type":"number"},
                {"name":"secret","type":"text","hidden":true}
            ]}
        ]}"#;
        let classes = registry.load_protos(json).expect("load");
        assert_eq!(classes.len(), 1);

        let gadget = registry.lookup("Gadget").expect("gadget");
        assert!(gadget.is_proto());
        assert!(gadget.is_sealed());
        assert!(gadget.is_derived_from(&root_class()));
        assert_eq!(gadget.list_fields("|"), "label|weight|secret");
        assert!(gadget.find_field("secret").expect("secret").is_hidden());
        assert_eq!(gadget.ref_count(), 1);

        let node = registry.create("Gadget").expect("create");
        assert_eq!(node.class().name(), "Gadget");
    }

    #[test]
    fn test_load_protos_rejects_bad_documents() {
        let registry = ClassRegistry::new();
        assert!(matches!(
            registry.load_protos("not json"),
            Err(RegistryError::InvalidSchema(_))
        ));
        assert!(matches!(
            registry.load_protos(r#"{"classes":[{"name":"","fields":[]}]}"#),
            Err(RegistryError::EmptyName)
        ));
        assert!(matches!(
            registry.load_protos(
                r#"{"classes":[{"name":"Bad","fields":[{"name":"x","type":"float"}]}]}"#
            ),
            Err(RegistryError::InvalidSchema(_))
        ));
        assert!(matches!(
            registry.load_protos(
                r#"{"classes":[{"name":"Dup","fields":[{"name":"schema","type":"number"}]}]}"#
            ),
            Err(RegistryError::InvalidSchema(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_proto_is_rejected() {
        let registry = ClassRegistry::new();
        let json = r#"{"classes":[{"name":"Twice"}]}"#;
        registry.load_protos(json).expect("first");
        assert!(matches!(
            registry.load_protos(json),
            Err(RegistryError::DuplicateClass(name)) if name == "Twice"
        ));
    }

    #[test]
    fn test_repeated_name_in_document_registers_nothing() {
        let registry = ClassRegistry::new();
        let json = r#"{"classes":[{"name":"Echo"},{"name":"Echo"}]}"#;
        assert!(matches!(
            registry.load_protos(json),
            Err(RegistryError::DuplicateClass(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_releases_reference() {
        let registry = ClassRegistry::new();
        registry
            .load_protos(r#"{"classes":[{"name":"Temp","fields":[{"name":"a"}]}]}"#)
            .expect("load");
        let temp = registry.unregister("Temp").expect("temp");
        assert_eq!(temp.ref_count(), 0);
        assert_eq!(temp.field_count(), 0);
        assert!(!registry.contains("Temp"));
    }

    #[test]
    fn test_create_unknown_class() {
        let registry = ClassRegistry::new();
        assert!(matches!(
            registry.create("Nope"),
            Err(RegistryError::UnknownClass(name)) if name == "Nope"
        ));
    }
}
