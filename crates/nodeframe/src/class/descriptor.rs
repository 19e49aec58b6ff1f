// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class descriptors: one shared metadata record per node type.

use super::{FieldDescriptor, RegistryError, TypeFlags};
use crate::config::{FIRST_FIELD_ORDINAL, PROTO_SCHEMA};
use crate::node::Node;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

/// Factory building a default instance of a builtin class.
pub type NodeFactory = fn() -> Box<dyn Node>;

/// How a descriptor came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOrigin {
    /// Compiled in, registered once at start-up.
    Builtin,
    /// Created at runtime from a name (e.g. loaded schema data).
    Proto,
}

enum ClassName {
    Builtin(&'static str),
    Proto(Box<str>),
}

impl ClassName {
    fn as_str(&self) -> &str {
        match self {
            Self::Builtin(name) => name,
            Self::Proto(name) => name,
        }
    }
}

/// Shared type metadata for one node class.
///
/// The body (name, size, schema, base, factory) never changes after
/// construction. The own field list sits behind its own lock and is closed
/// to new declarations once the descriptor is sealed; only the visibility
/// of existing fields may change afterwards.
///
/// The `base` chain is acyclic: a descriptor can only point at descriptors
/// that existed before it.
pub struct ClassDescriptor {
    name: ClassName,
    instance_size: usize,
    schema: u32,
    base: Option<Arc<ClassDescriptor>>,
    fields: RwLock<Vec<FieldDescriptor>>,
    ref_count: AtomicI32,
    factory: Option<NodeFactory>,
    sealed: AtomicBool,
}

impl ClassDescriptor {
    /// Create a builtin descriptor. The field list starts empty and open.
    pub fn builtin(
        name: &'static str,
        instance_size: usize,
        schema: u32,
        base: Option<Arc<ClassDescriptor>>,
        factory: Option<NodeFactory>,
    ) -> Self {
        Self {
            name: ClassName::Builtin(name),
            instance_size,
            schema,
            base,
            fields: RwLock::new(Vec::new()),
            ref_count: AtomicI32::new(0),
            factory,
            sealed: AtomicBool::new(false),
        }
    }

    /// Create a proto descriptor from a runtime name.
    ///
    /// The name is copied into a buffer owned by the descriptor. Protos derive
    /// from `base`, carry [`PROTO_SCHEMA`] and have no factory. Their field
    /// list stays open until [`seal`](Self::seal).
    pub fn proto(name: &str, base: Option<Arc<ClassDescriptor>>) -> Result<Self, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(RegistryError::NameAllocation)?;
        owned.push_str(name);

        log::debug!("[registry] created proto class '{}'", name);
        Ok(Self {
            name: ClassName::Proto(owned.into_boxed_str()),
            instance_size: 0,
            schema: PROTO_SCHEMA,
            base,
            fields: RwLock::new(Vec::new()),
            ref_count: AtomicI32::new(0),
            factory: None,
            sealed: AtomicBool::new(false),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn instance_size(&self) -> usize {
        self.instance_size
    }

    /// Current on-disk layout tag of this class.
    pub fn schema(&self) -> u32 {
        self.schema
    }

    pub fn base(&self) -> Option<&Arc<ClassDescriptor>> {
        self.base.as_ref()
    }

    pub fn factory(&self) -> Option<NodeFactory> {
        self.factory
    }

    pub fn origin(&self) -> ClassOrigin {
        match self.name {
            ClassName::Builtin(_) => ClassOrigin::Builtin,
            ClassName::Proto(_) => ClassOrigin::Proto,
        }
    }

    pub fn is_proto(&self) -> bool {
        self.origin() == ClassOrigin::Proto
    }

    /// Build a fresh instance through the factory, if the class has one.
    pub fn create(&self) -> Option<Box<dyn Node>> {
        self.factory.map(|factory| factory())
    }

    /// Close the registration phase. Later `add_field` calls are ignored.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Iterate from this class up to the root.
    pub fn ancestry(&self) -> Ancestry<'_> {
        Ancestry { next: Some(self) }
    }

    /// True if `ancestor` is this class or one of its bases.
    ///
    /// Identity is by descriptor address, not by name.
    pub fn is_derived_from(&self, ancestor: &ClassDescriptor) -> bool {
        self.ancestry().any(|class| std::ptr::eq(class, ancestor))
    }

    /// Number of base links between this class and the root.
    pub fn depth(&self) -> usize {
        self.ancestry().count() - 1
    }

    /// Append a field to the own list.
    ///
    /// Returns `false` without touching the list if the class is sealed, or
    /// if the name or ordinal is already used anywhere in the ancestry.
    pub fn add_field(&self, name: &str, type_flags: TypeFlags, ordinal: i32) -> bool {
        if self.is_sealed() {
            log::warn!(
                "[registry] '{}' is sealed, ignoring late field '{}'",
                self.name(),
                name
            );
            return false;
        }
        if name.is_empty() {
            return false;
        }
        let clash = self.ancestry().find_map(|class| {
            class
                .fields
                .read()
                .iter()
                .find(|f| f.name() == name || f.ordinal() == ordinal)
                .map(|f| (class.name().to_string(), f.name().to_string()))
        });
        if let Some((owner, existing)) = clash {
            log::warn!(
                "[registry] field '{}' (#{}) on '{}' clashes with '{}' declared by '{}'",
                name,
                ordinal,
                self.name(),
                existing,
                owner
            );
            return false;
        }

        self.fields
            .write()
            .push(FieldDescriptor::new(name, type_flags, ordinal));
        true
    }

    /// Append a field with the next free ordinal.
    pub fn declare_field(&self, name: &str, type_flags: TypeFlags) -> bool {
        let ordinal = self.next_ordinal();
        self.add_field(name, type_flags, ordinal)
    }

    /// One above the highest ordinal declared in the ancestry.
    pub fn next_ordinal(&self) -> i32 {
        self.ancestry()
            .filter_map(|class| class.fields.read().iter().map(|f| f.ordinal()).max())
            .max()
            .unwrap_or(FIRST_FIELD_ORDINAL)
            + 1
    }

    /// Toggle the visibility of an own field. Allowed after sealing.
    pub fn set_field_hidden(&self, name: &str, hidden: bool) -> bool {
        let mut fields = self.fields.write();
        match fields.iter_mut().find(|f| f.name() == name) {
            Some(field) => {
                field.set_hidden(hidden);
                true
            }
            None => false,
        }
    }

    /// Hide an own field from default rendering.
    pub fn hide_field(&self, name: &str) -> bool {
        self.set_field_hidden(name, true)
    }

    /// Snapshot of the own field list in declaration order.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.read().clone()
    }

    pub fn field_count(&self) -> usize {
        self.fields.read().len()
    }

    /// Inherited and own fields, root class first.
    pub fn all_fields(&self) -> Vec<FieldDescriptor> {
        let chain: Vec<&ClassDescriptor> = self.ancestry().collect();
        chain
            .into_iter()
            .rev()
            .flat_map(|class| class.fields())
            .collect()
    }

    /// Look a field up by exact name through the ancestry.
    pub fn find_field(&self, name: &str) -> Option<FieldDescriptor> {
        self.ancestry()
            .find_map(|class| class.fields.read().iter().find(|f| f.name() == name).cloned())
    }

    /// Own field names joined by `sep`, in declaration order.
    pub fn list_fields(&self, sep: &str) -> String {
        self.fields
            .read()
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Take a reference. Returns the new count.
    pub fn reference(&self) -> i32 {
        self.ref_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Release a reference.
    ///
    /// Clears the own field list when the count reaches zero, or when only the
    /// registry's reference to a builtin remains. Returns `true` iff the count
    /// reached zero.
    ///
    /// # Panics
    ///
    /// Panics if the count would go negative: the caller's reference
    /// accounting is broken.
    pub fn dereference(&self) -> bool {
        let previous = self.ref_count.fetch_sub(1, Ordering::AcqRel);
        assert!(
            previous > 0,
            "class '{}' dereferenced past zero (count was {})",
            self.name(),
            previous
        );
        let count = previous - 1;

        if count == 0 || (self.factory.is_some() && count == 1) {
            log::trace!(
                "[registry] clearing field list of '{}' (count {})",
                self.name(),
                count
            );
            self.fields.write().clear();
        }

        count == 0
    }

    pub fn ref_count(&self) -> i32 {
        self.ref_count.load(Ordering::Acquire)
    }
}

impl Drop for ClassDescriptor {
    fn drop(&mut self) {
        if let ClassName::Proto(name) = &self.name {
            log::debug!("[registry] releasing proto class '{}'", name);
        }
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name())
            .field("origin", &self.origin())
            .field("schema", &self.schema)
            .field("base", &self.base.as_ref().map(|b| b.name().to_string()))
            .field("fields", &self.list_fields(","))
            .field("ref_count", &self.ref_count())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

/// Iterator over a class and its bases.
pub struct Ancestry<'a> {
    next: Option<&'a ClassDescriptor>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a ClassDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}
