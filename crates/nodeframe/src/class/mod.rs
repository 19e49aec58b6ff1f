// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime class metadata.
//!
//! Every node type has exactly one [`ClassDescriptor`], shared by all of its
//! instances. A descriptor carries the class name, schema tag, a link to its
//! base class and the fields the class declares itself. Inherited fields are
//! reached by walking [`ClassDescriptor::ancestry`].
//!
//! # Example
//!
//! ```
//! use nodeframe::class::{root_class, ClassDescriptor, ClassRegistry, TypeFlags};
//!
//! let registry = ClassRegistry::new();
//! let widget = ClassDescriptor::proto("Widget", Some(root_class())).unwrap();
//! widget.declare_field("name", TypeFlags::TEXT);
//! widget.declare_field("count", TypeFlags::NUMBER);
//! let widget = registry.register_proto(widget).unwrap();
//!
//! assert_eq!(widget.list_fields(","), "name,count");
//! assert!(widget.is_derived_from(&root_class()));
//! ```

mod descriptor;
mod field;
mod registry;

pub use descriptor::{Ancestry, ClassDescriptor, ClassOrigin, NodeFactory};
pub use field::{FieldDescriptor, TypeFlags};
pub use registry::{builtin_class, root_class, ClassRegistry, RegistryError};
