// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bookkeeping fields shared by every node.

use crate::config::{NULL_MARKER, ROOT_SCHEMA};
use crate::format::ChunkResolver;
use crate::node::FieldValue;

/// `schema`, `deleted` and `showing`, present on every node.
///
/// Terminates the resolution chain: it answers `deleted`, `null`, `schema`
/// and `showing` for any node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBase {
    /// Schema tag the instance was built or last read with.
    pub schema: u32,
    pub deleted: bool,
    /// A node that is not showing renders nothing.
    pub showing: bool,
}

impl NodeBase {
    pub fn new(schema: u32) -> Self {
        Self {
            schema,
            deleted: false,
            showing: true,
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        match name {
            "deleted" => Some(self.deleted.render()),
            "null" => Some(NULL_MARKER.to_string()),
            "schema" => Some(self.schema.render()),
            "showing" => Some(self.showing.render()),
            _ => None,
        }
    }

    /// Assign a bookkeeping field from text. `null` is read-only.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let parsed = match name {
            "deleted" => bool::parse(value).map(|v| self.deleted = v),
            "showing" => bool::parse(value).map(|v| self.showing = v),
            "schema" => u32::parse(value).map(|v| self.schema = v),
            _ => None,
        };
        parsed.is_some()
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new(ROOT_SCHEMA)
    }
}

impl ChunkResolver for NodeBase {
    fn resolve(&self, name: &str) -> Option<String> {
        self.value(name)
    }
}
