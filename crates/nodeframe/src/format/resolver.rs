// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Placeholder resolution chain.

use crate::node::Node;

/// Turns a placeholder name into a value.
pub trait ChunkResolver {
    /// `None` means not handled here; the next resolver gets a chance.
    fn resolve(&self, name: &str) -> Option<String>;
}

/// One step of the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// [`Node::custom_chunk`]; an empty answer is a miss.
    CustomHook,
    /// Declared fields of the node's own type.
    OwnFields,
    /// The parent node's whole chain, or the bookkeeping fields at the root.
    Parent,
}

/// Precedence of the steps, first match wins.
pub const RESOLUTION_ORDER: [ResolveStep; 3] = [
    ResolveStep::CustomHook,
    ResolveStep::OwnFields,
    ResolveStep::Parent,
];

impl ResolveStep {
    pub fn apply<N: Node + ?Sized>(self, node: &N, name: &str) -> Option<String> {
        match self {
            Self::CustomHook => node.custom_chunk(name).filter(|value| !value.is_empty()),
            Self::OwnFields => node.own_value(name),
            Self::Parent => match node.parent() {
                Some(parent) => resolve_chain(parent, name),
                None => node.base().value(name),
            },
        }
    }
}

/// Resolve `name` on `node`, or `None` if nothing in the chain knows it.
pub fn resolve_chain<N: Node + ?Sized>(node: &N, name: &str) -> Option<String> {
    RESOLUTION_ORDER
        .iter()
        .find_map(|step| step.apply(node, name))
}

impl ChunkResolver for dyn Node {
    fn resolve(&self, name: &str) -> Option<String> {
        resolve_chain(self, name)
    }
}
