// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Template rendering of nodes.
//!
//! Rendering a node with a format string goes through four gates:
//!
//! 1. a node that is not showing renders nothing
//! 2. an empty format renders the canonical JSON
//! 3. [`Node::custom_format`] may claim the whole format string
//! 4. otherwise each chunk is emitted in order, placeholders resolved
//!    through [`resolve_chain`]
//!
//! Unresolved placeholders render as a visible warning chunk. Formatting
//! never fails.

mod chunk;
mod resolver;
mod sink;

pub use chunk::{parse_format, Chunk};
pub use resolver::{resolve_chain, ChunkResolver, ResolveStep, RESOLUTION_ORDER};
pub use sink::{ExportSink, WriteSink};

use crate::config::{FIELD_NOT_FOUND_CLOSE, FIELD_NOT_FOUND_OPEN};
use crate::node::Node;
use serde_json::{Map, Value};

/// Warning chunk for a placeholder nothing could resolve.
pub fn warning_chunk(name: &str) -> String {
    format!("{}{}{}", FIELD_NOT_FOUND_OPEN, name, FIELD_NOT_FOUND_CLOSE)
}

/// Render `node` into `sink` following `fmt`.
pub fn format_node<N: Node + ?Sized>(node: &N, sink: &mut dyn ExportSink, fmt: &str) {
    if !node.base().showing {
        return;
    }
    if fmt.is_empty() {
        sink.push_str(&canonical_json(node));
        return;
    }
    if let Some(report) = node.custom_format(fmt) {
        log::trace!("[format] '{}' rendered by custom format", node.class().name());
        sink.push_str(&report);
        return;
    }
    for chunk in parse_format(fmt) {
        render_chunk(node, &chunk, sink);
    }
}

fn resolve_or_warn<N: Node + ?Sized>(node: &N, name: &str) -> String {
    resolve_chain(node, name).unwrap_or_else(|| {
        log::debug!(
            "[format] '{}' has no field '{}'",
            node.class().name(),
            name
        );
        warning_chunk(name)
    })
}

fn render_chunk<N: Node + ?Sized>(node: &N, chunk: &Chunk<'_>, sink: &mut dyn ExportSink) {
    match chunk {
        Chunk::Literal(text) => sink.push_str(text),
        Chunk::Field(name) => sink.push_str(&resolve_or_warn(node, name)),
        Chunk::Group(inner) => {
            let mut any_value = false;
            let mut rendered = String::new();
            for part in inner {
                match part {
                    Chunk::Field(name) => {
                        let value = resolve_or_warn(node, name);
                        any_value |= !value.is_empty();
                        rendered.push_str(&value);
                    }
                    other => render_chunk(node, other, &mut rendered),
                }
            }
            if any_value {
                sink.push_str(&rendered);
            }
        }
    }
}

fn collect_json<N: Node + ?Sized>(node: &N, map: &mut Map<String, Value>) {
    if let Some(parent) = node.parent() {
        collect_json(parent, map);
    }
    node.own_json(map);
}

/// Compact JSON object of every visible declared field, ancestors first.
pub fn canonical_json<N: Node + ?Sized>(node: &N) -> String {
    let mut map = Map::new();
    collect_json(node, &mut map);
    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{root_class, ClassDescriptor, TypeFlags};
    use crate::node::{DynamicNode, NodeExt};
    use std::sync::Arc;

    fn note() -> DynamicNode {
        let class = ClassDescriptor::proto("FormatNote", Some(root_class())).expect("proto");
        class.declare_field("title", TypeFlags::TEXT);
        class.declare_field("body", TypeFlags::TEXT);
        class.seal();
        let mut node = DynamicNode::new(Arc::new(class));
        node.set_value_by_name("title", "hello");
        node
    }

    #[test]
    fn test_hidden_node_renders_nothing() {
        let mut node = note();
        node.set_showing(false);
        for fmt in ["", "{title}", "literal", "{bogus}"] {
            assert_eq!(node.to_formatted(fmt), "");
        }
    }

    #[test]
    fn test_unknown_placeholder_warning() {
        let node = note();
        assert_eq!(
            node.to_formatted("{bogus}"),
            "<span class=warning>Field not found: [{bogus}]</span>\n"
        );
    }

    #[test]
    fn test_base_placeholders() {
        let node = note();
        assert_eq!(node.to_formatted("{deleted}/{showing}/{null}"), "0/1/<x>");
        assert_eq!(
            node.to_formatted("{schema}"),
            crate::config::PROTO_SCHEMA.to_string()
        );
    }

    #[test]
    fn test_optional_group_needs_a_value() {
        let mut node = note();
        assert_eq!(node.to_formatted("{title}[: {body}]"), "hello");
        node.set_value_by_name("body", "world");
        assert_eq!(node.to_formatted("{title}[: {body}]"), "hello: world");
        assert!(node.to_formatted("[{nope}]").contains("nope"));
    }

    #[test]
    fn test_sink_receives_chunks() {
        let node = note();
        let mut sink = WriteSink::new(Vec::new());
        node.format(&mut sink, "<{title}>");
        assert_eq!(sink.finish().expect("finish"), b"<hello>");
    }
}
