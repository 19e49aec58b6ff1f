// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record framing, schema checks and collection helpers.

use super::{ArchiveError, ArchiveReader, ArchiveResult, ArchiveWriter};
use crate::class::ClassRegistry;
use crate::node::{finish_parse_chain, Node};
use std::path::Path;

/// Leading part of every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub class_name: String,
    pub schema: u32,
    pub deleted: bool,
    pub showing: bool,
}

impl RecordHeader {
    /// Header describing `node` written with its class's current schema.
    pub fn for_node<N: Node + ?Sized>(node: &N) -> Self {
        let class = node.class();
        Self {
            class_name: class.name().to_string(),
            schema: class.schema(),
            deleted: node.base().deleted,
            showing: node.base().showing,
        }
    }

    pub fn write(&self, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        w.write_str(&self.class_name)?;
        w.write_u32(self.schema)?;
        w.write_bool(self.deleted)?;
        w.write_bool(self.showing)
    }

    pub fn read(r: &mut ArchiveReader<'_>) -> ArchiveResult<Self> {
        Ok(Self {
            class_name: r.read_string()?,
            schema: r.read_u32()?,
            deleted: r.read_bool()?,
            showing: r.read_bool()?,
        })
    }
}

fn write_fields<N: Node + ?Sized>(node: &N, w: &mut ArchiveWriter) -> ArchiveResult<()> {
    if let Some(parent) = node.parent() {
        write_fields(parent, w)?;
    }
    node.write_own_fields(w)
}

fn read_fields<N: Node + ?Sized>(node: &mut N, r: &mut ArchiveReader<'_>) -> ArchiveResult<()> {
    if let Some(parent) = node.parent_mut() {
        read_fields(parent, r)?;
    }
    node.read_own_fields(r)
}

/// Write `node` as one record.
pub fn write_record<N: Node + ?Sized>(node: &N, w: &mut ArchiveWriter) -> ArchiveResult<()> {
    RecordHeader::for_node(node).write(w)?;
    let mark = w.begin_record()?;
    write_fields(node, w)?;
    w.end_record(mark)
}

/// Read header and body length, returning a reader over the body.
///
/// On return `r` sits at the start of the next record.
fn read_frame<'a>(
    r: &mut ArchiveReader<'a>,
) -> ArchiveResult<(RecordHeader, ArchiveReader<'a>)> {
    let header = RecordHeader::read(r)?;
    let offset = r.offset();
    let body_len = r.read_u32()? as usize;
    if body_len > r.limits().max_record_len {
        return Err(ArchiveError::InvalidData {
            offset,
            reason: format!(
                "record body of {} bytes exceeds limit {}",
                body_len,
                r.limits().max_record_len
            ),
        });
    }
    let body = r.take(body_len)?;
    Ok((header, body))
}

/// Read one record into `node`.
///
/// The record is decoded with the current layout when its schema is the
/// current one (or newer, with a warning), and through
/// [`Node::read_back_level`] when it is older. A body that cannot be
/// decoded yields [`ArchiveError::UnreadableRecord`]; `node` may then hold
/// partially read values, and `r` is positioned on the next record.
///
/// Errors in the header or the length word are not record-local: the
/// stream cannot be resynchronised.
pub fn read_record<N: Node + ?Sized>(
    node: &mut N,
    r: &mut ArchiveReader<'_>,
) -> ArchiveResult<RecordHeader> {
    let (header, mut body) = read_frame(r)?;
    let class = node.class().clone();

    if header.class_name != class.name() {
        log::warn!(
            "[archive] record of class '{}' read into '{}', trying current layout",
            header.class_name,
            class.name()
        );
    }

    let unreadable = || ArchiveError::UnreadableRecord {
        class_name: header.class_name.clone(),
        schema: header.schema,
    };

    if header.schema < class.schema() {
        match node.read_back_level(header.schema, &mut body) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!(
                    "[archive] '{}' cannot read back-level schema {} (current {})",
                    class.name(),
                    header.schema,
                    class.schema()
                );
                return Err(unreadable());
            }
            Err(e) => {
                log::warn!(
                    "[archive] '{}' back-level schema {} failed: {}",
                    class.name(),
                    header.schema,
                    e
                );
                return Err(unreadable());
            }
        }
    } else {
        if header.schema > class.schema() {
            log::warn!(
                "[archive] '{}' record has newer schema {} (current {}), trying current layout",
                class.name(),
                header.schema,
                class.schema()
            );
        }
        if let Err(e) = read_fields(node, &mut body) {
            log::warn!("[archive] unreadable '{}' record: {}", header.class_name, e);
            return Err(unreadable());
        }
    }

    if !body.is_eof() {
        log::debug!(
            "[archive] '{}' record has {} trailing bytes",
            header.class_name,
            body.remaining()
        );
    }

    let base = node.base_mut();
    base.schema = class.schema();
    base.deleted = header.deleted;
    base.showing = header.showing;
    finish_parse_chain(node);
    Ok(header)
}

/// Skip the next record without decoding its body.
pub fn skip_record(r: &mut ArchiveReader<'_>) -> ArchiveResult<RecordHeader> {
    read_frame(r).map(|(header, _)| header)
}

/// Read the next record into a fresh instance of the class it names.
///
/// An unknown class name skips the record and reports
/// [`ArchiveError::UnknownClass`].
pub fn read_any(
    r: &mut ArchiveReader<'_>,
    registry: &ClassRegistry,
) -> ArchiveResult<Box<dyn Node>> {
    let class_name = r.peek_string()?;
    let mut node = match registry.create(&class_name) {
        Ok(node) => node,
        Err(_) => {
            skip_record(r)?;
            log::warn!("[archive] skipped record of unknown class '{}'", class_name);
            return Err(ArchiveError::UnknownClass(class_name));
        }
    };
    read_record(node.as_mut(), r)?;
    Ok(node)
}

/// Write every node as consecutive records.
pub fn write_all<'n, I>(nodes: I, w: &mut ArchiveWriter) -> ArchiveResult<usize>
where
    I: IntoIterator<Item = &'n dyn Node>,
{
    let mut count = 0;
    for node in nodes {
        write_record(node, w)?;
        count += 1;
    }
    Ok(count)
}

/// Result of reading a whole archive.
#[derive(Debug, Default)]
pub struct LoadedNodes {
    pub nodes: Vec<Box<dyn Node>>,
    /// Record-local failures, in stream order.
    pub skipped: Vec<ArchiveError>,
}

/// Read records until the end of the stream.
///
/// Record-local failures are collected in [`LoadedNodes::skipped`]; any other
/// error aborts the read.
pub fn read_all(r: &mut ArchiveReader<'_>, registry: &ClassRegistry) -> ArchiveResult<LoadedNodes> {
    let mut loaded = LoadedNodes::default();
    while !r.is_eof() {
        match read_any(r, registry) {
            Ok(node) => loaded.nodes.push(node),
            Err(e) if e.is_record_local() => loaded.skipped.push(e),
            Err(e) => return Err(e),
        }
    }
    Ok(loaded)
}

/// Write `nodes` to a file, replacing it.
pub fn save_nodes<'n, I>(path: impl AsRef<Path>, nodes: I) -> ArchiveResult<usize>
where
    I: IntoIterator<Item = &'n dyn Node>,
{
    let mut writer = ArchiveWriter::new();
    let count = write_all(nodes, &mut writer)?;
    std::fs::write(path.as_ref(), writer.as_bytes())?;
    log::debug!(
        "[archive] saved {} records ({} bytes) to {}",
        count,
        writer.offset(),
        path.as_ref().display()
    );
    Ok(count)
}

/// Read every record of a file through `registry`.
pub fn load_nodes(path: impl AsRef<Path>, registry: &ClassRegistry) -> ArchiveResult<LoadedNodes> {
    let bytes = std::fs::read(path.as_ref())?;
    read_all(&mut ArchiveReader::new(&bytes), registry)
}
