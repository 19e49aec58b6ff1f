// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-level archive streams (little endian, bounds-checked).
//!
//! Strings are a `u32` length followed by UTF-8 bytes; bools are one byte.

use super::{ArchiveError, ArchiveResult};
use crate::config::ArchiveLimits;

/// Generate little-endian write methods for primitive types.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> ArchiveResult<()> {
            self.buffer.extend_from_slice(&value.to_le_bytes());
            Ok(())
        }
    };
}

/// Generate little-endian read methods for primitive types.
///
/// Each generated method checks the remaining length, copies the bytes and
/// advances the offset.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> ArchiveResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Growable archive writer.
#[derive(Debug, Default)]
pub struct ArchiveWriter {
    buffer: Vec<u8>,
}

/// Position of a length word reserved by [`ArchiveWriter::begin_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a record mark must be closed with end_record"]
pub struct RecordMark {
    length_at: usize,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_i64, i64);

    pub fn write_bool(&mut self, value: bool) -> ArchiveResult<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_str(&mut self, value: &str) -> ArchiveResult<()> {
        let len = u32::try_from(value.len()).map_err(|_| ArchiveError::WriteFailed {
            offset: self.buffer.len(),
            reason: format!("string of {} bytes exceeds u32 length", value.len()),
        })?;
        self.write_u32(len)?;
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Reserve a body length word; the body follows.
    pub fn begin_record(&mut self) -> ArchiveResult<RecordMark> {
        let length_at = self.buffer.len();
        self.write_u32(0)?;
        Ok(RecordMark { length_at })
    }

    /// Back-patch the body length reserved by `mark`.
    pub fn end_record(&mut self, mark: RecordMark) -> ArchiveResult<()> {
        let body_start = mark.length_at + 4;
        let body_len = self.buffer.len().saturating_sub(body_start);
        let len = u32::try_from(body_len).map_err(|_| ArchiveError::WriteFailed {
            offset: mark.length_at,
            reason: format!("record body of {} bytes exceeds u32 length", body_len),
        })?;
        self.buffer[mark.length_at..body_start].copy_from_slice(&len.to_le_bytes());
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Bounds-checked archive reader over a byte slice.
#[derive(Debug, Clone)]
pub struct ArchiveReader<'a> {
    buffer: &'a [u8],
    offset: usize,
    limits: ArchiveLimits,
}

impl<'a> ArchiveReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limits(buffer, ArchiveLimits::default())
    }

    pub fn with_limits(buffer: &'a [u8], limits: ArchiveLimits) -> Self {
        Self {
            buffer,
            offset: 0,
            limits,
        }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i64, i64, 8);

    pub fn read_bool(&mut self) -> ArchiveResult<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ArchiveError::InvalidData {
                offset,
                reason: format!("bool byte {:#04x}", other),
            }),
        }
    }

    pub fn read_string(&mut self) -> ArchiveResult<String> {
        let offset = self.offset;
        let len = self.read_u32()? as usize;
        if len > self.limits.max_string_len {
            return Err(ArchiveError::InvalidData {
                offset,
                reason: format!(
                    "string length {} exceeds limit {}",
                    len, self.limits.max_string_len
                ),
            });
        }
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| ArchiveError::InvalidData {
                offset,
                reason: format!("string is not UTF-8: {}", e),
            })
    }

    /// Read the next string without consuming it.
    pub fn peek_string(&self) -> ArchiveResult<String> {
        self.clone().read_string()
    }

    pub fn read_bytes(&mut self, len: usize) -> ArchiveResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or_else(|| ArchiveError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of archive".into(),
            })?;
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    /// Split off a reader over the next `len` bytes and skip past them.
    pub(crate) fn take(&mut self, len: usize) -> ArchiveResult<ArchiveReader<'a>> {
        let body = self.read_bytes(len)?;
        Ok(ArchiveReader::with_limits(body, self.limits))
    }

    pub fn limits(&self) -> ArchiveLimits {
        self.limits
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
