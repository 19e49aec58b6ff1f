// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Versioned binary archives of nodes.
//!
//! An archive is a sequence of records. Each record starts with a header
//! (class name, schema tag, `deleted`, `showing`), followed by a `u32` body
//! length and the body: every declared field of the class chain, parent
//! fields first, in declaration order.
//!
//! A record whose body cannot be decoded is reported as
//! [`ArchiveError::UnreadableRecord`]. The reader is then positioned at the
//! start of the next record, so callers may keep reading.

mod record;
mod stream;

pub use record::{
    load_nodes, read_all, read_any, read_record, save_nodes, skip_record, write_all,
    write_record, LoadedNodes, RecordHeader,
};
pub use stream::{ArchiveReader, ArchiveWriter, RecordMark};

use std::fmt;

/// Direction-tagged archive handle passed to [`NodeExt::serialize`].
///
/// [`NodeExt::serialize`]: crate::node::NodeExt::serialize
pub enum Archive<'r, 'a> {
    Reading(&'r mut ArchiveReader<'a>),
    Writing(&'r mut ArchiveWriter),
}

impl Archive<'_, '_> {
    pub fn is_reading(&self) -> bool {
        matches!(self, Archive::Reading(_))
    }
}

/// Archive errors.
#[derive(Debug)]
pub enum ArchiveError {
    ReadFailed { offset: usize, reason: String },
    WriteFailed { offset: usize, reason: String },
    InvalidData { offset: usize, reason: String },
    /// The record was skipped; the stream sits on the next record.
    UnreadableRecord { class_name: String, schema: u32 },
    /// No class is registered for the record; the record was skipped.
    UnknownClass(String),
    Io(std::io::Error),
}

impl ArchiveError {
    /// True if only the current record was lost and reading may continue.
    pub fn is_record_local(&self) -> bool {
        matches!(
            self,
            Self::UnreadableRecord { .. } | Self::UnknownClass(_)
        )
    }
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            Self::WriteFailed { offset, reason } => {
                write!(f, "write failed at offset {}: {}", offset, reason)
            }
            Self::InvalidData { offset, reason } => {
                write!(f, "invalid data at offset {}: {}", offset, reason)
            }
            Self::UnreadableRecord { class_name, schema } => {
                write!(f, "unreadable '{}' record (schema {})", class_name, schema)
            }
            Self::UnknownClass(name) => write!(f, "no class registered for '{}'", name),
            Self::Io(e) => write!(f, "archive I/O: {}", e),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type ArchiveResult<T> = core::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        let err = ArchiveError::ReadFailed {
            offset: 4,
            reason: "unexpected end of archive".into(),
        };
        assert_eq!(
            err.to_string(),
            "read failed at offset 4: unexpected end of archive"
        );

        let err = ArchiveError::UnreadableRecord {
            class_name: "Transaction".into(),
            schema: 1,
        };
        assert_eq!(err.to_string(), "unreadable 'Transaction' record (schema 1)");
    }

    #[test]
    fn test_record_local_errors() {
        assert!(ArchiveError::UnknownClass("X".into()).is_record_local());
        assert!(ArchiveError::UnreadableRecord {
            class_name: "X".into(),
            schema: 3
        }
        .is_record_local());
        assert!(!ArchiveError::InvalidData {
            offset: 0,
            reason: String::new()
        }
        .is_record_local());
    }
}
