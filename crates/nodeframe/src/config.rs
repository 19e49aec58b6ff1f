// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Framework constants and archive limits.
//!
//! Every magic value the framework depends on lives here.
//! **NEVER hardcode these elsewhere!**
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time constants (root class, ordinals, markers)
//! - **Level 2 (Dynamic)**: [`ArchiveLimits`] for per-reader bounds
//!
//! # Example
//!
//! ```
//! use nodeframe::config::{ArchiveLimits, MAX_STRING_LEN};
//!
//! let limits = ArchiveLimits::default().with_max_string_len(1024);
//! assert!(limits.max_string_len < MAX_STRING_LEN);
//! ```

// =======================================================================
// Class registry
// =======================================================================

/// Name of the root class every node type derives from.
pub const ROOT_CLASS_NAME: &str = "Node";

/// Schema tag of the root class.
pub const ROOT_SCHEMA: u32 = 1;

/// Ordinal base for declared fields.
///
/// The first field of the root class gets `FIRST_FIELD_ORDINAL + 1`; every
/// later declaration continues above the highest ordinal of its ancestry.
pub const FIRST_FIELD_ORDINAL: i32 = 1000;

/// Schema tag carried by proto (dynamic) descriptors.
pub const PROTO_SCHEMA: u32 = 0xFFFA;

// =======================================================================
// Formatting
// =======================================================================

/// Value rendered for the `null` placeholder.
pub const NULL_MARKER: &str = "<x>";

/// Opening markup of the warning chunk for an unresolved placeholder.
pub const FIELD_NOT_FOUND_OPEN: &str = "<span class=warning>Field not found: [{";

/// Closing markup of the warning chunk for an unresolved placeholder.
pub const FIELD_NOT_FOUND_CLOSE: &str = "}]</span>\n";

/// Rendering of `true` in chunk output.
pub const TRUE_LITERAL: &str = "1";

/// Rendering of `false` in chunk output.
pub const FALSE_LITERAL: &str = "0";

// =======================================================================
// Archive
// =======================================================================

/// Largest string an archive reader accepts by default (16 MiB).
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Largest record body an archive reader accepts by default (64 MiB).
pub const MAX_RECORD_LEN: usize = 64 * 1024 * 1024;

/// Bounds applied by an archive reader before it allocates.
///
/// Corrupted length words are rejected as invalid data instead of turning
/// into multi-gigabyte allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    /// Maximum accepted string length in bytes.
    pub max_string_len: usize,
    /// Maximum accepted record body length in bytes.
    pub max_record_len: usize,
}

impl ArchiveLimits {
    /// Override the maximum string length.
    #[must_use]
    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    /// Override the maximum record body length.
    #[must_use]
    pub fn with_max_record_len(mut self, len: usize) -> Self {
        self.max_record_len = len;
        self
    }
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_string_len: MAX_STRING_LEN,
            max_record_len: MAX_RECORD_LEN,
        }
    }
}
