// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field metadata for class descriptors.

use std::fmt;

/// TypeFlags - field data type and display flags.
///
/// The low byte carries the data type, the second byte display hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct TypeFlags(pub u32);

impl TypeFlags {
    /// Free text
    pub const TEXT: Self = Self(0x0001);

    /// Integer number
    pub const NUMBER: Self = Self(0x0002);

    /// Boolean
    pub const BOOL: Self = Self(0x0004);

    /// Hex-encoded bytes or hash
    pub const HASH: Self = Self(0x0008);

    /// Address-like identifier
    pub const ADDRESS: Self = Self(0x0010);

    /// Display hint: render as a label
    pub const LABEL: Self = Self(0x0100);

    /// Empty flags
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check if flag is set
    pub const fn contains(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    /// Combine two flag sets.
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Parse a type keyword used in proto schema documents.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "text" | "string" => Some(Self::TEXT),
            "number" | "int" | "uint" => Some(Self::NUMBER),
            "bool" | "boolean" => Some(Self::BOOL),
            "hash" => Some(Self::HASH),
            "address" => Some(Self::ADDRESS),
            _ => None,
        }
    }
}

impl std::ops::BitOr for TypeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

/// Metadata for one named field of a class.
///
/// Immutable once appended to its class, except for the `hidden` flag.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    label: String,
    format_hint: String,
    type_flags: TypeFlags,
    hidden: bool,
    ordinal: i32,
}

impl FieldDescriptor {
    /// Create a visible field whose label is its name.
    pub fn new(name: impl Into<String>, type_flags: TypeFlags, ordinal: i32) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            format_hint: String::new(),
            type_flags,
            hidden: false,
            ordinal,
        }
    }

    /// Set a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set a format hint.
    #[must_use]
    pub fn with_format_hint(mut self, hint: impl Into<String>) -> Self {
        self.format_hint = hint.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn format_hint(&self) -> &str {
        &self.format_hint
    }

    pub fn type_flags(&self) -> TypeFlags {
        self.type_flags
    }

    /// Stable externally visible field id.
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type_flags", &format_args!("{:#06x}", self.type_flags.0))
            .field("hidden", &self.hidden)
            .field("ordinal", &self.ordinal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_contains() {
        let flags = TypeFlags::NUMBER | TypeFlags::LABEL;
        assert!(flags.contains(TypeFlags::NUMBER));
        assert!(flags.contains(TypeFlags::LABEL));
        assert!(!flags.contains(TypeFlags::TEXT));
        assert!(!TypeFlags::empty().contains(TypeFlags::BOOL));
    }

    #[test]
    fn test_flags_from_keyword() {
        assert_eq!(TypeFlags::from_keyword("text"), Some(TypeFlags::TEXT));
        assert_eq!(TypeFlags::from_keyword("number"), Some(TypeFlags::NUMBER));
        assert_eq!(TypeFlags::from_keyword("bool"), Some(TypeFlags::BOOL));
        assert_eq!(TypeFlags::from_keyword("float"), None);
    }

    #[test]
    fn test_field_defaults() {
        let field = FieldDescriptor::new("name", TypeFlags::TEXT, 1003);
        assert_eq!(field.name(), "name");
        assert_eq!(field.label(), "name");
        assert_eq!(field.format_hint(), "");
        assert_eq!(field.ordinal(), 1003);
        assert!(!field.is_hidden());

        let labelled = field.with_label("Name").with_format_hint("w:20");
        assert_eq!(labelled.label(), "Name");
        assert_eq!(labelled.format_hint(), "w:20");
    }
}
