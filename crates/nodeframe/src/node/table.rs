// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type field tables.
//!
//! A [`FieldTable`] maps each declared field name of a node type to a typed
//! slot inside the Rust struct. It is built once per type and drives
//! value-by-name access, archiving and the canonical JSON rendering, so the
//! three always agree on the field set and its order.
//!
//! Name lookup is two-stage: entries are bucketed by the lowercase first
//! character, then the full name must match exactly.

use crate::archive::{ArchiveReader, ArchiveResult, ArchiveWriter};
use crate::class::{ClassDescriptor, TypeFlags};
use crate::config::{FALSE_LITERAL, TRUE_LITERAL};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A value type that can live in a declared field.
pub trait FieldValue: Sized + Send + Sync + 'static {
    /// Text form used by get-by-name and formatting.
    fn render(&self) -> String;

    /// Parse the text form. `None` leaves the field untouched.
    fn parse(text: &str) -> Option<Self>;

    fn archive(&self, w: &mut ArchiveWriter) -> ArchiveResult<()>;

    fn unarchive(r: &mut ArchiveReader<'_>) -> ArchiveResult<Self>;

    fn to_json(&self, flags: TypeFlags) -> Value;
}

/// JSON form of a text value, typed by the field flags.
pub fn text_to_json(text: &str, flags: TypeFlags) -> Value {
    if flags.contains(TypeFlags::NUMBER) {
        if let Ok(n) = text.parse::<u64>() {
            return Value::from(n);
        }
        if let Ok(n) = text.parse::<i64>() {
            return Value::from(n);
        }
    }
    if flags.contains(TypeFlags::BOOL) {
        if let Some(b) = parse_bool(text) {
            return Value::Bool(b);
        }
    }
    Value::String(text.to_string())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "1" => Some(true),
        "0" => Some(false),
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

impl FieldValue for String {
    fn render(&self) -> String {
        self.clone()
    }

    fn parse(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn archive(&self, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        w.write_str(self)
    }

    fn unarchive(r: &mut ArchiveReader<'_>) -> ArchiveResult<Self> {
        r.read_string()
    }

    fn to_json(&self, flags: TypeFlags) -> Value {
        text_to_json(self, flags)
    }
}

impl FieldValue for bool {
    fn render(&self) -> String {
        let literal = if *self { TRUE_LITERAL } else { FALSE_LITERAL };
        literal.to_string()
    }

    fn parse(text: &str) -> Option<Self> {
        parse_bool(text)
    }

    fn archive(&self, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        w.write_bool(*self)
    }

    fn unarchive(r: &mut ArchiveReader<'_>) -> ArchiveResult<Self> {
        r.read_bool()
    }

    fn to_json(&self, _flags: TypeFlags) -> Value {
        Value::Bool(*self)
    }
}

/// Integer field values: decimal text, fixed-width little endian on disk.
macro_rules! impl_integer_value {
    ($type:ty, $write:ident, $read:ident) => {
        impl FieldValue for $type {
            fn render(&self) -> String {
                self.to_string()
            }

            fn parse(text: &str) -> Option<Self> {
                text.trim().parse().ok()
            }

            fn archive(&self, w: &mut ArchiveWriter) -> ArchiveResult<()> {
                w.$write(*self)
            }

            fn unarchive(r: &mut ArchiveReader<'_>) -> ArchiveResult<Self> {
                r.$read()
            }

            fn to_json(&self, _flags: TypeFlags) -> Value {
                Value::from(*self)
            }
        }
    };
}

impl_integer_value!(u32, write_u32, read_u32);
impl_integer_value!(i32, write_i32, read_i32);
impl_integer_value!(u64, write_u64, read_u64);
impl_integer_value!(i64, write_i64, read_i64);

/// Type-erased access to one field of `T`.
trait Slot<T>: Send + Sync {
    fn get(&self, node: &T) -> String;
    fn set(&self, node: &mut T, text: &str) -> bool;
    fn write(&self, node: &T, w: &mut ArchiveWriter) -> ArchiveResult<()>;
    fn read(&self, node: &mut T, r: &mut ArchiveReader<'_>) -> ArchiveResult<()>;
    fn to_json(&self, node: &T, flags: TypeFlags) -> Value;
}

struct StoredSlot<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T: 'static, V: FieldValue> Slot<T> for StoredSlot<T, V> {
    fn get(&self, node: &T) -> String {
        (self.get)(node).render()
    }

    fn set(&self, node: &mut T, text: &str) -> bool {
        match V::parse(text) {
            Some(value) => {
                *(self.get_mut)(node) = value;
                true
            }
            None => false,
        }
    }

    fn write(&self, node: &T, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        (self.get)(node).archive(w)
    }

    fn read(&self, node: &mut T, r: &mut ArchiveReader<'_>) -> ArchiveResult<()> {
        *(self.get_mut)(node) = V::unarchive(r)?;
        Ok(())
    }

    fn to_json(&self, node: &T, flags: TypeFlags) -> Value {
        (self.get)(node).to_json(flags)
    }
}

struct FieldEntry<T> {
    name: &'static str,
    flags: TypeFlags,
    hidden: bool,
    slot: Box<dyn Slot<T>>,
}

/// Name-to-position index shared by [`FieldTable`] and proto nodes.
///
/// Positions are bucketed by the lowercase first character of the name;
/// the caller resolves a position back to its name for the exact match.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameIndex {
    buckets: HashMap<char, Vec<usize>>,
}

fn bucket_key(name: &str) -> Option<char> {
    name.chars().next().map(|c| c.to_ascii_lowercase())
}

impl NameIndex {
    pub(crate) fn insert(&mut self, name: &str, position: usize) {
        if let Some(key) = bucket_key(name) {
            self.buckets.entry(key).or_default().push(position);
        }
    }

    pub(crate) fn find<'a>(&self, name: &str, name_at: impl Fn(usize) -> &'a str) -> Option<usize> {
        let bucket = self.buckets.get(&bucket_key(name)?)?;
        bucket.iter().copied().find(|&position| name_at(position) == name)
    }
}

/// Declared fields of node type `T`, in declaration order.
pub struct FieldTable<T: 'static> {
    entries: Vec<FieldEntry<T>>,
    index: NameIndex,
}

impl<T: 'static> Default for FieldTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: NameIndex::default(),
        }
    }
}

impl<T: 'static> FieldTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field stored in `T`.
    #[must_use]
    pub fn field<V: FieldValue>(
        mut self,
        name: &'static str,
        flags: TypeFlags,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        self.index.insert(name, self.entries.len());
        self.entries.push(FieldEntry {
            name,
            flags,
            hidden: false,
            slot: Box::new(StoredSlot { get, get_mut }),
        });
        self
    }

    /// Hide the most recently added field from default rendering.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.hidden = true;
        }
        self
    }

    fn lookup(&self, name: &str) -> Option<&FieldEntry<T>> {
        let position = self.index.find(name, |i| self.entries[i].name)?;
        self.entries.get(position)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn get(&self, node: &T, name: &str) -> Option<String> {
        self.lookup(name).map(|entry| entry.slot.get(node))
    }

    /// Parse `value` into the named field. `false` on miss or parse failure.
    pub fn set(&self, node: &mut T, name: &str, value: &str) -> bool {
        self.lookup(name)
            .map_or(false, |entry| entry.slot.set(node, value))
    }

    pub fn write(&self, node: &T, w: &mut ArchiveWriter) -> ArchiveResult<()> {
        for entry in &self.entries {
            entry.slot.write(node, w)?;
        }
        Ok(())
    }

    pub fn read(&self, node: &mut T, r: &mut ArchiveReader<'_>) -> ArchiveResult<()> {
        for entry in &self.entries {
            entry.slot.read(node, r)?;
        }
        Ok(())
    }

    /// Add every visible field to `map`. Visibility comes from `class`.
    pub fn to_json(&self, node: &T, class: &ClassDescriptor, map: &mut Map<String, Value>) {
        let declared = class.all_fields();
        for entry in &self.entries {
            let hidden = declared
                .iter()
                .find(|f| f.name() == entry.name)
                .map_or(entry.hidden, |f| f.is_hidden());
            if !hidden {
                map.insert(entry.name.to_string(), entry.slot.to_json(node, entry.flags));
            }
        }
    }

    /// Declare every field on `class`, in table order.
    pub fn declare(&self, class: &ClassDescriptor) {
        for entry in &self.entries {
            if class.declare_field(entry.name, entry.flags) && entry.hidden {
                class.hide_field(entry.name);
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
