// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ledger transaction entity.
//!
//! Besides its declared fields a transaction answers four computed
//! placeholders:
//!
//! | Placeholder | Value |
//! |-------------|-------|
//! | `{ether}` | `value` converted from wei |
//! | `{function}` | decoded call data, or a single space |
//! | `{hitLimit}` | `TRUE` when all supplied gas was used |
//! | `{inputLen}` | length of the raw call data |

use crate::calldata;
use crate::ether::wei_to_ether;
use nodeframe::class::{builtin_class, root_class, ClassDescriptor};
use nodeframe::{own_fields, ArchiveReader, ArchiveResult, FieldTable, Node, NodeBase, TypeFlags};
use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

/// One ledger transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    class: Arc<ClassDescriptor>,
    base: NodeBase,
    pub hash: String,
    pub block_number: u64,
    pub transaction_index: u64,
    pub time_stamp: u64,
    pub from: String,
    pub to: String,
    /// Amount in wei, kept as decimal text (may exceed 64 bits).
    pub value: String,
    pub gas: u64,
    pub gas_used: u64,
    pub gas_price: u64,
    pub input: String,
    pub nonce: u64,
    pub is_error: bool,
}

fn create() -> Box<dyn Node> {
    Box::new(Transaction::new())
}

impl Transaction {
    pub const CLASS_NAME: &'static str = "Transaction";

    /// Schema 2 added `gasUsed` and `isError`.
    pub const SCHEMA: u32 = 2;

    pub fn new() -> Self {
        Self {
            class: Transaction::class(),
            base: NodeBase::new(Self::SCHEMA),
            hash: String::new(),
            block_number: 0,
            transaction_index: 0,
            time_stamp: 0,
            from: String::new(),
            to: String::new(),
            value: String::new(),
            gas: 0,
            gas_used: 0,
            gas_price: 0,
            input: String::new(),
            nonce: 0,
            is_error: false,
        }
    }

    fn field_table() -> &'static FieldTable<Transaction> {
        static TABLE: OnceLock<FieldTable<Transaction>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let hash = TypeFlags::TEXT | TypeFlags::HASH;
            let address = TypeFlags::TEXT | TypeFlags::ADDRESS;
            FieldTable::new()
                .field("hash", hash, |t: &Transaction| &t.hash, |t: &mut Transaction| &mut t.hash)
                .field(
                    "blockNumber",
                    TypeFlags::NUMBER,
                    |t: &Transaction| &t.block_number,
                    |t: &mut Transaction| &mut t.block_number,
                )
                .field(
                    "transactionIndex",
                    TypeFlags::NUMBER,
                    |t: &Transaction| &t.transaction_index,
                    |t: &mut Transaction| &mut t.transaction_index,
                )
                .field(
                    "timeStamp",
                    TypeFlags::NUMBER,
                    |t: &Transaction| &t.time_stamp,
                    |t: &mut Transaction| &mut t.time_stamp,
                )
                .field("from", address, |t: &Transaction| &t.from, |t: &mut Transaction| &mut t.from)
                .field("to", address, |t: &Transaction| &t.to, |t: &mut Transaction| &mut t.to)
                .field(
                    "value",
                    TypeFlags::TEXT,
                    |t: &Transaction| &t.value,
                    |t: &mut Transaction| &mut t.value,
                )
                .field("gas", TypeFlags::NUMBER, |t: &Transaction| &t.gas, |t: &mut Transaction| &mut t.gas)
                .field(
                    "gasUsed",
                    TypeFlags::NUMBER,
                    |t: &Transaction| &t.gas_used,
                    |t: &mut Transaction| &mut t.gas_used,
                )
                .field(
                    "gasPrice",
                    TypeFlags::NUMBER,
                    |t: &Transaction| &t.gas_price,
                    |t: &mut Transaction| &mut t.gas_price,
                )
                .field("input", hash, |t: &Transaction| &t.input, |t: &mut Transaction| &mut t.input)
                .field("nonce", TypeFlags::NUMBER, |t: &Transaction| &t.nonce, |t: &mut Transaction| &mut t.nonce)
                .field(
                    "isError",
                    TypeFlags::BOOL,
                    |t: &Transaction| &t.is_error,
                    |t: &mut Transaction| &mut t.is_error,
                )
        })
    }

    pub fn class() -> Arc<ClassDescriptor> {
        static CLASS: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
        builtin_class(&CLASS, || {
            let class = ClassDescriptor::builtin(
                Self::CLASS_NAME,
                std::mem::size_of::<Transaction>(),
                Self::SCHEMA,
                Some(root_class()),
                Some(create),
            );
            Transaction::field_table().declare(&class);
            class
        })
    }

    /// Decoded call data, `None` for plain transfers and unknown selectors.
    pub fn function(&self) -> Option<String> {
        calldata::decode(&self.input)
    }

    /// `value` rendered in ether.
    pub fn ether(&self) -> String {
        wei_to_ether(&self.value)
    }

    /// True if the transaction consumed all of its gas.
    pub fn hit_limit(&self) -> bool {
        self.gas == self.gas_used
    }

    /// True if the call data invokes `function`.
    ///
    /// `none` matches transactions whose call data decodes to no known
    /// function (plain transfers and unknown selectors).
    pub fn is_function(&self, function: &str) -> bool {
        match function {
            "" => false,
            "none" => calldata::decode(&self.input).is_none(),
            _ => calldata::calls(&self.input, function),
        }
    }

    /// Order used when writing transaction archives: timestamp, sender,
    /// nonce, then hash.
    pub fn compare_for_write(&self, other: &Transaction) -> Ordering {
        self.time_stamp
            .cmp(&other.time_stamp)
            .then_with(|| self.from.cmp(&other.from))
            .then_with(|| self.nonce.cmp(&other.nonce))
            .then_with(|| self.hash.cmp(&other.hash))
    }

    fn read_schema_1(&mut self, r: &mut ArchiveReader<'_>) -> ArchiveResult<()> {
        self.hash = r.read_string()?;
        self.block_number = r.read_u64()?;
        self.transaction_index = r.read_u64()?;
        self.time_stamp = r.read_u64()?;
        self.from = r.read_string()?;
        self.to = r.read_string()?;
        self.value = r.read_string()?;
        self.gas = r.read_u64()?;
        self.gas_price = r.read_u64()?;
        self.input = r.read_string()?;
        self.nonce = r.read_u64()?;
        self.gas_used = self.gas;
        self.is_error = false;
        Ok(())
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Transaction {
    own_fields!();

    fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn custom_chunk(&self, name: &str) -> Option<String> {
        match name {
            "ether" => Some(self.ether()),
            "function" => Some(self.function().unwrap_or_else(|| " ".to_string())),
            "hitLimit" => Some(if self.hit_limit() { "TRUE" } else { "FALSE" }.to_string()),
            "inputLen" => Some(self.input.len().to_string()),
            _ => None,
        }
    }

    fn read_back_level(&mut self, schema: u32, r: &mut ArchiveReader<'_>) -> ArchiveResult<bool> {
        if schema != 1 {
            return Ok(false);
        }
        self.read_schema_1(r)?;
        Ok(true)
    }
}
