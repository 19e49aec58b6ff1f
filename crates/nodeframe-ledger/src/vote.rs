// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DAO vote: a transaction calling `vote(proposalID, supportsProposal)`.

use crate::calldata;
use crate::transaction::Transaction;
use nodeframe::class::{builtin_class, ClassDescriptor};
use nodeframe::node::finish_parse_chain;
use nodeframe::{own_fields, FieldTable, Node, NodeBase, TypeFlags};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone)]
pub struct Vote {
    class: Arc<ClassDescriptor>,
    pub transaction: Transaction,
    pub voter: String,
    pub proposal_id: u64,
    pub voted_yes: bool,
}

fn create() -> Box<dyn Node> {
    Box::new(Vote::new())
}

impl Vote {
    pub const CLASS_NAME: &'static str = "Vote";
    pub const SCHEMA: u32 = 1;

    pub fn new() -> Self {
        let mut vote = Self {
            class: Vote::class(),
            transaction: Transaction::new(),
            voter: String::new(),
            proposal_id: 0,
            voted_yes: false,
        };
        vote.base_mut().schema = Self::SCHEMA;
        vote
    }

    /// Build a vote from a transaction calling `vote`.
    ///
    /// Returns `None` if the call data is not a vote.
    pub fn from_transaction(transaction: Transaction) -> Option<Self> {
        if !transaction.is_function("vote") {
            return None;
        }
        let decoded = calldata::decode(&transaction.input)?;
        let mut args = decoded.split('|').skip(1);
        let proposal_id = args.next().and_then(|id| id.parse().ok())?;
        let voted_yes = args.next() == Some("Yea");

        let mut vote = Self {
            class: Vote::class(),
            voter: transaction.from.clone(),
            transaction,
            proposal_id,
            voted_yes,
        };
        vote.base_mut().schema = Self::SCHEMA;
        finish_parse_chain(&mut vote);
        log::debug!(
            "[vote] proposal {} {} by {}",
            vote.proposal_id,
            if vote.voted_yes { "Yea" } else { "Nay" },
            vote.voter
        );
        Some(vote)
    }

    fn field_table() -> &'static FieldTable<Vote> {
        static TABLE: OnceLock<FieldTable<Vote>> = OnceLock::new();
        TABLE.get_or_init(|| {
            FieldTable::new()
                .field(
                    "voter",
                    TypeFlags::TEXT | TypeFlags::ADDRESS,
                    |v: &Vote| &v.voter,
                    |v: &mut Vote| &mut v.voter,
                )
                .field(
                    "proposalID",
                    TypeFlags::NUMBER,
                    |v: &Vote| &v.proposal_id,
                    |v: &mut Vote| &mut v.proposal_id,
                )
                .field("votedYes", TypeFlags::BOOL, |v: &Vote| &v.voted_yes, |v: &mut Vote| &mut v.voted_yes)
        })
    }

    pub fn class() -> Arc<ClassDescriptor> {
        static CLASS: OnceLock<Arc<ClassDescriptor>> = OnceLock::new();
        builtin_class(&CLASS, || {
            let class = ClassDescriptor::builtin(
                Self::CLASS_NAME,
                std::mem::size_of::<Vote>(),
                Self::SCHEMA,
                Some(Transaction::class()),
                Some(create),
            );
            Vote::field_table().declare(&class);
            class
        })
    }
}

impl Default for Vote {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Vote {
    own_fields!();

    fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    fn base(&self) -> &NodeBase {
        self.transaction.base()
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        self.transaction.base_mut()
    }

    fn parent(&self) -> Option<&dyn Node> {
        Some(&self.transaction)
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Node> {
        Some(&mut self.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calldata::encode_word;
    use nodeframe::NodeExt;

    const VOTER: &str = "0x5c6cb5bbbd2dbb7bbb5a3b2c9f5e8ff7e2f6f5e1";

    fn vote_call(proposal: u64, yes: bool) -> Transaction {
        let mut tx = Transaction::new();
        tx.from = VOTER.to_string();
        tx.input = format!("0xc9d27afe{}{}", encode_word(proposal), encode_word(u64::from(yes)));
        tx
    }

    #[test]
    fn test_vote_from_transaction() {
        let vote = Vote::from_transaction(vote_call(59, true)).expect("vote");
        assert_eq!(vote.proposal_id, 59);
        assert!(vote.voted_yes);
        assert_eq!(vote.voter, VOTER);
        assert_eq!(vote.base().schema, Vote::SCHEMA);
        assert_eq!(vote.to_formatted("{proposalID}:{votedYes}:{function}"), "59:1:vote|059|Yea");
    }

    #[test]
    fn test_vote_with_id_above_i64_range() {
        let id = u64::MAX - 1;
        let vote = Vote::from_transaction(vote_call(id, false)).expect("vote");
        assert_eq!(vote.proposal_id, id);
        assert!(!vote.voted_yes);
        assert_eq!(vote.get_value_by_name("proposalID"), id.to_string());
    }

    #[test]
    fn test_non_vote_transaction_rejected() {
        let mut tx = vote_call(1, false);
        tx.input = "0xcc9ae3f6".to_string();
        assert!(Vote::from_transaction(tx).is_none());
    }

    #[test]
    fn test_vote_chain() {
        let class = Vote::class();
        assert!(class.is_derived_from(&Transaction::class()));
        assert_eq!(class.list_fields("|"), "voter|proposalID|votedYes");

        let mut vote = Vote::new();
        assert!(!vote.set_value_by_name("proposalID", "-3"));
        assert!(vote.set_value_by_name("proposalID", "3"));
        assert!(vote.set_value_by_name("gas", "21000"));
        assert!(vote.set_value_by_name("deleted", "1"));
        assert_eq!(vote.transaction.gas, 21_000);
        assert!(vote.is_deleted());
        assert_eq!(vote.get_value_by_name("proposalID"), "3");
        assert!(vote.canonical_json().ends_with(r#""isError":false,"voter":"","proposalID":3,"votedYes":false}"#));
    }
}
