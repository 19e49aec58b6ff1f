// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Call-data decoding for the known contract functions.
//!
//! Call data is `0x`, a 4-byte selector (8 hex chars) and 32-byte
//! parameter words (64 hex chars each). Decoded calls render as
//! `name|arg|arg...`:
//!
//! - addresses: `0x` + the word without leading zeros
//! - amounts: decimal
//! - proposal ids: decimal, padded to 3 digits
//! - vote flags: `Yea` / `Nay`

/// Hex chars per parameter word.
const WORD_LEN: usize = 64;

/// `0x` + selector.
const PREFIX_LEN: usize = 10;

/// Known functions and their selectors.
pub const SELECTORS: [(&str, &str); 18] = [
    ("approve", "0x095ea7b3"),
    ("payOut", "0x0221038a"),
    ("executeProposal", "0x237e9492"),
    ("transferFrom", "0x23b872dd"),
    ("unblockMe", "0x2632bf20"),
    ("transferWithoutReward", "0x4e10c3ee"),
    ("refund", "0x590e1ae3"),
    ("newProposal", "0x612e45a3"),
    ("halveMinQuorum", "0x78524b2e"),
    ("splitDAO", "0x82661dc4"),
    ("retrieveDAOReward", "0xa1da2fb9"),
    ("receiveEther", "0xa3912ec8"),
    ("transfer", "0xa9059cbb"),
    ("createTokenProxy", "0xbaac5300"),
    ("vote", "0xc9d27afe"),
    ("getMyReward", "0xcc9ae3f6"),
    ("transferFromWithoutReward", "0xdbde1988"),
    ("checkProposalCode", "0xeceb2945"),
];

/// Selector of a known function.
pub fn selector_of(function: &str) -> Option<&'static str> {
    SELECTORS
        .iter()
        .find(|(name, _)| *name == function)
        .map(|(_, selector)| *selector)
}

/// Known function called by `input`.
pub fn function_of(input: &str) -> Option<&'static str> {
    let head = input.get(..PREFIX_LEN)?;
    SELECTORS
        .iter()
        .find(|(_, selector)| selector.eq_ignore_ascii_case(head))
        .map(|(name, _)| *name)
}

/// True if `input` calls `function`.
pub fn calls(input: &str, function: &str) -> bool {
    selector_of(function).map_or(false, |selector| {
        input
            .get(..PREFIX_LEN)
            .map_or(false, |head| head.eq_ignore_ascii_case(selector))
    })
}

fn word(params: &str, index: usize) -> &str {
    let start = WORD_LEN.saturating_mul(index).min(params.len());
    let end = (start + WORD_LEN).min(params.len());
    &params[start..end]
}

fn grab_part(params: &str, index: usize) -> &str {
    word(params, index).trim_start_matches('0')
}

/// Leading hex digits of a word, saturating at `u64::MAX`.
fn grab_num(params: &str, index: usize) -> u64 {
    grab_part(params, index)
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(16).saturating_add(u64::from(digit))
        })
}

fn to_addr(params: &str, index: usize) -> String {
    format!("0x{}", grab_part(params, index))
}

fn to_num(params: &str, index: usize) -> String {
    grab_num(params, index).to_string()
}

fn to_num3(params: &str, index: usize) -> String {
    format!("{:03}", grab_num(params, index))
}

fn to_vote(params: &str, index: usize) -> &'static str {
    if grab_num(params, index) != 0 {
        "Yea"
    } else {
        "Nay"
    }
}

fn the_rest(params: &str, index: usize) -> &str {
    &params[WORD_LEN.saturating_mul(index).min(params.len())..]
}

/// Dynamic `string` argument whose head word is at `index`.
fn to_text(params: &str, index: usize) -> String {
    let offset_words = (grab_num(params, index) / 32) as usize;
    let len = grab_num(params, offset_words) as usize;
    let start = WORD_LEN
        .saturating_mul(offset_words.saturating_add(1))
        .min(params.len());
    let end = start
        .saturating_add(len.saturating_mul(2))
        .min(params.len());
    let bytes: Vec<u8> = params[start..end]
        .as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn parse_params(function: &str, params: &str) -> String {
    let args = match function {
        "approve" | "transfer" | "payOut" => vec![to_addr(params, 0), to_num(params, 1)],
        "splitDAO" => vec![to_num3(params, 0), to_addr(params, 1)],
        "createTokenProxy" => vec![to_addr(params, 0)],
        "transferFrom" => vec![
            to_addr(params, 0),
            to_addr(params, 1),
            to_num(params, 2),
        ],
        "vote" => vec![to_num3(params, 0), to_vote(params, 1).to_string()],
        "executeProposal" => vec![to_num3(params, 0), the_rest(params, 1).to_string()],
        "newProposal" => vec![
            to_addr(params, 0),
            to_num(params, 1),
            to_text(params, 2),
            to_num(params, 4),
            (grab_num(params, 5) != 0).to_string(),
        ],
        _ => Vec::new(),
    };

    let mut decoded = function.to_string();
    for arg in args {
        decoded.push('|');
        decoded.push_str(&arg);
    }
    decoded
}

/// Decode `input` into `name|arg|...`, or `None` if the selector is unknown.
pub fn decode(input: &str) -> Option<String> {
    if !input.is_ascii() || input.len() < PREFIX_LEN {
        return None;
    }
    let function = function_of(input)?;
    Some(parse_params(function, &input[PREFIX_LEN..]))
}

/// Encode a parameter word from a number. Used to build call data.
pub fn encode_word(value: u64) -> String {
    format!("{:064x}", value)
}

/// Encode a parameter word from a `0x` address.
pub fn encode_address(address: &str) -> String {
    let hex = address.trim_start_matches("0x");
    format!("{:0>64}", hex)
}
