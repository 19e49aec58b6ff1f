// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Format string lexer.
//!
//! ```text
//! Item: {name}[ ({note})] x{count}
//! ^^^^^^ literal
//!       ^^^^^^ placeholder
//!             ^^^^^^^^^^^ optional group
//! ```

/// One unit of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Copied verbatim.
    Literal(&'a str),
    /// `{name}`, resolved through the node's chain.
    Field(&'a str),
    /// `[...]` holding at least one placeholder. Emitted only when one of
    /// its placeholders resolves to a non-empty value.
    Group(Vec<Chunk<'a>>),
}

struct ChunkLexer<'a> {
    input: &'a str,
    pos: usize,
    in_group: bool,
}

impl<'a> ChunkLexer<'a> {
    fn new(input: &'a str, in_group: bool) -> Self {
        Self {
            input,
            pos: 0,
            in_group,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_special(&self, ch: char) -> bool {
        ch == '{' || (ch == '[' && !self.in_group)
    }

    fn next_chunk(&mut self) -> Option<Chunk<'a>> {
        let rest = self.rest();
        let first = rest.chars().next()?;

        if first == '{' {
            return Some(match rest[1..].find('}') {
                Some(end) => {
                    self.pos += end + 2;
                    Chunk::Field(&rest[1..=end])
                }
                None => {
                    self.pos = self.input.len();
                    Chunk::Literal(rest)
                }
            });
        }

        if first == '[' && !self.in_group {
            if let Some(end) = rest[1..].find(']') {
                let whole = &rest[..end + 2];
                self.pos += end + 2;
                let inner = parse_chunks(&rest[1..=end], true);
                if inner.iter().any(|c| matches!(c, Chunk::Field(_))) {
                    return Some(Chunk::Group(inner));
                }
                return Some(Chunk::Literal(whole));
            }
            self.pos += 1;
            return Some(Chunk::Literal("["));
        }

        let len = rest
            .char_indices()
            .skip(1)
            .find(|&(_, ch)| self.is_special(ch))
            .map_or(rest.len(), |(index, _)| index);
        self.pos += len;
        Some(Chunk::Literal(&rest[..len]))
    }
}

fn parse_chunks(input: &str, in_group: bool) -> Vec<Chunk<'_>> {
    let mut lexer = ChunkLexer::new(input, in_group);
    let mut chunks = Vec::new();
    while let Some(chunk) = lexer.next_chunk() {
        chunks.push(chunk);
    }
    chunks
}

/// Split a format string into chunks, left to right.
///
/// Never fails: anything that is not a well-formed placeholder or group is
/// literal text.
pub fn parse_format(input: &str) -> Vec<Chunk<'_>> {
    parse_chunks(input, false)
}
