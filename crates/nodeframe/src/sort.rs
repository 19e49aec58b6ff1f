// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic ordering of nodes by field values.
//!
//! Keys are resolved with [`NodeExt::get_value_by_name`] and compared
//! byte-wise. A missing field resolves to the same placeholder on both
//! sides, so it compares equal.

use crate::node::{Node, NodeExt};
use std::cmp::Ordering;

/// Compare two nodes on `k1`, then on `k2` if given and `k1` ties.
pub fn compare_by<A, B>(k1: &str, k2: Option<&str>, a: &A, b: &B) -> Ordering
where
    A: Node + ?Sized,
    B: Node + ?Sized,
{
    let primary = a.get_value_by_name(k1).cmp(&b.get_value_by_name(k1));
    match (primary, k2) {
        (Ordering::Equal, Some(k2)) => a.get_value_by_name(k2).cmp(&b.get_value_by_name(k2)),
        _ => primary,
    }
}

/// Sign form of [`compare_by`]: -1, 0 or 1.
pub fn compare<A, B>(k1: &str, k2: Option<&str>, a: &A, b: &B) -> i32
where
    A: Node + ?Sized,
    B: Node + ?Sized,
{
    compare_by(k1, k2, a, b) as i32
}

pub fn compare_by_name<A: Node + ?Sized, B: Node + ?Sized>(a: &A, b: &B) -> Ordering {
    compare_by("name", None, a, b)
}

pub fn compare_by_id<A: Node + ?Sized, B: Node + ?Sized>(a: &A, b: &B) -> Ordering {
    compare_by("id", None, a, b)
}

/// Stable sort of concrete nodes on `(k1, k2)`.
pub fn sort_nodes<N: Node>(nodes: &mut [N], k1: &str, k2: Option<&str>) {
    nodes.sort_by(|a, b| compare_by(k1, k2, a, b));
}

/// Stable sort of boxed nodes on `(k1, k2)`.
pub fn sort_boxed(nodes: &mut [Box<dyn Node>], k1: &str, k2: Option<&str>) {
    nodes.sort_by(|a, b| compare_by(k1, k2, &**a, &**b));
}

/// Same class and same canonical rendering.
pub fn is_duplicate<A: Node + ?Sized, B: Node + ?Sized>(a: &A, b: &B) -> bool {
    a.class().name() == b.class().name() && a.canonical_json() == b.canonical_json()
}
