// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wei amounts rendered as ether.

/// Decimal places between wei and ether.
pub const WEI_DECIMALS: usize = 18;

/// Render a decimal wei amount as ether.
///
/// The amount is zero-padded to at least 18 digits, a decimal point is put
/// 18 digits from the right and leading zeros are stripped. All 18
/// fractional digits are kept.
///
/// ```
/// use nodeframe_ledger::ether::wei_to_ether;
///
/// assert_eq!(wei_to_ether("1500000000000000000"), "1.500000000000000000");
/// assert_eq!(wei_to_ether("42"), "0.000000000000000042");
/// ```
pub fn wei_to_ether(wei: &str) -> String {
    if !wei.is_ascii() {
        return wei.to_string();
    }
    let padded = format!("{:0>width$}", wei, width = WEI_DECIMALS);
    let split = padded.len() - WEI_DECIMALS;
    let (whole, fraction) = padded.split_at(split);
    let whole = whole.trim_start_matches('0');
    if whole.is_empty() {
        format!("0.{}", fraction)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ether() {
        assert_eq!(wei_to_ether("1000000000000000000"), "1.000000000000000000");
        assert_eq!(
            wei_to_ether("123000000000000000000"),
            "123.000000000000000000"
        );
    }

    #[test]
    fn test_sub_ether_gets_leading_zero() {
        assert_eq!(wei_to_ether("0"), "0.000000000000000000");
        assert_eq!(wei_to_ether(""), "0.000000000000000000");
        assert_eq!(wei_to_ether("500000000000000000"), "0.500000000000000000");
    }

    #[test]
    fn test_leading_zeros_stripped() {
        assert_eq!(wei_to_ether("0001000000000000000000"), "1.000000000000000000");
    }
}
