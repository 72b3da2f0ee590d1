//! Compact text encoding of a division tree.
//!
//! The tree is written pre-order as binary digits (`1` = divided, `0` = leaf),
//! packed four bits per lowercase hex nibble, least significant bit first,
//! and prefixed with the digit count: `"<bits>.<hex>"`. A single leaf is `"1.0"`.

use crate::error::SubnetError;
use crate::models::{DivisionNode, MAX_LENGTH};
use regex::Regex;
use std::sync::OnceLock;

static ENCODED_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_encoded_regex() -> &'static Regex {
    ENCODED_REGEX.get_or_init(|| Regex::new(r"^(\d+)\.([0-9a-fA-F]+)$").expect("Invalid Regex"))
}

/// Pre-order binary digits of a tree.
pub fn to_binary(root: &DivisionNode) -> Vec<bool> {
    fn walk(node: &DivisionNode, out: &mut Vec<bool>) {
        match node.children() {
            Some([lower, upper]) => {
                out.push(true);
                walk(lower, out);
                walk(upper, out);
            }
            None => out.push(false),
        }
    }
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

/// Pack binary digits as `"<len>.<hex>"`.
pub fn binary_to_ascii(bits: &[bool]) -> String {
    let hex: String = bits
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &bit)| acc | (u32::from(bit) << i));
            std::char::from_digit(value, 16).unwrap_or('0')
        })
        .collect();
    format!("{}.{}", bits.len(), hex)
}

/// Unpack `"<len>.<hex>"` into exactly `len` binary digits.
///
/// Hex digits beyond what `len` needs are ignored. Missing hex digits read as
/// zero, so `"5.3"` is the same as `"5.30"`.
pub fn ascii_to_binary(ascii: &str) -> Result<Vec<bool>, SubnetError> {
    let caps = get_encoded_regex()
        .captures(ascii)
        .ok_or_else(|| SubnetError::InvalidEncoding(format!("malformed {ascii:?}")))?;
    let len: usize = caps[1]
        .parse()
        .map_err(|_| SubnetError::InvalidEncoding(format!("bad length in {ascii:?}")))?;
    let hex = caps[2].as_bytes();
    // Past the given digits every bit is 0, and a complete tree with at most
    // 4 * hex.len() splits ends within 8 * hex.len() + 1 digits.
    let len = len.min(hex.len() * 8 + 1);
    let bits = (0..len)
        .map(|i| {
            let nibble = hex
                .get(i / 4)
                .and_then(|b| (*b as char).to_digit(16))
                .unwrap_or(0);
            nibble & (1 << (i % 4)) != 0
        })
        .collect();
    Ok(bits)
}

/// Rebuild a tree from pre-order binary digits.
///
/// Trees deeper than 32 levels cannot describe IPv4 blocks and are rejected,
/// as is input that ends before the tree is complete. Trailing digits are ignored.
pub fn tree_from_binary(bits: &[bool]) -> Result<DivisionNode, SubnetError> {
    fn build(bits: &[bool], pos: &mut usize, depth: u8) -> Result<DivisionNode, SubnetError> {
        let bit = *bits.get(*pos).ok_or_else(|| {
            SubnetError::InvalidEncoding(format!("truncated after {} digits", bits.len()))
        })?;
        *pos += 1;
        if !bit {
            return Ok(DivisionNode::new_leaf());
        }
        if depth >= MAX_LENGTH {
            return Err(SubnetError::InvalidEncoding(format!(
                "deeper than {MAX_LENGTH} levels"
            )));
        }
        let lower = build(bits, pos, depth + 1)?;
        let upper = build(bits, pos, depth + 1)?;
        Ok(DivisionNode::with_children(lower, upper))
    }

    let mut pos = 0;
    let root = build(bits, &mut pos, 0)?;
    if pos < bits.len() {
        log::debug!("tree_from_binary ignored {} trailing digits", bits.len() - pos);
    }
    Ok(root)
}

/// Encode a tree for a share link or export.
pub fn serialize_division(root: &DivisionNode) -> String {
    let encoded = binary_to_ascii(&to_binary(root));
    log::debug!("serialize_division() -> {encoded}");
    encoded
}

/// Decode a division string strictly, with aggregates recomputed.
pub fn decode(ascii: &str) -> Result<DivisionNode, SubnetError> {
    let mut root = tree_from_binary(&ascii_to_binary(ascii)?)?;
    root.recompute_aggregates();
    Ok(root)
}

/// Decode a division string, falling back to a single leaf when it is broken.
///
/// A broken share link degrades to "no divisions" instead of failing.
pub fn deserialize_division(ascii: &str) -> DivisionNode {
    match decode(ascii) {
        Ok(root) => root,
        Err(e) => {
            log::warn!("{e}; using an undivided network");
            DivisionNode::new_leaf()
        }
    }
}
