//! Walk a division tree into ordered subnet rows.

use crate::error::SubnetError;
use crate::models::{
    address_to_string, block_size, last_address, netmask_for, Branch, DivisionNode, Ipv4,
    NodePath, SubnetRow, MAX_LENGTH,
};
use std::collections::HashMap;

/// Rows of a division plus the child -> parent index used by join.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Leaf subnets in ascending address order.
    pub rows: Vec<SubnetRow>,
    /// Parent of every node except the root.
    pub parents: HashMap<NodePath, NodePath>,
}

impl Enumeration {
    pub fn parent_of(&self, path: NodePath) -> Option<NodePath> {
        self.parents.get(&path).copied()
    }

    /// Find a row by its `a.b.c.d/n` text.
    pub fn row_for_cidr(&self, cidr: &str) -> Option<&SubnetRow> {
        let block = Ipv4::new(cidr).ok()?;
        self.rows
            .iter()
            .find(|r| r.address == block.bits() && r.mask == block.mask)
    }
}

/// Fail if the tree splits beyond /32 when rooted at `base_mask`.
pub fn check_depth(root: &DivisionNode, base_mask: u8) -> Result<(), SubnetError> {
    let depth = root.depth();
    if base_mask > MAX_LENGTH || depth > u32::from(MAX_LENGTH - base_mask) {
        return Err(SubnetError::DivisionTooDeep {
            depth: depth.min(u32::from(u8::MAX)) as u8,
            mask: base_mask,
        });
    }
    Ok(())
}

/// List the leaf subnets of `root` under `base_address/base_mask`.
pub fn enumerate(
    root: &DivisionNode,
    base_address: u32,
    base_mask: u8,
) -> Result<Enumeration, SubnetError> {
    check_depth(root, base_mask)?;
    let mut out = Enumeration::default();
    walk(root, NodePath::root(), base_address, base_mask, &mut out);
    log::debug!(
        "enumerate({}/{base_mask}) -> {} rows",
        address_to_string(base_address),
        out.rows.len()
    );
    Ok(out)
}

fn walk(node: &DivisionNode, path: NodePath, address: u32, mask: u8, out: &mut Enumeration) {
    match node.children() {
        Some([lower, upper]) => {
            let lower_path = path.child(Branch::Lower);
            let upper_path = path.child(Branch::Upper);
            out.parents.insert(lower_path, path);
            out.parents.insert(upper_path, path);
            walk(lower, lower_path, address, mask + 1, out);
            let upper_address = (address as u64 + block_size(mask + 1)) as u32;
            walk(upper, upper_path, upper_address, mask + 1, out);
        }
        None => out.rows.push(leaf_row(address, mask, path)),
    }
}

/// Addressing details for a single block.
///
/// /32 is one host, /31 is a point-to-point pair with both addresses usable,
/// anything larger loses its network and broadcast address.
pub fn leaf_row(address: u32, mask: u8, path: NodePath) -> SubnetRow {
    let first = address;
    let last = last_address(address, mask);
    let (address_range, usable_range, host_count) = match mask {
        32 => {
            let single = address_to_string(first);
            (single.clone(), single, 1)
        }
        31 => {
            let range = format_range(first, last);
            (range.clone(), range, 2)
        }
        _ => (
            format_range(first, last),
            format_range(first.wrapping_add(1), last.wrapping_sub(1)),
            block_size(mask) - 2,
        ),
    };
    SubnetRow {
        address,
        mask,
        subnet_cidr: format!("{}/{}", address_to_string(address), mask),
        netmask: address_to_string(netmask_for(mask)),
        address_range,
        usable_range,
        host_count,
        path,
    }
}

fn format_range(first: u32, last: u32) -> String {
    format!("{} - {}", address_to_string(first), address_to_string(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::string_to_address;
    use proptest::prelude::*;

    fn addr(s: &str) -> u32 {
        string_to_address(s).unwrap()
    }

    #[test]
    fn test_single_leaf_16() {
        let root = DivisionNode::new_leaf();
        let result = enumerate(&root, addr("192.168.0.0"), 16).unwrap();
        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.subnet_cidr, "192.168.0.0/16");
        assert_eq!(row.netmask, "255.255.0.0");
        assert_eq!(row.address_range, "192.168.0.0 - 192.168.255.255");
        assert_eq!(row.usable_range, "192.168.0.1 - 192.168.255.254");
        assert_eq!(row.host_count, 65534);
        assert!(result.parents.is_empty(), "root has no parent");
    }

    #[test]
    fn test_divided_once() {
        let mut root = DivisionNode::new_leaf();
        root.divide();
        root.recompute_aggregates();
        let result = enumerate(&root, addr("192.168.0.0"), 16).unwrap();
        let cidrs: Vec<&str> = result.rows.iter().map(|r| r.subnet_cidr.as_str()).collect();
        assert_eq!(cidrs, vec!["192.168.0.0/17", "192.168.128.0/17"]);
        assert!(result.rows.iter().all(|r| r.host_count == 32766));
        assert_eq!(result.rows[0].netmask, "255.255.128.0");
        assert_eq!(result.parent_of(result.rows[1].path), Some(NodePath::root()));
    }

    #[test]
    fn test_mask_31() {
        let row = leaf_row(addr("10.0.0.0"), 31, NodePath::root());
        assert_eq!(row.address_range, "10.0.0.0 - 10.0.0.1");
        assert_eq!(row.usable_range, row.address_range);
        assert_eq!(row.host_count, 2);
    }

    #[test]
    fn test_mask_32() {
        let row = leaf_row(addr("10.0.0.5"), 32, NodePath::root());
        assert_eq!(row.subnet_cidr, "10.0.0.5/32");
        assert_eq!(row.address_range, "10.0.0.5");
        assert_eq!(row.usable_range, "10.0.0.5");
        assert_eq!(row.host_count, 1);
    }

    #[test]
    fn test_mask_0() {
        let row = leaf_row(0, 0, NodePath::root());
        assert_eq!(row.address_range, "0.0.0.0 - 255.255.255.255");
        assert_eq!(row.usable_range, "0.0.0.1 - 255.255.255.254");
        assert_eq!(row.host_count, 4294967294);
    }

    #[test]
    fn test_upper_half_of_whole_space() {
        let mut root = DivisionNode::new_leaf();
        root.divide();
        let result = enumerate(&root, 0, 0).unwrap();
        assert_eq!(result.rows[1].subnet_cidr, "128.0.0.0/1");
        assert_eq!(result.rows[1].address_range, "128.0.0.0 - 255.255.255.255");
    }

    #[test]
    fn test_too_deep() {
        let mut root = DivisionNode::new_leaf();
        root.divide();
        assert!(enumerate(&root, addr("10.0.0.0"), 31).is_ok());
        assert_eq!(
            enumerate(&root, addr("10.0.0.5"), 32).unwrap_err(),
            SubnetError::DivisionTooDeep { depth: 1, mask: 32 }
        );
    }

    #[test]
    fn test_row_for_cidr() {
        let mut root = DivisionNode::new_leaf();
        root.divide();
        let result = enumerate(&root, addr("10.0.0.0"), 8).unwrap();
        let row = result.row_for_cidr(" 10.128.0.0/9 ").unwrap();
        assert_eq!(row.path, NodePath::root().child(Branch::Upper));
        assert!(result.row_for_cidr("010.128.0.0/9").is_some());
        assert!(result.row_for_cidr("10.0.0.0/8").is_none());
        assert!(result.row_for_cidr("10.0.0.0").is_none());
    }

    fn arb_tree() -> impl Strategy<Value = DivisionNode> {
        Just(DivisionNode::new_leaf()).prop_recursive(8, 128, 2, |inner| {
            prop_oneof![
                1 => Just(DivisionNode::new_leaf()),
                2 => (inner.clone(), inner)
                    .prop_map(|(lower, upper)| DivisionNode::with_children(lower, upper)),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_rows_partition_base_block(
            tree in arb_tree(),
            address in any::<u32>(),
            mask in 0u8..=24,
        ) {
            let base = crate::models::network_address(address, mask);
            let result = enumerate(&tree, base, mask).unwrap();
            prop_assert_eq!(result.rows.len() as u64, tree.leaf_count());

            let mut next = base as u64;
            for row in &result.rows {
                prop_assert_eq!(row.address as u64, next, "gap or overlap at {}", row.subnet_cidr);
                next += block_size(row.mask);
            }
            prop_assert_eq!(next, base as u64 + block_size(mask));
        }
    }
}
