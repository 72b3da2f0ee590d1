//! Subnet rows produced by walking a division tree.

use super::NodePath;
use crate::error::SubnetError;
use serde::{Deserialize, Serialize};

/// One leaf of a division, with its addressing details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetRow {
    /// First address of the block.
    pub address: u32,
    /// Prefix length of the block.
    pub mask: u8,
    /// `a.b.c.d/n`.
    pub subnet_cidr: String,
    /// Dotted netmask.
    pub netmask: String,
    /// `first - last`, or a single address for a /32.
    pub address_range: String,
    /// Range with network and broadcast removed where they apply.
    pub usable_range: String,
    /// Number of usable hosts.
    pub host_count: u64,
    /// Position of the leaf in the tree.
    pub path: NodePath,
}

/// Flattened row as it appears in exported files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub subnet: String,
    pub netmask: String,
    pub range: String,
    pub usable: String,
    pub hosts: u64,
}

impl From<&SubnetRow> for ExportRow {
    fn from(row: &SubnetRow) -> Self {
        ExportRow {
            subnet: row.subnet_cidr.clone(),
            netmask: row.netmask.clone(),
            range: row.address_range.clone(),
            usable: row.usable_range.clone(),
            hosts: row.host_count,
        }
    }
}

/// Optional table columns. The subnet column is always shown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnVisibility {
    pub netmask: bool,
    pub range: bool,
    pub usable: bool,
    pub hosts: bool,
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        ColumnVisibility {
            netmask: false,
            range: true,
            usable: true,
            hosts: true,
        }
    }
}

impl ColumnVisibility {
    /// Parse a comma separated column list such as `"netmask,hosts"`.
    ///
    /// Only the listed columns are shown.
    pub fn from_list(list: &str) -> Result<ColumnVisibility, SubnetError> {
        let mut visible = ColumnVisibility {
            netmask: false,
            range: false,
            usable: false,
            hosts: false,
        };
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "netmask" => visible.netmask = true,
                "range" => visible.range = true,
                "usable" | "useable" => visible.usable = true,
                "hosts" => visible.hosts = true,
                "subnet" => {}
                other => {
                    return Err(SubnetError::UnsupportedFormat(format!(
                        "unknown column {other:?}"
                    )))
                }
            }
        }
        Ok(visible)
    }
}
