//! Portable state: everything needed to reload or share a division.

use crate::config::EXPORT_VERSION;
use crate::models::{address_to_string, DivisionNode, ExportRow, ShareQuery, SubnetRow};
use crate::processing::serialize_division;
use serde::{Deserialize, Serialize};

/// The three reload keys, repeated under `params` in exported JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StateParams {
    pub network: String,
    pub mask: u8,
    pub division: String,
}

/// Exported division. All fields are derived from network, mask and tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PortableState {
    pub version: u32,
    pub network: String,
    pub mask: u8,
    pub division: String,
    pub params: StateParams,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ExportRow>>,
}

impl PortableState {
    pub fn share_query(&self) -> ShareQuery {
        ShareQuery {
            network: self.network.clone(),
            mask: self.mask.to_string(),
            division: self.division.clone(),
        }
    }
}

/// Bundle a division for export. `rows` is the table snapshot, if any.
pub fn build_export_state(
    network: u32,
    mask: u8,
    root: &DivisionNode,
    rows: Option<&[SubnetRow]>,
) -> PortableState {
    let network = address_to_string(network);
    let division = serialize_division(root);
    let query = ShareQuery {
        network: network.clone(),
        mask: mask.to_string(),
        division: division.clone(),
    };
    PortableState {
        version: EXPORT_VERSION,
        params: StateParams {
            network: network.clone(),
            mask,
            division: division.clone(),
        },
        query: query.to_string(),
        rows: rows.map(|rows| rows.iter().map(ExportRow::from).collect()),
        network,
        mask,
        division,
    }
}
