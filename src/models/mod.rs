//! Domain models for subnet division.
//!
//! - [`Ipv4`] and the address arithmetic helpers
//! - [`DivisionNode`] - the binary division tree, addressed by [`NodePath`]
//! - [`SubnetRow`] - one leaf subnet with its ranges and host count
//! - [`ShareQuery`] - the `network`/`mask`/`division` triple used for sharing

mod division;
mod ipv4;
mod query;
mod subnet;

// Re-export public types
pub use division::{Branch, DivisionNode, NodePath};
pub use ipv4::{
    address_to_string, block_size, last_address, netmask_for, network_address, parse_address,
    string_to_address, Ipv4, MAX_LENGTH,
};
pub use query::ShareQuery;
pub use subnet::{ColumnVisibility, ExportRow, SubnetRow};
