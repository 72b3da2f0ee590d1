//! Division processing logic.
//!
//! - [`codec`] - compact text encoding of division trees
//! - [`enumerate`] - listing leaf subnets and the parent index
//! - [`validate`] - checking entered networks and masks
//! - [`session`] - divide, join, apply, reset, import and export on one division

mod codec;
mod enumerate;
mod session;
mod validate;

// Re-export public functions
pub use codec::{
    ascii_to_binary, binary_to_ascii, decode, deserialize_division, serialize_division,
    to_binary, tree_from_binary,
};
pub use enumerate::{check_depth, enumerate, leaf_row, Enumeration};
pub use session::{ApplyOutcome, SubnetSession};
pub use validate::{parse_mask, validate, ValidatedNetwork};
