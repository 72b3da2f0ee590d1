//! Error type shared by the subnet division engine.

use thiserror::Error;

/// Failures surfaced by the division engine.
///
/// Every variant is user-correctable. Callers are expected to report the
/// message and leave their previous state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("Invalid network address entered: {0:?}")]
    InvalidAddress(String),
    #[error("The network mask you have entered is invalid: {0:?}")]
    InvalidMask(String),
    #[error("Invalid division encoding: {0}")]
    InvalidEncoding(String),
    #[error("Unsupported import format: {0}")]
    UnsupportedFormat(String),
    #[error("Division depth {depth} does not fit below /{mask}")]
    DivisionTooDeep { depth: u8, mask: u8 },
    #[error("No such subnet in the current division: {0}")]
    NodeNotFound(String),
}
