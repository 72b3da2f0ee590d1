//! IPv4 address arithmetic and CIDR notation utilities.
//!
//! Addresses are held as `u32` in big-endian order. Block sizes are `u64`
//! because a /0 block holds 2^32 addresses.

use crate::error::SubnetError;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Four dot-separated groups of 1-3 digits, nothing before or after.
static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

/// Render an address as `a.b.c.d`.
///
/// # Examples
/// ```
/// use subnet_divider::models::address_to_string;
/// assert_eq!(address_to_string(0xC0A80001), "192.168.0.1");
/// ```
pub fn address_to_string(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// Parse a dotted-quad address, returning `None` for anything malformed.
///
/// Leading zeros are accepted (`010.0.0.1` is `10.0.0.1`), unlike
/// [`Ipv4Addr`]'s own parser.
pub fn string_to_address(s: &str) -> Option<u32> {
    let caps = get_dotted_quad_regex().captures(s)?;
    let mut addr: u32 = 0;
    for i in 1..=4 {
        let octet: u32 = caps[i].parse().ok()?;
        if octet > 255 {
            return None;
        }
        addr = (addr << 8) | octet;
    }
    Some(addr)
}

/// Like [`string_to_address`] but reports [`SubnetError::InvalidAddress`].
pub fn parse_address(s: &str) -> Result<u32, SubnetError> {
    string_to_address(s).ok_or_else(|| SubnetError::InvalidAddress(s.to_string()))
}

/// Zero the host bits of `addr` under a `/mask` prefix.
///
/// Masks above 32 are treated as 32.
pub fn network_address(addr: u32, mask: u8) -> u32 {
    let right_len = MAX_LENGTH.saturating_sub(mask);
    let bits = addr as u64;
    ((bits >> right_len) << right_len) as u32
}

/// Number of addresses in a `/mask` block.
pub fn block_size(mask: u8) -> u64 {
    1u64 << MAX_LENGTH.saturating_sub(mask)
}

/// Last address of the `/mask` block starting at `block_start`, wrapped to 32 bits.
pub fn last_address(block_start: u32, mask: u8) -> u32 {
    (block_start as u64 + block_size(mask) - 1) as u32
}

/// Netmask for a prefix length, e.g. `/24` -> `255.255.255.0`.
///
/// # Examples
/// ```
/// use subnet_divider::models::netmask_for;
/// assert_eq!(netmask_for(24), 0xFFFFFF00);
/// ```
pub fn netmask_for(mask: u8) -> u32 {
    network_address(u32::MAX, mask)
}

/// IPv4 block in CIDR notation.
#[derive(PartialEq, Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, SubnetError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| SubnetError::InvalidAddress(addr_cidr.to_string()))?;
        let addr = parse_address(addr)?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| SubnetError::InvalidMask(mask.to_string()))?;
        if mask > MAX_LENGTH {
            return Err(SubnetError::InvalidMask(mask.to_string()));
        }
        Ok(Ipv4::from_bits(addr, mask))
    }

    /// Build from a raw address and mask.
    pub fn from_bits(addr: u32, mask: u8) -> Ipv4 {
        Ipv4 {
            addr: Ipv4Addr::from(addr),
            mask,
        }
    }

    /// The address as a `u32`.
    pub fn bits(&self) -> u32 {
        u32::from(self.addr)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
