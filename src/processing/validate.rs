//! Network and mask validation for user input.

use crate::error::SubnetError;
use crate::models::{address_to_string, network_address, parse_address, MAX_LENGTH};

/// A validated base network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedNetwork {
    /// Network address with host bits cleared.
    pub network: u32,
    pub mask: u8,
    /// True when the entered address had host bits set and was normalized.
    pub changed: bool,
}

/// Parse a mask such as `"24"`; anything but an integer in 0..=32 is rejected.
pub fn parse_mask(mask_str: &str) -> Result<u8, SubnetError> {
    mask_str
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|m| *m <= MAX_LENGTH)
        .ok_or_else(|| SubnetError::InvalidMask(mask_str.to_string()))
}

/// Validate an address/mask pair and normalize the address to its network.
pub fn validate(address_str: &str, mask_str: &str) -> Result<ValidatedNetwork, SubnetError> {
    let parsed = parse_address(address_str)?;
    let mask = parse_mask(mask_str)?;
    let network = network_address(parsed, mask);
    let changed = network != parsed;
    if changed {
        log::info!(
            "{address_str} is not a network address for /{mask}, using {}",
            address_to_string(network)
        );
    }
    Ok(ValidatedNetwork {
        network,
        mask,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::string_to_address;

    #[test]
    fn test_validate_network() {
        let v = validate("192.168.0.0", "16").unwrap();
        assert_eq!(v.network, string_to_address("192.168.0.0").unwrap());
        assert_eq!(v.mask, 16);
        assert!(!v.changed);
    }

    #[test]
    fn test_validate_normalizes_host_address() {
        let v = validate("10.1.2.3", "8").unwrap();
        assert_eq!(address_to_string(v.network), "10.0.0.0");
        assert!(v.changed, "host address should be reported as normalized");
    }

    #[test]
    fn test_validate_bad_address() {
        assert!(matches!(
            validate("10.1.2", "8"),
            Err(SubnetError::InvalidAddress(_))
        ));
        // address is checked before the mask
        assert!(matches!(
            validate("300.0.0.0", "99"),
            Err(SubnetError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_validate_bad_mask() {
        for bad in ["33", "-1", "", "8.5", "abc", "256"] {
            assert!(
                matches!(validate("10.0.0.0", bad), Err(SubnetError::InvalidMask(_))),
                "should reject mask {bad:?}"
            );
        }
        assert_eq!(validate("10.0.0.0", " 0 ").unwrap().mask, 0);
        assert_eq!(validate("10.0.0.0", "32").unwrap().mask, 32);
    }
}
