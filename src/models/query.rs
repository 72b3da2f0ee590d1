//! Share query: the `network=..&mask=..&division=..` form of a division.

use crate::error::SubnetError;
use std::fmt;

/// The three values that reproduce a division anywhere.
///
/// Key names must not change; existing links and exported files use them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareQuery {
    pub network: String,
    pub mask: String,
    pub division: String,
}

impl ShareQuery {
    /// Read the three keys from a query string. Missing keys stay `None`.
    ///
    /// A leading `?` is skipped, `+` reads as a space and `%XX` escapes are
    /// decoded. For repeated keys the first one wins.
    pub fn parse_partial(query: &str) -> (Option<String>, Option<String>, Option<String>) {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut network = None;
        let mut mask = None;
        let mut division = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            let slot = match decode_component(key).as_str() {
                "network" => &mut network,
                "mask" => &mut mask,
                "division" => &mut division,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        (network, mask, division)
    }

    /// Parse a complete query; all three keys are required.
    pub fn parse(query: &str) -> Result<ShareQuery, SubnetError> {
        match Self::parse_partial(query) {
            (Some(network), Some(mask), Some(division)) => Ok(ShareQuery {
                network,
                mask,
                division,
            }),
            _ => Err(SubnetError::UnsupportedFormat(format!(
                "query needs network, mask and division: {query:?}"
            ))),
        }
    }
}

impl fmt::Display for ShareQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Dotted quads, decimals and `<n>.<hex>` need no escaping.
        write!(
            f,
            "network={}&mask={}&division={}",
            self.network, self.mask, self.division
        )
    }
}

fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
