//! Importing divisions from exported files.
//!
//! - [`json`] - exported JSON, including the `params` and `query` fallbacks
//! - [`csv`] - exported CSV, columns located by header name

mod csv;
mod json;

pub use self::csv::{raw_from_csv, split_csv_line};
pub use self::json::raw_from_json;

use crate::error::SubnetError;
use crate::models::DivisionNode;
use crate::processing::{check_depth, deserialize_division, validate};
use std::path::Path;

/// The three reload values as found in a file, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDivision {
    pub network: String,
    pub mask: String,
    pub division: String,
}

/// A validated import, ready to replace the current division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDivision {
    pub network: u32,
    pub mask: u8,
    pub root: DivisionNode,
}

impl RawDivision {
    /// Validate network and mask and decode the division.
    ///
    /// A broken or too deep division becomes a single leaf; a bad network or
    /// mask is an error.
    pub fn into_imported(self) -> Result<ImportedDivision, SubnetError> {
        let validated = validate(&self.network, &self.mask)?;
        let mut root = deserialize_division(&self.division);
        if let Err(e) = check_depth(&root, validated.mask) {
            log::warn!("{e}; using an undivided network");
            root = DivisionNode::new_leaf();
            root.recompute_aggregates();
        }
        Ok(ImportedDivision {
            network: validated.network,
            mask: validated.mask,
            root,
        })
    }
}

/// Find the reload values in JSON or CSV text.
///
/// Text that parses as JSON is read as JSON only; anything else is tried as CSV.
pub fn parse_import(text: &str) -> Result<RawDivision, SubnetError> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => raw_from_json(value),
        Err(e) => {
            log::debug!("parse_import() not JSON ({e}), trying CSV");
            raw_from_csv(text)
        }
    }
}

/// Parse and validate an import.
pub fn import_text(text: &str) -> Result<ImportedDivision, SubnetError> {
    let imported = parse_import(text)?.into_imported()?;
    log::info!(
        "Imported division of {}/{} with {} subnets",
        crate::models::address_to_string(imported.network),
        imported.mask,
        imported.root.leaf_count()
    );
    Ok(imported)
}

/// Read and import a `.json` or `.csv` file.
pub fn import_file(path: &Path) -> Result<ImportedDivision, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading import file {}: {e}", path.display()))?;
    Ok(import_text(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::string_to_address;

    #[test]
    fn test_import_json_query_only_division() {
        let text = r#"{"network": "192.168.0.0", "mask": 16, "query": "division=0"}"#;
        let imported = import_text(text).unwrap();
        assert_eq!(imported.network, string_to_address("192.168.0.0").unwrap());
        assert_eq!(imported.mask, 16);
        assert!(imported.root.is_leaf());
    }

    #[test]
    fn test_import_csv() {
        let text = "network,mask,division\n\"10.0.0.0\",\"8\",\"5.30\"";
        let imported = import_text(text).unwrap();
        assert_eq!(imported.root.num_visible_children(), 3);
    }

    #[test]
    fn test_import_normalizes_network() {
        let text = r#"{"network": "10.1.2.3", "mask": "8", "division": "1.0"}"#;
        let imported = import_text(text).unwrap();
        assert_eq!(imported.network, string_to_address("10.0.0.0").unwrap());
    }

    #[test]
    fn test_import_whole_float_mask() {
        let text = r#"{"network":"10.0.0.0","mask":16.0,"division":"1.0"}"#;
        let imported = import_text(text).unwrap();
        assert_eq!(imported.mask, 16);
    }

    #[test]
    fn test_import_invalid_values() {
        let bad_net = r#"{"network": "10.1.2", "mask": 8, "division": "1.0"}"#;
        assert!(matches!(
            import_text(bad_net),
            Err(SubnetError::InvalidAddress(_))
        ));
        let bad_mask = r#"{"network": "10.0.0.0", "mask": 40, "division": "1.0"}"#;
        assert!(matches!(import_text(bad_mask), Err(SubnetError::InvalidMask(_))));
    }

    #[test]
    fn test_import_too_deep_division_falls_back() {
        // 3.1 is one split, which does not fit below /32
        let text = r#"{"network": "10.0.0.1", "mask": 32, "division": "3.1"}"#;
        let imported = import_text(text).unwrap();
        assert!(imported.root.is_leaf());
    }

    #[test]
    fn test_import_unsupported() {
        assert!(matches!(
            import_text("just some notes"),
            Err(SubnetError::UnsupportedFormat(_))
        ));
    }
}
