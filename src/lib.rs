//! Subnet division calculator.
//!
//! A base IPv4 network is split recursively into halves. The split tree
//! travels as a compact `<bits>.<hex>` string next to the network and mask,
//! and can be exported to and imported from JSON or CSV.

pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::SubnetError;
pub use processing::SubnetSession;

use config::Settings;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// File formats for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Open a session from command line or share link values.
///
/// Network and mask default to the settings. A division is only read when
/// given; it never fails the call.
pub fn open_session(
    settings: &Settings,
    network: Option<&str>,
    mask: Option<&str>,
    division: Option<&str>,
) -> Result<SubnetSession, SubnetError> {
    let default_mask = settings.mask.to_string();
    let network = network.unwrap_or(&settings.network);
    let mask = mask.unwrap_or(&default_mask);
    let session = SubnetSession::from_query(network, mask, division)?;
    log::info!(
        "Opened {} with {} subnets",
        session.base(),
        session.root().leaf_count()
    );
    Ok(session)
}

/// Render the session in `format`.
pub fn render_export(
    session: &SubnetSession,
    format: ExportFormat,
) -> Result<String, Box<dyn Error>> {
    match format {
        ExportFormat::Json => session.export_json(),
        ExportFormat::Csv => Ok(session.export_csv()?),
    }
}

/// Write an export file and return where it went.
///
/// Without `output` the file is named after the network, e.g.
/// `subnetting-10.0.0.0-8.csv`, in the current directory.
pub fn write_export(
    session: &SubnetSession,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(session.export_file_name(format.extension())));
    let content = render_export(session, format)?;
    std::fs::write(&path, content)
        .map_err(|e| format!("Error writing export file {}: {e}", path.display()))?;
    log::info!("Exported {} to {}", format, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session_defaults() {
        let session = open_session(&Settings::default(), None, None, None).unwrap();
        assert_eq!(session.base().to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_open_session_query_values() {
        let session =
            open_session(&Settings::default(), Some("10.9.8.7"), Some("8"), Some("3.1")).unwrap();
        assert_eq!(session.base().to_string(), "10.0.0.0/8");
        assert_eq!(session.rows().unwrap().len(), 2);
    }

    #[test]
    fn test_open_session_bad_mask() {
        assert!(matches!(
            open_session(&Settings::default(), None, Some("64"), None),
            Err(SubnetError::InvalidMask(_))
        ));
    }

    #[test]
    fn test_export_format() {
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }
}
