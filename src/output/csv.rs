//! CSV rendering of the portable state.
//!
//! Every row repeats network, mask and division so a single line is enough
//! to reload the division.

use super::state::PortableState;
use itertools::Itertools;

/// Column names of a full export.
pub const CSV_HEADERS: [&str; 8] = [
    "network", "mask", "division", "subnet", "netmask", "range", "usable", "hosts",
];

/// Quote a field, doubling any quotes inside it.
///
/// Always quoted, so embedded commas and spaces survive spreadsheet imports.
pub fn escape_csv_field(input: &str) -> String {
    format!("\"{}\"", input.replace('"', "\"\""))
}

/// Render the state as CSV, newline separated, without a trailing newline.
///
/// Without rows only `network,mask,division` and one value line are written.
pub fn to_csv(state: &PortableState) -> String {
    let mask = state.mask.to_string();
    match state.rows.as_deref() {
        Some(rows) if !rows.is_empty() => {
            let lines = rows.iter().map(|r| {
                let hosts = r.hosts.to_string();
                [
                    state.network.as_str(),
                    mask.as_str(),
                    state.division.as_str(),
                    r.subnet.as_str(),
                    r.netmask.as_str(),
                    r.range.as_str(),
                    r.usable.as_str(),
                    hosts.as_str(),
                ]
                .iter()
                .map(|v| escape_csv_field(v))
                .join(",")
            });
            std::iter::once(CSV_HEADERS.join(",")).chain(lines).join("\n")
        }
        _ => {
            log::debug!("to_csv() has no rows, writing minimal CSV");
            let values = [state.network.as_str(), mask.as_str(), state.division.as_str()]
                .iter()
                .map(|v| escape_csv_field(v))
                .join(",");
            format!("{}\n{}", CSV_HEADERS[..3].join(","), values)
        }
    }
}
