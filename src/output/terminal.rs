//! Terminal table output.

use crate::models::{ColumnVisibility, SubnetRow};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a left-aligned field of at least `width` characters.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// Render rows as an aligned table showing the visible columns.
///
/// `color` bolds the header line.
pub fn render_table(rows: &[SubnetRow], visible: ColumnVisibility, color: bool) -> String {
    let mut columns: Vec<(&str, Vec<String>)> = vec![(
        "Subnet address",
        rows.iter().map(|r| r.subnet_cidr.clone()).collect(),
    )];
    if visible.netmask {
        columns.push(("Netmask", rows.iter().map(|r| r.netmask.clone()).collect()));
    }
    if visible.range {
        columns.push((
            "Range of addresses",
            rows.iter().map(|r| r.address_range.clone()).collect(),
        ));
    }
    if visible.usable {
        columns.push((
            "Usable IPs",
            rows.iter().map(|r| r.usable_range.clone()).collect(),
        ));
    }
    if visible.hosts {
        columns.push((
            "Hosts",
            rows.iter().map(|r| r.host_count.to_string()).collect(),
        ));
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|(title, values)| {
            values
                .iter()
                .map(String::len)
                .chain(std::iter::once(title.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|((title, _), w)| format_field(title, *w))
        .join("  ");
    let header = header.trim_end().to_string();
    let header = if color {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    for i in 0..rows.len() {
        let line = columns
            .iter()
            .zip(&widths)
            .map(|((_, values), w)| format_field(&values[i], *w))
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
