//! Reading divisions back from exported CSV.

use super::RawDivision;
use crate::error::SubnetError;

/// Split one CSV line, honouring quotes and doubled quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Locate `network`, `mask` and `division` by header name and return the
/// first data row where all three are filled in.
pub fn raw_from_csv(text: &str) -> Result<RawDivision, SubnetError> {
    let mut lines = text.trim().lines();
    let header: Vec<String> = lines
        .next()
        .map(split_csv_line)
        .unwrap_or_default()
        .into_iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| header.iter().position(|h| h == name);
    let (Some(i_network), Some(i_mask), Some(i_division)) =
        (column("network"), column("mask"), column("division"))
    else {
        return Err(SubnetError::UnsupportedFormat(
            "CSV header needs network, mask and division columns".to_string(),
        ));
    };

    for line in lines.filter(|l| !l.trim().is_empty()) {
        let parts = split_csv_line(line);
        let get = |i: usize| parts.get(i).map(|s| s.trim()).filter(|s| !s.is_empty());
        if let (Some(network), Some(mask), Some(division)) =
            (get(i_network), get(i_mask), get(i_division))
        {
            return Ok(RawDivision {
                network: network.to_string(),
                mask: mask.to_string(),
                division: division.to_string(),
            });
        }
    }
    Err(SubnetError::UnsupportedFormat(
        "CSV has no row with network, mask and division".to_string(),
    ))
}
