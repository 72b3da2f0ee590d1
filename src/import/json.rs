//! Reading divisions back from exported JSON.

use super::RawDivision;
use crate::error::SubnetError;
use crate::models::ShareQuery;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Default)]
struct JsonParams {
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    mask: Option<MaskValue>,
    #[serde(default)]
    division: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct JsonImport {
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    mask: Option<MaskValue>,
    #[serde(default)]
    division: Option<String>,
    #[serde(default)]
    params: Option<JsonParams>,
    #[serde(default)]
    query: Option<String>,
}

/// Masks were written as numbers, older files may carry strings.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum MaskValue {
    Number(serde_json::Number),
    Text(String),
}

impl MaskValue {
    fn into_string(self) -> String {
        match self {
            MaskValue::Number(n) => match n.as_f64() {
                Some(f) if n.as_u64().is_none() && f.fract() == 0.0 && f.abs() <= 255.0 => {
                    (f as i64).to_string()
                }
                _ => n.to_string(),
            },
            MaskValue::Text(s) => s,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Find network, mask and division in a parsed JSON document.
///
/// Looks at the top-level fields first. If any is missing, all three are
/// taken from `params`. Whatever is still missing is read from the `query`
/// string.
pub fn raw_from_json(value: Value) -> Result<RawDivision, SubnetError> {
    let doc: JsonImport = serde_path_to_error::deserialize(value).map_err(|e| {
        SubnetError::UnsupportedFormat(format!("JSON path={} error={}", e.path(), e))
    })?;

    let mut network = non_empty(doc.network);
    let mut mask = doc.mask.map(MaskValue::into_string);
    let mut division = non_empty(doc.division);
    let complete = |n: &Option<String>, m: &Option<String>, d: &Option<String>| {
        n.is_some() && m.is_some() && d.is_some()
    };

    if !complete(&network, &mask, &division) {
        if let Some(params) = doc.params {
            log::debug!("raw_from_json() reading params");
            network = non_empty(params.network);
            mask = params.mask.map(MaskValue::into_string);
            division = non_empty(params.division);
        }
    }

    if !complete(&network, &mask, &division) {
        if let Some(query) = doc.query {
            log::debug!("raw_from_json() reading query {query:?}");
            let (q_network, q_mask, q_division) = ShareQuery::parse_partial(&query);
            network = network.or(non_empty(q_network));
            mask = mask.or(q_mask);
            division = division.or(non_empty(q_division));
        }
    }

    match (network, mask, division) {
        (Some(network), Some(mask), Some(division)) => Ok(RawDivision {
            network,
            mask,
            division,
        }),
        _ => Err(SubnetError::UnsupportedFormat(
            "JSON has no network, mask and division".to_string(),
        )),
    }
}
