//! JSON rendering of the portable state.

use super::state::PortableState;

/// Pretty-printed JSON, two-space indented.
pub fn to_json(state: &PortableState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DivisionNode;
    use crate::output::build_export_state;
    use crate::processing::enumerate;
    use serde_json::Value;

    #[test]
    fn test_to_json_layout() {
        let root = DivisionNode::new_leaf();
        let rows = enumerate(&root, 0xC0A80000, 16).unwrap().rows;
        let state = build_export_state(0xC0A80000, 16, &root, Some(&rows));
        let json = to_json(&state).unwrap();
        assert!(json.starts_with("{\n  \"version\": 2,"), "{json}");

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["network"], "192.168.0.0");
        assert_eq!(value["mask"], 16);
        assert_eq!(value["division"], "1.0");
        assert_eq!(value["params"]["mask"], 16);
        assert_eq!(value["query"], "network=192.168.0.0&mask=16&division=1.0");
        assert_eq!(value["rows"][0]["subnet"], "192.168.0.0/16");
        assert_eq!(value["rows"][0]["hosts"], 65534);
    }

    #[test]
    fn test_to_json_without_rows() {
        let state = build_export_state(0, 8, &DivisionNode::new_leaf(), None);
        let value: Value = serde_json::from_str(&to_json(&state).unwrap()).unwrap();
        assert!(value.get("rows").is_none());
    }
}
