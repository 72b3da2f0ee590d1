//! Interactive division state: the base network, its tree and the actions
//! a user can take on them.

use crate::config::{DEFAULT_MASK, DEFAULT_NETWORK};
use crate::error::SubnetError;
use crate::import::{import_text, ImportedDivision};
use crate::models::{
    address_to_string, string_to_address, ColumnVisibility, DivisionNode, Ipv4, NodePath,
    ShareQuery, SubnetRow, MAX_LENGTH,
};
use crate::output::{build_export_state, render_table, to_csv, to_json, PortableState};
use crate::processing::{check_depth, deserialize_division, enumerate, validate, Enumeration};
use std::error::Error;

/// What [`SubnetSession::apply`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub network_changed: bool,
    pub mask_changed: bool,
    /// The entered address had host bits set.
    pub normalized: bool,
    /// The tree was replaced by a single leaf.
    pub reset: bool,
}

impl ApplyOutcome {
    /// True when the user should be told the network was updated.
    pub fn updated(&self) -> bool {
        self.network_changed || self.mask_changed || self.normalized
    }
}

/// One division being edited.
///
/// Every action validates before touching state, so a failed action leaves
/// the session as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetSession {
    network: u32,
    mask: u8,
    root: DivisionNode,
    visible: ColumnVisibility,
}

impl Default for SubnetSession {
    fn default() -> Self {
        let network = string_to_address(DEFAULT_NETWORK).unwrap_or(0);
        SubnetSession::with_root(network, DEFAULT_MASK, DivisionNode::new_leaf())
    }
}

impl SubnetSession {
    fn with_root(network: u32, mask: u8, mut root: DivisionNode) -> SubnetSession {
        root.recompute_aggregates();
        SubnetSession {
            network,
            mask,
            root,
            visible: ColumnVisibility::default(),
        }
    }

    /// Start from an entered network and mask with an undivided tree.
    pub fn new(network_str: &str, mask_str: &str) -> Result<SubnetSession, SubnetError> {
        let validated = validate(network_str, mask_str)?;
        Ok(SubnetSession::with_root(
            validated.network,
            validated.mask,
            DivisionNode::new_leaf(),
        ))
    }

    /// Start from share link values.
    ///
    /// Network and mask must be valid. A missing, broken or too deep division
    /// gives an undivided tree.
    pub fn from_query(
        network_str: &str,
        mask_str: &str,
        division: Option<&str>,
    ) -> Result<SubnetSession, SubnetError> {
        let validated = validate(network_str, mask_str)?;
        let mut root = division
            .map(deserialize_division)
            .unwrap_or_else(DivisionNode::new_leaf);
        if let Err(e) = check_depth(&root, validated.mask) {
            log::warn!("{e}; using an undivided network");
            root = DivisionNode::new_leaf();
        }
        Ok(SubnetSession::with_root(validated.network, validated.mask, root))
    }

    pub fn from_share_query(query: &ShareQuery) -> Result<SubnetSession, SubnetError> {
        SubnetSession::from_query(&query.network, &query.mask, Some(&query.division))
    }

    pub fn network(&self) -> u32 {
        self.network
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Base network as a CIDR block.
    pub fn base(&self) -> Ipv4 {
        Ipv4::from_bits(self.network, self.mask)
    }

    pub fn root(&self) -> &DivisionNode {
        &self.root
    }

    pub fn visible(&self) -> ColumnVisibility {
        self.visible
    }

    pub fn set_visible(&mut self, visible: ColumnVisibility) {
        self.visible = visible;
    }

    pub fn enumeration(&self) -> Result<Enumeration, SubnetError> {
        enumerate(&self.root, self.network, self.mask)
    }

    pub fn rows(&self) -> Result<Vec<SubnetRow>, SubnetError> {
        Ok(self.enumeration()?.rows)
    }

    /// Apply a newly entered network and mask.
    ///
    /// The tree is kept unless the mask changed.
    pub fn apply(
        &mut self,
        network_str: &str,
        mask_str: &str,
    ) -> Result<ApplyOutcome, SubnetError> {
        let validated = validate(network_str, mask_str)?;
        let outcome = ApplyOutcome {
            network_changed: validated.network != self.network,
            mask_changed: validated.mask != self.mask,
            normalized: validated.changed,
            reset: validated.mask != self.mask,
        };
        if outcome.reset {
            self.root = DivisionNode::new_leaf();
            self.root.recompute_aggregates();
        }
        self.network = validated.network;
        self.mask = validated.mask;
        if outcome.updated() {
            log::info!("Network updated: {}", self.base());
        }
        Ok(outcome)
    }

    /// Divide the leaf at `path` into two halves.
    pub fn divide(&mut self, path: NodePath) -> Result<(), SubnetError> {
        let depth = u32::from(path.len()) + 1;
        if u32::from(self.mask) + depth > u32::from(MAX_LENGTH) {
            return Err(SubnetError::DivisionTooDeep {
                depth: path.len().saturating_add(1),
                mask: self.mask,
            });
        }
        let node = self
            .root
            .node_at_mut(path)
            .ok_or_else(|| SubnetError::NodeNotFound(path.to_string()))?;
        node.divide();
        self.root.recompute_aggregates();
        log::debug!("divide({path}) -> {} subnets", self.root.leaf_count());
        Ok(())
    }

    /// Join at `path`: its parent is collapsed, or the root itself.
    ///
    /// Returns the path of the node that was joined.
    pub fn join(&mut self, path: NodePath) -> Result<NodePath, SubnetError> {
        if self.root.node_at(path).is_none() {
            return Err(SubnetError::NodeNotFound(path.to_string()));
        }
        let target = self.enumeration()?.parent_of(path).unwrap_or(path);
        if let Some(node) = self.root.node_at_mut(target) {
            node.join();
        }
        self.root.recompute_aggregates();
        log::debug!("join({path}) joined {target} -> {} subnets", self.root.leaf_count());
        Ok(target)
    }

    fn path_for_cidr(&self, cidr: &str) -> Result<NodePath, SubnetError> {
        self.enumeration()?
            .row_for_cidr(cidr)
            .map(|row| row.path)
            .ok_or_else(|| SubnetError::NodeNotFound(cidr.to_string()))
    }

    /// Divide the listed subnet `cidr`, e.g. `"10.0.0.0/25"`.
    pub fn divide_subnet(&mut self, cidr: &str) -> Result<(), SubnetError> {
        let path = self.path_for_cidr(cidr)?;
        self.divide(path)
    }

    /// Join at the listed subnet `cidr`, merging it with its sibling.
    pub fn join_subnet(&mut self, cidr: &str) -> Result<NodePath, SubnetError> {
        let path = self.path_for_cidr(cidr)?;
        self.join(path)
    }

    /// Drop all divisions.
    pub fn reset(&mut self) {
        self.root = DivisionNode::new_leaf();
        self.root.recompute_aggregates();
        log::debug!("reset({})", self.base());
    }

    pub fn share_query(&self) -> ShareQuery {
        ShareQuery {
            network: address_to_string(self.network),
            mask: self.mask.to_string(),
            division: crate::processing::serialize_division(&self.root),
        }
    }

    pub fn export_state(&self) -> Result<PortableState, SubnetError> {
        let rows = self.rows()?;
        Ok(build_export_state(self.network, self.mask, &self.root, Some(&rows)))
    }

    pub fn export_json(&self) -> Result<String, Box<dyn Error>> {
        Ok(to_json(&self.export_state()?)?)
    }

    pub fn export_csv(&self) -> Result<String, SubnetError> {
        Ok(to_csv(&self.export_state()?))
    }

    /// Download name, e.g. `subnetting-192.168.0.0-16.json`.
    pub fn export_file_name(&self, extension: &str) -> String {
        format!(
            "subnetting-{}-{}.{}",
            address_to_string(self.network),
            self.mask,
            extension
        )
    }

    /// Replace network, mask and tree with an import. On error nothing changes.
    pub fn import(&mut self, text: &str) -> Result<(), SubnetError> {
        self.apply_import(import_text(text)?);
        Ok(())
    }

    /// Replace network, mask and tree with an already validated import.
    pub fn apply_import(&mut self, imported: ImportedDivision) {
        self.network = imported.network;
        self.mask = imported.mask;
        self.root = imported.root;
        self.root.recompute_aggregates();
        log::info!("Imported configuration applied: {}", self.base());
    }

    /// The current table with the visible columns.
    pub fn render_table(&self, color: bool) -> Result<String, SubnetError> {
        Ok(render_table(&self.rows()?, self.visible, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Branch;

    fn cidrs(session: &SubnetSession) -> Vec<String> {
        session
            .rows()
            .unwrap()
            .into_iter()
            .map(|r| r.subnet_cidr)
            .collect()
    }

    #[test]
    fn test_default_session() {
        let session = SubnetSession::default();
        assert_eq!(session.base().to_string(), "192.168.0.0/16");
        assert_eq!(cidrs(&session), vec!["192.168.0.0/16"]);
    }

    #[test]
    fn test_divide_and_join_by_cidr() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        session.divide_subnet("10.0.0.0/24").unwrap();
        session.divide_subnet("10.0.0.128/25").unwrap();
        assert_eq!(
            cidrs(&session),
            vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/26"]
        );
        assert_eq!(session.root().num_visible_children(), 3);

        // joining a row collapses its parent
        let joined = session.join_subnet("10.0.0.192/26").unwrap();
        assert_eq!(joined, NodePath::root().child(Branch::Upper));
        assert_eq!(cidrs(&session), vec!["10.0.0.0/25", "10.0.0.128/25"]);
    }

    #[test]
    fn test_join_root_joins_itself() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        assert_eq!(session.join(NodePath::root()).unwrap(), NodePath::root());
        assert_eq!(cidrs(&session), vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_divide_missing_node() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        let before = session.clone();
        assert!(matches!(
            session.divide(NodePath::root().child(Branch::Lower)),
            Err(SubnetError::NodeNotFound(_))
        ));
        assert!(matches!(
            session.divide_subnet("10.0.0.0/25"),
            Err(SubnetError::NodeNotFound(_))
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_divide_host_route_refused() {
        let mut session = SubnetSession::new("10.0.0.4", "31").unwrap();
        session.divide(NodePath::root()).unwrap();
        assert_eq!(cidrs(&session), vec!["10.0.0.4/32", "10.0.0.5/32"]);
        assert!(matches!(
            session.divide_subnet("10.0.0.5/32"),
            Err(SubnetError::DivisionTooDeep { depth: 2, mask: 31 })
        ));
    }

    #[test]
    fn test_apply_keeps_tree_when_mask_unchanged() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        session.divide(NodePath::root()).unwrap();
        let outcome = session.apply("10.0.1.7", "24").unwrap();
        assert!(outcome.network_changed && outcome.normalized);
        assert!(!outcome.reset);
        assert_eq!(cidrs(&session), vec!["10.0.1.0/25", "10.0.1.128/25"]);
    }

    #[test]
    fn test_apply_resets_tree_when_mask_changes() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        session.divide(NodePath::root()).unwrap();
        let outcome = session.apply("10.0.0.0", "23").unwrap();
        assert!(outcome.mask_changed && outcome.reset && outcome.updated());
        assert_eq!(cidrs(&session), vec!["10.0.0.0/23"]);
    }

    #[test]
    fn test_apply_unchanged() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        let outcome = session.apply("10.0.0.0", "24").unwrap();
        assert_eq!(outcome, ApplyOutcome::default());
        assert!(!outcome.updated());
    }

    #[test]
    fn test_apply_error_leaves_state() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        session.divide(NodePath::root()).unwrap();
        let before = session.clone();
        assert!(matches!(
            session.apply("10.0.0.0", "33"),
            Err(SubnetError::InvalidMask(_))
        ));
        assert!(matches!(
            session.apply("10.0.0", "24"),
            Err(SubnetError::InvalidAddress(_))
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_reset() {
        let mut session = SubnetSession::new("10.0.0.0", "8").unwrap();
        session.divide(NodePath::root()).unwrap();
        session.reset();
        assert!(session.root().is_leaf());
        assert_eq!(session.share_query().division, "1.0");
    }

    #[test]
    fn test_from_query() {
        let session = SubnetSession::from_query("192.168.0.0", "16", Some("5.30")).unwrap();
        assert_eq!(
            cidrs(&session),
            vec!["192.168.0.0/18", "192.168.64.0/18", "192.168.128.0/17"]
        );
        let session = SubnetSession::from_query("192.168.0.0", "16", Some("garbage")).unwrap();
        assert_eq!(cidrs(&session), vec!["192.168.0.0/16"]);
        let session = SubnetSession::from_query("10.0.0.0", "32", Some("3.1")).unwrap();
        assert_eq!(cidrs(&session), vec!["10.0.0.0/32"]);
        assert!(SubnetSession::from_query("10.0.0.0", "x", None).is_err());
    }

    #[test]
    fn test_share_query_round_trip() {
        let mut session = SubnetSession::new("172.16.0.0", "12").unwrap();
        session.divide(NodePath::root()).unwrap();
        session
            .divide(NodePath::root().child(Branch::Upper))
            .unwrap();
        let query = session.share_query();
        assert_eq!(query.to_string(), "network=172.16.0.0&mask=12&division=5.50");
        let restored = SubnetSession::from_share_query(&query).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_export_file_name() {
        let session = SubnetSession::default();
        assert_eq!(
            session.export_file_name("csv"),
            "subnetting-192.168.0.0-16.csv"
        );
    }

    #[test]
    fn test_import_failure_leaves_state() {
        let mut session = SubnetSession::new("10.0.0.0", "24").unwrap();
        let before = session.clone();
        assert!(session.import("{}").is_err());
        assert!(session.import("nothing useful").is_err());
        assert_eq!(session, before);
    }
}
