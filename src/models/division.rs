//! Binary division tree.
//!
//! A [`DivisionNode`] is an address block split recursively into lower and
//! upper halves. Nodes never store their own address or mask; those are
//! derived while walking down from a base network. Nodes are addressed by a
//! [`NodePath`] from the root instead of by parent pointers.

use std::fmt;

/// One block of the division tree: a leaf or a node with exactly two children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisionNode {
    children: Option<Box<[DivisionNode; 2]>>,
    depth_of_children: u64,
    num_visible_children: u64,
}

impl DivisionNode {
    /// A node with no children.
    pub fn new_leaf() -> DivisionNode {
        DivisionNode::default()
    }

    /// An internal node over two existing subtrees. Aggregates are not computed.
    pub fn with_children(lower: DivisionNode, upper: DivisionNode) -> DivisionNode {
        DivisionNode {
            children: Some(Box::new([lower, upper])),
            ..DivisionNode::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Lower and upper half, if divided.
    pub fn children(&self) -> Option<&[DivisionNode; 2]> {
        self.children.as_deref()
    }

    /// Split a leaf into two leaves. Already divided nodes keep their subtree.
    pub fn divide(&mut self) {
        if self.children.is_none() {
            self.children = Some(Box::new([DivisionNode::new_leaf(), DivisionNode::new_leaf()]));
        }
    }

    /// Discard the subtree below this node. Joining a leaf does nothing.
    pub fn join(&mut self) {
        self.children = None;
    }

    /// Recompute the cached counts of this subtree, post-order.
    ///
    /// Returns the number of visible leaves, which a leaf reports as 1 to its parent.
    /// `depth_of_children` is kept equal to `num_visible_children`; see DESIGN.md.
    pub fn recompute_aggregates(&mut self) -> u64 {
        match self.children.as_deref_mut() {
            None => {
                self.num_visible_children = 0;
                self.depth_of_children = 0;
                1
            }
            Some([lower, upper]) => {
                let count = lower.recompute_aggregates() + upper.recompute_aggregates();
                self.num_visible_children = count;
                self.depth_of_children = count;
                count
            }
        }
    }

    pub fn num_visible_children(&self) -> u64 {
        self.num_visible_children
    }

    pub fn depth_of_children(&self) -> u64 {
        self.depth_of_children
    }

    /// Number of split levels below this node; 0 for a leaf.
    pub fn depth(&self) -> u32 {
        match self.children() {
            None => 0,
            Some([lower, upper]) => 1 + lower.depth().max(upper.depth()),
        }
    }

    /// Number of leaves, computed without the cache.
    pub fn leaf_count(&self) -> u64 {
        match self.children() {
            None => 1,
            Some([lower, upper]) => lower.leaf_count() + upper.leaf_count(),
        }
    }

    pub fn node_at(&self, path: NodePath) -> Option<&DivisionNode> {
        let mut node = self;
        for branch in path.branches() {
            node = &node.children()?[branch.index()];
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: NodePath) -> Option<&mut DivisionNode> {
        let mut node = self;
        for branch in path.branches() {
            node = &mut node.children.as_deref_mut()?[branch.index()];
        }
        Some(node)
    }
}

/// Which half of a divided block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Lower,
    Upper,
}

impl Branch {
    fn index(self) -> usize {
        match self {
            Branch::Lower => 0,
            Branch::Upper => 1,
        }
    }
}

/// Position of a node, as the branches taken from the root.
///
/// Branch `i` is bit `i` of `bits`. Holds up to 64 levels, twice what an
/// IPv4 division can use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    bits: u64,
    len: u8,
}

impl NodePath {
    pub const MAX_LEN: u8 = 64;

    pub fn root() -> NodePath {
        NodePath::default()
    }

    pub fn is_root(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Path one level further down.
    pub fn child(&self, branch: Branch) -> NodePath {
        debug_assert!(self.len < Self::MAX_LEN, "NodePath too deep");
        let bits = match branch {
            Branch::Lower => self.bits,
            Branch::Upper => self.bits | (1u64 << self.len),
        };
        NodePath {
            bits,
            len: self.len + 1,
        }
    }

    /// Path one level up; `None` at the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        let len = self.len - 1;
        Some(NodePath {
            bits: self.bits & !(u64::MAX << len),
            len,
        })
    }

    pub fn branches(&self) -> impl Iterator<Item = Branch> + '_ {
        (0..self.len).map(move |i| {
            if self.bits & (1u64 << i) == 0 {
                Branch::Lower
            } else {
                Branch::Upper
            }
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "root");
        }
        for branch in self.branches() {
            write!(f, "{}", branch.index())?;
        }
        Ok(())
    }
}
