//! Pattern trees: the labeled templates planted into transactions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to value mapping carried by a node.
pub type FieldMap = BTreeMap<String, String>;

/// A node of a pattern tree.
///
/// A node with no fields is a wildcard and matches any record. Children are
/// owned by their parent; there is no back-reference.
///
/// The derived `PartialEq` compares whole subtrees. Use [`same_record`]
/// to compare only the field maps of two nodes.
///
/// [`same_record`]: PatternNode::same_record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternNode {
    /// Fields this node requires
    pub fields: FieldMap,

    /// Ordered children
    pub children: Vec<PatternNode>,
}

impl PatternNode {
    /// Create a leaf node with the given fields.
    pub fn new(fields: FieldMap) -> Self {
        Self {
            fields,
            children: Vec::new(),
        }
    }

    /// Create a wildcard leaf.
    pub fn wildcard() -> Self {
        Self::default()
    }

    /// Whether this node carries no fields.
    pub fn is_wildcard(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a child.
    pub fn add_child(&mut self, child: PatternNode) {
        self.children.push(child);
    }

    /// Whether two nodes carry exactly the same field map.
    pub fn same_record(&self, other: &PatternNode) -> bool {
        self.fields == other.fields
    }

    /// All nodes of this subtree in pre-order (root first, depth first).
    pub fn nodes(&self) -> Vec<&PatternNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        nodes
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PatternNode::node_count)
            .sum::<usize>()
    }

    /// Number of edges in this subtree.
    pub fn edge_count(&self) -> usize {
        self.node_count() - 1
    }

    fn fmt_record(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(")?;
        if self.fields.is_empty() {
            write!(f, "<Anything>")?;
        } else {
            for (i, (name, value)) in self.fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "'{name}' = {value}")?;
            }
        }
        write!(f, ")")
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        self.fmt_record(f)?;
        for child in &self.children {
            writeln!(f)?;
            for _ in 0..=depth {
                write!(f, "\t")?;
            }
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Render a numbered dump of generated patterns.
pub fn render_patterns(patterns: &[PatternNode]) -> String {
    let mut out = String::from("GENERATION DETAILS:\n\n");
    out.push_str(&format!("Generated patterns: {}\n", patterns.len()));
    for (i, pattern) in patterns.iter().enumerate() {
        out.push_str(&format!("\nPattern {}:\n{pattern}\n", i + 1));
    }
    out
}
