//! Transaction trees: the generated output records.

use crate::pattern::FieldMap;
use crate::universe::FieldUniverse;
use serde::{Deserialize, Serialize};

/// Field holding the transaction id.
pub const TID_FIELD: &str = "tid";
/// Field holding the record id.
pub const RID_FIELD: &str = "rid";
/// Field holding the parent's record id.
pub const PARENT_FIELD: &str = "parent";

/// Identity fields present on every populated node.
pub const IDENTITY_FIELDS: [&str; 3] = [TID_FIELD, RID_FIELD, PARENT_FIELD];

/// Value of the `parent` field on a root node.
pub const NULL_PARENT: &str = "None";

/// Output column for the transaction id.
pub const TRANSACTION_COLUMN: &str = "transaction_id";
/// Output column for the record id.
pub const RECORD_COLUMN: &str = "record_id";
/// Output column for the parent record id.
pub const PARENT_COLUMN: &str = "parent_id";

/// A node of a transaction tree.
///
/// Every node stores its identity (`tid`, `rid`, `parent`) inside its field
/// map next to the domain fields. Attaching a child through [`add_child`]
/// rewrites the child's `parent` field to this node's `rid`.
///
/// [`add_child`]: TransactionNode::add_child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionNode {
    fields: FieldMap,
    children: Vec<TransactionNode>,
}

impl TransactionNode {
    /// Create a leaf with the given record id and parent record id.
    pub fn new(rid: impl Into<String>, parent: Option<&str>) -> Self {
        let mut fields = FieldMap::new();
        fields.insert(RID_FIELD.to_string(), rid.into());
        fields.insert(
            PARENT_FIELD.to_string(),
            parent.unwrap_or(NULL_PARENT).to_string(),
        );
        Self {
            fields,
            children: Vec::new(),
        }
    }

    /// Create a leaf from a complete field map.
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            fields,
            children: Vec::new(),
        }
    }

    /// Split this node into its field map and children.
    pub fn into_parts(self) -> (FieldMap, Vec<TransactionNode>) {
        (self.fields, self.children)
    }

    /// Record id, or an empty string if unset.
    pub fn rid(&self) -> &str {
        self.field(RID_FIELD).unwrap_or_default()
    }

    /// Transaction id, if populated.
    pub fn tid(&self) -> Option<&str> {
        self.field(TID_FIELD)
    }

    /// Parent record id, `None` for a root.
    pub fn parent(&self) -> Option<&str> {
        self.field(PARENT_FIELD).filter(|p| *p != NULL_PARENT)
    }

    /// Mark this node as having the given parent (or none).
    pub fn set_parent(&mut self, parent: Option<&str>) {
        self.set_field(PARENT_FIELD, parent.unwrap_or(NULL_PARENT));
    }

    /// Get a field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Set a field value, replacing any previous one.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Whether this node has a value for the field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All fields of this node.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Ordered children.
    pub fn children(&self) -> &[TransactionNode] {
        &self.children
    }

    /// Append a child and point its `parent` field at this node.
    pub fn add_child(&mut self, mut child: TransactionNode) {
        child.set_field(PARENT_FIELD, self.rid());
        self.children.push(child);
    }

    /// All nodes of this subtree in pre-order (root first, depth first).
    pub fn nodes(&self) -> Vec<&TransactionNode> {
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
            .map(TransactionNode::node_count)
            .sum::<usize>()
    }

    /// Flatten this single node into an output row.
    ///
    /// Columns follow [`record_header`]. Missing fields render as empty
    /// strings.
    pub fn to_record(&self, universe: &FieldUniverse) -> Vec<String> {
        let mut record = Vec::with_capacity(IDENTITY_FIELDS.len() + universe.len());
        for name in IDENTITY_FIELDS {
            record.push(self.field(name).unwrap_or_default().to_string());
        }
        for field in universe.iter() {
            record.push(self.field(&field.name).unwrap_or_default().to_string());
        }
        record
    }

    /// Flatten this subtree into output rows, one per node in pre-order.
    pub fn to_records(&self, universe: &FieldUniverse) -> Vec<Vec<String>> {
        self.nodes()
            .into_iter()
            .map(|node| node.to_record(universe))
            .collect()
    }
}

/// Output column names: the identity columns followed by universe fields.
pub fn record_header(universe: &FieldUniverse) -> Vec<String> {
    let mut columns = vec![
        TRANSACTION_COLUMN.to_string(),
        RECORD_COLUMN.to_string(),
        PARENT_COLUMN.to_string(),
    ];
    columns.extend(universe.field_names().iter().map(|s| s.to_string()));
    columns
}
