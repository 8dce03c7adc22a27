//! Core tree types for the treegen dataset synthesizer.
//!
//! This crate provides the value types shared by the generator and the
//! output writers:
//!
//! - [`FieldUniverse`] - Field names and the legal values of each field
//! - [`PatternNode`] - A node of a planted pattern (possibly a wildcard)
//! - [`TransactionNode`] - A node of a generated transaction tree
//!
//! # Architecture
//!
//! ```text
//! treegen-core (this crate)
//!    │
//!    ├─── treegen-generator  (builds patterns and transactions)
//!    │
//!    └─── treegen-csv        (flattens transactions into CSV rows)
//! ```
//!
//! # Example
//!
//! ```rust
//! use treegen_core::{FieldUniverse, FieldValues, TransactionNode};
//!
//! let universe = FieldUniverse::new(vec![FieldValues::new(
//!     "color",
//!     vec!["red".to_string(), "blue".to_string()],
//! )]);
//!
//! let mut root = TransactionNode::new("r0", None);
//! root.set_field("tid", "t0");
//! root.set_field("color", "red");
//!
//! let mut child = TransactionNode::new("r1", None);
//! child.set_field("tid", "t0");
//! child.set_field("color", "blue");
//! root.add_child(child);
//!
//! assert_eq!(root.children()[0].parent(), Some("r0"));
//! assert_eq!(root.to_records(&universe).len(), 2);
//! ```

pub mod pattern;
pub mod transaction;
pub mod universe;

// Re-exports for convenience
pub use pattern::{render_patterns, FieldMap, PatternNode};
pub use transaction::{
    record_header, TransactionNode, IDENTITY_FIELDS, NULL_PARENT, PARENT_COLUMN, PARENT_FIELD,
    RECORD_COLUMN, RID_FIELD, TID_FIELD, TRANSACTION_COLUMN,
};
pub use universe::{FieldUniverse, FieldValues};
