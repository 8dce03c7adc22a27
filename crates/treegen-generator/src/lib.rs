//! Pattern and transaction generator for subtree-mining benchmark datasets.
//!
//! This crate provides the [`TransactionGenerator`], which synthesizes a set
//! of random labeled patterns and plants each of them into a controlled
//! number of random transaction trees. All randomness derives from a single
//! seed, so the same [`DatasetConfig`] always yields the same dataset.
//!
//! # Architecture
//!
//! ```text
//! DatasetConfig (YAML or code)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │ TransactionGenerator │
//! │                      │
//! │  - universe          │──► plan(): patterns + placements
//! │  - seed              │
//! └──────────┬───────────┘
//!            │ transaction(i), one RNG stream per index
//!            ▼
//!    TransactionNode { tid, rid, parent, fields.. }
//! ```
//!
//! # Example
//!
//! ```rust
//! use treegen_generator::{DatasetConfig, TransactionGenerator};
//!
//! let config = DatasetConfig::new(10, 4, 3.0, 10, 100, 3).with_seed(42);
//! let generator = TransactionGenerator::new(config).unwrap();
//!
//! let trees = generator.generate_data().unwrap();
//! assert_eq!(trees.len(), 10);
//! ```
//!
//! # Algorithm
//!
//! - Pattern lengths follow a Poisson law with mean `avg_pattern_length`,
//!   floored at one edge.
//! - A pattern is planted in `total_trees` transactions if it is the shortest
//!   observed, `threshold` if it is the longest, linearly in between.
//!   Placements are drawn with replacement.
//! - Each transaction joins its pattern instances with
//!   `1 + avg_pattern_length * (1 + instances)` filler nodes into one random
//!   tree.

mod arena;
pub mod config;
mod error;
pub mod generator;
pub mod pattern;
pub mod values;

// Re-exports for convenience
pub use config::{DatasetConfig, DEFAULT_SEED};
pub use error::{ConfigError, GeneratorError, PatternError};
pub use generator::{GenerationPlan, TransactionGenerator, TransactionIterator};
pub use pattern::generate_pattern;
