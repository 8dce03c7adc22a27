//! Transaction generator: plants patterns into random transaction trees.

use crate::arena::TreeArena;
use crate::config::DatasetConfig;
use crate::error::GeneratorError;
use crate::pattern::generate_pattern;
use crate::values::{generate_values, random_string};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use std::path::Path;
use tracing::{debug, info};
use treegen_core::{
    render_patterns, FieldMap, FieldUniverse, PatternNode, TransactionNode, RID_FIELD, TID_FIELD,
};

/// Multiplier used to spread derived RNG seeds.
const SEED_SPREAD: u64 = 0x9E3779B97F4A7C15;

/// Seed stream of the field universe.
const UNIVERSE_STREAM: u64 = 0;
/// Seed stream of pattern synthesis and placement.
const PLAN_STREAM: u64 = 1;
/// First seed stream used by transactions; transaction `i` uses `i + TRANSACTION_STREAM`.
const TRANSACTION_STREAM: u64 = 2;

/// Patterns and their placements, computed once per run.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    patterns: Vec<PatternNode>,
    templates: Vec<TransactionNode>,
    placements: Vec<Vec<u64>>,
    /// Pattern indices per transaction, one entry per planted instance
    assignments: Vec<Vec<usize>>,
    length_range: Option<(usize, usize)>,
}

impl GenerationPlan {
    /// Generated patterns, in generation order.
    pub fn patterns(&self) -> &[PatternNode] {
        &self.patterns
    }

    /// Materialized (unpopulated) transaction templates, one per pattern.
    pub fn templates(&self) -> &[TransactionNode] {
        &self.templates
    }

    /// Transaction indices assigned to each pattern, with repetition.
    pub fn placements(&self) -> &[Vec<u64>] {
        &self.placements
    }

    /// Observed shortest and longest pattern length, in edges.
    pub fn length_range(&self) -> Option<(usize, usize)> {
        self.length_range
    }

    /// Number of pattern instances planted in a transaction.
    pub fn instances_in(&self, index: u64) -> usize {
        self.assignments
            .get(index as usize)
            .map_or(0, |patterns| patterns.len())
    }
}

/// Generator of labeled transaction trees with planted patterns.
///
/// All randomness derives from the configured seed, so the same config
/// always yields the same data. Each transaction has its own RNG stream,
/// so any single transaction can be regenerated without the others.
pub struct TransactionGenerator {
    config: DatasetConfig,
    universe: FieldUniverse,
}

impl TransactionGenerator {
    /// Validate the config and derive the field universe.
    pub fn new(config: DatasetConfig) -> Result<Self, GeneratorError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(derive_seed(config.seed, UNIVERSE_STREAM));
        let universe = generate_values(&mut rng, config.domain_fields(), config.values_per_field);

        Ok(Self { config, universe })
    }

    /// Load a dataset config from a YAML file and build a generator from it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GeneratorError> {
        let config = DatasetConfig::from_file(path)?;
        Self::new(config)
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Get a reference to the field universe.
    pub fn universe(&self) -> &FieldUniverse {
        &self.universe
    }

    /// Generate every transaction, in index order.
    pub fn generate_data(&self) -> Result<Vec<TransactionNode>, GeneratorError> {
        let plan = self.plan()?;
        let transactions: Vec<TransactionNode> = self.transactions(&plan).collect();

        info!(
            "Generated {} transactions with {} nodes",
            transactions.len(),
            transactions
                .iter()
                .map(TransactionNode::node_count)
                .sum::<usize>()
        );

        Ok(transactions)
    }

    /// Synthesize the patterns and decide where each one is planted.
    pub fn plan(&self) -> Result<GenerationPlan, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(derive_seed(self.config.seed, PLAN_STREAM));

        let patterns = self.generate_patterns(&mut rng)?;
        let length_range = patterns
            .iter()
            .map(PatternNode::edge_count)
            .fold(None, |range, len| match range {
                None => Some((len, len)),
                Some((min, max)) => Some((min.min(len), max.max(len))),
            });

        if let Some((min, max)) = length_range {
            info!(
                "Generated {} patterns (lengths {}..={})",
                patterns.len(),
                min,
                max
            );
        }
        if self.config.print_patterns {
            info!("{}", render_patterns(&patterns));
        }

        let templates: Vec<TransactionNode> = patterns
            .iter()
            .map(|pattern| self.tree_pattern_to_transaction_tree(pattern, None, &mut rng))
            .collect();

        let placements: Vec<Vec<u64>> = match length_range {
            Some((min, max)) => templates
                .iter()
                .map(|template| {
                    let count = self.placement_count(template.node_count(), min, max);
                    debug!(
                        "Pattern with {} nodes planted {} times",
                        template.node_count(),
                        count
                    );
                    (0..count)
                        .map(|_| rng.gen_range(0..self.config.total_trees))
                        .collect()
                })
                .collect(),
            None => Vec::new(),
        };

        let mut assignments = vec![Vec::new(); self.config.total_trees as usize];
        for (pattern, indices) in placements.iter().enumerate() {
            for &index in indices {
                assignments[index as usize].push(pattern);
            }
        }

        Ok(GenerationPlan {
            patterns,
            templates,
            placements,
            assignments,
            length_range,
        })
    }

    /// Lazily assemble every transaction of a plan, in index order.
    pub fn transactions<'a>(&'a self, plan: &'a GenerationPlan) -> TransactionIterator<'a> {
        TransactionIterator {
            generator: self,
            plan,
            next: 0,
        }
    }

    /// Number of transactions a pattern with `node_count` nodes is planted in.
    ///
    /// Interpolates linearly from `total_trees` for the shortest observed
    /// pattern down to `threshold` for the longest, truncating toward zero.
    pub fn placement_count(&self, node_count: usize, min_length: usize, max_length: usize) -> u64 {
        let total = self.config.total_trees as f64;
        let threshold = self.config.threshold as f64;
        let span = max_length.saturating_sub(min_length).max(1) as f64;
        let steps = node_count as f64 - min_length as f64 - 1.0;

        let target = total - steps * (total - threshold) / span;
        target.max(0.0) as u64
    }

    /// Assemble transaction `index` of a plan.
    pub fn transaction(&self, plan: &GenerationPlan, index: u64) -> TransactionNode {
        let mut rng = StdRng::seed_from_u64(derive_seed(
            self.config.seed,
            index.wrapping_add(TRANSACTION_STREAM),
        ));

        let tid = random_string(&mut rng);
        let assigned: &[usize] = plan
            .assignments
            .get(index as usize)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let instances: Vec<TransactionNode> = assigned
            .iter()
            .map(|&pattern| {
                self.populate_transaction_pattern(&plan.templates[pattern], &tid, &mut rng)
            })
            .collect();

        let filler_count = self.filler_count(instances.len());
        let mut pool: Vec<TransactionNode> = (0..filler_count)
            .map(|_| self.filler_node(&tid, &mut rng))
            .collect();
        pool.extend(instances);

        debug!(
            "Transaction {}: {} planted instances, {} filler nodes",
            index,
            assigned.len(),
            filler_count
        );

        stitch(pool, &mut rng)
    }

    /// Convert a pattern into an unpopulated transaction tree.
    ///
    /// Each node gets a fresh `rid` and the pattern's own fields; `tid` and
    /// the remaining universe fields are left unset.
    pub fn tree_pattern_to_transaction_tree<R: Rng>(
        &self,
        pattern: &PatternNode,
        parent: Option<&str>,
        rng: &mut R,
    ) -> TransactionNode {
        let rid = random_string(rng);
        let mut node = TransactionNode::new(rid.clone(), parent);
        for (name, value) in &pattern.fields {
            node.set_field(name.clone(), value.clone());
        }
        for child in &pattern.children {
            let child = self.tree_pattern_to_transaction_tree(child, Some(&rid), rng);
            node.add_child(child);
        }
        node
    }

    /// Build a populated instance of a materialized pattern.
    ///
    /// Every node gets `tid`, a fresh `rid`, and a sampled value for each
    /// universe field the pattern does not fix. Parent links follow the new
    /// record ids.
    pub fn populate_transaction_pattern<R: Rng>(
        &self,
        template: &TransactionNode,
        tid: &str,
        rng: &mut R,
    ) -> TransactionNode {
        let mut fields = template.fields().clone();
        fields.insert(TID_FIELD.to_string(), tid.to_string());
        let mut node = TransactionNode::from_fields(fields);
        node.set_field(RID_FIELD, random_string(rng));
        self.fill_missing(&mut node, rng);

        for child in template.children() {
            let child = self.populate_transaction_pattern(child, tid, rng);
            node.add_child(child);
        }
        node
    }

    fn filler_node<R: Rng>(&self, tid: &str, rng: &mut R) -> TransactionNode {
        let mut node = TransactionNode::new(random_string(rng), None);
        node.set_field(TID_FIELD, tid);
        self.fill_missing(&mut node, rng);
        node
    }

    fn fill_missing<R: Rng>(&self, node: &mut TransactionNode, rng: &mut R) {
        for field in self.universe.iter() {
            if node.has_field(&field.name) {
                continue;
            }
            if let Some(value) = field.values.choose(rng) {
                node.set_field(field.name.clone(), value.clone());
            }
        }
    }

    fn filler_count(&self, instances: usize) -> usize {
        let avg = self.config.avg_pattern_length;
        1 + (avg + avg * instances as f64) as usize
    }

    fn generate_patterns<R: Rng>(&self, rng: &mut R) -> Result<Vec<PatternNode>, GeneratorError> {
        let lengths = Poisson::new(self.config.avg_pattern_length).map_err(|_| {
            GeneratorError::invalid(
                "avg_pattern_length",
                self.config.avg_pattern_length,
                "not a valid Poisson mean",
            )
        })?;
        let fields: Vec<String> = self
            .universe
            .field_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cap = self.config.field_cap();

        (0..self.config.total_patterns)
            .map(|_| {
                let length = (lengths.sample(rng) as usize).max(1);
                generate_pattern(rng, length, &fields, &self.universe, cap)
                    .map_err(GeneratorError::from)
            })
            .collect()
    }
}

/// Iterator that lazily assembles the transactions of a plan.
pub struct TransactionIterator<'a> {
    generator: &'a TransactionGenerator,
    plan: &'a GenerationPlan,
    next: u64,
}

impl Iterator for TransactionIterator<'_> {
    type Item = TransactionNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.generator.config.total_trees {
            return None;
        }

        let index = self.next;
        self.next += 1;
        Some(self.generator.transaction(self.plan, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.generator.config.total_trees - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TransactionIterator<'_> {}

/// Join filler nodes and pattern instances into one random tree.
///
/// The root is drawn uniformly from the pool; every later item is attached
/// under a uniformly drawn node already in the tree. Pattern instances are
/// attached whole, so they stay contiguous subtrees.
fn stitch<R: Rng>(mut pool: Vec<TransactionNode>, rng: &mut R) -> TransactionNode {
    let mut arena: TreeArena<FieldMap> = TreeArena::new();

    if !pool.is_empty() {
        let root = pool.remove(rng.gen_range(0..pool.len()));
        graft(&mut arena, root, None);
    }
    while !pool.is_empty() {
        let item = pool.remove(rng.gen_range(0..pool.len()));
        let parent = rng.gen_range(0..arena.len());
        graft(&mut arena, item, Some(parent));
    }

    let mut root = arena
        .build(|fields, children| {
            let mut node = TransactionNode::from_fields(fields);
            for child in children {
                node.add_child(child);
            }
            node
        })
        .unwrap_or_else(|| TransactionNode::new(String::new(), None));
    root.set_parent(None);
    root
}

/// Copy a whole subtree into the arena under `parent`.
fn graft(arena: &mut TreeArena<FieldMap>, node: TransactionNode, parent: Option<usize>) {
    let (fields, children) = node.into_parts();
    let index = arena.push(fields, parent);
    for child in children {
        graft(arena, child, Some(index));
    }
}

/// Derive the seed of an independent RNG stream.
fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed.wrapping_add(stream.wrapping_mul(SEED_SPREAD))
}
