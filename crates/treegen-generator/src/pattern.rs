//! Random pattern synthesis.
//!
//! A pattern of length `n` has `n` edges and `n + 1` nodes. Nodes are drawn
//! from a pool of distinct records; some non-root nodes then have their
//! fields cleared and become wildcards.

use crate::arena::TreeArena;
use crate::error::PatternError;
use rand::seq::SliceRandom;
use rand::Rng;
use treegen_core::{FieldMap, FieldUniverse, PatternNode};

/// Probability that a non-root node becomes a wildcard.
pub const WILDCARD_PROBABILITY: f64 = 0.2;

/// Consecutive duplicate candidates tolerated before giving up on the pool.
pub const MAX_CONSECUTIVE_REJECTIONS: usize = 10_000;

/// Generate a random pattern with `length` edges.
///
/// Every node carries between 1 and `max_fields_per_record` distinct fields
/// drawn from `fields` (wildcards carry none), each with a value from
/// `values`. `max_fields_per_record` is capped at `fields.len()`.
pub fn generate_pattern<R: Rng>(
    rng: &mut R,
    length: usize,
    fields: &[String],
    values: &FieldUniverse,
    max_fields_per_record: usize,
) -> Result<PatternNode, PatternError> {
    if length < 1 {
        return Err(PatternError::InvalidLength(length));
    }
    if fields.is_empty() {
        return Err(PatternError::NoFields);
    }
    if max_fields_per_record < 1 {
        return Err(PatternError::InvalidFieldCap(max_fields_per_record));
    }

    let mut pool = record_pool(rng, length + 1, fields, values, max_fields_per_record)?;

    let root = pool.remove(rng.gen_range(0..pool.len()));
    let mut arena = TreeArena::new();
    arena.push(root.fields, None);

    for _ in 0..length {
        let parent = rng.gen_range(0..arena.len());
        let mut child = pool.remove(rng.gen_range(0..pool.len()));
        if rng.gen_bool(WILDCARD_PROBABILITY) {
            child = PatternNode::wildcard();
        }
        arena.push(child.fields, Some(parent));
    }

    arena
        .build(|fields, children| PatternNode { fields, children })
        .ok_or(PatternError::InvalidLength(length))
}

/// Collect `size` nodes whose records are pairwise distinct.
fn record_pool<R: Rng>(
    rng: &mut R,
    size: usize,
    fields: &[String],
    values: &FieldUniverse,
    max_fields_per_record: usize,
) -> Result<Vec<PatternNode>, PatternError> {
    let cap = max_fields_per_record.min(fields.len());
    let mut pool: Vec<PatternNode> = Vec::with_capacity(size);
    let mut rejections = 0;

    while pool.len() < size {
        let candidate = PatternNode::new(random_record(rng, fields, values, cap)?);
        if pool.iter().any(|node| node.same_record(&candidate)) {
            rejections += 1;
            if rejections >= MAX_CONSECUTIVE_REJECTIONS {
                return Err(PatternError::UniverseTooSmall {
                    requested: size,
                    distinct: pool.len(),
                });
            }
            continue;
        }
        rejections = 0;
        pool.push(candidate);
    }

    Ok(pool)
}

/// Sample one record with between 1 and `cap` distinct fields.
fn random_record<R: Rng>(
    rng: &mut R,
    fields: &[String],
    values: &FieldUniverse,
    cap: usize,
) -> Result<FieldMap, PatternError> {
    let count = rng.gen_range(1..=cap);
    let names: Vec<&String> = fields.choose_multiple(rng, count).collect();

    let mut record = FieldMap::new();
    for name in names {
        let value = values
            .values(name)
            .and_then(|candidates| candidates.choose(rng))
            .ok_or_else(|| PatternError::UnknownField(name.clone()))?;
        record.insert(name.clone(), value.clone());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::generate_values;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use treegen_core::FieldValues;

    fn universe(rng: &mut StdRng) -> (Vec<String>, FieldUniverse) {
        let universe = generate_values(rng, 10, 20);
        let fields = universe
            .field_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        (fields, universe)
    }

    #[test]
    fn test_node_count_matches_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        for length in [1, 2, 5, 10] {
            let pattern = generate_pattern(&mut rng, length, &fields, &values, 10).unwrap();
            assert_eq!(pattern.node_count(), length + 1);
            assert_eq!(pattern.nodes().len(), length + 1);
        }
    }

    #[test]
    fn test_many_lengths() {
        let mut rng = StdRng::seed_from_u64(7);
        let (fields, values) = universe(&mut rng);

        for _ in 0..100 {
            let length = rng.gen_range(2..=10);
            let pattern = generate_pattern(&mut rng, length, &fields, &values, 10).unwrap();
            assert_eq!(pattern.edge_count(), length);
        }
    }

    #[test]
    fn test_field_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        for _ in 0..50 {
            let pattern = generate_pattern(&mut rng, 6, &fields, &values, 3).unwrap();
            for node in pattern.nodes() {
                assert!(node.fields.len() <= 3);
            }
        }
    }

    #[test]
    fn test_values_come_from_universe() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        let pattern = generate_pattern(&mut rng, 8, &fields, &values, 4).unwrap();
        for node in pattern.nodes() {
            for (name, value) in &node.fields {
                assert!(values.values(name).unwrap().contains(value));
            }
        }
    }

    #[test]
    fn test_root_is_never_wildcard() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        for _ in 0..50 {
            let pattern = generate_pattern(&mut rng, 3, &fields, &values, 2).unwrap();
            assert!(!pattern.is_wildcard());
        }
    }

    #[test]
    fn test_non_wildcard_nodes_are_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        for _ in 0..20 {
            let pattern = generate_pattern(&mut rng, 10, &fields, &values, 2).unwrap();
            let records: Vec<&FieldMap> = pattern
                .nodes()
                .iter()
                .filter(|n| !n.is_wildcard())
                .map(|n| &n.fields)
                .collect();
            for (i, a) in records.iter().enumerate() {
                for b in &records[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_wildcards_appear() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        let wildcards: usize = (0..50)
            .map(|_| {
                let pattern = generate_pattern(&mut rng, 10, &fields, &values, 3).unwrap();
                pattern.nodes().iter().filter(|n| n.is_wildcard()).count()
            })
            .sum();

        // 500 draws at p = 0.2
        assert!((50..=150).contains(&wildcards), "got {wildcards} wildcards");
    }

    #[test]
    fn test_deterministic() {
        let mut setup = StdRng::seed_from_u64(1);
        let (fields, values) = universe(&mut setup);

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let p1 = generate_pattern(&mut rng1, 6, &fields, &values, 5).unwrap();
        let p2 = generate_pattern(&mut rng2, 6, &fields, &values, 5).unwrap();

        assert_eq!(p1, p2);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(42);
        let (fields, values) = universe(&mut rng);

        assert!(matches!(
            generate_pattern(&mut rng, 0, &fields, &values, 3),
            Err(PatternError::InvalidLength(0))
        ));
        assert!(matches!(
            generate_pattern(&mut rng, 2, &[], &values, 3),
            Err(PatternError::NoFields)
        ));
        assert!(matches!(
            generate_pattern(&mut rng, 2, &fields, &values, 0),
            Err(PatternError::InvalidFieldCap(0))
        ));
    }

    #[test]
    fn test_unknown_field() {
        let mut rng = StdRng::seed_from_u64(42);
        let values = FieldUniverse::new(vec![FieldValues::new("a", vec!["1".to_string()])]);
        let fields = vec!["missing".to_string()];

        let result = generate_pattern(&mut rng, 1, &fields, &values, 1);
        assert!(matches!(result, Err(PatternError::UnknownField(name)) if name == "missing"));
    }

    #[test]
    fn test_universe_too_small() {
        let mut rng = StdRng::seed_from_u64(42);
        let values = FieldUniverse::new(vec![FieldValues::new("a", vec!["1".to_string()])]);
        let fields = vec!["a".to_string()];

        let result = generate_pattern(&mut rng, 1, &fields, &values, 1);
        assert!(matches!(
            result,
            Err(PatternError::UniverseTooSmall {
                requested: 2,
                distinct: 1
            })
        ));
    }

    #[test]
    fn test_cap_larger_than_fields() {
        let mut rng = StdRng::seed_from_u64(42);
        let values = FieldUniverse::new(vec![
            FieldValues::new("a", (0..10).map(|i| i.to_string()).collect()),
            FieldValues::new("b", (0..10).map(|i| i.to_string()).collect()),
        ]);
        let fields = vec!["a".to_string(), "b".to_string()];

        let pattern = generate_pattern(&mut rng, 4, &fields, &values, 50).unwrap();
        for node in pattern.nodes() {
            assert!(node.fields.len() <= 2);
        }
    }

    #[test]
    fn test_record_pool_is_pairwise_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let values = FieldUniverse::new(vec![
            FieldValues::new("a", vec!["1".to_string(), "2".to_string()]),
            FieldValues::new("b", vec!["1".to_string(), "2".to_string()]),
        ]);
        let fields = vec!["a".to_string(), "b".to_string()];

        // 4 single-field records plus 4 two-field records exist
        let pool = record_pool(&mut rng, 8, &fields, &values, 2).unwrap();
        assert_eq!(pool.len(), 8);
        for (i, node) in pool.iter().enumerate() {
            assert!(pool[i + 1..].iter().all(|other| !node.same_record(other)));
        }

        assert!(matches!(
            record_pool(&mut rng, 9, &fields, &values, 2),
            Err(PatternError::UniverseTooSmall {
                requested: 9,
                distinct: 8
            })
        ));
    }
}
