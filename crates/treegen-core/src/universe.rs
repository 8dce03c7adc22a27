//! Field-value universe shared by every transaction of one run.

use serde::Serialize;
use std::collections::HashMap;

/// A field name together with the ordered list of values it may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValues {
    /// Field name
    pub name: String,

    /// Legal values, in generation order
    pub values: Vec<String>,
}

impl FieldValues {
    /// Create a new field definition.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Mapping from field name to its legal values.
///
/// Field order is fixed at construction and is the order used for sampling
/// and for output columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldUniverse {
    fields: Vec<FieldValues>,

    /// Cached field lookup (not serialized)
    #[serde(skip)]
    field_map: HashMap<String, usize>,
}

impl FieldUniverse {
    /// Create a universe from an ordered list of field definitions.
    ///
    /// A later definition with an already-seen name replaces the earlier
    /// one's values but keeps its position.
    pub fn new(fields: Vec<FieldValues>) -> Self {
        let mut universe = Self::default();
        for field in fields {
            match universe.field_map.get(&field.name) {
                Some(&idx) => universe.fields[idx].values = field.values,
                None => {
                    universe
                        .field_map
                        .insert(field.name.clone(), universe.fields.len());
                    universe.fields.push(field);
                }
            }
        }
        universe
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the universe has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in universe order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.field_map.contains_key(name)
    }

    /// Legal values of a field.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.field_map
            .get(name)
            .map(|&idx| self.fields[idx].values.as_slice())
    }

    /// Iterate over field definitions in universe order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldValues> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_field_order_is_preserved() {
        let universe = FieldUniverse::new(vec![
            FieldValues::new("zeta", values("z", 2)),
            FieldValues::new("alpha", values("a", 3)),
            FieldValues::new("mid", values("m", 1)),
        ]);

        assert_eq!(universe.len(), 3);
        assert_eq!(universe.field_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_values_lookup() {
        let universe = FieldUniverse::new(vec![FieldValues::new("color", values("c", 4))]);

        assert_eq!(universe.values("color").map(|v| v.len()), Some(4));
        assert!(universe.values("size").is_none());
        assert!(universe.contains("color"));
        assert!(!universe.contains("size"));
    }

    #[test]
    fn test_duplicate_name_replaces_values() {
        let universe = FieldUniverse::new(vec![
            FieldValues::new("a", values("x", 1)),
            FieldValues::new("b", values("y", 1)),
            FieldValues::new("a", values("z", 2)),
        ]);

        assert_eq!(universe.field_names(), vec!["a", "b"]);
        assert_eq!(
            universe.values("a"),
            Some(["z0".to_string(), "z1".to_string()].as_slice())
        );
    }

    #[test]
    fn test_empty_universe() {
        let universe = FieldUniverse::default();
        assert!(universe.is_empty());
        assert_eq!(universe.iter().count(), 0);
    }
}
