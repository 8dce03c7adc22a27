//! Random identifiers and field-value universes.

use rand::Rng;
use std::collections::HashSet;
use treegen_core::{FieldUniverse, FieldValues};
use uuid::Uuid;

/// Generate a random opaque token using the provided RNG.
///
/// Tokens are 32 lowercase hex characters (a v4 UUID in simple form).
/// Collisions are not checked.
pub fn random_string<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes).simple().to_string()
}

/// Generate `n` distinct random tokens.
pub fn generate_field_names<R: Rng>(rng: &mut R, n: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(n);
    let mut names = Vec::with_capacity(n);
    while names.len() < n {
        let name = random_string(rng);
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

/// Generate a universe of `n_fields` fields with `n_values` values each.
pub fn generate_values<R: Rng>(rng: &mut R, n_fields: usize, n_values: usize) -> FieldUniverse {
    let fields = generate_field_names(rng, n_fields)
        .into_iter()
        .map(|name| FieldValues::new(name, generate_field_names(rng, n_values)))
        .collect();
    FieldUniverse::new(fields)
}
