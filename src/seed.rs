//! Bundled demo dataset.
//!
//! A static list of recipe-shaped records embedded at compile time. It is
//! never merged with live store data; demo mode pre-populates the in-memory
//! store with it when no hosted store is configured.

use crate::types::RecipeFields;

/// Raw seed dataset.
pub const SEED_JSON: &str = include_str!("../data/seed.json");

/// Parse the bundled dataset.
pub fn load_seed() -> serde_json::Result<Vec<RecipeFields>> {
    serde_json::from_str(SEED_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_parses() {
        let seed = load_seed().expect("seed data must parse");
        assert!(!seed.is_empty());
        // Every seed record carries a name and at least one tag, so the
        // demo catalog is searchable out of the box.
        for fields in &seed {
            assert!(!fields.name.is_empty());
            assert!(!fields.tags.is_empty());
        }
    }
}
