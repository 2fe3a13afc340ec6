//! Add-recipe draft state.
//!
//! A draft is the transient form state for a recipe that has not been
//! persisted yet: the regular fields plus a two-part tag editor made of the
//! committed `tags` sequence and a single staged `current_tag` entry. The
//! staged text only enters `tags` through [`RecipeDraft::commit_tag`] and is
//! never persisted itself.

use serde::{Deserialize, Serialize};

use crate::types::RecipeFields;

/// Transient, unpersisted recipe data.
///
/// A draft becomes a [`crate::types::Recipe`] only after a successful store
/// insert followed by a full catalog reload; it is never partially visible
/// to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub source: String,

    /// Committed tags, in insertion order. Duplicates are allowed.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Staged tag text. Discarded at submit time if still uncommitted.
    #[serde(default)]
    pub current_tag: String,
}

impl RecipeDraft {
    /// Commit the staged tag.
    ///
    /// Appends the trimmed staging text to `tags` and clears the staging
    /// field. Whitespace-only input commits nothing. Returns whether a tag
    /// was added.
    pub fn commit_tag(&mut self) -> bool {
        let tag = self.current_tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.tags.push(tag.to_string());
        self.current_tag.clear();
        true
    }

    /// Remove a committed tag by value.
    ///
    /// Every occurrence equal to `value` is removed, so duplicate tags go
    /// as a group.
    pub fn remove_tag(&mut self, value: &str) {
        self.tags.retain(|tag| tag != value);
    }

    /// Consume the draft into the field payload sent to the store.
    ///
    /// Only committed state survives: `current_tag` is dropped, and a blank
    /// source becomes an absent one.
    pub fn into_fields(self) -> RecipeFields {
        let source = Some(self.source.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        RecipeFields {
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            tags: self.tags,
            source,
            image: None,
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_trims_staged_tag() {
        let mut draft = RecipeDraft {
            current_tag: "  spicy  ".to_string(),
            ..Default::default()
        };

        assert!(draft.commit_tag());
        assert_eq!(draft.tags, vec!["spicy"]);
        assert!(draft.current_tag.is_empty());
    }

    #[test]
    fn commit_rejects_whitespace_only() {
        let mut draft = RecipeDraft {
            current_tag: "   ".to_string(),
            ..Default::default()
        };

        assert!(!draft.commit_tag());
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn commit_keeps_insertion_order_and_duplicates() {
        let mut draft = RecipeDraft::default();
        for tag in ["dinner", "mexican", "dinner"] {
            draft.current_tag = tag.to_string();
            draft.commit_tag();
        }

        assert_eq!(draft.tags, vec!["dinner", "mexican", "dinner"]);
    }

    #[test]
    fn remove_tag_drops_all_equal_occurrences() {
        let mut draft = RecipeDraft {
            tags: vec![
                "quick".to_string(),
                "spicy".to_string(),
                "quick".to_string(),
            ],
            ..Default::default()
        };

        draft.remove_tag("quick");
        assert_eq!(draft.tags, vec!["spicy"]);
    }

    #[test]
    fn into_fields_discards_staged_tag() {
        let draft = RecipeDraft {
            name: "Tacos".to_string(),
            tags: vec!["mexican".to_string()],
            current_tag: "uncommitted".to_string(),
            ..Default::default()
        };

        let fields = draft.into_fields();
        assert_eq!(fields.tags, vec!["mexican"]);
    }

    #[test]
    fn into_fields_treats_blank_source_as_absent() {
        let blank = RecipeDraft {
            source: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(blank.into_fields().source, None);

        let set = RecipeDraft {
            source: "https://example.com/tacos".to_string(),
            ..Default::default()
        };
        assert_eq!(
            set.into_fields().source.as_deref(),
            Some("https://example.com/tacos")
        );
    }
}
