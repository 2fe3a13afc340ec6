//! Recipe data model and API payload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card media fallback served when a recipe has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/custom_plate.png";

// ═══════════════════════════════════════════════════════════════════════════
// Recipe Model
// ═══════════════════════════════════════════════════════════════════════════

/// Persisted field payload of one recipe document.
///
/// This is exactly what gets written to the store on insert: the draft's
/// staging state never appears here. `ingredients` and `instructions` are
/// free-text blocks, not structured lists. Missing fields decode to their
/// defaults so older documents keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFields {
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A fully persisted recipe: the store-assigned id plus the saved fields.
///
/// Recipes are immutable once created; the only lifecycle operations are
/// insert and delete-by-id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque identifier assigned by the store on creation.
    pub id: String,

    #[serde(flatten)]
    pub fields: RecipeFields,

    /// Creation timestamp reported by the store, when it provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Image URL for card media, falling back to the placeholder asset.
    pub fn image_url(&self) -> &str {
        self.fields.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// API Payloads
// ═══════════════════════════════════════════════════════════════════════════

/// Query parameters for the catalog listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Search term matched against recipe names and tags.
    #[serde(default)]
    pub q: Option<String>,
}

/// Response for `GET /recipes`.
#[derive(Debug, Clone, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<Recipe>,
    /// Number of recipes matching the search term. Zero tells the client
    /// to render its explicit no-results state.
    pub count: usize,
    /// Size of the full catalog snapshot, ignoring the search term.
    pub total: usize,
}

/// Response for `POST /recipes`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRecipeResponse {
    pub created: Recipe,
}

/// Response for `DELETE /recipes/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRecipeResponse {
    pub deleted: String,
}

/// Response for `GET /recipes/random`.
#[derive(Debug, Clone, Serialize)]
pub struct RandomRecipeResponse {
    pub recipe: Recipe,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
