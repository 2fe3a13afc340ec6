//! HTTP request handlers for the catalog API.
//!
//! - `GET    /recipes` - filtered catalog listing
//! - `POST   /recipes` - submit a draft recipe
//! - `DELETE /recipes/:id` - delete a recipe by id
//! - `GET    /recipes/random` - uniform random pick
//! - `GET    /healthz` - health check

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::catalog::filter_recipes;
use crate::config::AppState;
use crate::draft::RecipeDraft;
use crate::types::{DeleteRecipeResponse, ListQuery, ListRecipesResponse, Recipe};

/// GET /recipes
///
/// List the catalog, filtered by the optional `q` search term (matched
/// case-insensitively against names and tags). A zero `count` alongside a
/// non-zero `total` is the client's cue to render its explicit no-results
/// state instead of a bare empty container.
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    let term = query.q.unwrap_or_default();

    let recipes: Vec<Recipe> = filter_recipes(&snapshot.recipes, &term)
        .into_iter()
        .cloned()
        .collect();

    let response = ListRecipesResponse {
        count: recipes.len(),
        total: snapshot.recipes.len(),
        recipes,
    };

    (StatusCode::OK, Json(response))
}

/// POST /recipes
///
/// Persist a draft. On success the catalog has already been reloaded in
/// full and the created recipe (with its store-assigned id) is returned.
/// On store failure the submitted draft is echoed back alongside the error
/// so the client's form stays populated for a retry.
pub async fn submit_recipe_handler(
    State(state): State<AppState>,
    Json(draft): Json<RecipeDraft>,
) -> impl IntoResponse {
    match state.service.add(&draft).await {
        Ok(created) => (StatusCode::CREATED, Json(json!({ "created": created }))),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": e.to_string(), "draft": draft })),
        ),
    }
}

/// DELETE /recipes/:id
///
/// Immediate and irreversible; no confirmation step. Store failures are
/// logged, not surfaced - the response acknowledges the request and the
/// next listing shows whether the recipe is gone.
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.service.delete(&id).await;
    (StatusCode::OK, Json(DeleteRecipeResponse { deleted: id }))
}

/// GET /recipes/random
///
/// A uniformly random recipe from the current snapshot. The empty catalog
/// is guarded with an explicit error response; an invalid pick is never
/// produced.
pub async fn random_recipe_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.random().await {
        Some(recipe) => (StatusCode::OK, Json(json!({ "recipe": recipe }))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "catalog is empty" })),
        ),
    }
}

/// GET /healthz
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
