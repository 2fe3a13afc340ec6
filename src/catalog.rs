//! Recipe catalog - authoritative snapshot, filtering, random selection.
//!
//! The catalog never patches its list in place. Every mutation is followed
//! by a full reload, and a completed reload replaces the snapshot as a
//! whole. A monotonic generation drawn before each load guards against a
//! slow reload overwriting a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::draft::RecipeDraft;
use crate::error::StoreResult;
use crate::repository::RecipeRepository;
use crate::types::Recipe;

// ═══════════════════════════════════════════════════════════════════════════
// Snapshot
// ═══════════════════════════════════════════════════════════════════════════

/// The full in-memory recipe list as of one successful load.
///
/// Replaceable as a whole, never incrementally patched.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub recipes: Vec<Recipe>,
    /// Load generation this snapshot came from.
    pub generation: u64,
}

/// Single-writer holder of the authoritative snapshot.
#[derive(Default)]
pub struct Catalog {
    snapshot: RwLock<Snapshot>,
    next_generation: AtomicU64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the current snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// Draw the generation for a reload about to start.
    ///
    /// Must be called before the store round-trip so that reloads racing
    /// each other resolve by start order, not completion order.
    pub fn begin_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Install a freshly loaded list, unless a newer load already won.
    ///
    /// Returns whether the snapshot was replaced.
    pub async fn install(&self, recipes: Vec<Recipe>, generation: u64) -> bool {
        let mut snapshot = self.snapshot.write().await;
        if generation <= snapshot.generation {
            warn!(
                "Discarding stale reload (generation {} <= {})",
                generation, snapshot.generation
            );
            return false;
        }
        *snapshot = Snapshot {
            recipes,
            generation,
        };
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Filtering and Random Selection
// ═══════════════════════════════════════════════════════════════════════════

/// Filter recipes by a search term.
///
/// A recipe matches when its lower-cased name, or any lower-cased tag,
/// contains the lower-cased term. The empty term matches everything. The
/// result is a stable subsequence of the input; no ranking, no re-sort.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| {
            recipe.fields.name.to_lowercase().contains(&needle)
                || recipe
                    .fields
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Pick a uniformly random recipe.
///
/// Returns `None` on an empty list; an invalid index is never drawn.
pub fn random_pick(recipes: &[Recipe]) -> Option<&Recipe> {
    if recipes.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..recipes.len());
    recipes.get(index)
}

// ═══════════════════════════════════════════════════════════════════════════
// Catalog Service
// ═══════════════════════════════════════════════════════════════════════════

/// Query/mutation facade over the repository and the snapshot.
///
/// Failure visibility is deliberately asymmetric: load and delete failures
/// are logged and swallowed (the prior snapshot stays authoritative), while
/// add failures propagate so the submitting client sees the error and keeps
/// its form populated.
pub struct CatalogService {
    repository: RecipeRepository,
    catalog: Catalog,
}

impl CatalogService {
    pub fn new(repository: RecipeRepository) -> Self {
        Self {
            repository,
            catalog: Catalog::new(),
        }
    }

    /// Current snapshot of the catalog.
    pub async fn snapshot(&self) -> Snapshot {
        self.catalog.snapshot().await
    }

    /// Perform a full reload and replace the snapshot.
    ///
    /// On store failure the existing snapshot is left untouched and the
    /// failure is logged only. Returns whether a new snapshot was
    /// installed.
    pub async fn refresh(&self) -> bool {
        let generation = self.catalog.begin_generation();
        match self.repository.load_all().await {
            Ok(recipes) => self.catalog.install(recipes, generation).await,
            Err(e) => {
                error!("Failed to load recipes: {}", e);
                false
            }
        }
    }

    /// Submit a draft. On success the catalog is reloaded in full.
    ///
    /// Errors propagate to the caller; the borrowed draft is untouched so
    /// the form can retry without re-entering data.
    pub async fn add(&self, draft: &RecipeDraft) -> StoreResult<Recipe> {
        let created = self.repository.add(draft).await?;
        info!("Recipe {} ({}) added", created.id, created.fields.name);
        self.refresh().await;
        Ok(created)
    }

    /// Delete a recipe by id, then reload. No confirmation, no undo.
    ///
    /// Store failures are logged only; the snapshot keeps its current
    /// contents and the recipe stays listed.
    pub async fn delete(&self, id: &str) {
        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                info!("Recipe {} deleted", id);
                self.refresh().await;
            }
            Err(e) => error!("Failed to delete recipe {}: {}", id, e),
        }
    }

    /// Uniformly random member of the current snapshot, if any.
    pub async fn random(&self) -> Option<Recipe> {
        let snapshot = self.catalog.snapshot().await;
        random_pick(&snapshot.recipes).cloned()
    }
}
