//! Recipe repository - CRUD operations over the document store.

use std::sync::Arc;

use crate::draft::RecipeDraft;
use crate::error::StoreResult;
use crate::store::{DocumentStore, StoredDocument};
use crate::types::Recipe;

/// Sole mediator between the catalog and the remote recipe store.
#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Fetch every recipe in the collection.
    pub async fn load_all(&self) -> StoreResult<Vec<Recipe>> {
        let documents = self.store.list_documents(&self.collection).await?;
        Ok(documents.into_iter().map(document_to_recipe).collect())
    }

    /// Persist a draft's committed fields; the store assigns the id.
    ///
    /// The returned recipe carries the assigned id and the submitted fields.
    /// The staged tag text never reaches the store. The draft is borrowed,
    /// not consumed, so a failed insert leaves the caller's form state
    /// intact for a retry.
    pub async fn add(&self, draft: &RecipeDraft) -> StoreResult<Recipe> {
        let fields = draft.clone().into_fields();
        let id = self.store.insert_document(&self.collection, &fields).await?;

        Ok(Recipe {
            id,
            fields,
            created_at: None,
        })
    }

    /// Remove a recipe by id. Immediate and irreversible.
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.store.delete_document(&self.collection, id).await
    }
}

/// Combine a store document's assigned id with its field payload.
fn document_to_recipe(doc: StoredDocument) -> Recipe {
    Recipe {
        id: doc.id,
        fields: doc.fields,
        created_at: doc.created_at,
    }
}
