//! Document store clients for the hosted recipe collection.
//!
//! The remote store is Google Firestore, consumed through its v1 REST API:
//! - `GET    {parent}/{collection}` - list documents (paginated)
//! - `POST   {parent}/{collection}` - insert, store assigns the id
//! - `DELETE {parent}/{collection}/{id}` - delete by id
//!
//! Everything behind the [`DocumentStore`] trait so the catalog can run
//! against the in-memory store in tests and demo mode.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::types::RecipeFields;

/// One document as the store hands it back: assigned id, field payload,
/// and the store-side creation timestamp when reported.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: RecipeFields,
    pub created_at: Option<DateTime<Utc>>,
}

/// Collection-level document store operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in the collection.
    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    /// Insert a document; the store assigns and returns its id.
    async fn insert_document(&self, collection: &str, fields: &RecipeFields)
        -> StoreResult<String>;

    /// Delete a document by id.
    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Firestore REST Client
// ═══════════════════════════════════════════════════════════════════════════

/// Default endpoint of the hosted Firestore REST API.
pub const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";

/// Page size requested from the list endpoint.
const LIST_PAGE_SIZE: usize = 300;

/// Firestore v1 REST client.
pub struct FirestoreStore {
    http_client: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    api_key: Option<String>,
}

impl FirestoreStore {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        database: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            project_id: project_id.into(),
            database: database.into(),
            api_key,
        }
    }

    /// URL of the collection's document list/insert endpoint.
    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database, collection
        )
    }

    /// URL of a single document.
    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    /// Attach the API key query parameter when one is configured.
    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    /// Fetch one page of the collection listing.
    async fn fetch_page(&self, collection: &str, page_token: Option<&str>) -> Result<Value> {
        let mut request = self
            .http_client
            .get(self.collection_url(collection))
            .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = self
            .with_key(request)
            .send()
            .await
            .context("Failed to send list request to Firestore")?
            .error_for_status()
            .context("Firestore rejected the list request")?;

        response
            .json()
            .await
            .context("Failed to parse Firestore list response")
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(collection, page_token.as_deref()).await?;

            if let Some(docs) = page.get("documents").and_then(Value::as_array) {
                for doc in docs {
                    documents.push(decode_document(doc)?);
                }
            }

            match page.get("nextPageToken").and_then(Value::as_str) {
                Some(token) if !token.is_empty() => page_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: &RecipeFields) -> Result<String> {
        let body = json!({ "fields": encode_fields(fields) });

        let response = self
            .with_key(self.http_client.post(self.collection_url(collection)))
            .json(&body)
            .send()
            .await
            .context("Failed to send insert request to Firestore")?
            .error_for_status()
            .context("Firestore rejected the insert request")?;

        let created: Value = response
            .json()
            .await
            .context("Failed to parse Firestore insert response")?;

        document_id(&created).context("Insert response carried no document name")
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.with_key(self.http_client.delete(self.document_url(collection, id)))
            .send()
            .await
            .context("Failed to send delete request to Firestore")?
            .error_for_status()
            .context("Firestore rejected the delete request")?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        self.list_all(collection)
            .await
            .map_err(StoreError::unavailable)
    }

    async fn insert_document(
        &self,
        collection: &str,
        fields: &RecipeFields,
    ) -> StoreResult<String> {
        self.insert(collection, fields)
            .await
            .map_err(StoreError::unavailable)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.delete(collection, id)
            .await
            .map_err(StoreError::unavailable)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Firestore Value Encoding
// ═══════════════════════════════════════════════════════════════════════════

/// Encode a field payload into Firestore's typed value map.
fn encode_fields(fields: &RecipeFields) -> Value {
    let mut map = serde_json::Map::new();

    map.insert("name".to_string(), string_value(&fields.name));
    map.insert("ingredients".to_string(), string_value(&fields.ingredients));
    map.insert(
        "instructions".to_string(),
        string_value(&fields.instructions),
    );
    map.insert(
        "tags".to_string(),
        json!({
            "arrayValue": {
                "values": fields.tags.iter().map(|t| string_value(t)).collect::<Vec<_>>()
            }
        }),
    );
    if let Some(source) = &fields.source {
        map.insert("source".to_string(), string_value(source));
    }
    if let Some(image) = &fields.image {
        map.insert("image".to_string(), string_value(image));
    }
    if let Some(url) = &fields.url {
        map.insert("url".to_string(), string_value(url));
    }

    Value::Object(map)
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

/// Decode a Firestore document into a [`StoredDocument`].
///
/// Missing fields fall back to their defaults; unknown fields are ignored.
fn decode_document(doc: &Value) -> Result<StoredDocument> {
    let id = document_id(doc).context("Document carried no name")?;
    let fields = doc.get("fields").cloned().unwrap_or_else(|| json!({}));

    let created_at = doc
        .get("createTime")
        .and_then(Value::as_str)
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc));

    Ok(StoredDocument {
        id,
        fields: decode_fields(&fields),
        created_at,
    })
}

fn decode_fields(fields: &Value) -> RecipeFields {
    RecipeFields {
        name: string_field(fields, "name").unwrap_or_default(),
        ingredients: string_field(fields, "ingredients").unwrap_or_default(),
        instructions: string_field(fields, "instructions").unwrap_or_default(),
        tags: array_field(fields, "tags"),
        source: string_field(fields, "source"),
        image: string_field(fields, "image"),
        url: string_field(fields, "url"),
    }
}

fn string_field(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn array_field(fields: &Value, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(|v| v.get("arrayValue"))
        .and_then(|v| v.get("values"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.get("stringValue").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Extract the document id from the trailing segment of its resource name.
fn document_id(doc: &Value) -> Option<String> {
    doc.get("name")?
        .as_str()?
        .rsplit('/')
        .next()
        .map(str::to_string)
}

// ═══════════════════════════════════════════════════════════════════════════
// In-Memory Store
// ═══════════════════════════════════════════════════════════════════════════

/// In-memory document store for tests and demo mode.
///
/// Documents keep insertion order, matching the listing order callers see
/// from the hosted store within a session.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given field payloads.
    pub async fn with_documents(seed: Vec<RecipeFields>) -> Self {
        let store = Self::new();
        {
            let mut documents = store.documents.write().await;
            for fields in seed {
                documents.push(StoredDocument {
                    id: uuid::Uuid::new_v4().to_string(),
                    fields,
                    created_at: Some(Utc::now()),
                });
            }
        }
        store
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, _collection: &str) -> StoreResult<Vec<StoredDocument>> {
        Ok(self.documents.read().await.clone())
    }

    async fn insert_document(
        &self,
        _collection: &str,
        fields: &RecipeFields,
    ) -> StoreResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.documents.write().await.push(StoredDocument {
            id: id.clone(),
            fields: fields.clone(),
            created_at: Some(Utc::now()),
        });
        Ok(id)
    }

    async fn delete_document(&self, _collection: &str, id: &str) -> StoreResult<()> {
        self.documents.write().await.retain(|doc| doc.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_maps_tags_to_typed_array() {
        let fields = RecipeFields {
            name: "Tacos".to_string(),
            ingredients: "tortillas".to_string(),
            instructions: "assemble".to_string(),
            tags: vec!["mexican".to_string(), "dinner".to_string()],
            source: Some("https://example.com".to_string()),
            image: None,
            url: None,
        };

        let encoded = encode_fields(&fields);
        assert_eq!(encoded["name"]["stringValue"], "Tacos");
        assert_eq!(
            encoded["tags"]["arrayValue"]["values"][1]["stringValue"],
            "dinner"
        );
        assert_eq!(encoded["source"]["stringValue"], "https://example.com");
        // Absent optionals are omitted entirely, not encoded as null.
        assert!(encoded.get("image").is_none());
    }

    #[test]
    fn decode_realistic_document() {
        let doc = json!({
            "name": "projects/demo/databases/(default)/documents/recipes/abc123",
            "fields": {
                "name": { "stringValue": "Dal" },
                "ingredients": { "stringValue": "lentils" },
                "instructions": { "stringValue": "simmer" },
                "tags": { "arrayValue": { "values": [
                    { "stringValue": "indian" },
                    { "stringValue": "vegetarian" }
                ]}}
            },
            "createTime": "2024-03-01T12:00:00Z",
            "updateTime": "2024-03-01T12:00:00Z"
        });

        let decoded = decode_document(&doc).unwrap();
        assert_eq!(decoded.id, "abc123");
        assert_eq!(decoded.fields.name, "Dal");
        assert_eq!(decoded.fields.tags, vec!["indian", "vegetarian"]);
        assert_eq!(decoded.fields.source, None);
        assert!(decoded.created_at.is_some());
    }

    #[test]
    fn decode_tolerates_missing_fields() {
        let doc = json!({
            "name": "projects/demo/databases/(default)/documents/recipes/bare",
            "fields": { "name": { "stringValue": "Toast" } }
        });

        let decoded = decode_document(&doc).unwrap();
        assert_eq!(decoded.fields.name, "Toast");
        assert!(decoded.fields.ingredients.is_empty());
        assert!(decoded.fields.tags.is_empty());
        assert_eq!(decoded.created_at, None);
    }

    #[test]
    fn decode_empty_tag_array_shape() {
        // Firestore serializes an empty array as {"arrayValue": {}}.
        let fields = json!({
            "name": { "stringValue": "Plain" },
            "tags": { "arrayValue": {} }
        });

        assert!(decode_fields(&fields).tags.is_empty());
    }

    #[tokio::test]
    async fn memory_store_assigns_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let first = RecipeFields {
            name: "First".to_string(),
            ..blank_fields()
        };
        let second = RecipeFields {
            name: "Second".to_string(),
            ..blank_fields()
        };

        let first_id = store.insert_document("recipes", &first).await.unwrap();
        store.insert_document("recipes", &second).await.unwrap();

        let docs = store.list_documents("recipes").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first_id);
        assert_eq!(docs[0].fields.name, "First");
        assert_eq!(docs[1].fields.name, "Second");

        store.delete_document("recipes", &first_id).await.unwrap();
        let docs = store.list_documents("recipes").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields.name, "Second");
    }

    fn blank_fields() -> RecipeFields {
        RecipeFields {
            name: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            tags: Vec::new(),
            source: None,
            image: None,
            url: None,
        }
    }
}
