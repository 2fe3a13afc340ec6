//! Recipe Rolodex - recipe catalog over a hosted document store.
//!
//! Users browse, search, randomly select, add, and delete recipe entries
//! stored in a hosted document database. The catalog keeps an authoritative
//! in-memory snapshot that is reloaded in full on startup and after every
//! mutation.
//!
//! ## Endpoints
//!
//! - `GET /recipes?q=term` - filtered catalog listing
//! - `POST /recipes` - submit a draft recipe
//! - `DELETE /recipes/:id` - delete a recipe
//! - `GET /recipes/random` - uniform random pick
//! - `GET /healthz` - health check
//!
//! ## Background Tasks
//!
//! - Catalog refresh loop (optional, `RECIPES_REFRESH_SECONDS`)

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_rolodex::catalog::CatalogService;
use recipe_rolodex::config::{AppState, Config};
use recipe_rolodex::handlers::*;
use recipe_rolodex::repository::RecipeRepository;
use recipe_rolodex::seed;
use recipe_rolodex::store::{DocumentStore, FirestoreStore, MemoryStore};
use recipe_rolodex::tasks::start_refresh_loop;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_rolodex=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    info!("Starting Recipe Rolodex");
    info!("Collection: {}", config.collection);
    info!("Binding to: {}", bind_addr);

    // Shared HTTP client for the hosted store
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client");

    // Pick the store backend: hosted Firestore when configured, otherwise
    // the seeded in-memory store (demo mode).
    let store: Arc<dyn DocumentStore> = match &config.firestore_project {
        Some(project) => {
            info!("Using Firestore project: {}", project);
            Arc::new(FirestoreStore::new(
                http_client,
                config.firestore_base_url.clone(),
                project.clone(),
                config.firestore_database.clone(),
                config.firestore_api_key.clone(),
            ))
        }
        None => {
            warn!("FIRESTORE_PROJECT_ID not set; running in demo mode with bundled seed data");
            let seed = seed::load_seed().expect("Bundled seed data must parse");
            Arc::new(MemoryStore::with_documents(seed).await)
        }
    };

    let repository = RecipeRepository::new(store, config.collection.clone());
    let service = Arc::new(CatalogService::new(repository));
    let state = AppState::new(config, service.clone());

    // Initial full load ("mount"). Failure leaves an empty snapshot and is
    // logged; the catalog recovers on the next reload.
    service.refresh().await;

    // Build router
    let app = Router::new()
        .route("/recipes", get(list_recipes_handler))
        .route("/recipes", post(submit_recipe_handler))
        .route("/recipes/random", get(random_recipe_handler))
        .route("/recipes/:id", delete(delete_recipe_handler))
        .route("/healthz", get(health_handler))
        // Add CORS support
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        // Add request tracing
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state.clone());

    // Start background refresh task
    tokio::spawn(async move {
        start_refresh_loop(state).await;
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
