use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod handlers;
mod models;
mod seed;
mod store;
mod validation;

use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state. The store sits behind one lock so each
/// operation runs as a single writer.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ProductStore>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,product_manager=debug"))?,
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Starting Product Manager API...");

    let store = if config.seed_samples {
        ProductStore::with_products(seed::sample_products())
    } else {
        ProductStore::new()
    };
    if store.is_empty() {
        info!("Product store starts empty");
    } else {
        info!(count = store.len(), "Seeded sample products");
    }

    let state = AppState {
        store: Arc::new(RwLock::new(store)),
    };

    let app = build_router(state);

    let addr = config.addr();
    info!("Listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  POST   /api/products      - Create a product");
    info!("  GET    /api/products      - Get all products");
    info!("  GET    /api/products/:id  - Get one product");
    info!("  PUT    /api/products/:id  - Update a product");
    info!("  DELETE /api/products/:id  - Delete a product");
    info!("  GET    /api/health        - Health check");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/api/health", get(handlers::health))

        // ── Products CRUD ───────────────────────────────────────────────────
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
