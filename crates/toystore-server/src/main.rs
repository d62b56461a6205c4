//! Toy Store Server
//!
//! A small HTTP service exposing CRUD over two in-memory collections, toys
//! and categories, related one-to-many by positional index. State lives for
//! the process lifetime only; there is no persistence.

mod extractors;
mod handlers;
mod models;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use storage::Store;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Toy Store Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    info!("Config loaded: bind={}", config.bind_address);

    // Seed the collections once; every handler mutates this shared store.
    let store = Arc::new(Store::seeded());
    info!(
        "Store seeded: {} toys, {} categories",
        store.toys().len(),
        store.categories().len()
    );

    let state = AppState { store };
    let router = app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}

/// Build the full application router over the given state.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(resource_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resource_routes() -> Router<AppState> {
    use handlers::{categories, toys};

    Router::new()
        .route(
            "/toys",
            get(toys::list).post(toys::create).delete(toys::delete_all),
        )
        .route(
            "/toys/:id",
            get(toys::get).put(toys::update).delete(toys::delete),
        )
        .route(
            "/categories",
            get(categories::list)
                .post(categories::create)
                .delete(categories::delete_all),
        )
        .route(
            "/categories/:id",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        // :id doubles as the category name for the cross query; axum wants
        // one param name per position.
        .route("/categories/:id/toys", get(categories::toys))
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
}

fn load_config() -> Result<Config> {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    Ok(Config { bind_address })
}
