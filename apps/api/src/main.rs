mod analysis;
mod config;
mod errors;
mod logbook;
mod routes;
mod state;
mod taxonomy;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogBackend};
use crate::logbook::store::{FileLogStore, LogStore, MemoryLogStore};
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillscan API v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = match &config.taxonomy_path {
        Some(path) => SkillTaxonomy::from_file(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin().context("Built-in taxonomy is invalid")?,
    };
    info!(
        "Taxonomy loaded: {} roles, {} soft skills (default role: {})",
        taxonomy.roles().len(),
        taxonomy.soft_skills().len(),
        taxonomy.default_role().key
    );

    let log_store: Arc<dyn LogStore> = match config.log_backend {
        LogBackend::File => {
            let store = FileLogStore::new(&config.log_file_path);
            info!("Log store: file at {}", store.path().display());
            Arc::new(store)
        }
        LogBackend::Memory => {
            info!("Log store: in-memory (records are not persisted)");
            Arc::new(MemoryLogStore::new())
        }
    };
    // Writes the banner now; an unwritable location aborts startup.
    log_store
        .ensure_initialized()
        .await
        .context("Failed to initialize log store")?;

    let state = AppState {
        taxonomy: Arc::new(taxonomy),
        log_store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
