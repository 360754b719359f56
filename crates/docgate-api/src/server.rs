// docgate-api/src/server.rs
// ============================================================================
// Module: Docgate HTTP Server
// Description: Server lifecycle wiring configuration, store, and router.
// Purpose: Materialize the configured catalog store and serve the REST API.
// Dependencies: axum, tokio, docgate-config, docgate-core, docgate-store-sqlite
// ============================================================================

//! ## Overview
//! The server owns startup only. It builds the catalog store the
//! configuration names, binds the listener, and hands the router to axum.
//! Request semantics live in [`crate::routes`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use docgate_config::CatalogStoreType;
use docgate_config::DocgateConfig;
use docgate_core::InMemoryCatalogStore;
use docgate_core::SharedCatalogStore;
use docgate_store_sqlite::SqliteCatalogStore;
use docgate_store_sqlite::SqliteStoreConfig;

use crate::routes::AppState;
use crate::routes::router;

// ============================================================================
// SECTION: Server
// ============================================================================

/// REST server instance.
pub struct DocgateServer {
    /// Service configuration.
    config: DocgateConfig,
    /// Catalog store backing the handlers.
    store: SharedCatalogStore,
}

impl DocgateServer {
    /// Builds a server from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or the
    /// catalog store cannot be opened.
    pub fn from_config(config: DocgateConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_store(&config)?;
        Ok(Self {
            config,
            store,
        })
    }

    /// Serves the REST API until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the listener cannot bind or the server
    /// fails while running.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind_addr
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let state = AppState {
            store: self.store,
            max_body_bytes: self.config.server.max_body_bytes,
        };
        let app = router(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport(format!("http bind failed: {addr}")))?;
        tracing::info!(%addr, "docgate listening");
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the catalog store named by the configuration.
///
/// # Errors
///
/// Returns [`ServerError::Init`] when the sqlite store cannot be opened and
/// [`ServerError::Config`] when the configuration names an unusable store.
pub fn build_store(config: &DocgateConfig) -> Result<SharedCatalogStore, ServerError> {
    match config.catalog_store.store_type {
        CatalogStoreType::Memory => Ok(SharedCatalogStore::from_store(InMemoryCatalogStore::new())),
        CatalogStoreType::Sqlite => {
            let path = config
                .catalog_store
                .path
                .clone()
                .ok_or_else(|| ServerError::Config("sqlite catalog_store requires path".to_string()))?;
            let store_config = SqliteStoreConfig {
                path,
                busy_timeout_ms: config.catalog_store.busy_timeout_ms,
                journal_mode: config.catalog_store.journal_mode,
                sync_mode: config.catalog_store.sync_mode,
            };
            let store = SqliteCatalogStore::open(&store_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(SharedCatalogStore::from_store(store))
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// REST server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
