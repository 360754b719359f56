// docgate-api/src/lib.rs
// ============================================================================
// Module: Docgate API Library
// Description: HTTP service for the Docgate catalog and validation engine.
// Purpose: Expose the REST surface over a configured catalog store.
// Dependencies: axum, docgate-core, docgate-config, docgate-store-sqlite
// ============================================================================

//! ## Overview
//! The API crate wires the validation engine and catalog stores behind a
//! small REST surface: rule and template CRUD, a document-intake endpoint
//! that runs the engine when extraction completes, and result retrieval.
//! The engine itself stays clock-free; this crate reads the system clock at
//! the boundary to assign timestamps.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ApiError;
pub use routes::AppState;
pub use routes::router;
pub use server::DocgateServer;
pub use server::ServerError;
pub use server::build_store;
