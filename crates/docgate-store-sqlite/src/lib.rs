// docgate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Docgate SQLite Store Library
// Description: Durable catalog store backed by SQLite.
// Purpose: Expose the SQLite-backed implementation of the catalog traits.
// Dependencies: docgate-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate persists the Docgate catalog (rules, templates, validation
//! results) in a single `SQLite` database file. Entities are stored as JSON
//! payloads with the columns the store itself queries (ids, names, creation
//! order) lifted out alongside them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteCatalogStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
