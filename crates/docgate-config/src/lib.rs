// docgate-config/src/lib.rs
// ============================================================================
// Module: Docgate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for docgate.toml semantics.
// Dependencies: docgate-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `docgate-config` defines the configuration model for the Docgate service.
//! Loading is strict and fail-closed: unknown keys, oversized files, and
//! inconsistent store settings are rejected before the service starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
