// docgate-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Catalog Store
// Description: Durable catalog store backed by SQLite WAL.
// Purpose: Persist rules, templates, and validation results across restarts.
// Dependencies: docgate-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements the catalog store traits on top of `SQLite`. Each
//! entity is stored as a JSON payload; ids, names, and creation order are
//! lifted into dedicated columns so uniqueness and listing order are enforced
//! by the database rather than re-derived in Rust. Template-to-rule bindings
//! live in a join table with `ON DELETE CASCADE`, so deleting a rule detaches
//! it from every template atomically. Schema version mismatches fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use docgate_core::DocumentId;
use docgate_core::Rule;
use docgate_core::RuleId;
use docgate_core::RuleStore;
use docgate_core::StoreError;
use docgate_core::Template;
use docgate_core::TemplateId;
use docgate_core::TemplateStore;
use docgate_core::ValidationResult;
use docgate_core::ValidationResultStore;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the catalog store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` catalog store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding raw catalog payloads.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid store configuration or data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Stored payload failed to deserialize.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        Self::Backend(error.to_string())
    }
}

/// Maps a `rusqlite` error into the backend store error.
fn db_err(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(format!("sqlite store db error: {err}"))
}

/// Maps a serialization error into the backend store error.
fn json_err(err: serde_json::Error) -> StoreError {
    StoreError::Backend(format!("sqlite store json error: {err}"))
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed catalog store with WAL support.
///
/// # Invariants
/// - Connection access is serialized through a mutex.
/// - Multi-row mutations run inside a single transaction.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Opens or creates the catalog database at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid, the database
    /// cannot be opened, or its schema version is unsupported.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_path(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection, mapping poisoning into a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Backend("sqlite store mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Open and Schema
// ============================================================================

/// Validates the configured database path.
fn validate_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.to_string_lossy();
    if path_string.is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS rules (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    created_at INTEGER NOT NULL,
                    rule_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS templates (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    created_at INTEGER NOT NULL,
                    template_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS template_rules (
                    template_id TEXT NOT NULL,
                    rule_id TEXT NOT NULL,
                    position INTEGER NOT NULL,
                    PRIMARY KEY (template_id, rule_id),
                    FOREIGN KEY (template_id)
                        REFERENCES templates(id) ON DELETE CASCADE,
                    FOREIGN KEY (rule_id)
                        REFERENCES rules(id) ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS idx_template_rules_rule_id
                    ON template_rules (rule_id);
                CREATE TABLE IF NOT EXISTS validation_results (
                    document_id TEXT NOT NULL PRIMARY KEY,
                    saved_at INTEGER NOT NULL,
                    result_json BLOB NOT NULL
                );",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

// ============================================================================
// SECTION: Row Helpers
// ============================================================================

/// Deserializes a rule payload column.
fn rule_from_json(payload: &[u8]) -> Result<Rule, StoreError> {
    serde_json::from_slice(payload)
        .map_err(|err| StoreError::Backend(format!("sqlite store corruption: {err}")))
}

/// Deserializes a template payload column and rebinds its rule ids from the
/// join table, which is authoritative after rule deletions.
fn template_from_row(tx: &Transaction<'_>, payload: &[u8]) -> Result<Template, StoreError> {
    let mut template: Template = serde_json::from_slice(payload)
        .map_err(|err| StoreError::Backend(format!("sqlite store corruption: {err}")))?;
    let mut statement = tx
        .prepare(
            "SELECT rule_id FROM template_rules
             WHERE template_id = ?1 ORDER BY position ASC",
        )
        .map_err(db_err)?;
    let ids = statement
        .query_map(params![template.id.as_str()], |row| row.get::<_, String>(0))
        .map_err(db_err)?
        .collect::<Result<Vec<String>, rusqlite::Error>>()
        .map_err(db_err)?;
    template.rule_ids = ids.into_iter().map(RuleId::from).collect();
    Ok(template)
}

/// Loads every rule inside the given transaction, creation order ascending.
fn load_rules(tx: &Transaction<'_>) -> Result<Vec<Rule>, StoreError> {
    let mut statement = tx
        .prepare("SELECT rule_json FROM rules ORDER BY created_at ASC, rowid ASC")
        .map_err(db_err)?;
    let payloads = statement
        .query_map(params![], |row| row.get::<_, Vec<u8>>(0))
        .map_err(db_err)?
        .collect::<Result<Vec<Vec<u8>>, rusqlite::Error>>()
        .map_err(db_err)?;
    payloads.iter().map(|payload| rule_from_json(payload)).collect()
}

/// Checks whether another row of `table` already uses `name`.
fn name_taken(
    tx: &Transaction<'_>,
    table: &str,
    name: &str,
    excluded_id: Option<&str>,
) -> Result<bool, StoreError> {
    let query = format!("SELECT id FROM {table} WHERE name = ?1");
    let existing: Option<String> = tx
        .query_row(&query, params![name], |row| row.get(0))
        .optional()
        .map_err(db_err)?;
    Ok(match existing {
        Some(id) => excluded_id != Some(id.as_str()),
        None => false,
    })
}

/// Replaces the rule bindings for a template inside the given transaction.
fn write_bindings(tx: &Transaction<'_>, template: &Template) -> Result<(), StoreError> {
    tx.execute("DELETE FROM template_rules WHERE template_id = ?1", params![
        template.id.as_str()
    ])
    .map_err(db_err)?;
    for (position, rule_id) in template.rule_ids.iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|_| StoreError::Backend("template binds too many rules".to_string()))?;
        tx.execute(
            "INSERT INTO template_rules (template_id, rule_id, position) VALUES (?1, ?2, ?3)",
            params![template.id.as_str(), rule_id.as_str(), position],
        )
        .map_err(db_err)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Rule Store
// ============================================================================

impl RuleStore for SqliteCatalogStore {
    fn create_rule(&self, rule: Rule) -> Result<(), StoreError> {
        rule.validate()?;
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        if name_taken(&tx, "rules", &rule.name, None)? {
            return Err(StoreError::DuplicateRuleName(rule.name));
        }
        let payload = serde_json::to_vec(&rule).map_err(json_err)?;
        tx.execute(
            "INSERT INTO rules (id, name, created_at, rule_json) VALUES (?1, ?2, ?3, ?4)",
            params![rule.id.as_str(), rule.name, rule.created_at.as_unix_millis(), payload],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)
    }

    fn update_rule(&self, rule: Rule) -> Result<(), StoreError> {
        rule.validate()?;
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        if name_taken(&tx, "rules", &rule.name, Some(rule.id.as_str()))? {
            return Err(StoreError::DuplicateRuleName(rule.name));
        }
        let payload = serde_json::to_vec(&rule).map_err(json_err)?;
        let updated = tx
            .execute(
                "UPDATE rules SET name = ?2, created_at = ?3, rule_json = ?4 WHERE id = ?1",
                params![rule.id.as_str(), rule.name, rule.created_at.as_unix_millis(), payload],
            )
            .map_err(db_err)?;
        if updated == 0 {
            return Err(StoreError::RuleNotFound(rule.id));
        }
        tx.commit().map_err(db_err)
    }

    fn delete_rule(&self, id: &RuleId) -> Result<(), StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        // ON DELETE CASCADE detaches the rule from every bound template.
        let deleted = tx
            .execute("DELETE FROM rules WHERE id = ?1", params![id.as_str()])
            .map_err(db_err)?;
        if deleted == 0 {
            return Err(StoreError::RuleNotFound(id.clone()));
        }
        tx.commit().map_err(db_err)
    }

    fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, StoreError> {
        let connection = self.lock()?;
        let payload: Option<Vec<u8>> = connection
            .query_row("SELECT rule_json FROM rules WHERE id = ?1", params![id.as_str()], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_err)?;
        payload.as_deref().map(rule_from_json).transpose()
    }

    fn list_rules(&self) -> Result<Vec<Rule>, StoreError> {
        let connection = self.lock()?;
        let mut statement = connection
            .prepare("SELECT rule_json FROM rules ORDER BY created_at DESC, rowid DESC")
            .map_err(db_err)?;
        let payloads = statement
            .query_map(params![], |row| row.get::<_, Vec<u8>>(0))
            .map_err(db_err)?
            .collect::<Result<Vec<Vec<u8>>, rusqlite::Error>>()
            .map_err(db_err)?;
        payloads.iter().map(|payload| rule_from_json(payload)).collect()
    }
}

// ============================================================================
// SECTION: Template Store
// ============================================================================

impl TemplateStore for SqliteCatalogStore {
    fn create_template(&self, template: Template) -> Result<(), StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        template.validate_against(&load_rules(&tx)?)?;
        if name_taken(&tx, "templates", &template.name, None)? {
            return Err(StoreError::DuplicateTemplateName(template.name));
        }
        let payload = serde_json::to_vec(&template).map_err(json_err)?;
        tx.execute(
            "INSERT INTO templates (id, name, created_at, template_json) VALUES (?1, ?2, ?3, ?4)",
            params![
                template.id.as_str(),
                template.name,
                template.created_at.as_unix_millis(),
                payload
            ],
        )
        .map_err(db_err)?;
        write_bindings(&tx, &template)?;
        tx.commit().map_err(db_err)
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        template.validate_against(&load_rules(&tx)?)?;
        if name_taken(&tx, "templates", &template.name, Some(template.id.as_str()))? {
            return Err(StoreError::DuplicateTemplateName(template.name));
        }
        let payload = serde_json::to_vec(&template).map_err(json_err)?;
        let updated = tx
            .execute(
                "UPDATE templates SET name = ?2, created_at = ?3, template_json = ?4 \
                 WHERE id = ?1",
                params![
                    template.id.as_str(),
                    template.name,
                    template.created_at.as_unix_millis(),
                    payload
                ],
            )
            .map_err(db_err)?;
        if updated == 0 {
            return Err(StoreError::TemplateNotFound(template.id));
        }
        write_bindings(&tx, &template)?;
        tx.commit().map_err(db_err)
    }

    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        let payload: Option<Vec<u8>> = tx
            .query_row(
                "SELECT template_json FROM templates WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;
        payload.as_deref().map(|payload| template_from_row(&tx, payload)).transpose()
    }

    fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(db_err)?;
        let payloads = {
            let mut statement = tx
                .prepare("SELECT template_json FROM templates ORDER BY created_at DESC, rowid DESC")
                .map_err(db_err)?;
            statement
                .query_map(params![], |row| row.get::<_, Vec<u8>>(0))
                .map_err(db_err)?
                .collect::<Result<Vec<Vec<u8>>, rusqlite::Error>>()
                .map_err(db_err)?
        };
        payloads.iter().map(|payload| template_from_row(&tx, payload)).collect()
    }
}

// ============================================================================
// SECTION: Validation Result Store
// ============================================================================

impl ValidationResultStore for SqliteCatalogStore {
    fn save_result(
        &self,
        document_id: &DocumentId,
        result: ValidationResult,
    ) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = serde_json::to_vec(&result).map_err(json_err)?;
        let saved_at = result
            .passed_rules
            .iter()
            .chain(&result.warning_rules)
            .chain(&result.failed_rules)
            .map(|outcome| outcome.timestamp.as_unix_millis())
            .max()
            .unwrap_or(0);
        connection
            .execute(
                "INSERT OR REPLACE INTO validation_results (document_id, saved_at, result_json) \
                 VALUES (?1, ?2, ?3)",
                params![document_id.as_str(), saved_at, payload],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn load_result(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<ValidationResult>, StoreError> {
        let connection = self.lock()?;
        let payload: Option<Vec<u8>> = connection
            .query_row(
                "SELECT result_json FROM validation_results WHERE document_id = ?1",
                params![document_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;
        payload
            .map(|payload| {
                serde_json::from_slice(&payload)
                    .map_err(|err| StoreError::Backend(format!("sqlite store corruption: {err}")))
            })
            .transpose()
    }
}
