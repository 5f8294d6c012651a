//! Collaborators of the locale registry: where locale rows come from and
//! which locale the caller is currently using.

use crate::error::{Error, Result};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// A single record read from a locale table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRow {
    pub code: String,
    /// `None` when the id column is null
    pub id: Option<String>,
}

impl LocaleRow {
    pub fn new(code: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            id: Some(id.into()),
        }
    }
}

/// Column names used to read a locale table.
#[derive(Debug, Clone, Copy)]
pub struct LocaleColumns<'a> {
    pub code: &'a str,
    pub id: &'a str,
}

/// A tabular source of locale records.
///
/// Implementations return every row of `table` in a stable order. The
/// registry reads the whole result before replacing its mapping, so a failing
/// source never leaves the registry half loaded.
pub trait LocaleSource {
    fn fetch(&self, table: &str, columns: LocaleColumns<'_>) -> Result<Vec<LocaleRow>>;
}

/// In-memory locale tables, keyed by table name.
///
/// Column names are ignored: every table already stores `(code, id)` pairs.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, Vec<LocaleRow>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<LocaleRow>) -> Self {
        self.tables.insert(table.into(), rows);
        self
    }
}

impl LocaleSource for MemorySource {
    fn fetch(&self, table: &str, _columns: LocaleColumns<'_>) -> Result<Vec<LocaleRow>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| Error::Source(format!("table '{}' does not exist", table)))
    }
}

/// Locale table stored in a SQLite database.
pub struct SqliteSource {
    conn: Mutex<Connection>,
}

impl SqliteSource {
    /// Open an existing database read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| Error::Source(format!("failed to open {}: {}", path.display(), e)))?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl LocaleSource for SqliteSource {
    fn fetch(&self, table: &str, columns: LocaleColumns<'_>) -> Result<Vec<LocaleRow>> {
        let sql = format!(
            "SELECT {}, {} FROM {} ORDER BY rowid",
            quote_identifier(columns.code)?,
            quote_identifier(columns.id)?,
            quote_identifier(table)?,
        );

        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::Source("connection lock poisoned".to_string()))?;
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, Value>(0)?, row.get::<_, Value>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(code, id)| {
                let code = value_to_string(code).ok_or_else(|| {
                    Error::Source(format!("null value in column '{}'", columns.code))
                })?;
                Ok(LocaleRow {
                    code,
                    id: value_to_string(id),
                })
            })
            .collect()
    }
}

/// Locale tables come from configuration, so identifiers are limited to a
/// plain `[A-Za-z0-9_]` alphabet before being interpolated into SQL.
fn quote_identifier(name: &str) -> Result<String> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::Source(format!("invalid identifier '{}'", name)));
    }
    Ok(format!("\"{}\"", name))
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

/// Supplies the caller's active locale, if any.
pub trait LocaleResolver {
    fn resolve(&self) -> Option<String>;
}

impl<F> LocaleResolver for F
where
    F: Fn() -> Option<String>,
{
    fn resolve(&self) -> Option<String> {
        self()
    }
}

/// Resolver that always reports the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl LocaleResolver for FixedLocale {
    fn resolve(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
