//! Table-level storage contract and SQLite-backed implementation.
//!
//! # Responsibility
//! - Translate read/insert/update/delete requests into parameterized SQL.
//! - Acquire one SQLite connection lazily and reuse it for every call.
//!
//! # Invariants
//! - Identifiers (table and column names) are always quoted.
//! - Value placeholders precede filter placeholders in generated SQL, so
//!   anonymous `?` in a caller's clause bind to the caller's arguments.
//! - Insert constraint violations are reported as `Ok(None)`, not errors.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::filter::Selection;
use crate::model::pet::PetId;
use crate::model::values::ContentValues;
use once_cell::unsync::OnceCell;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Placeholder count in a filter does not match its argument count.
    MalformedFilter(String),
    InvalidIdentifier(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MalformedFilter(message) => write!(f, "malformed filter: {message}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid identifier `{name}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MalformedFilter(_) => None,
            Self::InvalidIdentifier(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::InvalidParameterCount(given, expected) => Self::MalformedFilter(
                format!("{given} argument(s) supplied for {expected} placeholder(s)"),
            ),
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Table-level storage contract used by the provider.
pub trait PetRepository {
    /// Reads rows. An empty `projection` selects every column.
    fn read(
        &self,
        table: &str,
        projection: &[&str],
        selection: &Selection,
        sort_order: Option<&str>,
    ) -> RepoResult<Vec<ContentValues>>;

    /// Inserts one row. Returns `None` when the storage engine rejected it.
    fn insert(&self, table: &str, values: &ContentValues) -> RepoResult<Option<PetId>>;

    /// Updates matching rows and returns the affected count.
    fn update(
        &self,
        table: &str,
        values: &ContentValues,
        selection: &Selection,
    ) -> RepoResult<usize>;

    /// Deletes matching rows and returns the affected count.
    fn delete(&self, table: &str, selection: &Selection) -> RepoResult<usize>;
}

/// Where the repository opens its connection from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// SQLite-backed repository with a lazily opened connection.
pub struct SqlitePetRepository {
    location: DbLocation,
    conn: OnceCell<Connection>,
}

impl SqlitePetRepository {
    /// Creates a repository that opens `location` on first use.
    pub fn new(location: DbLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            location: DbLocation::Memory,
            conn: OnceCell::with_value(conn),
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    pub fn is_connected(&self) -> bool {
        self.conn.get().is_some()
    }

    fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        })
    }
}

impl PetRepository for SqlitePetRepository {
    fn read(
        &self,
        table: &str,
        projection: &[&str],
        selection: &Selection,
        sort_order: Option<&str>,
    ) -> RepoResult<Vec<ContentValues>> {
        let columns = if projection.is_empty() {
            "*".to_string()
        } else {
            projection
                .iter()
                .map(|column| quote_identifier(column))
                .collect::<RepoResult<Vec<_>>>()?
                .join(", ")
        };

        let mut sql = format!("SELECT {columns} FROM {}", quote_identifier(table)?);
        push_where(&mut sql, selection);
        if let Some(order) = sort_order.filter(|order| !order.trim().is_empty()) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query(params_from_iter(selection.args.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = ContentValues::new();
            for (index, name) in names.iter().enumerate() {
                record.put(name.as_str(), row.get::<_, Value>(index)?);
            }
            records.push(record);
        }

        Ok(records)
    }

    fn insert(&self, table: &str, values: &ContentValues) -> RepoResult<Option<PetId>> {
        let table = quote_identifier(table)?;
        let sql = if values.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let columns = values
                .iter()
                .map(|(column, _)| quote_identifier(column))
                .collect::<RepoResult<Vec<_>>>()?;
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            )
        };

        let conn = self.connection()?;
        match conn.execute(&sql, params_from_iter(values.iter().map(|(_, value)| value))) {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(
        &self,
        table: &str,
        values: &ContentValues,
        selection: &Selection,
    ) -> RepoResult<usize> {
        if values.is_empty() {
            return Ok(0);
        }

        let assignments = values
            .iter()
            .map(|(column, _)| quote_identifier(column).map(|column| format!("{column} = ?")))
            .collect::<RepoResult<Vec<_>>>()?;
        let mut sql = format!(
            "UPDATE {} SET {}",
            quote_identifier(table)?,
            assignments.join(", ")
        );
        push_where(&mut sql, selection);

        let mut bind_values: Vec<Value> = values.iter().map(|(_, value)| value.clone()).collect();
        bind_values.extend(selection.args.iter().cloned().map(Value::Text));

        let changed = self
            .connection()?
            .execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn delete(&self, table: &str, selection: &Selection) -> RepoResult<usize> {
        let mut sql = format!("DELETE FROM {}", quote_identifier(table)?);
        push_where(&mut sql, selection);

        let changed = self
            .connection()?
            .execute(&sql, params_from_iter(selection.args.iter()))?;
        Ok(changed)
    }
}

fn push_where(sql: &mut String, selection: &Selection) {
    if let Some(clause) = selection.clause() {
        sql.push_str(" WHERE ");
        sql.push_str(clause);
    }
}

fn quote_identifier(name: &str) -> RepoResult<String> {
    if name.trim().is_empty() {
        return Err(RepoError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

#[cfg(test)]
mod tests {
    use super::{quote_identifier, RepoError};

    #[test]
    fn quote_identifier_escapes_embedded_quotes() {
        assert_eq!(quote_identifier("name").unwrap(), "\"name\"");
        assert_eq!(quote_identifier("we\"ird").unwrap(), "\"we\"\"ird\"");
    }

    #[test]
    fn quote_identifier_rejects_blank_names() {
        let err = quote_identifier("  ").unwrap_err();
        assert!(matches!(err, RepoError::InvalidIdentifier(_)));
    }
}
