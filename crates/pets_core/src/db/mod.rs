//! SQLite connection bootstrap for the pet store.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by the storage layer.
//! - Ensure the `pets` table exists before any read or write.
//!
//! # Invariants
//! - Schema bootstrap is idempotent; there is no versioned migration state.
//! - Core code must not touch `pets` before bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Connection bootstrap stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    Pragmas,
    CreatePetsTable,
}

impl BootstrapStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pragmas => "pragmas",
            Self::CreatePetsTable => "create_pets_table",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The connection opened but could not be prepared for pet storage,
    /// e.g. the file is not a SQLite database.
    Bootstrap {
        step: BootstrapStep,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Bootstrap { step, source } => {
                write!(f, "pet store bootstrap failed at {}: {source}", step.as_str())
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Bootstrap { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
