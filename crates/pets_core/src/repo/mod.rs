//! Storage engine contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the table-level read/insert/update/delete contract the provider
//!   composes.
//! - Keep SQL text generation and connection handling inside this boundary.
//!
//! # Invariants
//! - Repositories never validate pet fields; that is the provider's job.
//! - Filter arguments are bound positionally, never interpolated.

pub mod pet_repo;
