//! Core use-case services.
//!
//! # Responsibility
//! - Compose path matching, filter narrowing, validation, storage and change
//!   notification into the four table operations.
//! - Keep callers decoupled from SQL and connection details.

pub mod pet_provider;
