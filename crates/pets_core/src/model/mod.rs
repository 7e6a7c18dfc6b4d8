//! Domain model for the pet table.
//!
//! # Responsibility
//! - Define the field-value map exchanged with callers and storage.
//! - Define the typed pet record and the invariants every persisted row keeps.
//!
//! # Invariants
//! - Every persisted pet has a non-empty name, a known gender and a
//!   non-negative weight.

pub mod pet;
pub mod values;
