//! Core data-access layer for the pet table.
//! This crate is the single source of truth for pet record invariants and
//! for how resource paths map to table reads and writes.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod resource;
pub mod service;

pub use config::{ConfigError, ProviderConfig};
pub use filter::{augment_for_item, Selection};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::pet::{
    is_valid_gender, new_pet_values, validate_for_insert, validate_for_update, Gender, Pet,
    PetId, PetValidationError,
};
pub use model::values::ContentValues;
pub use notify::{ChangeNotifier, NoopNotifier, ObserverId, ObserverRegistry};
pub use repo::pet_repo::{DbLocation, PetRepository, RepoError, RepoResult, SqlitePetRepository};
pub use resource::{ContentType, ResourceMatch, ResourceMatcher};
pub use service::pet_provider::{
    Cursor, InvalidReason, ItemRef, Operation, PetProvider, ProviderError, ProviderResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
