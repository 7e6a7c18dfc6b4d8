//! Pet domain model and field validation.
//!
//! # Responsibility
//! - Define the typed pet record and its gender codes.
//! - Validate caller-supplied field maps before they reach storage.
//!
//! # Invariants
//! - Insert requires `name` and `gender`; `weight` is optional.
//! - Update accepts sparse maps, but every supplied field must be valid.
//! - `id` is assigned by storage and can never be supplied on update.
//! - A supplied value that cannot be read as its column type is invalid.

use crate::db::schema::{COLUMN_BREED, COLUMN_GENDER, COLUMN_ID, COLUMN_NAME, COLUMN_WEIGHT};
use crate::model::values::ContentValues;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier.
pub type PetId = i64;

/// Gender codes stored in `pets.gender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub const fn code(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }
}

/// Returns whether `code` is one of the stored gender codes.
pub fn is_valid_gender(code: i64) -> bool {
    Gender::from_code(code).is_some()
}

/// One row of the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub breed: Option<String>,
    pub gender: Gender,
    /// Defaults to 0 when not supplied on insert.
    pub weight: i64,
}

impl Pet {
    /// Decodes a full-projection row.
    ///
    /// Returns `None` when a required column is missing from `values` or holds
    /// a value outside the pet invariants.
    pub fn from_values(values: &ContentValues) -> Option<Self> {
        let name = values.get_as_string(COLUMN_NAME).filter(|name| !name.is_empty())?;
        let gender = Gender::from_code(values.get_as_integer(COLUMN_GENDER)?)?;
        let weight = values.get_as_integer(COLUMN_WEIGHT)?;
        if weight < 0 {
            return None;
        }
        Some(Self {
            id: values.get_as_integer(COLUMN_ID)?,
            name,
            breed: values.get_as_string(COLUMN_BREED),
            gender,
            weight,
        })
    }
}

/// Builds the insert map for a new pet.
///
/// `breed` and `weight` are omitted from the map when `None`, leaving the
/// column defaults in effect.
pub fn new_pet_values(
    name: impl Into<String>,
    breed: Option<&str>,
    gender: Gender,
    weight: Option<i64>,
) -> ContentValues {
    let mut values = ContentValues::new()
        .with(COLUMN_NAME, name.into())
        .with(COLUMN_GENDER, gender.code());
    if let Some(breed) = breed {
        values.put(COLUMN_BREED, breed.to_string());
    }
    if let Some(weight) = weight {
        values.put(COLUMN_WEIGHT, weight);
    }
    values
}

/// Field-level validation failure for pet writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    NameRequired,
    /// Carries the offending code when one could be read.
    InvalidGender(Option<i64>),
    NegativeWeight(i64),
    /// Weight was supplied but is not an integer.
    InvalidWeight,
    /// Update maps must not rewrite the storage-assigned id.
    ImmutableId,
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "name required"),
            Self::InvalidGender(Some(code)) => write!(f, "invalid gender `{code}`"),
            Self::InvalidGender(None) => write!(f, "invalid gender"),
            Self::NegativeWeight(weight) => {
                write!(f, "weight must be non-negative, got `{weight}`")
            }
            Self::InvalidWeight => write!(f, "weight must be an integer"),
            Self::ImmutableId => write!(f, "id cannot be updated"),
        }
    }
}

impl Error for PetValidationError {}

/// Checks a complete insert map.
pub fn validate_for_insert(values: &ContentValues) -> Result<(), PetValidationError> {
    check_name(values)?;
    check_gender(values)?;
    if values.contains_key(COLUMN_WEIGHT) {
        check_weight(values)?;
    }
    Ok(())
}

/// Checks a sparse update map; absent fields are skipped.
pub fn validate_for_update(values: &ContentValues) -> Result<(), PetValidationError> {
    if values.contains_key(COLUMN_ID) {
        return Err(PetValidationError::ImmutableId);
    }
    if values.contains_key(COLUMN_NAME) {
        check_name(values)?;
    }
    if values.contains_key(COLUMN_GENDER) {
        check_gender(values)?;
    }
    if values.contains_key(COLUMN_WEIGHT) {
        check_weight(values)?;
    }
    Ok(())
}

fn check_name(values: &ContentValues) -> Result<(), PetValidationError> {
    match values.get_as_string(COLUMN_NAME) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(PetValidationError::NameRequired),
    }
}

fn check_gender(values: &ContentValues) -> Result<(), PetValidationError> {
    match values.get_as_integer(COLUMN_GENDER) {
        Some(code) if is_valid_gender(code) => Ok(()),
        other => Err(PetValidationError::InvalidGender(other)),
    }
}

fn check_weight(values: &ContentValues) -> Result<(), PetValidationError> {
    match values.get_as_integer(COLUMN_WEIGHT) {
        Some(weight) if weight >= 0 => Ok(()),
        Some(weight) => Err(PetValidationError::NegativeWeight(weight)),
        None => Err(PetValidationError::InvalidWeight),
    }
}
