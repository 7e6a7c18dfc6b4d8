use pets_core::{
    new_pet_values, validate_for_insert, validate_for_update, ContentValues, Gender,
    PetValidationError,
};

fn rex(gender: i64, weight: i64) -> ContentValues {
    ContentValues::new()
        .with("name", "Rex".to_string())
        .with("gender", gender)
        .with("weight", weight)
}

#[test]
fn insert_requires_name() {
    let err = validate_for_insert(&ContentValues::new()).unwrap_err();
    assert_eq!(err, PetValidationError::NameRequired);
    assert!(err.to_string().contains("name"));

    let empty_name = ContentValues::new()
        .with("name", String::new())
        .with("gender", 1_i64);
    assert_eq!(
        validate_for_insert(&empty_name).unwrap_err(),
        PetValidationError::NameRequired
    );
}

#[test]
fn insert_rejects_gender_outside_valid_set() {
    let err = validate_for_insert(&rex(99, 2)).unwrap_err();
    assert_eq!(err, PetValidationError::InvalidGender(Some(99)));
    assert!(err.to_string().contains("invalid gender"));

    let missing_gender = ContentValues::new().with("name", "Rex".to_string());
    assert_eq!(
        validate_for_insert(&missing_gender).unwrap_err(),
        PetValidationError::InvalidGender(None)
    );
}

#[test]
fn insert_rejects_negative_weight() {
    let err = validate_for_insert(&rex(1, -3)).unwrap_err();
    assert_eq!(err, PetValidationError::NegativeWeight(-3));
    assert!(err.to_string().contains("weight must be non-negative"));
}

#[test]
fn insert_accepts_complete_record_with_or_without_weight() {
    validate_for_insert(&rex(1, 10)).unwrap();
    validate_for_insert(&rex(0, 0)).unwrap();
    validate_for_insert(&new_pet_values("Tom", None, Gender::Female, None)).unwrap();
}

#[test]
fn insert_accepts_numeric_text_for_integer_columns() {
    let values = ContentValues::new()
        .with("name", "Rex".to_string())
        .with("gender", "2".to_string())
        .with("weight", "4".to_string());
    validate_for_insert(&values).unwrap();
}

#[test]
fn update_with_empty_map_is_valid() {
    validate_for_update(&ContentValues::new()).unwrap();
}

#[test]
fn update_checks_only_supplied_fields() {
    validate_for_update(&ContentValues::new().with("gender", 1_i64)).unwrap();
    validate_for_update(&ContentValues::new().with("breed", "Pug".to_string())).unwrap();

    assert_eq!(
        validate_for_update(&ContentValues::new().with("weight", -1_i64)).unwrap_err(),
        PetValidationError::NegativeWeight(-1)
    );
    assert_eq!(
        validate_for_update(&ContentValues::new().with("name", String::new())).unwrap_err(),
        PetValidationError::NameRequired
    );
    assert_eq!(
        validate_for_update(&ContentValues::new().with("gender", 3_i64)).unwrap_err(),
        PetValidationError::InvalidGender(Some(3))
    );
}

#[test]
fn update_rejects_supplied_values_of_the_wrong_type() {
    assert_eq!(
        validate_for_update(&ContentValues::new().with("gender", "male".to_string()))
            .unwrap_err(),
        PetValidationError::InvalidGender(None)
    );

    let mut null_name = ContentValues::new();
    null_name.put_null("name");
    assert_eq!(
        validate_for_update(&null_name).unwrap_err(),
        PetValidationError::NameRequired
    );
}

#[test]
fn non_integer_weight_is_reported_as_invalid_not_negative() {
    let fractional = rex(1, 0).with("weight", 3.5_f64);
    let err = validate_for_insert(&fractional).unwrap_err();
    assert_eq!(err, PetValidationError::InvalidWeight);
    assert!(!err.to_string().contains("non-negative"));

    let text = ContentValues::new().with("weight", "heavy".to_string());
    assert_eq!(
        validate_for_update(&text).unwrap_err(),
        PetValidationError::InvalidWeight
    );

    validate_for_insert(&rex(1, 0).with("weight", 3.0_f64)).unwrap();
}

#[test]
fn update_rejects_id_column() {
    let values = ContentValues::new()
        .with("id", 99_i64)
        .with("name", "Rex".to_string());
    assert_eq!(
        validate_for_update(&values).unwrap_err(),
        PetValidationError::ImmutableId
    );
}
