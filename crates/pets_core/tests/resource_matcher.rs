use pets_core::{ResourceMatch, ResourceMatcher};

const AUTHORITY: &str = "com.example.android.pets";

fn matcher() -> ResourceMatcher {
    ResourceMatcher::new(AUTHORITY, "pets")
}

#[test]
fn collection_paths_classify_as_collection() {
    let matcher = matcher();
    for path in [
        "com.example.android.pets/pets",
        "content://com.example.android.pets/pets",
        "content://com.example.android.pets/pets/",
    ] {
        assert_eq!(matcher.classify(path), ResourceMatch::Collection, "{path}");
    }
}

#[test]
fn numeric_trailing_segment_classifies_as_item() {
    let matcher = matcher();
    assert_eq!(
        matcher.classify("content://com.example.android.pets/pets/0"),
        ResourceMatch::Item(0)
    );
    assert_eq!(
        matcher.classify("com.example.android.pets/pets/42"),
        ResourceMatch::Item(42)
    );
    assert_eq!(
        matcher.classify("com.example.android.pets/pets/007"),
        ResourceMatch::Item(7)
    );
}

#[test]
fn other_shapes_are_unrecognized() {
    let matcher = matcher();
    for path in [
        "",
        "content://com.example.android.pets",
        "content://com.example.android.pets/cats",
        "content://com.example.android.pets/pets/abc",
        "content://com.example.android.pets/pets/-1",
        "content://com.example.android.pets/pets/1.5",
        "content://com.example.android.pets/pets/1/extra",
        "content://other.authority/pets/1",
        "http://com.example.android.pets/pets",
    ] {
        assert_eq!(matcher.classify(path), ResourceMatch::Unrecognized, "{path}");
    }
}

#[test]
fn canonical_paths_round_trip_through_classify() {
    let matcher = matcher();
    assert_eq!(
        matcher.collection_path(),
        "content://com.example.android.pets/pets"
    );
    assert_eq!(
        matcher.classify(&matcher.collection_path()),
        ResourceMatch::Collection
    );
    assert_eq!(
        matcher.classify(&matcher.item_path(12)),
        ResourceMatch::Item(12)
    );
}
