//! Resource path classification.
//!
//! Paths take the form `<authority>/<collection>` for the whole table and
//! `<authority>/<collection>/<id>` for one row, optionally prefixed with the
//! `content://` scheme.
//!
//! # Invariants
//! - Classification is pure; the pattern is compiled once per matcher.
//! - The id segment is all ASCII digits and fits in a non-negative `i64`.

use crate::model::pet::PetId;
use regex::Regex;

pub const CONTENT_SCHEME: &str = "content://";

/// Outcome of matching one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceMatch {
    Collection,
    Item(PetId),
    Unrecognized,
}

/// Logical content kind of an addressable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Collection,
    Item,
}

impl ContentType {
    /// Renders the vendor MIME type for this content kind.
    pub fn mime_type(self, authority: &str, collection: &str) -> String {
        match self {
            Self::Collection => format!("vnd.android.cursor.dir/{authority}/{collection}"),
            Self::Item => format!("vnd.android.cursor.item/{authority}/{collection}"),
        }
    }
}

/// Matcher for the two path shapes served by one collection.
#[derive(Debug, Clone)]
pub struct ResourceMatcher {
    authority: String,
    collection: String,
    pattern: Regex,
}

impl ResourceMatcher {
    pub fn new(authority: impl Into<String>, collection: impl Into<String>) -> Self {
        let authority = authority.into();
        let collection = collection.into();
        let pattern = Regex::new(&format!(
            r"^(?:{})?{}/{}(?:/([0-9]+))?/?$",
            regex::escape(CONTENT_SCHEME),
            regex::escape(&authority),
            regex::escape(&collection)
        ))
        .expect("escaped path pattern is valid");
        Self {
            authority,
            collection,
            pattern,
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn classify(&self, path: &str) -> ResourceMatch {
        let Some(captures) = self.pattern.captures(path) else {
            return ResourceMatch::Unrecognized;
        };
        match captures.get(1) {
            None => ResourceMatch::Collection,
            Some(id) => id
                .as_str()
                .parse::<PetId>()
                .map_or(ResourceMatch::Unrecognized, ResourceMatch::Item),
        }
    }

    /// Canonical path for the whole collection.
    pub fn collection_path(&self) -> String {
        format!("{CONTENT_SCHEME}{}/{}", self.authority, self.collection)
    }

    /// Canonical path for one row.
    pub fn item_path(&self, id: PetId) -> String {
        format!("{}/{id}", self.collection_path())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentType, ResourceMatch, ResourceMatcher};

    #[test]
    fn overflowing_id_is_unrecognized() {
        let matcher = ResourceMatcher::new("auth", "pets");
        assert_eq!(
            matcher.classify("auth/pets/99999999999999999999"),
            ResourceMatch::Unrecognized
        );
    }

    #[test]
    fn authority_dots_are_matched_literally() {
        let matcher = ResourceMatcher::new("com.example.pets", "pets");
        assert_eq!(
            matcher.classify("comxexamplexpets/pets"),
            ResourceMatch::Unrecognized
        );
    }

    #[test]
    fn mime_type_distinguishes_dir_and_item() {
        assert_eq!(
            ContentType::Collection.mime_type("auth", "pets"),
            "vnd.android.cursor.dir/auth/pets"
        );
        assert_eq!(
            ContentType::Item.mime_type("auth", "pets"),
            "vnd.android.cursor.item/auth/pets"
        );
    }
}
