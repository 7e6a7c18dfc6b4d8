//! Filter expressions with positional arguments.

use crate::db::schema::COLUMN_ID;
use crate::model::pet::PetId;

/// Boolean predicate with `?` placeholders plus its ordered arguments.
///
/// An absent or empty clause means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub clause: Option<String>,
    pub args: Vec<String>,
}

impl Selection {
    /// Selection matching every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, A>(clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            clause: Some(clause.into()),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the clause when it is present and non-empty.
    pub fn clause(&self) -> Option<&str> {
        self.clause.as_deref().filter(|clause| !clause.is_empty())
    }

    /// Narrows this selection to one row id.
    pub fn for_item(&self, id: PetId) -> Self {
        augment_for_item(id, self.clause.as_deref(), &self.args)
    }
}

/// ANDs an `id = ?` clause onto a base filter.
///
/// The base clause is parenthesized so its operators cannot bind across the
/// appended clause. The id is appended as the last argument to keep
/// placeholder positions aligned. `base_args` is copied, never modified.
pub fn augment_for_item(id: PetId, base_clause: Option<&str>, base_args: &[String]) -> Selection {
    let clause = match base_clause.filter(|clause| !clause.is_empty()) {
        None => format!("{COLUMN_ID} = ?"),
        Some(base) => format!("({base}) AND {COLUMN_ID} = ?"),
    };

    let mut args = Vec::with_capacity(base_args.len() + 1);
    args.extend_from_slice(base_args);
    args.push(id.to_string());

    Selection {
        clause: Some(clause),
        args,
    }
}
