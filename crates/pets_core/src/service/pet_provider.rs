//! Pet data-access façade.
//!
//! # Responsibility
//! - Expose query/insert/update/delete over the `pets` table, addressed by
//!   resource path.
//! - Narrow filters to one row for item paths.
//! - Notify observers after successful mutations.
//!
//! # Invariants
//! - Path and field checks run before any storage call.
//! - Notification fires exactly once per mutation that affected at least one
//!   row, and never for failed, rejected or zero-row mutations.
//! - Empty updates are a no-op regardless of path.
//! - Storage errors propagate unchanged; there are no retries.

use crate::config::ProviderConfig;
use crate::db::schema::PETS_TABLE;
use crate::filter::Selection;
use crate::model::pet::{validate_for_insert, validate_for_update, Pet, PetId, PetValidationError};
use crate::model::values::ContentValues;
use crate::notify::ChangeNotifier;
use crate::repo::pet_repo::{PetRepository, RepoError, SqlitePetRepository};
use crate::resource::{ContentType, ResourceMatch, ResourceMatcher};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Façade operation names used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
    ResolveType,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ResolveType => "resolve_type",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Self::Query => "pet_query",
            Self::Insert => "pet_insert",
            Self::Update => "pet_update",
            Self::Delete => "pet_delete",
            Self::ResolveType => "pet_resolve_type",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a caller's request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The path does not address a resource this operation supports.
    UnsupportedPath,
    Validation(PetValidationError),
    /// Filter placeholders and arguments disagree.
    MalformedFilter(String),
}

impl Display for InvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPath => write!(f, "resource not supported"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MalformedFilter(message) => write!(f, "malformed filter: {message}"),
        }
    }
}

/// Façade error; every variant names the operation and path.
#[derive(Debug)]
pub enum ProviderError {
    InvalidArgument {
        operation: Operation,
        path: String,
        reason: InvalidReason,
    },
    /// The path was assumed valid but matches no known shape.
    IllegalState { operation: Operation, path: String },
    Storage {
        operation: Operation,
        path: String,
        source: RepoError,
    },
}

impl ProviderError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::InvalidArgument { operation, .. }
            | Self::IllegalState { operation, .. }
            | Self::Storage { operation, .. } => *operation,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::InvalidArgument { path, .. }
            | Self::IllegalState { path, .. }
            | Self::Storage { path, .. } => path,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::IllegalState { .. } => "illegal_state",
            Self::Storage { .. } => "storage_failure",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument {
                operation: Operation::Query,
                path,
                reason: InvalidReason::UnsupportedPath,
            } => write!(f, "cannot query unknown URI `{path}`"),
            Self::InvalidArgument {
                operation,
                path,
                reason: InvalidReason::UnsupportedPath,
            } => write!(
                f,
                "{} is not supported for `{path}`",
                unsupported_noun(*operation)
            ),
            Self::InvalidArgument {
                operation,
                path,
                reason,
            } => write!(f, "{operation} `{path}` rejected: {reason}"),
            Self::IllegalState { operation, path } => {
                write!(f, "{operation} `{path}`: unknown URI")
            }
            Self::Storage {
                operation,
                path,
                source,
            } => write!(f, "{operation} `{path}` failed in storage: {source}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument {
                reason: InvalidReason::Validation(err),
                ..
            } => Some(err),
            Self::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn unsupported_noun(operation: Operation) -> &'static str {
    match operation {
        Operation::Query => "query",
        Operation::Insert => "insertion",
        Operation::Update => "update",
        Operation::Delete => "deletion",
        Operation::ResolveType => "type resolution",
    }
}

/// Query result: the rows read plus the path observers should watch.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    rows: Vec<ContentValues>,
    notification_path: String,
}

impl Cursor {
    pub fn rows(&self) -> &[ContentValues] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ContentValues> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path whose changes invalidate this result.
    pub fn notification_path(&self) -> &str {
        &self.notification_path
    }

    /// Decodes full-projection rows; rows missing pet columns are skipped.
    pub fn pets(&self) -> Vec<Pet> {
        self.rows.iter().filter_map(Pet::from_values).collect()
    }
}

/// Address of a newly inserted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: PetId,
    pub path: String,
}

/// Path-addressed CRUD façade over the `pets` table.
pub struct PetProvider<R: PetRepository, N: ChangeNotifier> {
    matcher: ResourceMatcher,
    repo: R,
    notifier: N,
}

impl<N: ChangeNotifier> PetProvider<SqlitePetRepository, N> {
    /// Builds a provider whose SQLite connection opens on first use.
    pub fn open(config: &ProviderConfig, notifier: N) -> Self {
        Self::new(
            config.matcher(),
            SqlitePetRepository::new(config.db_location()),
            notifier,
        )
    }
}

impl<R: PetRepository, N: ChangeNotifier> PetProvider<R, N> {
    pub fn new(matcher: ResourceMatcher, repo: R, notifier: N) -> Self {
        Self {
            matcher,
            repo,
            notifier,
        }
    }

    pub fn matcher(&self) -> &ResourceMatcher {
        &self.matcher
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reads rows addressed by `path`.
    ///
    /// Item paths narrow `selection` to the addressed id. The returned cursor
    /// carries `path` as its notification path.
    pub fn query(
        &self,
        path: &str,
        projection: &[&str],
        selection: &Selection,
        sort_order: Option<&str>,
    ) -> ProviderResult<Cursor> {
        let operation = Operation::Query;
        let started_at = Instant::now();
        let effective = self.effective_selection(operation, path, selection)?;

        let rows = self
            .repo
            .read(PETS_TABLE, projection, &effective, sort_order)
            .map_err(|err| storage_error(operation, path, err))?;

        debug!(
            "event={} module=provider status=ok rows={} duration_ms={}",
            operation.event(),
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Cursor {
            rows,
            notification_path: path.to_string(),
        })
    }

    /// Inserts one pet into the collection at `path`.
    ///
    /// Returns `Ok(None)` when storage declined the row; nothing is notified
    /// in that case.
    pub fn insert(&self, path: &str, values: &ContentValues) -> ProviderResult<Option<ItemRef>> {
        let operation = Operation::Insert;
        let started_at = Instant::now();

        match self.matcher.classify(path) {
            ResourceMatch::Collection => {}
            ResourceMatch::Item(_) | ResourceMatch::Unrecognized => {
                return Err(rejected(operation, path, InvalidReason::UnsupportedPath));
            }
        }
        validate_for_insert(values)
            .map_err(|err| rejected(operation, path, InvalidReason::Validation(err)))?;

        let inserted = self
            .repo
            .insert(PETS_TABLE, values)
            .map_err(|err| storage_error(operation, path, err))?;

        let Some(id) = inserted else {
            warn!(
                "event={} module=provider status=error error_code=insert_declined duration_ms={}",
                operation.event(),
                started_at.elapsed().as_millis()
            );
            return Ok(None);
        };

        self.notifier.notify_change(path);
        info!(
            "event={} module=provider status=ok id={id} duration_ms={}",
            operation.event(),
            started_at.elapsed().as_millis()
        );
        Ok(Some(ItemRef {
            id,
            path: self.matcher.item_path(id),
        }))
    }

    /// Updates rows addressed by `path` and returns the affected count.
    ///
    /// An empty `values` map returns 0 without validation, path matching or
    /// storage access.
    pub fn update(
        &self,
        path: &str,
        values: &ContentValues,
        selection: &Selection,
    ) -> ProviderResult<usize> {
        let operation = Operation::Update;
        if values.is_empty() {
            debug!(
                "event={} module=provider status=noop reason=empty_values",
                operation.event()
            );
            return Ok(0);
        }

        let started_at = Instant::now();
        validate_for_update(values)
            .map_err(|err| rejected(operation, path, InvalidReason::Validation(err)))?;
        let effective = self.effective_selection(operation, path, selection)?;

        let changed = self
            .repo
            .update(PETS_TABLE, values, &effective)
            .map_err(|err| storage_error(operation, path, err))?;
        self.finish_mutation(operation, path, changed, started_at);
        Ok(changed)
    }

    /// Deletes rows addressed by `path` and returns the affected count.
    pub fn delete(&self, path: &str, selection: &Selection) -> ProviderResult<usize> {
        let operation = Operation::Delete;
        let started_at = Instant::now();
        let effective = self.effective_selection(operation, path, selection)?;

        let changed = self
            .repo
            .delete(PETS_TABLE, &effective)
            .map_err(|err| storage_error(operation, path, err))?;
        self.finish_mutation(operation, path, changed, started_at);
        Ok(changed)
    }

    /// Reports the content kind `path` denotes without touching storage.
    pub fn resolve_type(&self, path: &str) -> ProviderResult<ContentType> {
        match self.matcher.classify(path) {
            ResourceMatch::Collection => Ok(ContentType::Collection),
            ResourceMatch::Item(_) => Ok(ContentType::Item),
            ResourceMatch::Unrecognized => Err(ProviderError::IllegalState {
                operation: Operation::ResolveType,
                path: path.to_string(),
            }),
        }
    }

    /// Like [`PetProvider::resolve_type`], rendered as a vendor MIME type.
    pub fn mime_type(&self, path: &str) -> ProviderResult<String> {
        let kind = self.resolve_type(path)?;
        Ok(kind.mime_type(self.matcher.authority(), self.matcher.collection()))
    }

    fn effective_selection(
        &self,
        operation: Operation,
        path: &str,
        selection: &Selection,
    ) -> ProviderResult<Selection> {
        match self.matcher.classify(path) {
            ResourceMatch::Collection => Ok(selection.clone()),
            ResourceMatch::Item(id) => Ok(selection.for_item(id)),
            ResourceMatch::Unrecognized => {
                Err(rejected(operation, path, InvalidReason::UnsupportedPath))
            }
        }
    }

    fn finish_mutation(
        &self,
        operation: Operation,
        path: &str,
        changed: usize,
        started_at: Instant,
    ) {
        if changed > 0 {
            self.notifier.notify_change(path);
        }
        info!(
            "event={} module=provider status=ok changed={changed} notified={} duration_ms={}",
            operation.event(),
            changed > 0,
            started_at.elapsed().as_millis()
        );
    }
}

fn rejected(operation: Operation, path: &str, reason: InvalidReason) -> ProviderError {
    let err = ProviderError::InvalidArgument {
        operation,
        path: path.to_string(),
        reason,
    };
    warn!(
        "event={} module=provider status=rejected error_code={} error={}",
        operation.event(),
        err.code(),
        err
    );
    err
}

fn storage_error(operation: Operation, path: &str, err: RepoError) -> ProviderError {
    let source = match err {
        RepoError::MalformedFilter(message) => {
            return rejected(operation, path, InvalidReason::MalformedFilter(message));
        }
        other => other,
    };
    let err = ProviderError::Storage {
        operation,
        path: path.to_string(),
        source,
    };
    error!(
        "event={} module=provider status=error error_code={} error={}",
        operation.event(),
        err.code(),
        err
    );
    err
}
