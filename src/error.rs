//! Error types for disposal and composite container operations.

use std::fmt;

/// Boxed error produced by user-supplied cleanup callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Disposal errors
///
/// Represents the failure conditions of releasing a disposable or operating on
/// a [`CompositeDisposable`](crate::CompositeDisposable).
///
/// # Examples
///
/// ```rust
/// use ferrous_dispose::{CompositeDisposable, Dispose, DisposeError};
///
/// let composite = CompositeDisposable::new();
/// composite.dispose().unwrap();
///
/// match composite.count() {
///     Err(DisposeError::Disposed) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DisposeError {
    /// The container has already begun (or finished) disposing.
    #[error("cannot access a disposed composite")]
    Disposed,
    /// One or more members failed while the container was disposing them.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    /// A cleanup callback returned an error.
    #[error(transparent)]
    Action(BoxError),
    /// `copy_into` destination cannot hold every member.
    #[error("destination too small: {required} members from offset {offset}, {available} slots available")]
    BufferTooSmall {
        offset: usize,
        required: usize,
        available: usize,
    },
}

impl DisposeError {
    /// Wraps an arbitrary error raised by a cleanup callback.
    pub fn action(err: impl Into<BoxError>) -> Self {
        DisposeError::Action(err.into())
    }

    /// Returns true if this is the disposed-state error.
    pub fn is_disposed(&self) -> bool {
        matches!(self, DisposeError::Disposed)
    }
}

/// Ordered collection of member failures from a single composite disposal.
///
/// Errors appear in the order the failing members were visited, which is the
/// insertion order of the container at the time it was disposed.
///
/// # Examples
///
/// ```rust
/// use ferrous_dispose::{disposable, CompositeDisposable, Dispose, DisposeError};
///
/// let composite = CompositeDisposable::new();
/// composite.add(disposable::try_create(|| Err("first".into()))).unwrap();
/// composite.add(disposable::create(|| {})).unwrap();
/// composite.add(disposable::try_create(|| Err("second".into()))).unwrap();
///
/// match composite.dispose() {
///     Err(DisposeError::Aggregate(agg)) => {
///         let messages: Vec<String> = agg.iter().map(|e| e.to_string()).collect();
///         assert_eq!(messages, ["first", "second"]);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub struct AggregateError {
    errors: Vec<DisposeError>,
}

impl AggregateError {
    pub(crate) fn new(errors: Vec<DisposeError>) -> Self {
        Self { errors }
    }

    /// The collected errors in encounter order.
    pub fn errors(&self) -> &[DisposeError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisposeError> {
        self.errors.iter()
    }

    /// Consumes the aggregate, returning the collected errors.
    pub fn into_errors(self) -> Vec<DisposeError> {
        self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) raised while disposing composite", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "\n  [{}] {}", i, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl IntoIterator for AggregateError {
    type Item = DisposeError;
    type IntoIter = std::vec::IntoIter<DisposeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a DisposeError;
    type IntoIter = std::slice::Iter<'a, DisposeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Result type for disposal operations
///
/// A convenience alias for `Result<T, DisposeError>` used throughout
/// ferrous-dispose.
pub type DisposeResult<T> = Result<T, DisposeError>;
