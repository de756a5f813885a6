use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Sediment operations
///
/// This enum represents all possible error types that can occur during Sediment
/// engine operations. Each error kind describes a specific category of failure,
/// enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use sediment::errors::{SedimentError, ErrorKind, SedimentResult};
///
/// fn example() -> SedimentResult<()> {
///     Err(SedimentError::new("collection not found", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    // Filter Errors - raised during filter evaluation or construction
    /// Error during filter evaluation or construction
    FilterError,

    // ID and Identity Errors - raised in collection operations
    /// The provided document ID is invalid
    InvalidId,
    /// The requested resource was not found
    NotFound,

    // Constraint Violation Errors - raised on insert of a duplicate `_id`
    /// A document with the same `_id` already exists
    DuplicateKey,

    // Operation Errors - raised for invalid or unsupported operations
    /// The operation is not valid in the current context
    InvalidOperation,
    /// An update operator targeted a value of an incompatible type
    TypeMismatch,
    /// An argument to an operation was malformed
    InvalidArgument,
    /// A projection specification mixed inclusion and exclusion
    InvalidProjection,
    /// A positional array update could not resolve a matched element
    PositionalMatchRequired,

    // Validation Errors - raised in field and document validation
    /// Generic validation error
    ValidationError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::InvalidProjection => write!(f, "Invalid projection"),
            ErrorKind::PositionalMatchRequired => write!(f, "Positional match required"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Sediment error type.
///
/// `SedimentError` encapsulates error information including the error message, kind,
/// and optional cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use sediment::errors::{SedimentError, ErrorKind};
///
/// // Create a simple error
/// let err = SedimentError::new("document not found", ErrorKind::NotFound);
///
/// // Create an error with a cause
/// let cause = SedimentError::new("bad filter", ErrorKind::FilterError);
/// let err = SedimentError::new_with_cause("update failed", ErrorKind::InvalidOperation, cause);
/// ```
///
/// # Type alias
///
/// The `SedimentResult<T>` type alias is equivalent to `Result<T, SedimentError>` and
/// is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct SedimentError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<SedimentError>>,
    backtrace: Atomic<Backtrace>,
}

impl SedimentError {
    /// Creates a new `SedimentError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: impl Into<String>, error_kind: ErrorKind) -> Self {
        SedimentError {
            message: message.into(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `SedimentError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(
        message: impl Into<String>,
        error_kind: ErrorKind,
        cause: SedimentError,
    ) -> Self {
        SedimentError {
            message: message.into(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<SedimentError>> {
        self.cause.as_ref()
    }
}

impl Display for SedimentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for SedimentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for SedimentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Sediment operations.
///
/// `SedimentResult<T>` is shorthand for `Result<T, SedimentError>`.
/// All fallible Sediment operations return this type.
pub type SedimentResult<T> = Result<T, SedimentError>;

impl From<std::io::Error> for SedimentError {
    fn from(err: std::io::Error) -> Self {
        SedimentError::new(&format!("IO error: {}", err), ErrorKind::InternalError)
    }
}

impl From<String> for SedimentError {
    fn from(message: String) -> Self {
        SedimentError::new(&message, ErrorKind::InternalError)
    }
}

impl From<&str> for SedimentError {
    fn from(message: &str) -> Self {
        SedimentError::new(message, ErrorKind::InternalError)
    }
}
