//! Error types for rankarray
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every variant corresponds to one abstract failure kind. Callers that only
//! care about the kind (and not the message) should match on [`Error::kind`].

use thiserror::Error;

/// Result type alias for array operations
pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant of an [`Error`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value was absent
    NullArgument,
    /// An index, start position or length is outside the valid bound
    OutOfRange,
    /// Structurally wrong input
    InvalidArgument,
    /// Operation requires a different rank
    RankMismatch,
    /// No legal conversion path between element types
    TypeMismatch,
    /// A single element conversion failed during an element-wise copy
    CastFailure,
    /// Cursor queried outside its valid range, or comparer contract violated
    InvalidState,
    /// Element type handle could not be resolved
    UnresolvedType,
    /// Limits/config could not be read or parsed
    Config,
}

/// Error types for array construction, access and the bulk algorithms
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A required value was absent
    #[error("Null argument: {name}")]
    NullArgument {
        /// Name of the missing argument
        name: String,
    },

    /// Index, start position or length outside the valid bound
    #[error("Argument out of range: {name} ({reason})")]
    OutOfRange {
        /// Name of the offending argument
        name: String,
        /// What bound was violated
        reason: String,
    },

    /// Structurally invalid input that is not a plain range violation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation requires a specific rank
    #[error("Rank mismatch: expected {expected}, got {actual}")]
    RankMismatch {
        /// Required rank
        expected: usize,
        /// Rank actually supplied
        actual: usize,
    },

    /// No conversion path between the element types of two arrays
    #[error("Array type mismatch: cannot copy {from} elements into {to} array")]
    TypeMismatch {
        /// Source element type name
        from: String,
        /// Destination element type name
        to: String,
    },

    /// An individual element conversion failed
    #[error("Invalid cast from {from} to {to}")]
    CastFailure {
        /// Source element type name
        from: String,
        /// Destination element type name
        to: String,
    },

    /// Invalid operation or state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Type handle not known to the registry
    #[error("Unresolved element type: {0}")]
    UnresolvedType(String),

    /// Limits configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::NullArgument`]
    pub fn null_argument(name: impl Into<String>) -> Self {
        Error::NullArgument { name: name.into() }
    }

    /// Build a [`Error::OutOfRange`]
    pub fn out_of_range(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::OutOfRange {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`Error::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Build a [`Error::InvalidState`]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState(message.into())
    }

    /// Build a [`Error::CastFailure`]
    pub fn cast_failure(from: impl Into<String>, to: impl Into<String>) -> Self {
        Error::CastFailure {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The payload-free kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NullArgument { .. } => ErrorKind::NullArgument,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::RankMismatch { .. } => ErrorKind::RankMismatch,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::CastFailure { .. } => ErrorKind::CastFailure,
            Error::InvalidState(_) => ErrorKind::InvalidState,
            Error::UnresolvedType(_) => ErrorKind::UnresolvedType,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}
