//! Error handling for the keytrie library
//!
//! A single error enum covers every failure mode in the crate: lookup misses,
//! malformed persisted images, construction misuse, record schema violations
//! and separator collisions in multi-value input.

use thiserror::Error;

/// Main error type for the keytrie library
#[derive(Error, Debug)]
pub enum TrieError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key (or value set) not present in the structure
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was looked up
        message: String,
    },

    /// Key id outside the valid `[0, num_keys)` range
    #[error("Key id out of range: id {index}, num_keys {size}")]
    OutOfRange {
        /// The invalid id
        index: usize,
        /// Number of keys in the trie
        size: usize,
    },

    /// Malformed or foreign persisted data.
    ///
    /// The display form always carries the `FORMAT_ERROR` marker so callers
    /// can recognize the condition from the message alone.
    #[error("FORMAT_ERROR: {message}")]
    Format {
        /// Description of the inconsistency
        message: String,
    },

    /// Operation invoked in the wrong lifecycle state, e.g. a second
    /// `build()` on an already-drained builder
    #[error("Invalid state: {message}")]
    State {
        /// Description of the misuse
        message: String,
    },

    /// Record layer schema violation: bad descriptor, field mismatch, or a
    /// payload whose length disagrees with the fixed record width
    #[error("Schema error: {message}")]
    Schema {
        /// Description of the violation
        message: String,
    },

    /// Invalid construction input, e.g. the value separator occurring
    /// inside a key
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid input
        message: String,
    },
}

impl TrieError {
    /// Create a not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// Create an out-of-range error
    pub fn out_of_range(index: usize, size: usize) -> Self {
        Self::OutOfRange { index, size }
    }

    /// Create a format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format { message: message.into() }
    }

    /// Create an invalid-state error
    pub fn state<S: Into<String>>(message: S) -> Self {
        Self::State { message: message.into() }
    }

    /// Create a schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema { message: message.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::NotFound { .. } => "not_found",
            Self::OutOfRange { .. } => "not_found",
            Self::Format { .. } => "format",
            Self::State { .. } => "state",
            Self::Schema { .. } => "schema",
            Self::Validation { .. } => "validation",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TrieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TrieError::not_found("key \"foo\"");
        assert_eq!(err.category(), "not_found");
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_format_error_marker() {
        let err = TrieError::format("bad magic");
        assert!(err.to_string().contains("FORMAT_ERROR"));
        assert!(err.to_string().contains("bad magic"));
        assert_eq!(err.category(), "format");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = TrieError::out_of_range(10, 5);
        let display = err.to_string();
        assert!(display.contains("10"));
        assert!(display.contains("5"));
        assert_eq!(err.category(), "not_found");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: TrieError = io_error.into();
        assert_eq!(err.category(), "io");
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(TrieError::state("built twice").category(), "state");
        assert_eq!(TrieError::schema("width mismatch").category(), "schema");
        assert_eq!(TrieError::validation("separator in key").category(), "validation");
    }
}
