//! Error types for target resolution.

use swac_core::Operation;
use thiserror::Error;

/// Errors that can occur while resolving, expanding or applying a target.
#[derive(Error, Debug)]
pub enum TargetError {
    /// No source name could be extracted from the selection
    #[error("no data source selected")]
    MissingSelection,

    /// Request expansion was asked for an empty collection name
    #[error("collection name cannot be empty")]
    MissingCollection,

    /// The target has no interface for the requested operation
    #[error("target has no interface for operation '{0}'")]
    UnsupportedOperation(Operation),

    /// The widget that should receive the target is not registered
    #[error("widget not found: {id}")]
    WidgetNotFound {
        /// Widget id that was looked up
        id: String,
    },

    /// A record filter expression could not be parsed or built
    #[error("invalid filter '{expression}': {reason}")]
    InvalidFilter {
        /// The offending expression
        expression: String,
        /// Reason for rejection
        reason: String,
    },

    /// Source name failed validation
    #[error("invalid source: {0}")]
    InvalidSource(#[from] swac_core::SwacError),

    /// Source definition not found in the registry
    #[error("source not found: {name}")]
    NotFound {
        /// The source name that was not found
        name: String,
    },

    /// Failed to parse a source registry TOML file
    #[error("failed to parse source registry TOML in {path}: {source}")]
    ParseError {
        /// Path to the registry file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Source registry contents failed validation
    #[error("invalid source registry: {reason}")]
    ValidationError {
        /// Reason for validation failure
        reason: String,
    },

    /// I/O error while reading a source registry
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
