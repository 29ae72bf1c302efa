//! Shared types used across the SWAC admin frontend.
//!
//! This module defines the newtypes and closed enums that make up a data
//! source target: the source name, the logical operations, and the
//! HTTP method and resource kind each operation maps to.

use crate::error::{Result, SwacError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for backend data source names with validation.
///
/// A source name becomes the first path segment of the target URL, so it
/// must be non-empty and free of whitespace and URL delimiters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceName(String);

impl SourceName {
    /// Create a new `SourceName` from a string.
    ///
    /// # Errors
    /// Returns error if the name is empty, is `.` or `..`, or contains `/`,
    /// `?`, `#` or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<()> {
        static SOURCE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            SOURCE_REGEX.get_or_init(|| Regex::new(r"^[^\s/?#]+$").expect("valid regex"));

        if name.is_empty() {
            return Err(SwacError::Validation(
                "invalid source name: cannot be empty".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(SwacError::Validation(format!(
                "invalid source name: '{name}' is not a usable path segment"
            )));
        }

        if regex.is_match(name) {
            Ok(())
        } else {
            Err(SwacError::Validation(format!(
                "invalid source name: must not contain whitespace, '/', '?' or '#', got '{name}'"
            )))
        }
    }
}

impl TryFrom<String> for SourceName {
    type Error = SwacError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceName> for String {
    fn from(name: SourceName) -> Self {
        name.0
    }
}

impl Borrow<str> for SourceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical operations a target exposes to the data-binding layer.
///
/// The set is closed; declaration order is the order used when iterating
/// an interface table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Fetch a single record set
    Get,
    /// List records
    List,
    /// Fetch collection definitions
    Defs,
    /// Create collection definitions
    Cdefs,
    /// Create records
    Create,
    /// Update records
    Update,
    /// Delete records
    Delete,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 7] = [
        Self::Get,
        Self::List,
        Self::Defs,
        Self::Cdefs,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Wire name of the operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Defs => "defs",
            Self::Cdefs => "cdefs",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SwacError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SwacError::Validation(format!("unknown operation '{s}'")))
    }
}

/// HTTP methods a target interface may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of backend resource an interface addresses.
///
/// The kind doubles as the `[iface]` path segment of the target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Individual record sets
    Records,
    /// Schema or definition metadata
    Collection,
}

impl ResourceKind {
    /// Path segment for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Records => "records",
            Self::Collection => "collection",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
