//! SWAC Core - Foundation crate for the SmartData admin frontend.
//!
//! This crate provides shared types, error handling and configuration
//! management that the target resolution crate depends on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based frontend configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`SourceName`, `Operation`, `HttpMethod`, `ResourceKind`)
//!
//! # Example
//!
//! ```rust
//! use swac_core::{FrontendConfig, Operation, SourceName};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FrontendConfig::default();
//! assert_eq!(config.resolver.storage, "smartmonitoring");
//!
//! let source = SourceName::new("smartmonitoring")?;
//! assert_eq!(source.as_str(), "smartmonitoring");
//! assert_eq!(Operation::ALL.len(), 7);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    CoreComponents, DataSourcesConfig, EmptySelectionPolicy, FooterLink, FrontendConfig,
    ProgressiveConfig, ResolverConfig, UiConfig,
};
pub use error::{ConfigError, ConfigResult, Result, SwacError};
pub use types::{HttpMethod, Operation, ResourceKind, SourceName};
