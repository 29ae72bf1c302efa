//! SWAC Target - Data source target resolution for the SmartData admin frontend.
//!
//! When the user picks a backend in the source chooser, the presets widget
//! is pointed at that backend: a URL template plus the table of interfaces
//! (`get`, `list`, `defs`, `cdefs`, `create`, `update`, `delete`) it may call.
//! This crate builds that target and sequences the widget update.
//!
//! # Architecture
//!
//! - **Selection** ([`selection`]): last-wins extraction of the selected source name
//! - **Target** ([`target`]): target types and the endpoint resolver
//! - **Widget** ([`widget`]): traits for the widget runtime and the change handler
//! - **Request** ([`request`]): expansion of `[iface]` / `[fromName]` into concrete requests
//! - **Filter** ([`filter`]): SmartData record filter expressions
//! - **Registry** ([`registry`]): the set of selectable sources, loaded from TOML
//! - **Errors** ([`error`]): target-specific error types
//!
//! # Example
//!
//! ```rust
//! use swac_core::{HttpMethod, Operation};
//! use swac_target::resolve_target;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let target = resolve_target("smartmonitoring");
//! assert_eq!(
//!     target.url,
//!     "/smartmonitoring/smartdata/[iface]/[fromName]?storage=smartmonitoring"
//! );
//!
//! let request = target.request(Operation::Update, "measurements")?;
//! assert_eq!(request.method, HttpMethod::Put);
//! assert_eq!(
//!     request.url,
//!     "/smartmonitoring/smartdata/records/measurements?storage=smartmonitoring"
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod filter;
pub mod registry;
pub mod request;
pub mod selection;
pub mod target;
pub mod widget;

// Re-export commonly used types
pub use error::{Result, TargetError};
pub use filter::{FilterOperator, RecordFilter};
pub use registry::{SourceDefinition, SourceRegistry};
pub use request::{RecordQuery, ResolvedRequest};
pub use selection::{extract_selected_source_name, InputDescriptor};
pub use target::{
    resolve_target, smartdata_interfaces, Interface, TargetConfiguration, TargetResolver,
};
pub use widget::{InputSource, Reloadable, SelectionChangeHandler, WidgetDirectory, WidgetOptions};
