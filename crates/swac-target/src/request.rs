//! Expansion of a target's URL template into concrete requests.

use crate::{
    error::{Result, TargetError},
    filter::RecordFilter,
    target::{TargetConfiguration, FROM_NAME_PLACEHOLDER, IFACE_PLACEHOLDER},
};
use serde::{Deserialize, Serialize};
use swac_core::{HttpMethod, Operation};
use tracing::debug;

/// A fully expanded request for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// HTTP method to use
    pub method: HttpMethod,
    /// Request URL with placeholders substituted and query appended
    pub url: String,
}

/// Optional parameters of a SmartData records request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    /// Dataset id, appended as a path segment after the collection
    pub id: Option<String>,
    /// Attributes to include
    pub includes: Vec<String>,
    /// Filters, each sent as its own `filter` parameter
    pub filters: Vec<RecordFilter>,
    /// Maximum number of datasets
    pub size: Option<u32>,
    /// Page to receive
    pub page: Option<u32>,
    /// Order column, optionally descending
    pub order: Option<(String, bool)>,
    /// Only count the datasets
    pub countonly: bool,
    /// Attribute to get unique values for
    pub unique: Option<String>,
    /// Geo column to deliver as GeoJSON
    pub geojsonattr: Option<String>,
    /// EPSG code or `latlon` to transform geometries into
    pub geotransform: Option<String>,
    /// Package values into datasets
    pub deflatt: bool,
}

impl RecordQuery {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a single dataset.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Restrict the returned attributes.
    #[must_use]
    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Limit the number of datasets.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Select a page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Order by a column.
    #[must_use]
    pub fn with_order(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order = Some((column.into(), descending));
        self
    }

    /// Only count matching datasets.
    #[must_use]
    pub fn count_only(mut self) -> Self {
        self.countonly = true;
        self
    }

    /// Request unique values of an attribute.
    #[must_use]
    pub fn with_unique(mut self, attribute: impl Into<String>) -> Self {
        self.unique = Some(attribute.into());
        self
    }

    /// Deliver geometries of a column as GeoJSON, optionally transformed.
    #[must_use]
    pub fn with_geojson(mut self, column: impl Into<String>, transform: Option<String>) -> Self {
        self.geojsonattr = Some(column.into());
        self.geotransform = transform;
        self
    }

    /// Package values into datasets.
    #[must_use]
    pub fn deflatten(mut self) -> Self {
        self.deflatt = true;
        self
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.includes.is_empty() {
            pairs.push(("includes", self.includes.join(",")));
        }
        for filter in &self.filters {
            pairs.push(("filter", filter.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some((column, descending)) = &self.order {
            let order = if *descending {
                format!("{column},desc")
            } else {
                column.clone()
            };
            pairs.push(("order", order));
        }
        if self.countonly {
            pairs.push(("countonly", "true".to_string()));
        }
        if let Some(unique) = &self.unique {
            pairs.push(("unique", unique.clone()));
        }
        if let Some(geojsonattr) = &self.geojsonattr {
            pairs.push(("geojsonattr", geojsonattr.clone()));
        }
        if let Some(geotransform) = &self.geotransform {
            pairs.push(("geotransform", geotransform.clone()));
        }
        if self.deflatt {
            pairs.push(("deflatt", "true".to_string()));
        }

        pairs
    }
}

impl TargetConfiguration {
    /// Expand the template for an operation on a collection.
    ///
    /// # Errors
    /// Returns error if the collection name is empty or the target has no
    /// interface for the operation.
    pub fn request(&self, operation: Operation, from_name: &str) -> Result<ResolvedRequest> {
        self.request_with(operation, from_name, &RecordQuery::default())
    }

    /// Expand the template for an operation, appending query parameters.
    pub fn request_with(
        &self,
        operation: Operation,
        from_name: &str,
        query: &RecordQuery,
    ) -> Result<ResolvedRequest> {
        if from_name.is_empty() {
            return Err(TargetError::MissingCollection);
        }

        let interface = self
            .interface(operation)
            .ok_or(TargetError::UnsupportedOperation(operation))?;

        let mut collection = urlencoding::encode(from_name).into_owned();
        if let Some(id) = &query.id {
            collection.push('/');
            collection.push_str(&urlencoding::encode(id));
        }

        let mut url = self
            .url
            .replace(IFACE_PLACEHOLDER, interface.kind().as_str())
            .replace(FROM_NAME_PLACEHOLDER, &collection);

        for (key, value) in query.query_pairs() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }

        debug!(
            operation = %operation,
            method = %interface.method(),
            url = %url,
            "expanded target request"
        );

        Ok(ResolvedRequest {
            method: interface.method(),
            url,
        })
    }
}
