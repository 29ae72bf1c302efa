//! SmartData record filter expressions.
//!
//! A filter is written `attribute,op,value[,value...]`. Most operators can
//! be negated by prefixing `n` (`neq`, `ncs`, ...); the spatial operators
//! cannot.

use crate::error::{Result, TargetError};
use std::fmt;
use std::str::FromStr;

/// Filter operators understood by the records interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Attribute contains the value
    Contains,
    /// Attribute starts with the value
    StartsWith,
    /// Attribute ends with the value
    EndsWith,
    /// Attribute equals the value
    Equals,
    /// Attribute is lower than the value
    LowerThan,
    /// Attribute is lower than or equal to the value
    LowerOrEqual,
    /// Attribute is greater than or equal to the value
    GreaterOrEqual,
    /// Attribute is greater than the value
    GreaterThan,
    /// Attribute lies between two values
    Between,
    /// Geometry lies within a radius
    Radius,
    /// Geometry lies within a bounding box
    BoundingBox,
}

impl FilterOperator {
    const ALL: [FilterOperator; 11] = [
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Equals,
        Self::LowerThan,
        Self::LowerOrEqual,
        Self::GreaterOrEqual,
        Self::GreaterThan,
        Self::Between,
        Self::Radius,
        Self::BoundingBox,
    ];

    /// Short operator code used in filter expressions.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Contains => "cs",
            Self::StartsWith => "sw",
            Self::EndsWith => "ew",
            Self::Equals => "eq",
            Self::LowerThan => "lt",
            Self::LowerOrEqual => "le",
            Self::GreaterOrEqual => "ge",
            Self::GreaterThan => "gt",
            Self::Between => "bt",
            Self::Radius => "sir",
            Self::BoundingBox => "sib",
        }
    }

    /// Whether the operator accepts the `n` prefix.
    #[must_use]
    pub fn is_negatable(&self) -> bool {
        !matches!(self, Self::Radius | Self::BoundingBox)
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    /// Check the number of values, and that spatial values are numeric.
    fn check_values(self, values: &[String]) -> std::result::Result<(), String> {
        let (expected, exact) = match self {
            Self::Between => (2, true),
            Self::Radius => (3, true),
            Self::BoundingBox => (6, true),
            _ => (1, false),
        };

        if exact && values.len() != expected {
            return Err(format!(
                "operator '{}' takes {expected} values, got {}",
                self.code(),
                values.len()
            ));
        }
        if values.len() < expected {
            return Err(format!("operator '{}' needs a value", self.code()));
        }

        if matches!(self, Self::Radius | Self::BoundingBox) {
            if let Some(value) = values.iter().find(|v| v.parse::<f64>().is_err()) {
                return Err(format!("'{value}' is not a number"));
            }
        }

        Ok(())
    }
}

/// A single filter on a records request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    attribute: String,
    operator: FilterOperator,
    negated: bool,
    values: Vec<String>,
}

impl RecordFilter {
    /// Build a filter, checking the value count for the operator.
    ///
    /// # Errors
    /// Returns [`TargetError::InvalidFilter`] if the attribute is empty or the
    /// values do not fit the operator.
    pub fn new<I, S>(
        attribute: impl Into<String>,
        operator: FilterOperator,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filter = Self {
            attribute: attribute.into(),
            operator,
            negated: false,
            values: values.into_iter().map(Into::into).collect(),
        };
        filter.check()?;
        Ok(filter)
    }

    /// Shorthand for an equality filter.
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new(attribute, FilterOperator::Equals, [value])
    }

    /// Negate the filter.
    ///
    /// # Errors
    /// Returns [`TargetError::InvalidFilter`] for spatial operators.
    pub fn negate(mut self) -> Result<Self> {
        if !self.operator.is_negatable() {
            return Err(self.invalid(format!(
                "operator '{}' cannot be negated",
                self.operator.code()
            )));
        }
        self.negated = !self.negated;
        Ok(self)
    }

    /// Parse a filter expression such as `id,eq,1` or `name,nsw,abc`.
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = |reason: &str| TargetError::InvalidFilter {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = expression.split(',');
        let attribute = parts.next().unwrap_or_default();
        let code = parts.next().ok_or_else(|| invalid("missing operator"))?;
        let values: Vec<String> = parts.map(str::to_string).collect();

        let (operator, negated) = match FilterOperator::from_code(code) {
            Some(operator) => (operator, false),
            None => code
                .strip_prefix('n')
                .and_then(FilterOperator::from_code)
                .filter(FilterOperator::is_negatable)
                .map(|operator| (operator, true))
                .ok_or_else(|| invalid(&format!("unknown operator '{code}'")))?,
        };

        let filter = Self {
            attribute: attribute.to_string(),
            operator,
            negated,
            values,
        };
        filter.check()?;
        Ok(filter)
    }

    /// Attribute the filter applies to.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Filter operator.
    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Whether the filter is negated.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Filter values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn check(&self) -> Result<()> {
        if self.attribute.is_empty() {
            return Err(self.invalid("attribute cannot be empty".to_string()));
        }
        self.operator
            .check_values(&self.values)
            .map_err(|reason| self.invalid(reason))
    }

    fn invalid(&self, reason: String) -> TargetError {
        TargetError::InvalidFilter {
            expression: self.to_string(),
            reason,
        }
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negation = if self.negated { "n" } else { "" };
        write!(f, "{},{negation}{}", self.attribute, self.operator.code())?;
        for value in &self.values {
            write!(f, ",{value}")?;
        }
        Ok(())
    }
}

impl FromStr for RecordFilter {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_filters() {
        let filter = RecordFilter::parse("id,eq,1").expect("parse eq filter");
        assert_eq!(filter.attribute(), "id");
        assert_eq!(filter.operator(), FilterOperator::Equals);
        assert!(!filter.is_negated());
        assert_eq!(filter.values(), ["1"]);

        let filter = RecordFilter::parse("name,sw,smart").expect("parse sw filter");
        assert_eq!(filter.operator(), FilterOperator::StartsWith);
    }

    #[test]
    fn test_parse_negated_filters() {
        let filter = RecordFilter::parse("name,new,.csv").expect("parse negated ew filter");
        assert_eq!(filter.operator(), FilterOperator::EndsWith);
        assert!(filter.is_negated());

        let filter = RecordFilter::parse("value,ngt,10").expect("parse negated gt filter");
        assert_eq!(filter.operator(), FilterOperator::GreaterThan);
        assert!(filter.is_negated());
    }

    #[test]
    fn test_display_round_trip() {
        for expression in [
            "id,eq,1",
            "name,ncs,smart",
            "value,bt,1,5",
            "pos,sir,52.0,8.5,1000",
            "geom,sib,8.4,51.9,8.6,52.1,4326,25832",
        ] {
            let filter: RecordFilter = expression.parse().expect("parse filter");
            assert_eq!(filter.to_string(), expression);
        }
    }

    #[test]
    fn test_arity_checks() {
        assert!(RecordFilter::parse("value,bt,1").is_err());
        assert!(RecordFilter::parse("value,bt,1,2,3").is_err());
        assert!(RecordFilter::parse("geom,sib,1,2,3,4").is_err());
        assert!(RecordFilter::parse("pos,sir,52.0,8.5").is_err());
        assert!(RecordFilter::parse("id,eq").is_err());
    }

    #[test]
    fn test_spatial_values_must_be_numeric() {
        let result = RecordFilter::parse("pos,sir,52.0,east,1000");
        assert!(matches!(result, Err(TargetError::InvalidFilter { .. })));
    }

    #[test]
    fn test_rejects_unknown_and_negated_spatial_operators() {
        assert!(RecordFilter::parse("id,like,1").is_err());
        assert!(RecordFilter::parse("pos,nsir,52.0,8.5,1000").is_err());
        assert!(RecordFilter::parse("id").is_err());
        assert!(RecordFilter::parse(",eq,1").is_err());
    }

    #[test]
    fn test_builder_and_negate() {
        let filter = RecordFilter::equals("id", "7")
            .expect("build filter")
            .negate()
            .expect("negate filter");
        assert_eq!(filter.to_string(), "id,neq,7");

        let spatial = RecordFilter::new("pos", FilterOperator::Radius, ["52.0", "8.5", "100"])
            .expect("build radius filter");
        assert!(spatial.negate().is_err());
    }
}
