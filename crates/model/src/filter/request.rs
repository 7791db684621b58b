use crate::{
    core::value::kind_of,
    filter::{
        error::FilterError,
        expr::{FilterClause, FilterExpression},
        operator::SortDirection,
    },
};
use serde::Deserialize;
use serde_json::Value;

/// Page size used when a request does not ask for one.
pub const DEFAULT_LIMIT: u64 = 20;

/// One `orderBy` entry, in request terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// A client-facing filter/sort/pagination request.
///
/// Built either from its JSON wire shape (`{ where, orderBy, limit }`) or
/// through [`FilterRequestBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct FilterRequest {
    pub filter: FilterExpression,
    pub order_by: Vec<SortKey>,
    pub limit: Option<u64>,
}

impl FilterRequest {
    pub fn builder() -> FilterRequestBuilder {
        FilterRequestBuilder::new()
    }

    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        let obj = match value {
            Value::Null => return Ok(FilterRequest::default()),
            Value::Object(obj) => obj,
            other => {
                return Err(FilterError::malformed(format!(
                    "filter request must be an object, found {}",
                    kind_of(other)
                )));
            }
        };

        let mut request = FilterRequest::default();
        for (key, value) in obj {
            match key.as_str() {
                "where" => request.filter = FilterExpression::from_json(value)?,
                "orderBy" => request.order_by = parse_order_by(value)?,
                "limit" => request.limit = parse_limit(value)?,
                other => {
                    return Err(FilterError::malformed(format!(
                        "unrecognized request key '{other}'"
                    )));
                }
            }
        }

        Ok(request)
    }

    /// The requested page size, or [`DEFAULT_LIMIT`].
    pub fn requested_limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

impl TryFrom<Value> for FilterRequest {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        FilterRequest::from_json(&value)
    }
}

fn parse_order_by(value: &Value) -> Result<Vec<SortKey>, FilterError> {
    let obj = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(obj) => obj,
        other => {
            return Err(FilterError::malformed(format!(
                "'orderBy' must be an object, found {}",
                kind_of(other)
            )));
        }
    };

    obj.iter()
        .map(|(field, token)| {
            let token = token.as_str().ok_or_else(|| {
                FilterError::malformed(format!(
                    "sort direction for '{field}' must be a string, found {}",
                    kind_of(token)
                ))
            })?;
            Ok(SortKey {
                field: field.clone(),
                direction: token.parse()?,
            })
        })
        .collect()
}

fn parse_limit(value: &Value) -> Result<Option<u64>, FilterError> {
    if value.is_null() {
        return Ok(None);
    }

    match (value.as_u64(), value.as_i64()) {
        (Some(0), _) => Err(FilterError::InvalidLimit(0)),
        (Some(limit), _) => Ok(Some(limit)),
        (None, Some(negative)) => Err(FilterError::InvalidLimit(negative)),
        (None, None) => Err(FilterError::malformed(format!(
            "'limit' must be an integer, found {value}"
        ))),
    }
}

pub struct FilterRequestBuilder {
    filter: FilterExpression,
    order_by: Vec<SortKey>,
    limit: Option<u64>,
}

impl FilterRequestBuilder {
    pub fn new() -> Self {
        FilterRequestBuilder {
            filter: FilterExpression::default(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn filter(mut self, filter: FilterExpression) -> Self {
        self.filter = filter;
        self
    }

    pub fn clause(mut self, clause: FilterClause) -> Self {
        self.filter.push(clause);
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(SortKey {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> FilterRequest {
        FilterRequest {
            filter: self.filter,
            order_by: self.order_by,
            limit: self.limit,
        }
    }
}

impl Default for FilterRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
