use crate::{
    core::value::kind_of,
    filter::{error::FilterError, operator::ComparisonOperator},
};
use serde_json::{Map, Value};

pub const AND_KEY: &str = "_and";
pub const OR_KEY: &str = "_or";
pub const NOT_KEY: &str = "_not";
pub const SEARCH_KEY: &str = "search";

/// Maximum nesting depth of combinators inside a filter.
pub const MAX_EXPRESSION_DEPTH: usize = 16;

/// `{ field: { operator: value } }`, one operator per field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPredicate {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: Value,
}

impl FieldPredicate {
    pub fn new(field: impl Into<String>, operator: ComparisonOperator, value: Value) -> Self {
        FieldPredicate {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Parses the `{ operator: value }` half of a leaf.
    ///
    /// Exactly one operator key is accepted; an empty or multi-key object is
    /// rejected rather than silently reading the first key.
    fn parse(field: &str, predicate: &Value) -> Result<Self, FilterError> {
        let ops = predicate.as_object().ok_or_else(|| {
            FilterError::malformed(format!(
                "predicate for field '{field}' must be an object, found {}",
                kind_of(predicate)
            ))
        })?;

        let mut entries = ops.iter();
        match (entries.next(), entries.next()) {
            (Some((token, value)), None) => {
                let operator = token.parse::<ComparisonOperator>()?;
                Ok(FieldPredicate::new(field, operator, value.clone()))
            }
            (None, _) => Err(FilterError::malformed(format!(
                "predicate for field '{field}' has no operator"
            ))),
            (Some(_), Some(_)) => Err(FilterError::malformed(format!(
                "predicate for field '{field}' has {} operators, expected exactly one",
                ops.len()
            ))),
        }
    }
}

/// One entry of a `where` map.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    And(Vec<FilterClause>),
    Or(Vec<FilterClause>),
    /// None of the nested clauses may match.
    Not(Vec<FilterClause>),
    /// Reserved for full-text search; carried through parsing, ignored by compilation.
    Search(Value),
    Field(FieldPredicate),
}

impl FilterClause {
    pub fn field(field: impl Into<String>, operator: ComparisonOperator, value: Value) -> Self {
        FilterClause::Field(FieldPredicate::new(field, operator, value))
    }

    /// Parses a single `key: value` entry at combinator depth `depth`.
    fn parse(key: &str, value: &Value, depth: usize) -> Result<Self, FilterError> {
        match key {
            AND_KEY => Ok(FilterClause::And(parse_elements(key, value, depth)?)),
            OR_KEY => Ok(FilterClause::Or(parse_elements(key, value, depth)?)),
            NOT_KEY => Ok(FilterClause::Not(parse_elements(key, value, depth)?)),
            SEARCH_KEY => Ok(FilterClause::Search(value.clone())),
            field => Ok(FilterClause::Field(FieldPredicate::parse(field, value)?)),
        }
    }
}

/// Parses the array held by a combinator key. Each element must be an object
/// with exactly one key; `search` is only meaningful at the top level.
fn parse_elements(key: &str, value: &Value, depth: usize) -> Result<Vec<FilterClause>, FilterError> {
    let level = depth + 1;
    if level > MAX_EXPRESSION_DEPTH {
        return Err(FilterError::DepthExceeded(MAX_EXPRESSION_DEPTH));
    }

    let elements = value.as_array().ok_or_else(|| {
        FilterError::malformed(format!(
            "'{key}' must hold an array of expressions, found {}",
            kind_of(value)
        ))
    })?;

    elements
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            let obj = element.as_object().ok_or_else(|| {
                FilterError::malformed(format!(
                    "'{key}[{idx}]' must be an object, found {}",
                    kind_of(element)
                ))
            })?;

            let mut entries = obj.iter();
            match (entries.next(), entries.next()) {
                (Some((inner_key, _)), None) if inner_key == SEARCH_KEY => Err(FilterError::malformed(format!(
                    "'{key}[{idx}]': '{SEARCH_KEY}' is only allowed at the top level"
                ))),
                (Some((inner_key, inner)), None) => FilterClause::parse(inner_key, inner, level),
                _ => Err(FilterError::malformed(format!(
                    "'{key}[{idx}]' must have exactly one key, found {}",
                    obj.len()
                ))),
            }
        })
        .collect()
}

/// A parsed `where` map: its clauses in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    clauses: Vec<FilterClause>,
}

impl FilterExpression {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        FilterExpression { clauses }
    }

    pub fn parse(map: &Map<String, Value>) -> Result<Self, FilterError> {
        let clauses = map
            .iter()
            .map(|(key, value)| FilterClause::parse(key, value, 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FilterExpression { clauses })
    }

    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        match value {
            Value::Null => Ok(FilterExpression::default()),
            Value::Object(map) => Self::parse(map),
            other => Err(FilterError::malformed(format!(
                "'where' must be an object, found {}",
                kind_of(other)
            ))),
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
    }
}
