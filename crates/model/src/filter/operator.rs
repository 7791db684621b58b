use crate::filter::error::FilterError;
use std::{fmt, str::FromStr};

/// Comparison operators a leaf predicate may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Gt,
    Gte,
    In,
    Lt,
    Lte,
    Neq,
    Nin,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 8] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Gt,
        ComparisonOperator::Gte,
        ComparisonOperator::In,
        ComparisonOperator::Lt,
        ComparisonOperator::Lte,
        ComparisonOperator::Neq,
        ComparisonOperator::Nin,
    ];

    /// The request-side spelling, e.g. `_gte`.
    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "_eq",
            ComparisonOperator::Gt => "_gt",
            ComparisonOperator::Gte => "_gte",
            ComparisonOperator::In => "_in",
            ComparisonOperator::Lt => "_lt",
            ComparisonOperator::Lte => "_lte",
            ComparisonOperator::Neq => "_neq",
            ComparisonOperator::Nin => "_nin",
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = FilterError;

    /// Accepts the `_eq` wire form and the bare `eq` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix('_').unwrap_or(s);
        match bare {
            "eq" => Ok(ComparisonOperator::Eq),
            "gt" => Ok(ComparisonOperator::Gt),
            "gte" => Ok(ComparisonOperator::Gte),
            "in" => Ok(ComparisonOperator::In),
            "lt" => Ok(ComparisonOperator::Lt),
            "lte" => Ok(ComparisonOperator::Lte),
            "neq" => Ok(ComparisonOperator::Neq),
            "nin" => Ok(ComparisonOperator::Nin),
            _ => Err(FilterError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Sort direction tokens accepted in `orderBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}
