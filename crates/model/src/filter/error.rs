use thiserror::Error;

/// Errors raised while parsing or compiling a filter request.
///
/// Compilation is all-or-nothing: when one of these is returned no selector
/// or options have been produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A filter references a field the collection schema does not declare.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An operator or sort token outside the supported set.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// The request or expression does not have the expected shape.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// A requested page size that is zero or negative.
    #[error("Invalid limit {0}: must be a positive integer")]
    InvalidLimit(i64),

    /// Combinators nested beyond the supported depth.
    #[error("Expression nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),
}

impl FilterError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FilterError::MalformedExpression(message.into())
    }
}
