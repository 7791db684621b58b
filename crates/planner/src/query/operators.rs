use model::filter::{
    error::FilterError,
    operator::{ComparisonOperator, SortDirection},
};

pub const AND: &str = "$and";
pub const OR: &str = "$or";
/// `_not` matches documents for which none of the listed clauses hold.
pub const NOR: &str = "$nor";

/// Backend operator for a comparison.
pub fn operator_for(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::Eq => "$eq",
        ComparisonOperator::Gt => "$gt",
        ComparisonOperator::Gte => "$gte",
        ComparisonOperator::In => "$in",
        ComparisonOperator::Lt => "$lt",
        ComparisonOperator::Lte => "$lte",
        ComparisonOperator::Neq => "$ne",
        ComparisonOperator::Nin => "$nin",
    }
}

/// Backend operator for a raw request token such as `_neq`.
pub fn operator_for_token(token: &str) -> Result<&'static str, FilterError> {
    token.parse().map(operator_for)
}

/// Backend sort value: `1` ascending, `-1` descending.
pub fn sort_value_for(direction: SortDirection) -> i32 {
    match direction {
        SortDirection::Asc => 1,
        SortDirection::Desc => -1,
    }
}

/// Backend sort value for a raw request token.
pub fn sort_value_for_token(token: &str) -> Result<i32, FilterError> {
    token.parse().map(sort_value_for)
}
