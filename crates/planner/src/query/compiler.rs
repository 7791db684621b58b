use crate::query::operators::{self, operator_for};
use model::{
    core::selector::Selector,
    filter::{
        error::FilterError,
        expr::{FieldPredicate, FilterClause, MAX_EXPRESSION_DEPTH, SEARCH_KEY},
    },
    schema::registry::SchemaResolver,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Rewrites filter clauses into backend selector fragments.
///
/// Field names are resolved against the collection schema so localized
/// fields target their locale container. Values are passed through as-is.
pub struct ExpressionCompiler<'a, R: SchemaResolver + ?Sized> {
    schema: &'a R,
}

impl<'a, R: SchemaResolver + ?Sized> ExpressionCompiler<'a, R> {
    pub fn new(schema: &'a R) -> Self {
        Self { schema }
    }

    /// Compiles `{ field: { op: value } }` into `(backend_field, { backend_op: value })`.
    pub fn compile_predicate(
        &self,
        predicate: &FieldPredicate,
    ) -> Result<(String, Value), FilterError> {
        let meta = self.schema.resolve(&predicate.field)?;
        let backend_field = meta.storage_path(&predicate.field);

        let mut doc = Map::new();
        doc.insert(
            operator_for(predicate.operator).to_string(),
            predicate.value.clone(),
        );

        Ok((backend_field, Value::Object(doc)))
    }

    /// Compiles one clause into a selector fragment, recording every field
    /// it references in `touched`.
    ///
    /// Returns `None` for `search`, which has no backend counterpart yet.
    pub fn compile_clause(
        &self,
        clause: &FilterClause,
        touched: &mut BTreeSet<String>,
    ) -> Result<Option<Selector>, FilterError> {
        self.compile_at(clause, touched, 0)
    }

    /// Compiles the members of a combinator into the backend array form.
    pub fn compile_combinator(
        &self,
        clauses: &[FilterClause],
        touched: &mut BTreeSet<String>,
    ) -> Result<Value, FilterError> {
        self.compile_members(clauses, touched, 0)
    }

    fn compile_at(
        &self,
        clause: &FilterClause,
        touched: &mut BTreeSet<String>,
        depth: usize,
    ) -> Result<Option<Selector>, FilterError> {
        let (key, value) = match clause {
            FilterClause::And(items) => (
                operators::AND.to_string(),
                self.compile_members(items, touched, depth)?,
            ),
            FilterClause::Or(items) => (
                operators::OR.to_string(),
                self.compile_members(items, touched, depth)?,
            ),
            FilterClause::Not(items) => (
                operators::NOR.to_string(),
                self.compile_members(items, touched, depth)?,
            ),
            FilterClause::Search(_) => return Ok(None),
            FilterClause::Field(predicate) => {
                let compiled = self.compile_predicate(predicate)?;
                touched.insert(predicate.field.clone());
                compiled
            }
        };

        let mut fragment = Selector::new();
        fragment.insert(key, value);
        Ok(Some(fragment))
    }

    fn compile_members(
        &self,
        clauses: &[FilterClause],
        touched: &mut BTreeSet<String>,
        depth: usize,
    ) -> Result<Value, FilterError> {
        let level = depth + 1;
        if level > MAX_EXPRESSION_DEPTH {
            return Err(FilterError::DepthExceeded(MAX_EXPRESSION_DEPTH));
        }

        let mut compiled = Vec::with_capacity(clauses.len());
        for clause in clauses {
            match self.compile_at(clause, touched, level)? {
                Some(fragment) => compiled.push(Value::from(fragment)),
                None => {
                    return Err(FilterError::MalformedExpression(format!(
                        "'{SEARCH_KEY}' is only allowed at the top level"
                    )));
                }
            }
        }

        Ok(Value::Array(compiled))
    }
}
