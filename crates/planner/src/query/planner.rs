use crate::{
    plan::CompiledQuery,
    query::{compiler::ExpressionCompiler, operators::sort_value_for},
};
use model::{
    core::selector::Selector,
    filter::{error::FilterError, request::FilterRequest},
    query::options::{QueryOptions, SortSpec},
    schema::registry::SchemaResolver,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Ceiling applied when no setting overrides it.
pub const DEFAULT_MAX_DOCUMENTS: u64 = 1000;

/// Turns a [`FilterRequest`] into a backend selector, sort and limit.
///
/// The pagination ceiling is fixed at construction; the planner holds no
/// other state and can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPlanner {
    max_documents: u64,
}

impl FilterPlanner {
    /// A ceiling of zero is raised to one so every plan keeps a positive limit.
    pub fn new(max_documents: u64) -> Self {
        Self {
            max_documents: max_documents.max(1),
        }
    }

    pub fn max_documents(&self) -> u64 {
        self.max_documents
    }

    pub fn plan<R: SchemaResolver + ?Sized>(
        &self,
        schema: &R,
        request: &FilterRequest,
    ) -> Result<CompiledQuery, FilterError> {
        let compiler = ExpressionCompiler::new(schema);
        let mut selector = Selector::new();
        let mut touched_fields = BTreeSet::new();

        // Clauses merge in declared order; see `Selector::merge` for collisions.
        for clause in request.filter.clauses() {
            let Some(fragment) = compiler.compile_clause(clause, &mut touched_fields)? else {
                continue;
            };
            for key in selector.merge(fragment) {
                warn!(key = %key, "Selector key overwritten by a later clause");
            }
        }

        // Sort keys are taken as given; they are not schema-resolved.
        let mut sort = SortSpec::new();
        for key in &request.order_by {
            sort.push(key.field.as_str(), sort_value_for(key.direction));
        }

        let limit = self.clamp_limit(request.requested_limit())?;

        debug!(
            clauses = request.filter.clauses().len(),
            touched = ?touched_fields,
            limit,
            "Compiled filter request"
        );

        Ok(CompiledQuery {
            selector,
            options: QueryOptions {
                sort,
                limit: Some(limit),
            },
            touched_fields,
        })
    }

    fn clamp_limit(&self, requested: u64) -> Result<u64, FilterError> {
        if requested == 0 {
            return Err(FilterError::InvalidLimit(0));
        }
        if requested > self.max_documents {
            warn!(
                requested,
                ceiling = self.max_documents,
                "Requested limit exceeds maxDocumentsPerRequest; clamping"
            );
        }
        Ok(requested.min(self.max_documents))
    }
}

impl Default for FilterPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENTS)
    }
}
