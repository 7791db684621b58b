use model::filter::error::FilterError;
use thiserror::Error;

/// Failure of a combined plan-then-read operation.
///
/// The plain CRUD operations return the collection's own error type so
/// backend failures reach the caller unmodified.
#[derive(Debug, Error)]
pub enum ConnectorError<E>
where
    E: std::error::Error + 'static,
{
    /// The filter request could not be compiled; nothing was sent to the backend.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// The backend rejected or failed the operation.
    #[error("Backend error: {0}")]
    Backend(#[source] E),
}
