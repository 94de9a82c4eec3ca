use crate::domain::error::DomainError;
use crate::domain::model::id::BookId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("book not found: ID {0}")]
    BookNotFound(BookId),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
