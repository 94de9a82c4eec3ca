#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid status: '{given}' (expected 'available' or 'borrowed')")]
    InvalidStatus { given: String },
}
