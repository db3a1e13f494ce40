use crate::storage::StorageError;

pub const CHILD_NOT_FOUND: &str = "Criança não encontrada";
pub const INVALID_SUBJECT: &str = "Disciplina inválida";

/// Failure taxonomy shared by every domain service.
///
/// Each variant aborts the request that produced it; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The referenced child does not exist
    #[error("{0}")]
    NotFound(String),

    /// The request references something invalid (e.g. an unknown subject)
    #[error("{0}")]
    BadRequest(String),

    /// A caller-supplied id collides with an existing entity
    #[error("{0}")]
    Conflict(String),

    /// Rendering or I/O failure; carries the underlying cause
    #[error("{0}")]
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn child_not_found() -> Self {
        DomainError::NotFound(CHILD_NOT_FOUND.to_string())
    }

    pub fn invalid_subject() -> Self {
        DomainError::BadRequest(INVALID_SUBJECT.to_string())
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnknownChild(_) => DomainError::child_not_found(),
            StorageError::DuplicateId { kind, .. } => {
                DomainError::Conflict(format!("ID de {} já existe", kind))
            }
        }
    }
}
