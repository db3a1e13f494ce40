use shared::Subject;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::Storage;

/// The fixed curriculum every store is seeded with
pub fn default_subjects() -> Vec<Subject> {
    [
        ("math", "Matemática", "Números e operações"),
        ("hist", "História", "Eventos passados"),
        ("sci", "Ciências", "Natureza e experimentos"),
    ]
    .into_iter()
    .map(|(id, name, description)| Subject {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}

/// Read-only access to subjects
#[derive(Clone)]
pub struct SubjectService {
    storage: Arc<dyn Storage>,
}

impl SubjectService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn list_subjects(&self) -> DomainResult<Vec<Subject>> {
        let subjects = self.storage.list_subjects().await?;
        info!("Found {} subjects", subjects.len());
        Ok(subjects)
    }

    /// Resolve a subject referenced by a goal or activity; unknown ids are a
    /// BadRequest.
    pub async fn require_subject(&self, subject_id: &str) -> DomainResult<Subject> {
        match self.storage.get_subject(subject_id).await? {
            Some(subject) => Ok(subject),
            None => {
                warn!("Unknown subject: {}", subject_id);
                Err(DomainError::invalid_subject())
            }
        }
    }
}
