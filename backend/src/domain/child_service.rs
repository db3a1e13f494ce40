use shared::{Child, CreateChildRequest};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::factory::EntityFactory;
use crate::storage::Storage;

/// Service for managing children
#[derive(Clone)]
pub struct ChildService {
    storage: Arc<dyn Storage>,
    factory: EntityFactory,
}

impl ChildService {
    /// Create a new ChildService
    pub fn new(storage: Arc<dyn Storage>, factory: EntityFactory) -> Self {
        Self { storage, factory }
    }

    /// Create a new child, generating id and timestamp when omitted
    pub async fn create_child(&self, request: CreateChildRequest) -> DomainResult<Child> {
        info!("Creating child: name={}, id={:?}", request.name, request.id);

        let child = self.factory.child(request);
        self.storage.store_child(&child).await?;

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Get a child by ID
    pub async fn get_child(&self, child_id: &str) -> DomainResult<Option<Child>> {
        let child = self.storage.get_child(child_id).await?;
        if child.is_none() {
            warn!("Child not found: {}", child_id);
        }
        Ok(child)
    }

    /// Get a child by ID, failing with NotFound when it does not exist
    pub async fn require_child(&self, child_id: &str) -> DomainResult<Child> {
        self.get_child(child_id)
            .await?
            .ok_or_else(DomainError::child_not_found)
    }

    /// List all children
    pub async fn list_children(&self) -> DomainResult<Vec<Child>> {
        let children = self.storage.list_children().await?;
        info!("Found {} children", children.len());
        Ok(children)
    }
}
